use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{ClientId, ClientStatus};

/// borrower record, as held by the client registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: ClientStatus,
    pub created_at: NaiveDate,
}

impl Client {
    /// "first last", as shown next to a loan
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
