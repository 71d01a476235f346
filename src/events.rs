use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AmortizationMethod, ClientId, InstallmentStatus, LoanId};

/// events emitted by the loan service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LoanCreated {
        loan_id: LoanId,
        client_id: ClientId,
        principal: Money,
        method: AmortizationMethod,
        installment_count: u32,
        timestamp: DateTime<Utc>,
    },
    InstallmentStatusChanged {
        loan_id: LoanId,
        installment_number: u32,
        due_date: NaiveDate,
        old_status: InstallmentStatus,
        new_status: InstallmentStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_take_drains_store() {
        let mut store = EventStore::new();
        store.emit(Event::LoanCreated {
            loan_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            principal: Money::from_major(1_000),
            method: AmortizationMethod::ConstantPrincipal,
            installment_count: 3,
            timestamp: Utc::now(),
        });

        assert_eq!(store.events().len(), 1);
        assert_eq!(store.take_events().len(), 1);
        assert!(store.events().is_empty());
    }
}
