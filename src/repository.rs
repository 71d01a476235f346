//! storage seams for loans and clients
//!
//! the service only ever needs `save` and `find_by_id`. the in-memory
//! implementations back the tests and demos.

use std::collections::HashMap;

use crate::client::Client;
use crate::errors::Result;
use crate::loan::Loan;
use crate::types::{ClientId, LoanId};

/// loan storage
pub trait LoanRepository {
    /// insert or replace the loan with the same id
    fn save(&mut self, loan: &Loan) -> Result<()>;

    fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>>;
}

/// client lookup
pub trait ClientRepository {
    fn find_by_id(&self, id: ClientId) -> Result<Option<Client>>;
}

/// loans kept in a hash map
#[derive(Debug, Default)]
pub struct InMemoryLoanRepository {
    loans: HashMap<LoanId, Loan>,
    writes: usize,
}

impl InMemoryLoanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of `save` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}

impl LoanRepository for InMemoryLoanRepository {
    fn save(&mut self, loan: &Loan) -> Result<()> {
        self.loans.insert(loan.id, loan.clone());
        self.writes += 1;
        Ok(())
    }

    fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>> {
        Ok(self.loans.get(&id).cloned())
    }
}

/// clients kept in a hash map
#[derive(Debug, Default)]
pub struct InMemoryClientRepository {
    clients: HashMap<ClientId, Client>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }
}

impl ClientRepository for InMemoryClientRepository {
    fn find_by_id(&self, id: ClientId) -> Result<Option<Client>> {
        Ok(self.clients.get(&id).cloned())
    }
}
