//! installment status refresh
//!
//! only `OnTime` installments move, and only forward: to `Due` on the due
//! date, to `Overdue` after it. refreshing twice against the same day is a
//! no-op the second time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::loan::Loan;
use crate::types::InstallmentStatus;

/// status of an installment due on `due_date`, seen from `today`
pub fn next_status(current: InstallmentStatus, due_date: NaiveDate, today: NaiveDate) -> InstallmentStatus {
    match current {
        InstallmentStatus::OnTime if due_date < today => InstallmentStatus::Overdue,
        InstallmentStatus::OnTime if due_date == today => InstallmentStatus::Due,
        other => other,
    }
}

/// one status change applied by [`refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub installment_number: u32,
    pub from: InstallmentStatus,
    pub to: InstallmentStatus,
}

/// loan after a refresh
#[derive(Debug, Clone, PartialEq)]
pub struct Refreshed {
    pub loan: Loan,
    pub transitions: Vec<StatusTransition>,
}

impl Refreshed {
    /// true when at least one installment changed status
    pub fn changed(&self) -> bool {
        !self.transitions.is_empty()
    }
}

/// re-evaluate every installment of `loan` against `today`
pub fn refresh(mut loan: Loan, today: NaiveDate) -> Refreshed {
    let mut transitions = Vec::new();

    for installment in loan.installments_mut() {
        let next = next_status(installment.status, installment.due_date, today);
        if next != installment.status {
            transitions.push(StatusTransition {
                installment_number: installment.number,
                from: installment.status,
                to: next,
            });
            installment.status = next;
        }
    }

    Refreshed { loan, transitions }
}
