//! serializable read models for loans
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::loan::{Installment, Loan};
use crate::schedule::ScheduleSummary;
use crate::types::{AmortizationMethod, ClientId, Frequency, InstallmentStatus, LoanId};

/// loan with its client name and schedule, as shown on the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub principal: Money,
    pub origination_date: NaiveDate,
    pub interest_rate: Rate,
    pub method: AmortizationMethod,
    pub frequency: Frequency,
    pub client_id: ClientId,
    pub client_name: String,
    pub installment_count: usize,
    pub summary: ScheduleSummary,
    pub installments: Vec<InstallmentView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentView {
    pub number: u32,
    pub principal: Money,
    pub interest: Money,
    pub total: Money,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    /// days from `today` to the due date, negative once past
    pub days_until_due: i64,
}

impl InstallmentView {
    pub fn from_installment(installment: &Installment, today: NaiveDate) -> Self {
        InstallmentView {
            number: installment.number,
            principal: installment.principal,
            interest: installment.interest,
            total: installment.total,
            due_date: installment.due_date,
            status: installment.status,
            days_until_due: (installment.due_date - today).num_days(),
        }
    }
}

impl LoanView {
    pub fn from_loan(loan: &Loan, client_name: String, today: NaiveDate) -> Self {
        LoanView {
            id: loan.id,
            principal: loan.principal,
            origination_date: loan.origination_date,
            interest_rate: loan.annual_rate,
            method: loan.method,
            frequency: loan.frequency,
            client_id: loan.client_id,
            client_name,
            installment_count: loan.installment_count(),
            summary: loan.summary(),
            installments: loan
                .installments()
                .iter()
                .map(|i| InstallmentView::from_installment(i, today))
                .collect(),
        }
    }

    /// pretty json for logs and debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
