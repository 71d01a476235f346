use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::schedule::ScheduleSummary;
use crate::types::{AmortizationMethod, ClientId, Frequency, InstallmentStatus, LoanId};
use crate::validation::LoanParameters;

/// one scheduled repayment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in the schedule
    pub number: u32,
    pub principal: Money,
    pub interest: Money,
    pub total: Money,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: InstallmentStatus,
}

impl Installment {
    /// new installment, on time
    pub fn new(number: u32, principal: Money, interest: Money, total: Money, due_date: NaiveDate) -> Self {
        Self {
            number,
            principal,
            interest,
            total,
            due_date,
            status: InstallmentStatus::OnTime,
        }
    }
}

/// loan aggregate owning its installment schedule
///
/// deserializing goes through [`Loan::from_parts`], so a stored loan whose
/// installments are not numbered 1..=n is rejected on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LoanRecord")]
pub struct Loan {
    pub id: LoanId,
    pub client_id: ClientId,
    pub principal: Money,
    pub origination_date: NaiveDate,
    pub annual_rate: Rate,
    pub method: AmortizationMethod,
    pub frequency: Frequency,
    installments: Vec<Installment>,
}

impl Loan {
    /// assemble a loan from its parameters and generated schedule
    pub fn new(
        id: LoanId,
        client_id: ClientId,
        params: &LoanParameters,
        installments: Vec<Installment>,
    ) -> Result<Self> {
        if installments.len() != params.installment_count as usize {
            return Err(LoanError::InvalidSchedule {
                message: format!(
                    "expected {} installments, got {}",
                    params.installment_count,
                    installments.len()
                ),
            });
        }
        Self::from_parts(
            id,
            client_id,
            params.principal,
            params.origination_date,
            params.annual_rate,
            params.method,
            params.frequency,
            installments,
        )
    }

    /// rebuild a loan from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: LoanId,
        client_id: ClientId,
        principal: Money,
        origination_date: NaiveDate,
        annual_rate: Rate,
        method: AmortizationMethod,
        frequency: Frequency,
        installments: Vec<Installment>,
    ) -> Result<Self> {
        check_sequence(&installments)?;
        Ok(Self {
            id,
            client_id,
            principal,
            origination_date,
            annual_rate,
            method,
            frequency,
            installments,
        })
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// mutable access for status changes; the sequence itself is fixed
    pub fn installments_mut(&mut self) -> impl Iterator<Item = &mut Installment> {
        self.installments.iter_mut()
    }

    pub fn installment_count(&self) -> usize {
        self.installments.len()
    }

    /// installment by 1-based number
    pub fn installment(&self, number: u32) -> Option<&Installment> {
        number
            .checked_sub(1)
            .and_then(|i| self.installments.get(i as usize))
    }

    /// set paid / cancelled from a payment or cancellation workflow
    pub fn set_status(&mut self, number: u32, status: InstallmentStatus) -> Result<()> {
        let index = number.checked_sub(1).map(|i| i as usize);
        match index.and_then(|i| self.installments.get_mut(i)) {
            Some(installment) => {
                installment.status = status;
                Ok(())
            }
            None => Err(LoanError::InvalidSchedule {
                message: format!("no installment {} on loan {}", number, self.id),
            }),
        }
    }

    /// earliest installment still on time, due or overdue
    pub fn next_open_installment(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| !i.status.is_terminal())
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_installments(self.principal, &self.installments)
    }
}

/// stored shape of a loan, checked before it becomes a [`Loan`]
#[derive(Deserialize)]
struct LoanRecord {
    id: LoanId,
    client_id: ClientId,
    principal: Money,
    origination_date: NaiveDate,
    annual_rate: Rate,
    method: AmortizationMethod,
    frequency: Frequency,
    installments: Vec<Installment>,
}

impl TryFrom<LoanRecord> for Loan {
    type Error = LoanError;

    fn try_from(record: LoanRecord) -> Result<Self> {
        Loan::from_parts(
            record.id,
            record.client_id,
            record.principal,
            record.origination_date,
            record.annual_rate,
            record.method,
            record.frequency,
            record.installments,
        )
    }
}

/// installment numbers must run 1..=n in order, with n at least 1
fn check_sequence(installments: &[Installment]) -> Result<()> {
    if installments.is_empty() {
        return Err(LoanError::InvalidSchedule {
            message: "a loan needs at least one installment".to_string(),
        });
    }
    for (i, installment) in installments.iter().enumerate() {
        let expected = i as u32 + 1;
        if installment.number != expected {
            return Err(LoanError::InvalidSchedule {
                message: format!(
                    "installment at position {} numbered {}, expected {}",
                    i, installment.number, expected
                ),
            });
        }
    }
    Ok(())
}
