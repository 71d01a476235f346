use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::LoanError;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a client
pub type ClientId = Uuid;

/// amortization method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmortizationMethod {
    /// equal total payment every period (annuity / french method)
    ConstantInstallment,
    /// equal principal every period, interest on the remaining balance
    ConstantPrincipal,
}

impl AmortizationMethod {
    pub fn tag(&self) -> &'static str {
        match self {
            AmortizationMethod::ConstantInstallment => "CONSTANT_INSTALLMENT",
            AmortizationMethod::ConstantPrincipal => "CONSTANT_PRINCIPAL",
        }
    }
}

impl fmt::Display for AmortizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AmortizationMethod {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONSTANT_INSTALLMENT" => Ok(AmortizationMethod::ConstantInstallment),
            "CONSTANT_PRINCIPAL" => Ok(AmortizationMethod::ConstantPrincipal),
            _ => Err(LoanError::InvalidAmortizationType { tag: s.to_string() }),
        }
    }
}

/// repayment frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn tag(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Biweekly => "BIWEEKLY",
            Frequency::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Frequency {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "BIWEEKLY" => Ok(Frequency::Biweekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            _ => Err(LoanError::InvalidFrequency { tag: s.to_string() }),
        }
    }
}

/// installment status
///
/// `OnTime` moves to `Due` or `Overdue` as the calendar advances. `Paid` and
/// `Cancelled` are set by payment and cancellation workflows outside the
/// schedule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    /// due date still ahead
    #[default]
    OnTime,
    /// due today
    Due,
    /// due date passed without settlement
    Overdue,
    Paid,
    Cancelled,
}

impl InstallmentStatus {
    /// paid or cancelled installments are never re-evaluated
    pub fn is_terminal(&self) -> bool {
        matches!(self, InstallmentStatus::Paid | InstallmentStatus::Cancelled)
    }
}

/// client status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    Active,
    Inactive,
    Blocked,
}
