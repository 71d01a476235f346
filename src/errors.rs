use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::{ClientId, LoanId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid amount: {amount:?}, must be present and positive")]
    InvalidAmount {
        amount: Option<Money>,
    },

    #[error("invalid origination date: {date:?} is missing or after {today}")]
    InvalidDate {
        date: Option<NaiveDate>,
        today: NaiveDate,
    },

    #[error("invalid installment count: {count:?}, must be at least 1")]
    InvalidInstallmentCount {
        count: Option<u32>,
    },

    #[error("invalid interest rate: {rate:?}, must be present and positive")]
    InvalidInterestRate {
        rate: Option<Rate>,
    },

    #[error("invalid amortization type: {tag}")]
    InvalidAmortizationType {
        tag: String,
    },

    #[error("invalid frequency: {tag}")]
    InvalidFrequency {
        tag: String,
    },

    #[error("client reference missing")]
    MissingClientReference,

    #[error("client not found: {id}")]
    ClientNotFound {
        id: ClientId,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("invalid schedule: {message}")]
    InvalidSchedule {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
