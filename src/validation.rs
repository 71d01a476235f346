//! loan parameter validation
//!
//! [`LoanRequest`] is what the form layer hands over: every field optional,
//! tags as raw strings. [`LoanParameters::from_request`] is the only way the
//! service turns one into typed parameters, so nothing reaches the schedule
//! generator without passing [`validate`] first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{AmortizationMethod, ClientId, Frequency};

/// raw loan input as submitted by the caller
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanRequest {
    pub amount: Option<Money>,
    #[serde(rename = "date")]
    pub origination_date: Option<NaiveDate>,
    pub interest_rate: Option<Rate>,
    #[serde(rename = "amortizationType")]
    pub amortization_method: String,
    pub frequency: String,
    #[serde(rename = "numberOfInstallments")]
    pub installment_count: Option<u32>,
    pub client_id: Option<ClientId>,
}

/// validated, typed loan parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub origination_date: NaiveDate,
    pub annual_rate: Rate,
    pub method: AmortizationMethod,
    pub frequency: Frequency,
    pub installment_count: u32,
    pub client_id: Option<ClientId>,
}

impl LoanParameters {
    /// validate a request against `today` and parse its tags
    pub fn from_request(request: &LoanRequest, today: NaiveDate) -> Result<Self> {
        validate(request, today)?;

        // validate() has already rejected every missing field below
        let (Some(principal), Some(origination_date), Some(annual_rate), Some(installment_count)) = (
            request.amount,
            request.origination_date,
            request.interest_rate,
            request.installment_count,
        ) else {
            return Err(LoanError::InvalidSchedule {
                message: "incomplete loan request".to_string(),
            });
        };

        Ok(Self {
            principal,
            origination_date,
            annual_rate,
            method: request.amortization_method.parse()?,
            frequency: request.frequency.parse()?,
            installment_count,
            client_id: request.client_id,
        })
    }
}

/// check a loan request; the first failing rule wins
///
/// rules are checked in order: amount, origination date, installment count,
/// interest rate, amortization method. frequency is not checked here, the
/// rate normalizer reports it.
pub fn validate(request: &LoanRequest, today: NaiveDate) -> Result<()> {
    check_amount(request.amount)?;

    match request.origination_date {
        Some(date) if date <= today => {}
        date => return Err(LoanError::InvalidDate { date, today }),
    }

    check_installment_count(request.installment_count)?;
    check_interest_rate(request.interest_rate)?;
    request.amortization_method.parse::<AmortizationMethod>()?;

    Ok(())
}

/// re-check the date independent terms of already typed parameters
pub fn check_terms(params: &LoanParameters) -> Result<()> {
    check_amount(Some(params.principal))?;
    check_installment_count(Some(params.installment_count))?;
    check_interest_rate(Some(params.annual_rate))
}

fn check_amount(amount: Option<Money>) -> Result<()> {
    match amount {
        Some(a) if a.is_positive() => Ok(()),
        amount => Err(LoanError::InvalidAmount { amount }),
    }
}

fn check_installment_count(count: Option<u32>) -> Result<()> {
    match count {
        Some(n) if n >= 1 => Ok(()),
        count => Err(LoanError::InvalidInstallmentCount { count }),
    }
}

fn check_interest_rate(rate: Option<Rate>) -> Result<()> {
    match rate {
        Some(r) if r.is_positive() => Ok(()),
        rate => Err(LoanError::InvalidInterestRate { rate }),
    }
}
