use chrono::{Duration, Months, NaiveDate};

use crate::errors::{LoanError, Result};
use crate::types::Frequency;

/// due date of the installment at 0-based `period_index`
///
/// month steps use chrono's calendar arithmetic: a day past the end of the
/// target month clamps to its last day (jan 31 + 1 month is feb 29 in 2024).
pub fn due_date(origin: NaiveDate, period_index: u32, frequency: Frequency) -> Result<NaiveDate> {
    let date = match frequency {
        Frequency::Monthly => origin.checked_add_months(Months::new(period_index)),
        Frequency::Biweekly => origin.checked_add_signed(Duration::weeks(2 * period_index as i64)),
        Frequency::Weekly => origin.checked_add_signed(Duration::weeks(period_index as i64)),
        Frequency::Daily => origin.checked_add_signed(Duration::days(period_index as i64)),
    };

    date.ok_or_else(|| LoanError::CalculationError {
        message: format!("due date out of range: {} + {} {} periods", origin, period_index, frequency),
    })
}

/// like [`due_date`], for a frequency still in tag form
pub fn due_date_for_tag(origin: NaiveDate, period_index: u32, frequency: &str) -> Result<NaiveDate> {
    due_date(origin, period_index, frequency.parse()?)
}
