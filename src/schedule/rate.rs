use rust_decimal::Decimal;

use crate::config::RoundingPolicy;
use crate::decimal::Rate;
use crate::types::Frequency;

/// periods a quoted rate is split into for each frequency
///
/// these divisors are the back-office's historical convention, not an
/// annual-to-period conversion (biweekly divides by 2, daily by 30).
pub fn period_divisor(frequency: Frequency) -> u32 {
    match frequency {
        Frequency::Monthly => 1,
        Frequency::Biweekly => 2,
        Frequency::Weekly => 4,
        Frequency::Daily => 30,
    }
}

/// per-period rate for a quoted rate and frequency, at the policy's rate scale
pub fn normalize(annual_rate: Rate, frequency: Frequency, policy: &RoundingPolicy) -> Rate {
    let divisor = Decimal::from(period_divisor(frequency));
    policy.rate(annual_rate.as_decimal() / divisor)
}

/// like [`normalize`], for a frequency still in tag form
pub fn normalize_tag(annual_rate: Rate, frequency: &str, policy: &RoundingPolicy) -> crate::errors::Result<Rate> {
    Ok(normalize(annual_rate, frequency.parse()?, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LoanError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_divisors() {
        let policy = RoundingPolicy::default();
        let rate = Rate::from_decimal(dec!(0.12));

        assert_eq!(normalize(rate, Frequency::Monthly, &policy).as_decimal(), dec!(0.12));
        assert_eq!(normalize(rate, Frequency::Biweekly, &policy).as_decimal(), dec!(0.06));
        assert_eq!(normalize(rate, Frequency::Weekly, &policy).as_decimal(), dec!(0.03));
        assert_eq!(normalize(rate, Frequency::Daily, &policy).as_decimal(), dec!(0.004));
    }

    #[test]
    fn test_ten_digit_precision() {
        let policy = RoundingPolicy::default();
        let rate = normalize(Rate::from_decimal(dec!(0.1)), Frequency::Daily, &policy);
        assert_eq!(rate.as_decimal(), dec!(0.0033333333));

        let rate = normalize(Rate::from_decimal(dec!(0.2)), Frequency::Daily, &policy);
        assert_eq!(rate.as_decimal(), dec!(0.0066666667));
    }

    #[test]
    fn test_unknown_tag() {
        let policy = RoundingPolicy::default();
        assert_eq!(
            normalize_tag(Rate::from_percentage(5), "quarterly", &policy),
            Err(LoanError::InvalidFrequency { tag: "quarterly".to_string() })
        );
        assert_eq!(
            normalize_tag(Rate::from_percentage(8), "weekly", &policy).unwrap().as_decimal(),
            dec!(0.02)
        );
    }
}
