use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RoundingPolicy;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::loan::Installment;
use crate::schedule::{dates, rate};
use crate::types::AmortizationMethod;
use crate::validation::{self, LoanParameters};

/// builds installment schedules
///
/// every intermediate value is rounded through the generator's policy as soon
/// as it is computed, so later balances carry the rounding of earlier ones.
/// the final balance is left as computed; there is no true-up on the last
/// installment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator {
    policy: RoundingPolicy,
}

impl ScheduleGenerator {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RoundingPolicy {
        &self.policy
    }

    /// generate the full schedule for validated parameters
    pub fn generate(&self, params: &LoanParameters) -> Result<Vec<Installment>> {
        validation::check_terms(params)?;
        let period_rate = rate::normalize(params.annual_rate, params.frequency, &self.policy);
        self.generate_with_rate(params, period_rate)
    }

    /// generate with an already normalized period rate
    pub fn generate_with_rate(&self, params: &LoanParameters, period_rate: Rate) -> Result<Vec<Installment>> {
        match params.method {
            AmortizationMethod::ConstantInstallment => self.constant_installment(params, period_rate),
            AmortizationMethod::ConstantPrincipal => self.constant_principal(params, period_rate),
        }
    }

    /// fixed payment of the annuity: P * r * (1+r)^n / ((1+r)^n - 1)
    ///
    /// evaluated as `P * r * ratio` with `ratio = (1+r)^n / ((1+r)^n - 1)`.
    /// once `(1+r)^n` no longer fits a decimal the ratio equals 1 to every
    /// representable digit and the payment is the period interest `P * r`.
    pub fn fixed_payment(&self, principal: Money, period_rate: Rate, periods: u32) -> Result<Money> {
        let r = period_rate.as_decimal();
        if r.is_zero() {
            return Err(LoanError::CalculationError {
                message: "annuity payment undefined for a zero period rate".to_string(),
            });
        }

        let ratio = match compound_factor(r, periods) {
            Some(factor) => {
                let denominator = factor - Decimal::ONE;
                if denominator.is_zero() {
                    return Err(LoanError::CalculationError {
                        message: format!("compound factor of {} over {} periods is 1", r, periods),
                    });
                }
                factor
                    .checked_div(denominator)
                    .ok_or_else(|| overflow("annuity ratio"))?
            }
            None => Decimal::ONE,
        };

        let payment = principal
            .as_decimal()
            .checked_mul(r)
            .and_then(|v| v.checked_mul(ratio))
            .ok_or_else(|| overflow("annuity payment"))?;

        Ok(self.policy.money(payment))
    }

    fn constant_installment(&self, params: &LoanParameters, period_rate: Rate) -> Result<Vec<Installment>> {
        let r = period_rate.as_decimal();
        let fixed_payment = self.fixed_payment(params.principal, period_rate, params.installment_count)?;

        let mut installments = Vec::with_capacity(params.installment_count as usize);
        let mut balance = params.principal;

        for i in 1..=params.installment_count {
            let interest = self.policy.money(self.interest_on(balance, r)?);
            let principal = self.policy.money((fixed_payment - interest).as_decimal());
            balance = self.policy.money((balance - principal).as_decimal());

            let due = dates::due_date(params.origination_date, i - 1, params.frequency)?;
            installments.push(Installment::new(i, principal, interest, fixed_payment, due));
        }

        Ok(installments)
    }

    fn constant_principal(&self, params: &LoanParameters, period_rate: Rate) -> Result<Vec<Installment>> {
        let r = period_rate.as_decimal();
        let constant_principal = self
            .policy
            .money(params.principal.as_decimal() / Decimal::from(params.installment_count));

        let mut installments = Vec::with_capacity(params.installment_count as usize);
        let mut balance = params.principal;

        for i in 1..=params.installment_count {
            let interest = self.policy.money(self.interest_on(balance, r)?);
            let total = self.policy.money((constant_principal + interest).as_decimal());
            balance = self.policy.money((balance - constant_principal).as_decimal());

            let due = dates::due_date(params.origination_date, i - 1, params.frequency)?;
            installments.push(Installment::new(i, constant_principal, interest, total, due));
        }

        Ok(installments)
    }

    fn interest_on(&self, balance: Money, r: Decimal) -> Result<Decimal> {
        balance
            .as_decimal()
            .checked_mul(r)
            .ok_or_else(|| overflow("period interest"))
    }
}

/// (1 + r)^n by repeated multiplication, `None` past the decimal range
fn compound_factor(r: Decimal, periods: u32) -> Option<Decimal> {
    let base = Decimal::ONE + r;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(base)?;
    }
    Some(factor)
}

fn overflow(what: &str) -> LoanError {
    LoanError::CalculationError {
        message: format!("decimal overflow computing {}", what),
    }
}

/// totals of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub installment_count: usize,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_payable: Money,
    /// principal left unpaid after the last installment; rounding drift only
    pub closing_balance: Money,
}

impl ScheduleSummary {
    pub fn from_installments(principal: Money, installments: &[Installment]) -> Self {
        let total_principal: Money = installments.iter().map(|i| i.principal).sum();
        let total_interest: Money = installments.iter().map(|i| i.interest).sum();
        let total_payable: Money = installments.iter().map(|i| i.total).sum();

        Self {
            installment_count: installments.len(),
            total_principal,
            total_interest,
            total_payable,
            closing_balance: principal - total_principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frequency, InstallmentStatus};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn params(amount: Decimal, rate: Decimal, n: u32, method: AmortizationMethod) -> LoanParameters {
        LoanParameters {
            principal: Money::from_decimal(amount),
            origination_date: date(2024, 1, 1),
            annual_rate: Rate::from_decimal(rate),
            method,
            frequency: Frequency::Monthly,
            installment_count: n,
            client_id: None,
        }
    }

    fn money(d: Decimal) -> Money {
        Money::from_decimal(d)
    }

    #[test]
    fn test_constant_installment_schedule() {
        let generator = ScheduleGenerator::default();
        let p = params(dec!(1000.00), dec!(0.05), 3, AmortizationMethod::ConstantInstallment);

        let schedule = generator.generate(&p).unwrap();
        assert_eq!(schedule.len(), 3);

        let expected = [
            (dec!(317.21), dec!(50.00)),
            (dec!(333.07), dec!(34.14)),
            (dec!(349.72), dec!(17.49)),
        ];
        for (i, (installment, (principal, interest))) in schedule.iter().zip(expected).enumerate() {
            assert_eq!(installment.number, i as u32 + 1);
            assert_eq!(installment.principal, money(principal));
            assert_eq!(installment.interest, money(interest));
            assert_eq!(installment.total, money(dec!(367.21)));
            assert_eq!(installment.status, InstallmentStatus::OnTime);
        }

        // installment n falls n - 1 periods after origination
        let due: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
        assert_eq!(due, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]);

        let balances: Vec<Money> = schedule
            .iter()
            .scan(p.principal, |balance, i| {
                *balance -= i.principal;
                Some(*balance)
            })
            .collect();
        assert_eq!(balances, vec![money(dec!(682.79)), money(dec!(349.72)), Money::ZERO]);

        let summary = ScheduleSummary::from_installments(p.principal, &schedule);
        assert_eq!(summary.closing_balance, Money::ZERO);
        assert_eq!(summary.total_interest, money(dec!(101.63)));
        assert_eq!(summary.total_payable, money(dec!(1101.63)));
    }

    #[test]
    fn test_constant_principal_schedule() {
        let generator = ScheduleGenerator::default();
        let p = params(dec!(900.00), dec!(0.10), 3, AmortizationMethod::ConstantPrincipal);

        let schedule = generator.generate(&p).unwrap();
        let totals: Vec<Money> = schedule.iter().map(|i| i.total).collect();
        assert_eq!(totals, vec![money(dec!(390.00)), money(dec!(360.00)), money(dec!(330.00))]);

        let interest: Vec<Money> = schedule.iter().map(|i| i.interest).collect();
        assert_eq!(interest, vec![money(dec!(90.00)), money(dec!(60.00)), money(dec!(30.00))]);

        assert!(schedule.iter().all(|i| i.principal == money(dec!(300.00))));
        assert_eq!(ScheduleSummary::from_installments(p.principal, &schedule).closing_balance, Money::ZERO);
    }

    #[test]
    fn test_constant_principal_keeps_drift() {
        let generator = ScheduleGenerator::default();
        let p = params(dec!(100.00), dec!(0.01), 3, AmortizationMethod::ConstantPrincipal);

        let schedule = generator.generate(&p).unwrap();
        assert!(schedule.iter().all(|i| i.principal == money(dec!(33.33))));

        let summary = ScheduleSummary::from_installments(p.principal, &schedule);
        assert_eq!(summary.closing_balance, money(dec!(0.01)));
    }

    #[test]
    fn test_frequency_changes_rate_and_dates() {
        let generator = ScheduleGenerator::default();
        let mut p = params(dec!(1000.00), dec!(0.12), 2, AmortizationMethod::ConstantPrincipal);
        p.frequency = Frequency::Weekly;

        let schedule = generator.generate(&p).unwrap();
        // 0.12 / 4 = 0.03 per week
        assert_eq!(schedule[0].interest, money(dec!(30.00)));
        assert_eq!(schedule[1].interest, money(dec!(15.00)));
        assert_eq!(schedule[1].due_date, date(2024, 1, 8));
    }

    #[test]
    fn test_single_installment() {
        let generator = ScheduleGenerator::default();
        let p = params(dec!(500.00), dec!(0.05), 1, AmortizationMethod::ConstantInstallment);

        let schedule = generator.generate(&p).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].total, money(dec!(525.00)));
        assert_eq!(schedule[0].principal, money(dec!(500.00)));
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let generator = ScheduleGenerator::default();

        let p = params(dec!(0), dec!(0.05), 3, AmortizationMethod::ConstantInstallment);
        assert!(matches!(generator.generate(&p), Err(LoanError::InvalidAmount { .. })));

        let p = params(dec!(100), dec!(0.05), 0, AmortizationMethod::ConstantPrincipal);
        assert!(matches!(generator.generate(&p), Err(LoanError::InvalidInstallmentCount { .. })));

        let p = params(dec!(100), dec!(0), 3, AmortizationMethod::ConstantPrincipal);
        assert!(matches!(generator.generate(&p), Err(LoanError::InvalidInterestRate { .. })));
    }

    #[test]
    fn test_zero_period_rate_guarded() {
        let generator = ScheduleGenerator::default();
        let p = params(dec!(100), dec!(0.05), 3, AmortizationMethod::ConstantInstallment);

        assert!(matches!(
            generator.generate_with_rate(&p, Rate::ZERO),
            Err(LoanError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_long_horizon_payment_converges_to_interest() {
        let generator = ScheduleGenerator::default();

        // (1+r)^n fits a decimal but P * r * (1+r)^n does not
        let p = params(dec!(1000000), dec!(0.10), 600, AmortizationMethod::ConstantInstallment);
        let schedule = generator.generate(&p).unwrap();
        assert_eq!(schedule.len(), 600);
        assert_eq!(schedule[0].total, money(dec!(100000.00)));
        assert_eq!(schedule[0].interest, money(dec!(100000.00)));
        assert_eq!(schedule[0].principal, Money::ZERO);
        assert_eq!(schedule[599].due_date, date(2073, 12, 1));

        // (1+r)^n itself leaves the decimal range
        for (amount, rate, n, payment) in [
            (dec!(1000), dec!(1.0), 100, dec!(1000.00)),
            (dec!(1000), dec!(0.5), 170, dec!(500.00)),
            (dec!(5000), dec!(0.05), 1400, dec!(250.00)),
        ] {
            let p = params(amount, rate, n, AmortizationMethod::ConstantInstallment);
            let schedule = generator.generate(&p).unwrap();
            assert_eq!(schedule.len(), n as usize);
            assert!(schedule.iter().all(|i| i.total == money(payment)));
        }
    }

    #[test]
    fn test_payment_overflow_reported() {
        let generator = ScheduleGenerator::default();
        let huge = Money::from_decimal(Decimal::MAX);

        assert!(matches!(
            generator.fixed_payment(huge, Rate::from_decimal(dec!(2)), 3),
            Err(LoanError::CalculationError { .. })
        ));
    }

    fn method_strategy() -> impl Strategy<Value = AmortizationMethod> {
        prop_oneof![
            Just(AmortizationMethod::ConstantInstallment),
            Just(AmortizationMethod::ConstantPrincipal),
        ]
    }

    fn frequency_strategy() -> impl Strategy<Value = Frequency> {
        prop_oneof![
            Just(Frequency::Daily),
            Just(Frequency::Weekly),
            Just(Frequency::Biweekly),
            Just(Frequency::Monthly),
        ]
    }

    prop_compose! {
        fn loan_params()(
            cents in 100i64..10_000_000,
            bps in 1u32..=100,
            n in 1u32..=36,
            method in method_strategy(),
            frequency in frequency_strategy(),
            day_offset in 0i64..3650,
        ) -> LoanParameters {
            LoanParameters {
                principal: Money::from_minor(cents, 2),
                origination_date: date(2015, 1, 1) + chrono::Duration::days(day_offset),
                annual_rate: Rate::from_bps(bps),
                method,
                frequency,
                installment_count: n,
                client_id: None,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_deterministic(p in loan_params()) {
            let generator = ScheduleGenerator::default();
            prop_assert_eq!(generator.generate(&p).unwrap(), generator.generate(&p).unwrap());
        }

        #[test]
        fn prop_count_and_order(p in loan_params()) {
            let schedule = ScheduleGenerator::default().generate(&p).unwrap();
            prop_assert_eq!(schedule.len(), p.installment_count as usize);
            for (i, installment) in schedule.iter().enumerate() {
                prop_assert_eq!(installment.number, i as u32 + 1);
                prop_assert_eq!(installment.status, InstallmentStatus::OnTime);
            }
            for pair in schedule.windows(2) {
                prop_assert!(pair[0].due_date < pair[1].due_date);
            }
        }

        #[test]
        fn prop_method_invariants(p in loan_params()) {
            let schedule = ScheduleGenerator::default().generate(&p).unwrap();
            match p.method {
                AmortizationMethod::ConstantInstallment => {
                    let fixed = schedule[0].total;
                    for installment in &schedule {
                        prop_assert_eq!(installment.total, fixed);
                        prop_assert_eq!(installment.principal + installment.interest, fixed);
                    }
                }
                AmortizationMethod::ConstantPrincipal => {
                    let principal = schedule[0].principal;
                    for installment in &schedule {
                        prop_assert_eq!(installment.principal, principal);
                        prop_assert_eq!(installment.principal + installment.interest, installment.total);
                    }
                }
            }
        }

        #[test]
        fn prop_balance_closes_within_tolerance(p in loan_params()) {
            let schedule = ScheduleGenerator::default().generate(&p).unwrap();
            let summary = ScheduleSummary::from_installments(p.principal, &schedule);
            let tolerance = Money::CENT.as_decimal() * Decimal::from(p.installment_count);
            prop_assert!(summary.closing_balance.abs().as_decimal() <= tolerance);
        }
    }
}
