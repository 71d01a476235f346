use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// rounding mode for midpoint values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// half away from zero
    #[default]
    HalfUp,
    /// banker's rounding
    HalfEven,
    /// truncate
    Down,
}

impl Rounding {
    fn strategy(&self) -> RoundingStrategy {
        match self {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::Down => RoundingStrategy::ToZero,
        }
    }
}

/// rounding applied after each schedule arithmetic step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingPolicy {
    /// fractional digits kept on monetary values
    pub money_dp: u32,
    /// fractional digits kept on the period rate
    pub rate_dp: u32,
    pub mode: Rounding,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            money_dp: 2,
            rate_dp: 10,
            mode: Rounding::HalfUp,
        }
    }
}

impl RoundingPolicy {
    /// round a raw value to the money scale
    pub fn money(&self, value: Decimal) -> Money {
        Money::from_decimal(value.round_dp_with_strategy(self.money_dp, self.mode.strategy()))
    }

    /// round a raw value to the period-rate scale
    pub fn rate(&self, value: Decimal) -> Rate {
        Rate::from_decimal(value.round_dp_with_strategy(self.rate_dp, self.mode.strategy()))
    }
}

/// engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub rounding: RoundingPolicy,
}

impl EngineConfig {
    /// load from a json document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json).map_err(|e| LoanError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // rust_decimal holds at most 28 fractional digits
        if self.rounding.money_dp > 28 || self.rounding.rate_dp > 28 {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "scale out of range: money_dp {}, rate_dp {}",
                    self.rounding.money_dp, self.rounding.rate_dp
                ),
            });
        }
        Ok(())
    }
}
