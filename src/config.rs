use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Platform commission rates.
///
/// The rates are configuration rather than constants: they have changed
/// between deployments before and the reporting engines take them as an
/// explicit parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionRates {
    /// Share of the delivery charge kept by the platform.
    pub delivery_rate: Decimal,
    /// Share of the food subtotal kept by the platform.
    pub food_rate: Decimal,
}

impl Default for CommissionRates {
    fn default() -> Self {
        Self {
            delivery_rate: dec!(0.35),
            food_rate: dec!(0.05),
        }
    }
}

/// Timing policy for the stale-order reaper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReaperConfig {
    /// Interval between sweeps.
    pub tick: Duration,
    /// A pending food order older than this is cancelled on the next sweep.
    pub stale_after: chrono::Duration,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(60),
            stale_after: chrono::Duration::minutes(20),
        }
    }
}
