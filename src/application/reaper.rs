use crate::config::ReaperConfig;
use crate::domain::filter::OrderFilter;
use crate::domain::food_order::{FoodOrderPatch, FoodOrderStatus};
use crate::domain::ports::FoodOrderStoreBox;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Note attached to an order the reaper cancels.
pub const AUTO_CANCEL_NOTE: &str =
    "Cancelled by system: the restaurant did not accept the order in time.";

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Pending orders examined.
    pub examined: usize,
    /// Orders cancelled by this sweep.
    pub cancelled: usize,
    /// Orders whose cancellation failed and was skipped.
    pub failed: usize,
}

/// Periodic policy that cancels food orders left unacknowledged by the
/// restaurant past the staleness threshold.
///
/// This is fire-and-sweep, not an exact timeout: an order may sit stale for
/// up to one tick beyond the threshold. Each cancellation is an independent
/// conditional write, so a sweep racing a human action on one order is a
/// logged warning for that order and nothing more, and re-sweeping an
/// already-cancelled order is a no-op.
pub struct StaleOrderReaper {
    orders: FoodOrderStoreBox,
    config: ReaperConfig,
}

impl StaleOrderReaper {
    pub fn new(orders: FoodOrderStoreBox, config: ReaperConfig) -> Self {
        Self { orders, config }
    }

    /// Runs a single sweep against the pending orders as of `now`.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        let pending = self
            .orders
            .list(&OrderFilter::new().status_eq(FoodOrderStatus::Pending))
            .await?;

        let mut report = SweepReport {
            examined: pending.len(),
            ..SweepReport::default()
        };
        for order in pending {
            if now - order.created_at <= self.config.stale_after {
                continue;
            }
            let cancelled = self
                .orders
                .apply_if(
                    &order.id,
                    FoodOrderStatus::Pending,
                    FoodOrderPatch::cancel(AUTO_CANCEL_NOTE),
                )
                .await;
            match cancelled {
                Ok(_) => {
                    report.cancelled += 1;
                    info!(order = %order.id, "cancelled stale food order");
                }
                Err(error) => {
                    // A concurrent admin or restaurant action beat us to the
                    // order; skip it and keep sweeping.
                    report.failed += 1;
                    warn!(order = %order.id, %error, "stale-order cancellation skipped");
                }
            }
        }
        Ok(report)
    }

    /// Runs the sweep on a fixed tick until the task is dropped. Decoupled
    /// from any UI lifetime; a failed scan is logged and retried next tick.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.config.tick);
        loop {
            interval.tick().await;
            match self.sweep(Utc::now()).await {
                Ok(report) => debug!(?report, "sweep finished"),
                Err(error) => warn!(%error, "sweep aborted; will retry next tick"),
            }
        }
    }
}
