use crate::domain::id::DocId;
use crate::domain::money::Amount;
use crate::domain::ports::{RestaurantStoreBox, RiderStoreBox, WithdrawalStoreBox};
use crate::domain::restaurant::Restaurant;
use crate::domain::withdrawal::{WithdrawalRequest, WithdrawalStatus};
use crate::error::{CoreError, Result};

/// Admin decision on a withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Decline,
}

/// Converts withdrawal requests into wallet debits and records manual
/// restaurant payouts.
///
/// Approval re-checks the wallet at settlement time; the amount recorded at
/// request creation is never trusted, since the balance may have moved. The
/// status flip and the wallet debit are one atomic store batch: a partial
/// state is unobservable.
pub struct Settlement {
    withdrawals: WithdrawalStoreBox,
    riders: RiderStoreBox,
    restaurants: RestaurantStoreBox,
}

impl Settlement {
    pub fn new(
        withdrawals: WithdrawalStoreBox,
        riders: RiderStoreBox,
        restaurants: RestaurantStoreBox,
    ) -> Self {
        Self {
            withdrawals,
            riders,
            restaurants,
        }
    }

    pub async fn settle(&self, request_id: &DocId, decision: Decision) -> Result<WithdrawalRequest> {
        let request = self
            .withdrawals
            .get(request_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(request_id.to_string()))?;
        if request.status.is_settled() {
            return Err(CoreError::AlreadySettled);
        }

        match decision {
            Decision::Decline => {
                let declined = self
                    .withdrawals
                    .update_status(
                        request_id,
                        WithdrawalStatus::Pending,
                        WithdrawalStatus::Declined,
                    )
                    .await;
                match declined {
                    // Another admin settled it between our read and write.
                    Err(CoreError::Conflict) => Err(CoreError::AlreadySettled),
                    other => other,
                }
            }
            Decision::Approve => {
                let rider = self
                    .riders
                    .get(&request.rider)
                    .await?
                    .ok_or_else(|| CoreError::NotFound(request.rider.to_string()))?;
                if request.amount.value() > rider.wallet_balance.value() {
                    return Err(CoreError::InsufficientFunds {
                        requested: request.amount.value(),
                        available: rider.wallet_balance.value(),
                    });
                }
                self.withdrawals
                    .complete_and_debit(request_id, &request.rider, request.amount)
                    .await
            }
        }
    }

    /// Records an out-of-band bank transfer to a restaurant. Non-reversible;
    /// there is no linked withdrawal request and no precondition beyond the
    /// amount being positive (enforced by `Amount`).
    pub async fn log_manual_payout(
        &self,
        restaurant_id: &DocId,
        amount: Amount,
    ) -> Result<Restaurant> {
        self.restaurants.add_payout(restaurant_id, amount).await
    }
}
