use super::id::DocId;
use super::money::Balance;
use serde::{Deserialize, Serialize};

/// A delivery rider.
///
/// `wallet_balance` must never go negative. It is debited only by payout
/// settlement; earnings accrual happens outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
    pub id: DocId,
    pub full_name: String,
    pub nic: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub service_areas: Vec<String>,
    pub wallet_balance: Balance,
    pub availability: bool,
}
