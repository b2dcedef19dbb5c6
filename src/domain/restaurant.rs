use super::id::DocId;
use super::money::Balance;
use serde::{Deserialize, Serialize};

/// A partner restaurant.
///
/// `total_payouts` is monotonically non-decreasing; it only grows when an
/// admin logs an out-of-band bank transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: DocId,
    pub name: String,
    pub total_payouts: Balance,
}
