use super::id::DocId;
use super::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Completed,
    Declined,
}

impl WithdrawalStatus {
    pub fn is_settled(self) -> bool {
        self != Self::Pending
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// A rider's request to withdraw earnings from their wallet.
///
/// The amount is validated against the wallet at settlement time, never
/// trusted from creation: the balance may have changed since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub id: DocId,
    pub rider: DocId,
    pub amount: Amount,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
}
