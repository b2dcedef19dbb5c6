use super::id::DocId;
use super::money::Balance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a digital-product order.
///
/// The machine is monotonic: once a pending order is approved or declined it
/// is terminal. The upstream admin tooling allowed arbitrary overwrites; the
/// core models the strict version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitalOrderStatus {
    Pending,
    Approved,
    Declined,
}

impl DigitalOrderStatus {
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Declined)
        )
    }

    pub fn is_terminal(self) -> bool {
        self != Self::Pending
    }
}

impl fmt::Display for DigitalOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// A digital-product order placed through the customer-facing app.
///
/// `order_amount` is immutable after creation; the admin side only ever
/// moves the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalOrder {
    pub id: DocId,
    pub customer_name: String,
    pub customer_email: String,
    pub order_amount: Balance,
    pub order_status: DigitalOrderStatus,
    pub ordered_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<String>,
    /// Opaque reference to the uploaded payment slip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_slip: Option<String>,
}
