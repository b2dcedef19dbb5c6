use super::id::DocId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of delivery request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    Parcel,
    Grocery,
    Pharmacy,
    Food,
}

/// Lifecycle of a parcel / delivery request.
///
/// Rescheduled loops back to pending: the order re-enters the dispatch queue
/// and may be assigned to a different rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    Delivered,
    Returned,
    Rescheduled,
}

impl DeliveryStatus {
    pub fn can_transition_to(self, target: Self) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, target),
            (Pending, Assigned)
                | (Assigned, Delivered | Returned | Rescheduled)
                | (Rescheduled, Pending)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Returned)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
            Self::Rescheduled => "rescheduled",
        };
        f.write_str(s)
    }
}

/// A parcel or delivery request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrder {
    pub id: DocId,
    pub order_type: DeliveryKind,
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_rider: Option<DocId>,
    pub created_at: DateTime<Utc>,
}

/// Conditional patch for a delivery order; status and rider move together.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPatch {
    pub status: DeliveryStatus,
    pub assigned_rider: Option<DocId>,
}

impl DeliveryPatch {
    pub fn status(status: DeliveryStatus) -> Self {
        Self {
            status,
            assigned_rider: None,
        }
    }

    pub fn assign(rider: DocId) -> Self {
        Self {
            status: DeliveryStatus::Assigned,
            assigned_rider: Some(rider),
        }
    }
}
