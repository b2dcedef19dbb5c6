use super::id::DocId;
use super::money::Balance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a food order.
///
/// Forward progress runs pending → preparing → readyForPickup → assigned →
/// onTheWay → completed, with the intermediate hand-off states skippable.
/// Cancellation is reachable from every non-terminal state; completed and
/// cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodOrderStatus {
    Pending,
    Preparing,
    ReadyForPickup,
    Assigned,
    OnTheWay,
    Completed,
    Cancelled,
}

impl FoodOrderStatus {
    pub fn can_transition_to(self, target: Self) -> bool {
        use FoodOrderStatus::*;
        match (self, target) {
            (Pending, Preparing) => true,
            (Preparing, ReadyForPickup | Assigned | OnTheWay) => true,
            (ReadyForPickup, Assigned | OnTheWay) => true,
            (Assigned, OnTheWay) => true,
            (OnTheWay, Completed) => true,
            // Manual or reaper cancellation from any live state.
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for FoodOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::ReadyForPickup => "readyForPickup",
            Self::Assigned => "assigned",
            Self::OnTheWay => "onTheWay",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One line of a food order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedItem {
    pub item: DocId,
    pub quantity: u32,
}

/// A restaurant order placed through the customer ordering flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodOrder {
    pub id: DocId,
    pub restaurant: DocId,
    #[serde(default)]
    pub ordered_items: Vec<OrderedItem>,
    pub delivery_charge: Balance,
    pub food_total: Balance,
    pub order_status: FoodOrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_rider: Option<DocId>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FoodOrder {
    pub fn grand_total(&self) -> Balance {
        self.delivery_charge + self.food_total
    }
}

/// Multi-field patch applied to a food order in one conditional write.
///
/// Status, rider assignment and note travel together so that a combined
/// transition (assign rider + advance status) can never be half-applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodOrderPatch {
    pub status: FoodOrderStatus,
    pub assigned_rider: Option<DocId>,
    pub note: Option<String>,
}

impl FoodOrderPatch {
    pub fn status(status: FoodOrderStatus) -> Self {
        Self {
            status,
            assigned_rider: None,
            note: None,
        }
    }

    pub fn assign(rider: DocId, status: FoodOrderStatus) -> Self {
        Self {
            status,
            assigned_rider: Some(rider),
            note: None,
        }
    }

    pub fn cancel(note: impl Into<String>) -> Self {
        Self {
            status: FoodOrderStatus::Cancelled,
            assigned_rider: None,
            note: Some(note.into()),
        }
    }
}
