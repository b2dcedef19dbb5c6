use super::delivery_order::{DeliveryKind, DeliveryOrder, DeliveryStatus};
use chrono::{DateTime, Utc};

/// Typed query filter over an order collection.
///
/// The store never receives an opaque query string; every predicate is a
/// named field here. Date ranges are half-open: `from` inclusive, `until`
/// exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFilter<S> {
    status: Option<S>,
    created_from: Option<DateTime<Utc>>,
    created_until: Option<DateTime<Utc>>,
}

impl<S> Default for OrderFilter<S> {
    fn default() -> Self {
        Self {
            status: None,
            created_from: None,
            created_until: None,
        }
    }
}

impl<S: Copy + PartialEq> OrderFilter<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_eq(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to `from <= created_at < until`.
    pub fn created_between(mut self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self.created_until = Some(until);
        self
    }

    pub fn created_before(mut self, until: DateTime<Utc>) -> Self {
        self.created_until = Some(until);
        self
    }

    pub fn matches(&self, status: S, created_at: DateTime<Utc>) -> bool {
        if let Some(expected) = self.status
            && status != expected
        {
            return false;
        }
        if let Some(from) = self.created_from
            && created_at < from
        {
            return false;
        }
        if let Some(until) = self.created_until
            && created_at >= until
        {
            return false;
        }
        true
    }
}

/// Filter for delivery requests: the base order predicates plus membership
/// in a set of delivery kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryFilter {
    pub base: OrderFilter<DeliveryStatus>,
    kinds: Option<Vec<DeliveryKind>>,
}

impl DeliveryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_eq(mut self, status: DeliveryStatus) -> Self {
        self.base = self.base.status_eq(status);
        self
    }

    pub fn kind_in(mut self, kinds: impl IntoIterator<Item = DeliveryKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn matches(&self, order: &DeliveryOrder) -> bool {
        if let Some(kinds) = &self.kinds
            && !kinds.contains(&order.order_type)
        {
            return false;
        }
        self.base.matches(order.status, order.created_at)
    }
}
