use crate::domain::delivery_order::{DeliveryOrder, DeliveryPatch, DeliveryStatus};
use crate::domain::digital_order::{DigitalOrder, DigitalOrderStatus};
use crate::domain::food_order::{FoodOrder, FoodOrderPatch, FoodOrderStatus};
use crate::domain::id::DocId;
use crate::domain::ports::{DeliveryOrderStoreBox, DigitalOrderStoreBox, FoodOrderStoreBox};
use crate::error::{CoreError, Result};

/// Canonical status state machine over every order type.
///
/// Each transition takes the status the caller last read (`expected`) and is
/// applied as one conditional write: the store verifies the stored status
/// still equals `expected`, so two admins racing on the same order cannot
/// silently overwrite each other. An unreachable target is rejected before
/// any round trip with `InvalidTransition`.
pub struct Ledger {
    digital_orders: DigitalOrderStoreBox,
    food_orders: FoodOrderStoreBox,
    delivery_orders: DeliveryOrderStoreBox,
}

impl Ledger {
    pub fn new(
        digital_orders: DigitalOrderStoreBox,
        food_orders: FoodOrderStoreBox,
        delivery_orders: DeliveryOrderStoreBox,
    ) -> Self {
        Self {
            digital_orders,
            food_orders,
            delivery_orders,
        }
    }

    pub async fn transition_digital(
        &self,
        id: &DocId,
        expected: DigitalOrderStatus,
        target: DigitalOrderStatus,
    ) -> Result<DigitalOrder> {
        if !expected.can_transition_to(target) {
            return Err(invalid(expected, target));
        }
        self.digital_orders.update_status(id, expected, target).await
    }

    pub async fn transition_food(
        &self,
        id: &DocId,
        expected: FoodOrderStatus,
        target: FoodOrderStatus,
    ) -> Result<FoodOrder> {
        if !expected.can_transition_to(target) {
            return Err(invalid(expected, target));
        }
        self.food_orders
            .apply_if(id, expected, FoodOrderPatch::status(target))
            .await
    }

    /// Manual or system cancellation, optionally attaching a note in the
    /// same write.
    pub async fn cancel_food(
        &self,
        id: &DocId,
        expected: FoodOrderStatus,
        note: Option<String>,
    ) -> Result<FoodOrder> {
        if !expected.can_transition_to(FoodOrderStatus::Cancelled) {
            return Err(invalid(expected, FoodOrderStatus::Cancelled));
        }
        let patch = match note {
            Some(note) => FoodOrderPatch::cancel(note),
            None => FoodOrderPatch::status(FoodOrderStatus::Cancelled),
        };
        self.food_orders.apply_if(id, expected, patch).await
    }

    /// Combined transition: sets the rider reference AND advances the order
    /// to preparing in a single conditional write. Only a pending order can
    /// be assigned; a half-applied assignment is impossible by construction.
    pub async fn assign_food_rider(&self, id: &DocId, rider: DocId) -> Result<FoodOrder> {
        self.food_orders
            .apply_if(
                id,
                FoodOrderStatus::Pending,
                FoodOrderPatch::assign(rider, FoodOrderStatus::Preparing),
            )
            .await
    }

    pub async fn transition_delivery(
        &self,
        id: &DocId,
        expected: DeliveryStatus,
        target: DeliveryStatus,
    ) -> Result<DeliveryOrder> {
        if !expected.can_transition_to(target) {
            return Err(invalid(expected, target));
        }
        self.delivery_orders
            .apply_if(id, expected, DeliveryPatch::status(target))
            .await
    }

    /// Combined transition for delivery requests: rider reference plus
    /// status=assigned in one conditional write, permitted only while the
    /// request is still pending.
    pub async fn assign_delivery_rider(&self, id: &DocId, rider: DocId) -> Result<DeliveryOrder> {
        self.delivery_orders
            .apply_if(id, DeliveryStatus::Pending, DeliveryPatch::assign(rider))
            .await
    }
}

fn invalid(from: impl ToString, to: impl ToString) -> CoreError {
    CoreError::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::delivery_order::DeliveryKind;
    use crate::domain::money::Balance;
    use crate::domain::ports::{DeliveryOrderStore, DigitalOrderStore, FoodOrderStore};
    use crate::infrastructure::in_memory::InMemoryStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn ledger_over(store: &InMemoryStore) -> Ledger {
        Ledger::new(
            Box::new(store.clone()),
            Box::new(store.clone()),
            Box::new(store.clone()),
        )
    }

    async fn seed_food(store: &InMemoryStore, status: FoodOrderStatus) -> FoodOrder {
        FoodOrderStore::create(
            store,
            FoodOrder {
                id: DocId::from("unassigned"),
                restaurant: DocId::from("r-1"),
                ordered_items: vec![],
                delivery_charge: Balance::new(dec!(250)),
                food_total: Balance::new(dec!(1800)),
                order_status: status,
                assigned_rider: None,
                created_at: Utc::now(),
                note: None,
            },
        )
        .await
        .unwrap()
    }

    async fn seed_delivery(store: &InMemoryStore, status: DeliveryStatus) -> DeliveryOrder {
        DeliveryOrderStore::create(
            store,
            DeliveryOrder {
                id: DocId::from("unassigned"),
                order_type: DeliveryKind::Parcel,
                customer_name: "Nimal".to_string(),
                customer_phone: "0771234567".to_string(),
                pickup_address: "12 Galle Rd".to_string(),
                delivery_address: "3 Kandy Rd".to_string(),
                status,
                assigned_rider: None,
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_digital_approval() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let order = DigitalOrderStore::create(
            &store,
            DigitalOrder {
                id: DocId::from("unassigned"),
                customer_name: "Amara".to_string(),
                customer_email: "amara@example.com".to_string(),
                order_amount: Balance::new(dec!(1500)),
                order_status: DigitalOrderStatus::Pending,
                ordered_at: Utc::now(),
                items: vec!["gift card".to_string()],
                payment_slip: None,
            },
        )
        .await
        .unwrap();

        let updated = ledger
            .transition_digital(
                &order.id,
                DigitalOrderStatus::Pending,
                DigitalOrderStatus::Approved,
            )
            .await
            .unwrap();
        assert_eq!(updated.order_status, DigitalOrderStatus::Approved);

        // Terminal: no reversal.
        let result = ledger
            .transition_digital(
                &order.id,
                DigitalOrderStatus::Approved,
                DigitalOrderStatus::Pending,
            )
            .await;
        assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_target_rejected_before_write() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let order = seed_food(&store, FoodOrderStatus::Pending).await;

        let result = ledger
            .transition_food(&order.id, FoodOrderStatus::Pending, FoodOrderStatus::Completed)
            .await;
        assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));

        let stored = FoodOrderStore::get(&store, &order.id).await.unwrap().unwrap();
        assert_eq!(stored.order_status, FoodOrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_racing_admins_second_write_conflicts() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let order = seed_food(&store, FoodOrderStatus::Pending).await;

        // Both admins read the order as pending. The first cancels it.
        ledger
            .cancel_food(&order.id, FoodOrderStatus::Pending, None)
            .await
            .unwrap();
        // The second still tries to advance it.
        let result = ledger
            .transition_food(&order.id, FoodOrderStatus::Pending, FoodOrderStatus::Preparing)
            .await;
        assert!(matches!(result, Err(CoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let result = ledger
            .transition_food(
                &DocId::from("missing"),
                FoodOrderStatus::Pending,
                FoodOrderStatus::Preparing,
            )
            .await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_assign_food_rider_sets_both_fields() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let order = seed_food(&store, FoodOrderStatus::Pending).await;

        let updated = ledger
            .assign_food_rider(&order.id, DocId::from("rider-7"))
            .await
            .unwrap();
        assert_eq!(updated.order_status, FoodOrderStatus::Preparing);
        assert_eq!(updated.assigned_rider, Some(DocId::from("rider-7")));
    }

    #[tokio::test]
    async fn test_assignment_rejected_after_pending_no_partial_state() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let order = seed_food(&store, FoodOrderStatus::Pending).await;
        ledger
            .cancel_food(&order.id, FoodOrderStatus::Pending, None)
            .await
            .unwrap();

        let result = ledger
            .assign_food_rider(&order.id, DocId::from("rider-7"))
            .await;
        assert!(matches!(result, Err(CoreError::Conflict)));

        // Neither field moved: no rider reference left behind by the failed
        // assignment.
        let stored = FoodOrderStore::get(&store, &order.id).await.unwrap().unwrap();
        assert_eq!(stored.order_status, FoodOrderStatus::Cancelled);
        assert_eq!(stored.assigned_rider, None);
    }

    #[tokio::test]
    async fn test_delivery_reschedule_loops_to_pending() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let order = seed_delivery(&store, DeliveryStatus::Pending).await;

        ledger
            .assign_delivery_rider(&order.id, DocId::from("rider-2"))
            .await
            .unwrap();
        ledger
            .transition_delivery(&order.id, DeliveryStatus::Assigned, DeliveryStatus::Rescheduled)
            .await
            .unwrap();
        let updated = ledger
            .transition_delivery(&order.id, DeliveryStatus::Rescheduled, DeliveryStatus::Pending)
            .await
            .unwrap();
        assert_eq!(updated.status, DeliveryStatus::Pending);

        // Back in the dispatch queue, it may be assigned again.
        let updated = ledger
            .assign_delivery_rider(&order.id, DocId::from("rider-5"))
            .await
            .unwrap();
        assert_eq!(updated.assigned_rider, Some(DocId::from("rider-5")));
    }

    #[tokio::test]
    async fn test_delivery_assignment_only_while_pending() {
        let store = InMemoryStore::new();
        let ledger = ledger_over(&store);
        let order = seed_delivery(&store, DeliveryStatus::Pending).await;
        ledger
            .assign_delivery_rider(&order.id, DocId::from("rider-2"))
            .await
            .unwrap();

        let result = ledger
            .assign_delivery_rider(&order.id, DocId::from("rider-3"))
            .await;
        assert!(matches!(result, Err(CoreError::Conflict)));
        let stored = DeliveryOrderStore::get(&store, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.assigned_rider, Some(DocId::from("rider-2")));
    }
}
