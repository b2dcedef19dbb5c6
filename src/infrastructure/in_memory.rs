use crate::domain::delivery_order::{DeliveryOrder, DeliveryPatch, DeliveryStatus};
use crate::domain::digital_order::{DigitalOrder, DigitalOrderStatus};
use crate::domain::filter::{DeliveryFilter, OrderFilter};
use crate::domain::food_order::{FoodOrder, FoodOrderPatch, FoodOrderStatus};
use crate::domain::id::DocId;
use crate::domain::money::{Amount, Balance};
use crate::domain::ports::{
    ChangeEvent, ChangeFeed, Collection, DeliveryOrderStore, DigitalOrderStore, FoodOrderStore,
    RestaurantStore, RiderStore, WithdrawalStore,
};
use crate::domain::restaurant::Restaurant;
use crate::domain::rider::Rider;
use crate::domain::withdrawal::{WithdrawalRequest, WithdrawalStatus};
use crate::error::{CoreError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

const EVENT_CAPACITY: usize = 256;

#[derive(Default)]
struct Collections {
    digital_orders: HashMap<DocId, DigitalOrder>,
    food_orders: HashMap<DocId, FoodOrder>,
    delivery_orders: HashMap<DocId, DeliveryOrder>,
    riders: HashMap<DocId, Rider>,
    withdrawals: HashMap<DocId, WithdrawalRequest>,
    restaurants: HashMap<DocId, Restaurant>,
}

/// A thread-safe in-memory document store.
///
/// Every conditional update runs under a single write lock, so a multi-field
/// patch or the settlement batch is applied whole or not at all; no reader
/// can observe a half-applied write. Each mutation is published on the
/// change feed.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Collections>>,
    events: broadcast::Sender<ChangeEvent>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(Collections::default())),
            events,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self, collection: Collection, id: &DocId) {
        // No receivers is fine; the feed is best-effort.
        let _ = self.events.send(ChangeEvent {
            collection,
            id: id.clone(),
        });
    }
}

impl ChangeFeed for InMemoryStore {
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl DigitalOrderStore for InMemoryStore {
    async fn create(&self, mut order: DigitalOrder) -> Result<DigitalOrder> {
        order.id = DocId::generate();
        let mut inner = self.inner.write().await;
        inner.digital_orders.insert(order.id.clone(), order.clone());
        drop(inner);
        self.emit(Collection::DigitalOrders, &order.id);
        Ok(order)
    }

    async fn get(&self, id: &DocId) -> Result<Option<DigitalOrder>> {
        let inner = self.inner.read().await;
        Ok(inner.digital_orders.get(id).cloned())
    }

    async fn list(&self, filter: &OrderFilter<DigitalOrderStatus>) -> Result<Vec<DigitalOrder>> {
        let inner = self.inner.read().await;
        Ok(inner
            .digital_orders
            .values()
            .filter(|o| filter.matches(o.order_status, o.ordered_at))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: &DocId,
        expected: DigitalOrderStatus,
        target: DigitalOrderStatus,
    ) -> Result<DigitalOrder> {
        let mut inner = self.inner.write().await;
        let order = inner
            .digital_orders
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        if order.order_status != expected {
            return Err(CoreError::Conflict);
        }
        order.order_status = target;
        let order = order.clone();
        drop(inner);
        self.emit(Collection::DigitalOrders, id);
        Ok(order)
    }
}

#[async_trait]
impl FoodOrderStore for InMemoryStore {
    async fn create(&self, mut order: FoodOrder) -> Result<FoodOrder> {
        order.id = DocId::generate();
        let mut inner = self.inner.write().await;
        inner.food_orders.insert(order.id.clone(), order.clone());
        drop(inner);
        self.emit(Collection::FoodOrders, &order.id);
        Ok(order)
    }

    async fn get(&self, id: &DocId) -> Result<Option<FoodOrder>> {
        let inner = self.inner.read().await;
        Ok(inner.food_orders.get(id).cloned())
    }

    async fn list(&self, filter: &OrderFilter<FoodOrderStatus>) -> Result<Vec<FoodOrder>> {
        let inner = self.inner.read().await;
        Ok(inner
            .food_orders
            .values()
            .filter(|o| filter.matches(o.order_status, o.created_at))
            .cloned()
            .collect())
    }

    async fn apply_if(
        &self,
        id: &DocId,
        expected: FoodOrderStatus,
        patch: FoodOrderPatch,
    ) -> Result<FoodOrder> {
        let mut inner = self.inner.write().await;
        let order = inner
            .food_orders
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        if order.order_status != expected {
            return Err(CoreError::Conflict);
        }
        order.order_status = patch.status;
        if let Some(rider) = patch.assigned_rider {
            order.assigned_rider = Some(rider);
        }
        if let Some(note) = patch.note {
            order.note = Some(note);
        }
        let order = order.clone();
        drop(inner);
        self.emit(Collection::FoodOrders, id);
        Ok(order)
    }
}

#[async_trait]
impl DeliveryOrderStore for InMemoryStore {
    async fn create(&self, mut order: DeliveryOrder) -> Result<DeliveryOrder> {
        order.id = DocId::generate();
        let mut inner = self.inner.write().await;
        inner.delivery_orders.insert(order.id.clone(), order.clone());
        drop(inner);
        self.emit(Collection::DeliveryOrders, &order.id);
        Ok(order)
    }

    async fn get(&self, id: &DocId) -> Result<Option<DeliveryOrder>> {
        let inner = self.inner.read().await;
        Ok(inner.delivery_orders.get(id).cloned())
    }

    async fn list(&self, filter: &DeliveryFilter) -> Result<Vec<DeliveryOrder>> {
        let inner = self.inner.read().await;
        Ok(inner
            .delivery_orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn apply_if(
        &self,
        id: &DocId,
        expected: DeliveryStatus,
        patch: DeliveryPatch,
    ) -> Result<DeliveryOrder> {
        let mut inner = self.inner.write().await;
        let order = inner
            .delivery_orders
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        if order.status != expected {
            return Err(CoreError::Conflict);
        }
        order.status = patch.status;
        if let Some(rider) = patch.assigned_rider {
            order.assigned_rider = Some(rider);
        }
        let order = order.clone();
        drop(inner);
        self.emit(Collection::DeliveryOrders, id);
        Ok(order)
    }
}

#[async_trait]
impl RiderStore for InMemoryStore {
    async fn create(&self, mut rider: Rider) -> Result<Rider> {
        rider.id = DocId::generate();
        let mut inner = self.inner.write().await;
        inner.riders.insert(rider.id.clone(), rider.clone());
        drop(inner);
        self.emit(Collection::Riders, &rider.id);
        Ok(rider)
    }

    async fn get(&self, id: &DocId) -> Result<Option<Rider>> {
        let inner = self.inner.read().await;
        Ok(inner.riders.get(id).cloned())
    }

    async fn all(&self) -> Result<Vec<Rider>> {
        let inner = self.inner.read().await;
        Ok(inner.riders.values().cloned().collect())
    }

    async fn update_profile(&self, rider: Rider) -> Result<Rider> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .riders
            .get_mut(&rider.id)
            .ok_or_else(|| CoreError::NotFound(rider.id.to_string()))?;
        // Wallet balance only moves through settlement.
        let wallet_balance = stored.wallet_balance;
        *stored = Rider {
            wallet_balance,
            ..rider
        };
        let rider = stored.clone();
        drop(inner);
        self.emit(Collection::Riders, &rider.id);
        Ok(rider)
    }

    async fn delete(&self, id: &DocId) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .riders
            .remove(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        drop(inner);
        self.emit(Collection::Riders, id);
        Ok(())
    }
}

#[async_trait]
impl WithdrawalStore for InMemoryStore {
    async fn create(&self, mut request: WithdrawalRequest) -> Result<WithdrawalRequest> {
        request.id = DocId::generate();
        let mut inner = self.inner.write().await;
        inner.withdrawals.insert(request.id.clone(), request.clone());
        drop(inner);
        self.emit(Collection::Withdrawals, &request.id);
        Ok(request)
    }

    async fn get(&self, id: &DocId) -> Result<Option<WithdrawalRequest>> {
        let inner = self.inner.read().await;
        Ok(inner.withdrawals.get(id).cloned())
    }

    async fn list_by_status(&self, status: WithdrawalStatus) -> Result<Vec<WithdrawalRequest>> {
        let inner = self.inner.read().await;
        Ok(inner
            .withdrawals
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: &DocId,
        expected: WithdrawalStatus,
        target: WithdrawalStatus,
    ) -> Result<WithdrawalRequest> {
        let mut inner = self.inner.write().await;
        let request = inner
            .withdrawals
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        if request.status != expected {
            return Err(CoreError::Conflict);
        }
        request.status = target;
        let request = request.clone();
        drop(inner);
        self.emit(Collection::Withdrawals, id);
        Ok(request)
    }

    async fn complete_and_debit(
        &self,
        request_id: &DocId,
        rider_id: &DocId,
        amount: Amount,
    ) -> Result<WithdrawalRequest> {
        let mut inner = self.inner.write().await;

        // Validate both documents before mutating either.
        let request = inner
            .withdrawals
            .get(request_id)
            .ok_or_else(|| CoreError::NotFound(request_id.to_string()))?;
        if request.status != WithdrawalStatus::Pending {
            return Err(CoreError::AlreadySettled);
        }
        let rider = inner
            .riders
            .get(rider_id)
            .ok_or_else(|| CoreError::NotFound(rider_id.to_string()))?;
        if amount.value() > rider.wallet_balance.value() {
            return Err(CoreError::InsufficientFunds {
                requested: amount.value(),
                available: rider.wallet_balance.value(),
            });
        }

        if let Some(rider) = inner.riders.get_mut(rider_id) {
            rider.wallet_balance -= Balance::from(amount);
        }
        let request = match inner.withdrawals.get_mut(request_id) {
            Some(request) => {
                request.status = WithdrawalStatus::Completed;
                request.clone()
            }
            None => return Err(CoreError::NotFound(request_id.to_string())),
        };
        drop(inner);

        self.emit(Collection::Riders, rider_id);
        self.emit(Collection::Withdrawals, request_id);
        Ok(request)
    }
}

#[async_trait]
impl RestaurantStore for InMemoryStore {
    async fn create(&self, mut restaurant: Restaurant) -> Result<Restaurant> {
        restaurant.id = DocId::generate();
        let mut inner = self.inner.write().await;
        inner
            .restaurants
            .insert(restaurant.id.clone(), restaurant.clone());
        drop(inner);
        self.emit(Collection::Restaurants, &restaurant.id);
        Ok(restaurant)
    }

    async fn get(&self, id: &DocId) -> Result<Option<Restaurant>> {
        let inner = self.inner.read().await;
        Ok(inner.restaurants.get(id).cloned())
    }

    async fn add_payout(&self, id: &DocId, amount: Amount) -> Result<Restaurant> {
        let mut inner = self.inner.write().await;
        let restaurant = inner
            .restaurants
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        restaurant.total_payouts += amount.into();
        let restaurant = restaurant.clone();
        drop(inner);
        self.emit(Collection::Restaurants, id);
        Ok(restaurant)
    }
}
