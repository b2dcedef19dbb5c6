use super::delivery_order::{DeliveryOrder, DeliveryPatch, DeliveryStatus};
use super::digital_order::{DigitalOrder, DigitalOrderStatus};
use super::filter::{DeliveryFilter, OrderFilter};
use super::food_order::{FoodOrder, FoodOrderPatch, FoodOrderStatus};
use super::id::DocId;
use super::money::Amount;
use super::restaurant::Restaurant;
use super::rider::Rider;
use super::withdrawal::{WithdrawalRequest, WithdrawalStatus};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;

pub type DigitalOrderStoreBox = Box<dyn DigitalOrderStore>;
pub type FoodOrderStoreBox = Box<dyn FoodOrderStore>;
pub type DeliveryOrderStoreBox = Box<dyn DeliveryOrderStore>;
pub type RiderStoreBox = Box<dyn RiderStore>;
pub type WithdrawalStoreBox = Box<dyn WithdrawalStore>;
pub type RestaurantStoreBox = Box<dyn RestaurantStore>;

/// Collection a change event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    DigitalOrders,
    FoodOrders,
    DeliveryOrders,
    Riders,
    Withdrawals,
    Restaurants,
}

/// Emitted by the store on every create or mutation.
///
/// Consumers treat an event purely as a trigger to re-run their aggregate
/// reads from scratch; it carries no delta to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub id: DocId,
}

/// Real-time change feed exposed by the store.
pub trait ChangeFeed {
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}

#[async_trait]
pub trait DigitalOrderStore: Send + Sync {
    async fn create(&self, order: DigitalOrder) -> Result<DigitalOrder>;
    async fn get(&self, id: &DocId) -> Result<Option<DigitalOrder>>;
    async fn list(&self, filter: &OrderFilter<DigitalOrderStatus>) -> Result<Vec<DigitalOrder>>;
    /// Conditional write: applies only while the stored status still equals
    /// `expected`, otherwise fails with `Conflict`.
    async fn update_status(
        &self,
        id: &DocId,
        expected: DigitalOrderStatus,
        target: DigitalOrderStatus,
    ) -> Result<DigitalOrder>;
}

#[async_trait]
pub trait FoodOrderStore: Send + Sync {
    async fn create(&self, order: FoodOrder) -> Result<FoodOrder>;
    async fn get(&self, id: &DocId) -> Result<Option<FoodOrder>>;
    async fn list(&self, filter: &OrderFilter<FoodOrderStatus>) -> Result<Vec<FoodOrder>>;
    /// Conditional multi-field write: checks the stored status against
    /// `expected` and applies the whole patch, or fails with `Conflict`
    /// without touching any field.
    async fn apply_if(
        &self,
        id: &DocId,
        expected: FoodOrderStatus,
        patch: FoodOrderPatch,
    ) -> Result<FoodOrder>;
}

#[async_trait]
pub trait DeliveryOrderStore: Send + Sync {
    async fn create(&self, order: DeliveryOrder) -> Result<DeliveryOrder>;
    async fn get(&self, id: &DocId) -> Result<Option<DeliveryOrder>>;
    async fn list(&self, filter: &DeliveryFilter) -> Result<Vec<DeliveryOrder>>;
    async fn apply_if(
        &self,
        id: &DocId,
        expected: DeliveryStatus,
        patch: DeliveryPatch,
    ) -> Result<DeliveryOrder>;
}

#[async_trait]
pub trait RiderStore: Send + Sync {
    async fn create(&self, rider: Rider) -> Result<Rider>;
    async fn get(&self, id: &DocId) -> Result<Option<Rider>>;
    async fn all(&self) -> Result<Vec<Rider>>;
    /// Unconditional admin edit of profile fields. The wallet balance is
    /// excluded: it moves only through `WithdrawalStore::complete_and_debit`.
    async fn update_profile(&self, rider: Rider) -> Result<Rider>;
    async fn delete(&self, id: &DocId) -> Result<()>;
}

#[async_trait]
pub trait WithdrawalStore: Send + Sync {
    async fn create(&self, request: WithdrawalRequest) -> Result<WithdrawalRequest>;
    async fn get(&self, id: &DocId) -> Result<Option<WithdrawalRequest>>;
    async fn list_by_status(&self, status: WithdrawalStatus) -> Result<Vec<WithdrawalRequest>>;
    /// Conditional status write, `Conflict` if the stored status moved.
    async fn update_status(
        &self,
        id: &DocId,
        expected: WithdrawalStatus,
        target: WithdrawalStatus,
    ) -> Result<WithdrawalRequest>;
    /// Atomic settlement batch: marks the request completed AND debits the
    /// rider's wallet, or does neither. Fails with `AlreadySettled` if the
    /// request is no longer pending and `InsufficientFunds` if the wallet
    /// cannot cover the amount at write time.
    async fn complete_and_debit(
        &self,
        request_id: &DocId,
        rider_id: &DocId,
        amount: Amount,
    ) -> Result<WithdrawalRequest>;
}

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn create(&self, restaurant: Restaurant) -> Result<Restaurant>;
    async fn get(&self, id: &DocId) -> Result<Option<Restaurant>>;
    /// Atomic increment of the running payout total.
    async fn add_payout(&self, id: &DocId, amount: Amount) -> Result<Restaurant>;
}
