mod common;

use async_trait::async_trait;
use drophub::application::settlement::{Decision, Settlement};
use drophub::domain::id::DocId;
use drophub::domain::money::{Amount, Balance};
use drophub::domain::ports::{RiderStore, WithdrawalStore};
use drophub::domain::withdrawal::{WithdrawalRequest, WithdrawalStatus};
use drophub::error::{CoreError, Result};
use drophub::infrastructure::in_memory::InMemoryStore;
use rust_decimal_macros::dec;

/// Delegates to the real store but fails the settlement batch itself,
/// simulating the backend going away at the worst possible moment.
struct FlakyWithdrawalStore {
    inner: InMemoryStore,
}

#[async_trait]
impl WithdrawalStore for FlakyWithdrawalStore {
    async fn create(&self, request: WithdrawalRequest) -> Result<WithdrawalRequest> {
        WithdrawalStore::create(&self.inner, request).await
    }

    async fn get(&self, id: &DocId) -> Result<Option<WithdrawalRequest>> {
        WithdrawalStore::get(&self.inner, id).await
    }

    async fn list_by_status(&self, status: WithdrawalStatus) -> Result<Vec<WithdrawalRequest>> {
        self.inner.list_by_status(status).await
    }

    async fn update_status(
        &self,
        id: &DocId,
        expected: WithdrawalStatus,
        target: WithdrawalStatus,
    ) -> Result<WithdrawalRequest> {
        WithdrawalStore::update_status(&self.inner, id, expected, target).await
    }

    async fn complete_and_debit(
        &self,
        _request_id: &DocId,
        _rider_id: &DocId,
        _amount: Amount,
    ) -> Result<WithdrawalRequest> {
        Err(CoreError::StoreUnavailable(
            "injected outage during settlement".to_string(),
        ))
    }
}

#[tokio::test]
async fn test_store_outage_leaves_no_partial_settlement() {
    let store = InMemoryStore::new();
    let rider = RiderStore::create(&store, common::rider(dec!(5000)))
        .await
        .unwrap();
    let request = WithdrawalStore::create(&store, common::withdrawal(&rider.id, dec!(2000)))
        .await
        .unwrap();

    let settlement = Settlement::new(
        Box::new(FlakyWithdrawalStore {
            inner: store.clone(),
        }),
        Box::new(store.clone()),
        Box::new(store.clone()),
    );

    let result = settlement.settle(&request.id, Decision::Approve).await;
    assert!(matches!(result, Err(CoreError::StoreUnavailable(_))));

    // The outcome was unknown, but the store proves nothing was half-applied:
    // the wallet is untouched and the request is still pending.
    let rider = RiderStore::get(&store, &rider.id).await.unwrap().unwrap();
    assert_eq!(rider.wallet_balance, Balance::new(dec!(5000)));
    let request = WithdrawalStore::get(&store, &request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.status, WithdrawalStatus::Pending);

    // The same settlement succeeds once the store is healthy again.
    let settlement = Settlement::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
    );
    let settled = settlement
        .settle(&request.id, Decision::Approve)
        .await
        .unwrap();
    assert_eq!(settled.status, WithdrawalStatus::Completed);
    let rider = RiderStore::get(&store, &rider.id).await.unwrap().unwrap();
    assert_eq!(rider.wallet_balance, Balance::new(dec!(3000)));
}

#[tokio::test]
async fn test_two_admin_tabs_cannot_double_debit() {
    let store = InMemoryStore::new();
    let rider = RiderStore::create(&store, common::rider(dec!(4000)))
        .await
        .unwrap();
    let request = WithdrawalStore::create(&store, common::withdrawal(&rider.id, dec!(1500)))
        .await
        .unwrap();

    // Both tabs build their own engine over the same store.
    let tab_a = Settlement::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
    );
    let tab_b = Settlement::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
    );

    tab_a.settle(&request.id, Decision::Approve).await.unwrap();
    let result = tab_b.settle(&request.id, Decision::Approve).await;
    assert!(matches!(result, Err(CoreError::AlreadySettled)));

    let rider = RiderStore::get(&store, &rider.id).await.unwrap().unwrap();
    assert_eq!(rider.wallet_balance, Balance::new(dec!(2500)));
}

#[tokio::test]
async fn test_sequential_withdrawals_drain_but_never_overdraw() {
    let store = InMemoryStore::new();
    let rider = RiderStore::create(&store, common::rider(dec!(3000)))
        .await
        .unwrap();
    let settlement = Settlement::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
    );

    let first = WithdrawalStore::create(&store, common::withdrawal(&rider.id, dec!(2000)))
        .await
        .unwrap();
    let second = WithdrawalStore::create(&store, common::withdrawal(&rider.id, dec!(2000)))
        .await
        .unwrap();

    settlement.settle(&first.id, Decision::Approve).await.unwrap();
    // The second request was affordable at creation time but not anymore.
    let result = settlement.settle(&second.id, Decision::Approve).await;
    assert!(matches!(result, Err(CoreError::InsufficientFunds { .. })));

    let rider = RiderStore::get(&store, &rider.id).await.unwrap().unwrap();
    assert_eq!(rider.wallet_balance, Balance::new(dec!(1000)));
    let second = WithdrawalStore::get(&store, &second.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.status, WithdrawalStatus::Pending);
}
