#![allow(dead_code)]

use chrono::{DateTime, Utc};
use drophub::domain::food_order::{FoodOrder, FoodOrderStatus};
use drophub::domain::id::DocId;
use drophub::domain::money::{Amount, Balance};
use drophub::domain::rider::Rider;
use drophub::domain::withdrawal::{WithdrawalRequest, WithdrawalStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn food_order(status: FoodOrderStatus, created_at: DateTime<Utc>) -> FoodOrder {
    FoodOrder {
        id: DocId::from("unassigned"),
        restaurant: DocId::from("r-1"),
        ordered_items: vec![],
        delivery_charge: Balance::new(dec!(300)),
        food_total: Balance::new(dec!(1000)),
        order_status: status,
        assigned_rider: None,
        created_at,
        note: None,
    }
}

pub fn rider(wallet: Decimal) -> Rider {
    Rider {
        id: DocId::from("unassigned"),
        full_name: "Kasun Perera".to_string(),
        nic: "912345678V".to_string(),
        vehicle_type: "bike".to_string(),
        service_areas: vec!["Colombo".to_string(), "Gampaha".to_string()],
        wallet_balance: Balance::new(wallet),
        availability: true,
    }
}

pub fn withdrawal(rider: &DocId, amount: Decimal) -> WithdrawalRequest {
    WithdrawalRequest {
        id: DocId::from("unassigned"),
        rider: rider.clone(),
        amount: Amount::new(amount).unwrap(),
        status: WithdrawalStatus::Pending,
        created_at: Utc::now(),
    }
}
