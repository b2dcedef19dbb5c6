//! Domain layer: documents, value objects, status machines and store ports.

pub mod delivery_order;
pub mod digital_order;
pub mod filter;
pub mod food_order;
pub mod id;
pub mod money;
pub mod ports;
pub mod restaurant;
pub mod rider;
pub mod withdrawal;
