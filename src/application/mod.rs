//! Application layer: the order ledger, commission engine, stale-order
//! reaper and payout settlement.
//!
//! Each engine holds boxed store ports and exposes a narrow contract to the
//! admin surfaces. All state lives in the store; the engines themselves are
//! stateless between calls.

pub mod commission;
pub mod ledger;
pub mod reaper;
pub mod settlement;
