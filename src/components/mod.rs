//! Shared UI components.

pub mod nav;
pub mod route_gate;
pub mod store_card;
