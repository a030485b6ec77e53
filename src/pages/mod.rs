//! Page components, one per routed screen.

pub mod customer;
pub mod login;
pub mod owner;
pub mod register;
