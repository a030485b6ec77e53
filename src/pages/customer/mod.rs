//! Customer screens.

pub mod main;
pub mod my_page;
pub mod store_detail;
