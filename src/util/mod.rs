//! Browser-adjacent utilities.

pub mod session;
