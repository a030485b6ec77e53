//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` owns the session lifecycle state machine and its async flows;
//! `gate` is the pure render-or-redirect decision the route components
//! evaluate against it. Both are plain logic with sibling test files so the
//! whole core runs under native `cargo test`.

pub mod auth;
pub mod gate;
