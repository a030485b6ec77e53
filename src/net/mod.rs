//! REST types and clients for the Savora API.
//!
//! DESIGN
//! ======
//! `auth` owns the five authentication round-trips and the error taxonomy;
//! `stores` holds the thin domain fetchers the view pages call once admitted
//! by the route gate. Wire types live in `types` with camelCase renames.

pub mod auth;
pub mod stores;
pub mod types;
