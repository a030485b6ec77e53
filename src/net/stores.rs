//! Thin REST fetchers for store and feedback data.
//!
//! Callers get `Option` outputs instead of panics so a failed fetch degrades
//! to an empty view without crashing hydration. All requests carry the
//! bearer token from the session store.

use crate::net::types::{Feedback, FeedbackPayload, Store};
#[cfg(feature = "hydrate")]
use crate::util::session::{LocalTokenStore, TokenStore};

#[allow(clippy::unused_async)]
async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let mut req = gloo_net::http::Request::get(url);
        if let Some(token) = LocalTokenStore.access_token() {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = req.send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<T>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        None
    }
}

/// Fetch every store for customer browsing.
pub async fn fetch_stores() -> Option<Vec<Store>> {
    fetch_json("/api/stores").await
}

/// Fetch the stores owned by the current user.
pub async fn fetch_my_stores() -> Option<Vec<Store>> {
    fetch_json("/api/stores/my").await
}

/// Fetch one store by id.
pub async fn fetch_store(store_id: i64) -> Option<Store> {
    fetch_json(&format!("/api/stores/{store_id}")).await
}

/// Fetch the AI feedback list for a store.
///
/// The endpoint returns a single object when only one feedback exists;
/// normalized here so pages always see a list.
pub async fn fetch_ai_feedback(store_id: i64) -> Option<Vec<Feedback>> {
    let payload: FeedbackPayload =
        fetch_json(&format!("/api/analytics/stores/{store_id}/ai-feedback")).await?;
    Some(payload.into_vec())
}
