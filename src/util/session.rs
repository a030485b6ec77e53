//! Token persistence for the authenticated session.
//!
//! Tokens are opaque strings stored under fixed localStorage keys so the
//! session survives page reloads. Storage access never panics: an absent or
//! unreadable store simply behaves as "no session". Requires a browser
//! environment; the non-hydrate build is inert.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

#[cfg(feature = "hydrate")]
const ACCESS_TOKEN_KEY: &str = "accessToken";
#[cfg(feature = "hydrate")]
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// The current token pair. At most one session exists at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

/// Durable storage for the session token pair.
///
/// Implementations must not panic; `load` returns `None` whenever storage is
/// missing or either token is absent.
pub trait TokenStore {
    fn save(&self, session: &Session);
    fn load(&self) -> Option<Session>;
    fn clear(&self);

    /// The access token alone, for attaching `Authorization` headers.
    fn access_token(&self) -> Option<String> {
        self.load().map(|s| s.access_token)
    }
}

/// localStorage-backed store under the well-known token keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn save(&self, session: &Session) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(ACCESS_TOKEN_KEY, &session.access_token);
                let _ = storage.set_item(REFRESH_TOKEN_KEY, &session.refresh_token);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = session;
        }
    }

    fn load(&self) -> Option<Session> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage()?;
            let access_token = storage.get_item(ACCESS_TOKEN_KEY).ok().flatten()?;
            let refresh_token = storage.get_item(REFRESH_TOKEN_KEY).ok().flatten()?;
            Some(Session {
                access_token,
                refresh_token,
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(ACCESS_TOKEN_KEY);
                let _ = storage.remove_item(REFRESH_TOKEN_KEY);
            }
        }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// In-process store used by tests and as the non-browser fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    session: std::cell::RefCell<Option<Session>>,
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, session: &Session) {
        *self.session.borrow_mut() = Some(session.clone());
    }

    fn load(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn clear(&self) {
        *self.session.borrow_mut() = None;
    }
}
