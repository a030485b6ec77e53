//! Authentication state: the session lifecycle machine and its async flows.
//!
//! STATE MACHINE
//! =============
//! `Initializing -> Authenticated | Unauthenticated` (bootstrap only);
//! `Unauthenticated -> Authenticated` (login);
//! `Authenticated -> Unauthenticated` (logout or refresh failure).
//! No other transitions. The `Initializing` phase exists so the route gate
//! can suspend its decision instead of redirecting before bootstrap settles.
//!
//! The flows (`restore_session`, `perform_login`, `take_session` +
//! `perform_logout`) are generic over [`AuthApi`] and [`TokenStore`] and
//! carry no Leptos types, so they test natively with mock implementations. [`AuthContext`] wires them
//! to signals and guards every spawned operation with a generation counter:
//! a completion only lands if no newer operation started meanwhile.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::auth::{AuthApi, AuthError};
use crate::net::types::{LoginResponse, Role, User};
use crate::util::session::{Session, TokenStore};

/// Where the client currently stands in the session lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthPhase {
    /// Bootstrap in flight; the route gate must not redirect yet.
    #[default]
    Initializing,
    Authenticated(User),
    Unauthenticated,
}

impl AuthPhase {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

/// Authentication state shared through the component tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub login_pending: bool,
    pub login_error: Option<AuthError>,
}

/// Silent session restoration, run once on application start.
///
/// Terminal outcomes:
/// 1. no stored session -> `Unauthenticated`;
/// 2. profile fetch succeeds -> `Authenticated`;
/// 3. profile fetch returns `Unauthorized` -> one refresh, then one profile
///    retry; any further failure clears the store -> `Unauthenticated`.
///
/// A transport failure on the first profile fetch ends `Unauthenticated`
/// but keeps the stored tokens so the next reload can try again.
pub async fn restore_session<A: AuthApi, S: TokenStore>(api: &A, store: &S) -> AuthPhase {
    let Some(session) = store.load() else {
        return AuthPhase::Unauthenticated;
    };

    match api.profile().await {
        Ok(user) => AuthPhase::Authenticated(user),
        Err(AuthError::Unauthorized) => {
            refresh_and_retry(api, store, &session.refresh_token).await
        }
        Err(_) => AuthPhase::Unauthenticated,
    }
}

/// One refresh, one profile retry. Any failure here is irrecoverable: the
/// stored session is cleared.
async fn refresh_and_retry<A: AuthApi, S: TokenStore>(
    api: &A,
    store: &S,
    refresh_token: &str,
) -> AuthPhase {
    match api.refresh(refresh_token).await {
        Ok(pair) => {
            store.save(&Session {
                access_token: pair.access_token,
                refresh_token: pair.refresh_token,
            });
            match api.profile().await {
                Ok(user) => AuthPhase::Authenticated(user),
                Err(_) => {
                    store.clear();
                    AuthPhase::Unauthenticated
                }
            }
        }
        Err(_) => {
            store.clear();
            AuthPhase::Unauthenticated
        }
    }
}

/// Log in and persist the new session. The identity is derived from the
/// login response; `username` is the form value, used when the response
/// omits its own.
pub async fn perform_login<A: AuthApi, S: TokenStore>(
    api: &A,
    store: &S,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let resp = api.login(username, password).await?;
    store.save(&Session {
        access_token: resp.access_token.clone(),
        refresh_token: resp.refresh_token.clone(),
    });
    Ok(user_from_login(&resp, username))
}

/// Capture the stored session and clear it, synchronously.
///
/// Logout runs this before its server round-trip: tokens must leave storage
/// up front so a logout resolving late can never wipe a session a newer
/// login has written.
pub fn take_session<S: TokenStore>(store: &S) -> Option<Session> {
    let session = store.load();
    store.clear();
    session
}

/// Best-effort server logout for a session already removed from storage via
/// [`take_session`]. The local session is gone regardless of the server's
/// answer so the client is never stuck logged in.
pub async fn perform_logout<A: AuthApi>(api: &A, session: Option<Session>) {
    if let Some(session) = session {
        let _ = api.logout(&session.refresh_token).await;
    }
}

fn user_from_login(resp: &LoginResponse, fallback_username: &str) -> User {
    User {
        id: resp.user_id.unwrap_or_default(),
        username: resp
            .username
            .clone()
            .unwrap_or_else(|| fallback_username.to_owned()),
        role: resp.role,
        nickname: None,
        email: None,
        phone: None,
    }
}

/// Process-wide auth context, created on app mount and provided through the
/// Leptos context tree. Copyable; both fields are signals.
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    /// Generation counter for the stale-response guard. Every spawned
    /// operation captures the generation at start; its completion is
    /// discarded unless the generation is still current.
    generation: RwSignal<u64>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            generation: RwSignal::new(0),
        }
    }

    /// Reactive read of the full state.
    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    /// Reactive read of the current phase.
    pub fn phase(&self) -> AuthPhase {
        self.state.with(|s| s.phase.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.phase.user().cloned())
    }

    pub fn current_role(&self) -> Option<Role> {
        self.state.with(|s| s.phase.role())
    }

    pub fn is_initializing(&self) -> bool {
        self.state.with(|s| s.phase == AuthPhase::Initializing)
    }

    /// Start a new operation: advance the generation, invalidating any
    /// in-flight completion.
    pub fn begin_operation(&self) -> u64 {
        let generation = self.generation.get_untracked() + 1;
        self.generation.set(generation);
        generation
    }

    /// Apply a terminal phase, unless a newer operation has started.
    pub fn finish_operation(&self, generation: u64, phase: AuthPhase) -> bool {
        if self.generation.get_untracked() != generation {
            return false;
        }
        self.state.update(|s| {
            s.phase = phase;
            s.login_pending = false;
        });
        true
    }

    /// Kick off silent session restoration in the browser.
    ///
    /// On the server the context stays `Initializing`; hydration performs
    /// the real bootstrap.
    pub fn spawn_bootstrap(&self) {
        #[cfg(feature = "hydrate")]
        {
            use crate::net::auth::HttpAuthApi;
            use crate::util::session::LocalTokenStore;

            let ctx = *self;
            let generation = ctx.begin_operation();
            leptos::task::spawn_local(async move {
                let phase = restore_session(&HttpAuthApi, &LocalTokenStore).await;
                if !ctx.finish_operation(generation, phase) {
                    leptos::logging::log!("bootstrap result discarded (stale)");
                }
            });
        }
    }

    /// Log in with the given credentials.
    ///
    /// Sets `login_pending` for the duration so the form can disable
    /// re-submission; failures land in `login_error`.
    pub fn spawn_login(&self, username: String, password: String) {
        #[cfg(feature = "hydrate")]
        {
            use crate::net::auth::HttpAuthApi;
            use crate::util::session::LocalTokenStore;

            let ctx = *self;
            let generation = ctx.begin_operation();
            ctx.state.update(|s| {
                s.login_pending = true;
                s.login_error = None;
            });
            leptos::task::spawn_local(async move {
                let result =
                    perform_login(&HttpAuthApi, &LocalTokenStore, &username, &password).await;
                match result {
                    Ok(user) => {
                        ctx.finish_operation(generation, AuthPhase::Authenticated(user));
                    }
                    Err(err) => {
                        if ctx.generation.get_untracked() == generation {
                            ctx.state.update(|s| {
                                s.login_pending = false;
                                s.login_error = Some(err);
                            });
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
        }
    }

    /// Log out: drop tokens and local state immediately, then tell the
    /// server best-effort in the background.
    pub fn spawn_logout(&self) {
        let generation = self.begin_operation();
        #[cfg(feature = "hydrate")]
        {
            use crate::net::auth::HttpAuthApi;
            use crate::util::session::LocalTokenStore;

            let session = take_session(&LocalTokenStore);
            leptos::task::spawn_local(async move {
                perform_logout(&HttpAuthApi, session).await;
            });
        }
        self.finish_operation(generation, AuthPhase::Unauthenticated);
        self.state.update(|s| s.login_error = None);
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}
