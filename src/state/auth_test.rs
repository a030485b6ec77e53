use super::*;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::executor::block_on;

use crate::net::auth::RegisterError;
use crate::net::types::{RegisterRequest, TokenPair};
use crate::util::session::MemoryTokenStore;

/// Scripted [`AuthApi`] with call counters. Profile results are consumed in
/// order; an unscripted call fails as a network error.
#[derive(Default)]
struct MockApi {
    login_result: RefCell<Option<Result<LoginResponse, AuthError>>>,
    logout_result: RefCell<Option<Result<(), AuthError>>>,
    refresh_result: RefCell<Option<Result<TokenPair, AuthError>>>,
    profile_results: RefCell<VecDeque<Result<User, AuthError>>>,
    login_calls: Cell<u32>,
    logout_calls: Cell<u32>,
    refresh_calls: Cell<u32>,
    profile_calls: Cell<u32>,
    last_logout_token: RefCell<Option<String>>,
}

fn unscripted<T>(what: &str) -> Result<T, AuthError> {
    Err(AuthError::Network(format!("unscripted {what} call")))
}

impl AuthApi for MockApi {
    async fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse, AuthError> {
        self.login_calls.set(self.login_calls.get() + 1);
        self.login_result
            .borrow_mut()
            .take()
            .unwrap_or_else(|| unscripted("login"))
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        *self.last_logout_token.borrow_mut() = Some(refresh_token.to_owned());
        self.logout_result
            .borrow_mut()
            .take()
            .unwrap_or_else(|| unscripted("logout"))
    }

    async fn register(&self, _payload: &RegisterRequest) -> Result<User, RegisterError> {
        Err(RegisterError::Network("unscripted register call".to_owned()))
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.refresh_calls.set(self.refresh_calls.get() + 1);
        self.refresh_result
            .borrow_mut()
            .take()
            .unwrap_or_else(|| unscripted("refresh"))
    }

    async fn profile(&self) -> Result<User, AuthError> {
        self.profile_calls.set(self.profile_calls.get() + 1);
        self.profile_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| unscripted("profile"))
    }
}

fn user(role: Role) -> User {
    User {
        id: 1,
        username: "owner1".to_owned(),
        role,
        nickname: None,
        email: None,
        phone: None,
    }
}

fn stored_session() -> Session {
    Session {
        access_token: "at-old".to_owned(),
        refresh_token: "rt-old".to_owned(),
    }
}

fn store_with_session() -> MemoryTokenStore {
    let store = MemoryTokenStore::default();
    store.save(&stored_session());
    store
}

// =============================================================
// Bootstrap (restore_session)
// =============================================================

#[test]
fn bootstrap_without_stored_session_is_unauthenticated() {
    let api = MockApi::default();
    let store = MemoryTokenStore::default();

    let phase = block_on(restore_session(&api, &store));

    assert_eq!(phase, AuthPhase::Unauthenticated);
    assert_eq!(api.profile_calls.get(), 0);
}

#[test]
fn bootstrap_with_valid_session_authenticates() {
    let api = MockApi::default();
    api.profile_results
        .borrow_mut()
        .push_back(Ok(user(Role::Owner)));
    let store = store_with_session();

    let phase = block_on(restore_session(&api, &store));

    assert_eq!(phase, AuthPhase::Authenticated(user(Role::Owner)));
    assert_eq!(api.profile_calls.get(), 1);
    assert_eq!(api.refresh_calls.get(), 0);
    assert_eq!(store.load(), Some(stored_session()));
}

#[test]
fn bootstrap_is_idempotent_for_the_same_stored_session() {
    let api = MockApi::default();
    api.profile_results
        .borrow_mut()
        .push_back(Ok(user(Role::User)));
    api.profile_results
        .borrow_mut()
        .push_back(Ok(user(Role::User)));
    let store = store_with_session();

    let first = block_on(restore_session(&api, &store));
    let second = block_on(restore_session(&api, &store));

    assert_eq!(first, second);
    assert_eq!(first, AuthPhase::Authenticated(user(Role::User)));
}

#[test]
fn expired_access_token_refreshes_then_retries_once() {
    let api = MockApi::default();
    api.profile_results
        .borrow_mut()
        .push_back(Err(AuthError::Unauthorized));
    api.profile_results
        .borrow_mut()
        .push_back(Ok(user(Role::Owner)));
    *api.refresh_result.borrow_mut() = Some(Ok(TokenPair {
        access_token: "at-new".to_owned(),
        refresh_token: "rt-new".to_owned(),
    }));
    let store = store_with_session();

    let phase = block_on(restore_session(&api, &store));

    assert_eq!(phase, AuthPhase::Authenticated(user(Role::Owner)));
    assert_eq!(api.refresh_calls.get(), 1);
    assert_eq!(api.profile_calls.get(), 2);
    let saved = store.load().expect("refreshed session saved");
    assert_eq!(saved.access_token, "at-new");
    assert_eq!(saved.refresh_token, "rt-new");
}

#[test]
fn invalid_refresh_token_ends_unauthenticated_and_clears_storage() {
    let api = MockApi::default();
    api.profile_results
        .borrow_mut()
        .push_back(Err(AuthError::Unauthorized));
    *api.refresh_result.borrow_mut() = Some(Err(AuthError::RefreshExpired));
    let store = store_with_session();

    let phase = block_on(restore_session(&api, &store));

    assert_eq!(phase, AuthPhase::Unauthenticated);
    assert_eq!(api.refresh_calls.get(), 1);
    assert!(store.load().is_none());
}

#[test]
fn profile_failure_after_successful_refresh_clears_storage() {
    let api = MockApi::default();
    api.profile_results
        .borrow_mut()
        .push_back(Err(AuthError::Unauthorized));
    api.profile_results
        .borrow_mut()
        .push_back(Err(AuthError::Unauthorized));
    *api.refresh_result.borrow_mut() = Some(Ok(TokenPair {
        access_token: "at-new".to_owned(),
        refresh_token: "rt-new".to_owned(),
    }));
    let store = store_with_session();

    let phase = block_on(restore_session(&api, &store));

    assert_eq!(phase, AuthPhase::Unauthenticated);
    assert_eq!(api.profile_calls.get(), 2);
    assert!(store.load().is_none());
}

#[test]
fn transport_failure_during_bootstrap_keeps_stored_tokens() {
    let api = MockApi::default();
    api.profile_results
        .borrow_mut()
        .push_back(Err(AuthError::Network("timeout".to_owned())));
    let store = store_with_session();

    let phase = block_on(restore_session(&api, &store));

    assert_eq!(phase, AuthPhase::Unauthenticated);
    assert_eq!(api.refresh_calls.get(), 0);
    assert_eq!(store.load(), Some(stored_session()));
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_saves_session_and_derives_identity_from_response() {
    let api = MockApi::default();
    *api.login_result.borrow_mut() = Some(Ok(LoginResponse {
        access_token: "at-1".to_owned(),
        refresh_token: "rt-1".to_owned(),
        role: Role::Owner,
        user_id: Some(42),
        username: None,
    }));
    let store = MemoryTokenStore::default();

    let logged_in = block_on(perform_login(&api, &store, "owner1", "pw")).unwrap();

    assert_eq!(logged_in.role, Role::Owner);
    assert_eq!(logged_in.id, 42);
    // Form username fills in when the response omits one.
    assert_eq!(logged_in.username, "owner1");
    let saved = store.load().expect("session saved on login");
    assert_eq!(saved.access_token, "at-1");
}

#[test]
fn login_prefers_the_username_from_the_response() {
    let api = MockApi::default();
    *api.login_result.borrow_mut() = Some(Ok(LoginResponse {
        access_token: "at-1".to_owned(),
        refresh_token: "rt-1".to_owned(),
        role: Role::User,
        user_id: None,
        username: Some("canonical".to_owned()),
    }));
    let store = MemoryTokenStore::default();

    let logged_in = block_on(perform_login(&api, &store, "typed", "pw")).unwrap();

    assert_eq!(logged_in.username, "canonical");
}

#[test]
fn failed_login_leaves_no_session_behind() {
    let api = MockApi::default();
    *api.login_result.borrow_mut() = Some(Err(AuthError::InvalidCredentials));
    let store = MemoryTokenStore::default();

    let result = block_on(perform_login(&api, &store, "owner1", "wrong"));

    assert_eq!(result, Err(AuthError::InvalidCredentials));
    assert!(store.load().is_none());
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_tokens_even_when_the_server_call_fails() {
    let api = MockApi::default();
    *api.logout_result.borrow_mut() = Some(Err(AuthError::Network("timeout".to_owned())));
    let store = store_with_session();

    let session = take_session(&store);
    block_on(perform_logout(&api, session));

    assert_eq!(api.logout_calls.get(), 1);
    assert_eq!(api.last_logout_token.borrow().as_deref(), Some("rt-old"));
    assert!(store.load().is_none());
}

#[test]
fn logout_removes_tokens_before_the_server_round_trip() {
    let store = store_with_session();

    let session = take_session(&store);

    // Storage is already empty while the server call is still to come.
    assert!(store.load().is_none());
    assert_eq!(session, Some(stored_session()));
}

#[test]
fn logout_without_a_session_skips_the_server_call() {
    let api = MockApi::default();
    let store = MemoryTokenStore::default();

    let session = take_session(&store);
    block_on(perform_logout(&api, session));

    assert_eq!(api.logout_calls.get(), 0);
    assert!(store.load().is_none());
}

#[test]
fn stale_logout_completion_cannot_wipe_a_newer_login_session() {
    let api = MockApi::default();
    *api.logout_result.borrow_mut() = Some(Err(AuthError::Network("timeout".to_owned())));
    *api.login_result.borrow_mut() = Some(Ok(LoginResponse {
        access_token: "at-new".to_owned(),
        refresh_token: "rt-new".to_owned(),
        role: Role::User,
        user_id: Some(7),
        username: None,
    }));
    let store = store_with_session();

    // Logout starts: tokens leave storage up front, the round-trip is
    // still outstanding.
    let pending_logout = perform_logout(&api, take_session(&store));
    assert!(store.load().is_none());

    // A new login lands while the logout is in flight.
    block_on(perform_login(&api, &store, "user1", "pw")).unwrap();

    // The logout resolving afterwards leaves the new session alone.
    block_on(pending_logout);
    assert_eq!(api.last_logout_token.borrow().as_deref(), Some("rt-old"));
    let saved = store.load().expect("newer session survives the stale logout");
    assert_eq!(saved.access_token, "at-new");
    assert_eq!(saved.refresh_token, "rt-new");
}

// =============================================================
// AuthContext: defaults and the stale-response guard
// =============================================================

#[test]
fn context_starts_initializing_with_no_user() {
    let ctx = AuthContext::new();
    assert!(ctx.is_initializing());
    assert!(ctx.current_user().is_none());
    assert!(ctx.current_role().is_none());
    assert!(!ctx.state().login_pending);
}

#[test]
fn finish_operation_applies_the_current_generation() {
    let ctx = AuthContext::new();
    let generation = ctx.begin_operation();

    assert!(ctx.finish_operation(generation, AuthPhase::Authenticated(user(Role::User))));
    assert_eq!(ctx.current_role(), Some(Role::User));
}

#[test]
fn finish_operation_discards_stale_completions() {
    let ctx = AuthContext::new();
    let stale = ctx.begin_operation();
    let current = ctx.begin_operation();

    // The older operation resolves after the newer one started.
    assert!(!ctx.finish_operation(stale, AuthPhase::Authenticated(user(Role::Owner))));
    assert!(ctx.is_initializing());

    assert!(ctx.finish_operation(current, AuthPhase::Unauthenticated));
    assert_eq!(ctx.phase(), AuthPhase::Unauthenticated);
}

#[test]
fn logout_transitions_to_unauthenticated_immediately() {
    let ctx = AuthContext::new();
    let generation = ctx.begin_operation();
    ctx.finish_operation(generation, AuthPhase::Authenticated(user(Role::Owner)));

    ctx.spawn_logout();

    assert_eq!(ctx.phase(), AuthPhase::Unauthenticated);
    assert!(ctx.state().login_error.is_none());
}

#[test]
fn logout_invalidates_in_flight_operations() {
    let ctx = AuthContext::new();
    let in_flight = ctx.begin_operation();

    ctx.spawn_logout();

    // A login/bootstrap that was outstanding at logout time must not land.
    assert!(!ctx.finish_operation(in_flight, AuthPhase::Authenticated(user(Role::User))));
    assert_eq!(ctx.phase(), AuthPhase::Unauthenticated);
}
