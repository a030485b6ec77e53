//! Authentication client for the Savora API.
//!
//! Five round-trips, one each: login, logout, register, token refresh, and
//! profile fetch. No retries at this layer; the refresh-then-retry policy
//! lives in [`crate::state::auth`].
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning `Network` errors since these endpoints are only
//! meaningful in the browser.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{LoginResponse, RegisterRequest, TokenPair, User};
#[cfg(feature = "hydrate")]
use crate::util::session::{LocalTokenStore, TokenStore};

/// Failures of the token-based auth round-trips.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("not authorized")]
    Unauthorized,
    #[error("session expired")]
    RefreshExpired,
    #[error("network error: {0}")]
    Network(String),
}

/// A field-level validation message from the register endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Failures of account registration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("an account with that name already exists")]
    Conflict,
    #[error("network error: {0}")]
    Network(String),
}

/// Map a non-success login status to its error.
pub fn login_error_from_status(status: u16) -> AuthError {
    match status {
        400 | 401 => AuthError::InvalidCredentials,
        _ => AuthError::Network(format!("login failed: {status}")),
    }
}

/// Map a non-success profile-fetch status to its error.
pub fn profile_error_from_status(status: u16) -> AuthError {
    if status == 401 {
        AuthError::Unauthorized
    } else {
        AuthError::Network(format!("profile fetch failed: {status}"))
    }
}

/// Map a non-success refresh status to its error.
///
/// Any 4xx means the server rejected the refresh token; this is the sole
/// trigger for a forced logout.
pub fn refresh_error_from_status(status: u16) -> AuthError {
    if (400..500).contains(&status) {
        AuthError::RefreshExpired
    } else {
        AuthError::Network(format!("refresh failed: {status}"))
    }
}

/// Map a non-success register status plus its parsed body to its error.
///
/// The server reports per-field messages as an `"errors"` object.
pub fn register_error_from_parts(
    status: u16,
    body: Option<serde_json::Value>,
) -> RegisterError {
    if status == 409 {
        return RegisterError::Conflict;
    }
    if status == 400 {
        if let Some(map) = body
            .as_ref()
            .and_then(|v| v.get("errors"))
            .and_then(serde_json::Value::as_object)
        {
            let mut fields: Vec<FieldError> = map
                .iter()
                .filter_map(|(field, msg)| {
                    msg.as_str().map(|message| FieldError {
                        field: field.clone(),
                        message: message.to_owned(),
                    })
                })
                .collect();
            fields.sort_by(|a, b| a.field.cmp(&b.field));
            return RegisterError::Validation(fields);
        }
    }
    RegisterError::Network(format!("register failed: {status}"))
}

/// The five authentication operations, one network round-trip each.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError>;
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;
    async fn register(&self, payload: &RegisterRequest) -> Result<User, RegisterError>;
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
    async fn profile(&self) -> Result<User, AuthError>;
}

/// `gloo-net` implementation against the fixed API paths.
///
/// The bearer token for `profile` is read from the localStorage-backed
/// session store at call time.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthApi;

#[allow(clippy::unused_async)]
impl AuthApi for HttpAuthApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "username": username, "password": password });
            let resp = gloo_net::http::Request::post("/api/auth/login")
                .json(&body)
                .map_err(net_auth_err)?
                .send()
                .await
                .map_err(net_auth_err)?;
            if !resp.ok() {
                return Err(login_error_from_status(resp.status()));
            }
            resp.json::<LoginResponse>().await.map_err(net_auth_err)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(server_side())
        }
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "refreshToken": refresh_token });
            let resp = gloo_net::http::Request::post("/api/auth/logout")
                .json(&body)
                .map_err(net_auth_err)?
                .send()
                .await
                .map_err(net_auth_err)?;
            if !resp.ok() {
                return Err(AuthError::Network(format!(
                    "logout failed: {}",
                    resp.status()
                )));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(server_side())
        }
    }

    async fn register(&self, payload: &RegisterRequest) -> Result<User, RegisterError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post("/api/members/register")
                .json(payload)
                .map_err(net_register_err)?
                .send()
                .await
                .map_err(net_register_err)?;
            if !resp.ok() {
                let body = resp.json::<serde_json::Value>().await.ok();
                return Err(register_error_from_parts(resp.status(), body));
            }
            resp.json::<User>().await.map_err(net_register_err)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = payload;
            Err(RegisterError::Network("not available on server".to_owned()))
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post("/api/auth/refresh")
                .query([("refreshToken", refresh_token)])
                .send()
                .await
                .map_err(net_auth_err)?;
            if !resp.ok() {
                return Err(refresh_error_from_status(resp.status()));
            }
            resp.json::<TokenPair>().await.map_err(net_auth_err)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(server_side())
        }
    }

    async fn profile(&self) -> Result<User, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let token = LocalTokenStore
                .access_token()
                .ok_or(AuthError::Unauthorized)?;
            let resp = gloo_net::http::Request::get("/api/members/profile")
                .header("Authorization", &format!("Bearer {token}"))
                .send()
                .await
                .map_err(net_auth_err)?;
            if !resp.ok() {
                return Err(profile_error_from_status(resp.status()));
            }
            resp.json::<User>().await.map_err(net_auth_err)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(server_side())
        }
    }
}

#[cfg(feature = "hydrate")]
fn net_auth_err(err: gloo_net::Error) -> AuthError {
    AuthError::Network(err.to_string())
}

#[cfg(feature = "hydrate")]
fn net_register_err(err: gloo_net::Error) -> RegisterError {
    RegisterError::Network(err.to_string())
}

#[cfg(not(feature = "hydrate"))]
fn server_side() -> AuthError {
    AuthError::Network("not available on server".to_owned())
}
