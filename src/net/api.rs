//! Authentication transactions against the remote API.
//!
//! Every call carries session cookies (see `transport`). Outcomes are judged
//! purely on HTTP status class; only the current-user and settings responses
//! are parsed.
//!
//! ERROR HANDLING
//! ==============
//! A rejected credential or an expired session is an ordinary `Ok` value
//! (`AuthOutcome { success: false, .. }` or `None`). `Err(TransportError)`
//! is reserved for exchanges that never completed, so the UI can tell
//! "wrong password" apart from "server unreachable".
//!
//! Nothing here retries. In particular `signup` must never be replayed
//! automatically.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use super::transport::BrowserTransport;
use super::transport::{ApiRequest, HttpTransport, RequestBody, TransportError};
use super::types::{AuthOutcome, Settings, User};

pub const CURRENT_USER_PATH: &str = "/api/manage/me";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const SETTINGS_PATH: &str = "/api/settings";

/// Stateless auth API client over a pluggable transport.
#[derive(Clone, Debug, Default)]
pub struct AuthClient<T> {
    transport: T,
}

#[cfg(feature = "hydrate")]
impl AuthClient<BrowserTransport> {
    /// Client bound to the page's own origin.
    pub fn browser() -> Self {
        Self::new(BrowserTransport)
    }
}

impl<T: HttpTransport> AuthClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit a form-encoded credential pair to `/api/auth/login`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when the request could not be completed.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<AuthOutcome, TransportError> {
        let response = self.transport.send(login_request(identifier, secret)).await?;
        let outcome = AuthOutcome::from_status(response.status);
        if !outcome.success {
            log::info!("login rejected with status {}", outcome.status);
        }
        Ok(outcome)
    }

    /// Register a new account via `/api/auth/register`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when the request could not be completed.
    pub async fn signup(&self, identifier: &str, secret: &str) -> Result<AuthOutcome, TransportError> {
        let response = self.transport.send(signup_request(identifier, secret)).await?;
        let outcome = AuthOutcome::from_status(response.status);
        if !outcome.success {
            log::info!("signup rejected with status {}", outcome.status);
        }
        Ok(outcome)
    }

    /// End the server-side session. Local state is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when the request could not be completed.
    pub async fn logout(&self) -> Result<AuthOutcome, TransportError> {
        let response = self.transport.send(logout_request()).await?;
        let outcome = AuthOutcome::from_status(response.status);
        if !outcome.success {
            log::warn!("logout failed with status {}", outcome.status);
        }
        Ok(outcome)
    }

    /// Fetch the signed-in user. `Ok(None)` means "not authenticated".
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when the request could not be completed.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, TransportError> {
        let response = self.transport.send(ApiRequest::get(CURRENT_USER_PATH)).await?;
        if !response.is_success() {
            return Ok(None);
        }
        match serde_json::from_str::<User>(&response.body) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("unreadable current-user payload: {e}");
                Ok(None)
            }
        }
    }

    /// Fetch workspace settings. `Ok(None)` when unavailable.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when the request could not be completed.
    pub async fn fetch_settings(&self) -> Result<Option<Settings>, TransportError> {
        let response = self.transport.send(ApiRequest::get(SETTINGS_PATH)).await?;
        if !response.is_success() {
            log::warn!("settings request failed with status {}", response.status);
            return Ok(None);
        }
        match serde_json::from_str::<Settings>(&response.body) {
            Ok(settings) => Ok(Some(settings)),
            Err(e) => {
                log::warn!("unreadable settings payload: {e}");
                Ok(None)
            }
        }
    }
}

fn login_request(identifier: &str, secret: &str) -> ApiRequest {
    ApiRequest::post(
        LOGIN_PATH,
        RequestBody::Form(vec![("username", identifier.to_owned()), ("password", secret.to_owned())]),
    )
}

fn signup_request(identifier: &str, secret: &str) -> ApiRequest {
    ApiRequest::post(
        REGISTER_PATH,
        RequestBody::Json(serde_json::json!({
            "email": identifier,
            "username": identifier,
            "password": secret,
        })),
    )
}

fn logout_request() -> ApiRequest {
    ApiRequest::post(LOGOUT_PATH, RequestBody::Empty)
}
