//! Shared auth redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Feature pages bounce signed-out users to login; the login page bounces
//! signed-in users to the landing route unless the URL asked it not to.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api::AuthClient;
use crate::net::transport::HttpTransport;
use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::util::nav::LOGIN_PATH;

/// Look up the session's user; an unreachable server counts as signed out.
pub async fn load_current_user<T: HttpTransport>(client: &AuthClient<T>) -> Option<User> {
    match client.fetch_current_user().await {
        Ok(user) => user,
        Err(e) => {
            log::warn!("current-user lookup failed: {e}");
            None
        }
    }
}

/// True once auth has loaded and no user is present, unless the page is
/// already leaving through a logout.
pub fn should_redirect_unauth(state: &AuthState, logging_out: bool) -> bool {
    !logging_out && !state.loading && state.user.is_none()
}

/// True when a signed-in user lands on the login page and auto-redirect
/// has not been suppressed.
pub fn should_redirect_signed_in(state: &AuthState, auto_redirect_disabled: bool) -> bool {
    !auto_redirect_disabled && !state.loading && state.user.is_some()
}

/// Redirect to the login page whenever auth has loaded and no user is present.
///
/// `logging_out` holds the redirect back while a logout is steering the page
/// to its own flagged login URL.
pub fn install_unauth_redirect<L, F>(auth: RwSignal<AuthState>, logging_out: L, navigate: F)
where
    L: Fn() -> bool + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get(), logging_out()) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}

/// Redirect a signed-in user from the login page to `/`.
pub fn install_signed_in_redirect<D, F>(auth: RwSignal<AuthState>, auto_redirect_disabled: D, navigate: F)
where
    D: Fn() -> bool + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_signed_in(&auth.get(), auto_redirect_disabled()) {
            navigate("/", NavigateOptions::default());
        }
    });
}
