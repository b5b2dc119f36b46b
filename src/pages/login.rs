//! Login page with email + password sign-in and account registration.
//!
//! On mount the page re-checks the session and sends a signed-in user to `/`.
//! Honors `?disableAutoRedirect=true`: a user who just logged out may still
//! look signed in until the session cookie is gone, and must not be bounced
//! straight back into the app.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::AuthClient;
use crate::net::transport::{HttpTransport, TransportError};
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::util::auth::load_current_user;
use crate::util::auth::install_signed_in_redirect;
use crate::util::nav::{DISABLE_AUTO_REDIRECT_PARAM, auto_redirect_disabled};

/// Whether the form signs in or creates an account first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Log In",
            Self::Signup => "Sign Up",
        }
    }

    fn switch_label(self) -> &'static str {
        match self {
            Self::Login => "Don't have an account? Sign up",
            Self::Signup => "Already have an account? Log in",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

fn login_failure_message(status: u16) -> String {
    match status {
        400 | 401 => "Invalid email or password.".to_owned(),
        other => format!("Login failed ({other})"),
    }
}

fn signup_failure_message(status: u16) -> String {
    format!("Signup failed ({status})")
}

fn unreachable_message(err: &TransportError) -> String {
    format!("Unable to reach the server: {err}")
}

/// Run the form's transaction: optional signup, then login.
///
/// Signup is attempted once; a rejected signup never falls through to login.
///
/// # Errors
///
/// Returns the user-facing message for a rejection or an unreachable server.
pub async fn submit_credentials<T: HttpTransport>(
    client: &AuthClient<T>,
    mode: AuthMode,
    email: &str,
    password: &str,
) -> Result<(), String> {
    if mode == AuthMode::Signup {
        let outcome = client
            .signup(email, password)
            .await
            .map_err(|e| unreachable_message(&e))?;
        if !outcome.success {
            return Err(signup_failure_message(outcome.status));
        }
    }
    let outcome = client
        .login(email, password)
        .await
        .map_err(|e| unreachable_message(&e))?;
    if !outcome.success {
        return Err(login_failure_message(outcome.status));
    }
    Ok(())
}

#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let query = use_query_map();
    let navigate = use_navigate();

    let disabled = move || auto_redirect_disabled(query.with(|q| q.get(DISABLE_AUTO_REDIRECT_PARAM)).as_deref());
    install_signed_in_redirect(auth, disabled, navigate.clone());

    // The startup snapshot may predate a logout in another tab; ask again.
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = load_current_user(&AuthClient::browser()).await;
        auth.update(|a| a.resolve(user));
    });

    let mode = RwSignal::new(AuthMode::Login);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let current_mode = mode.get();
        busy.set(true);
        info.set(match current_mode {
            AuthMode::Login => "Signing in...".to_owned(),
            AuthMode::Signup => "Creating account...".to_owned(),
        });

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let client = AuthClient::browser();
                match submit_credentials(&client, current_mode, &email_value, &password_value).await {
                    Ok(()) => {
                        let user = load_current_user(&client).await;
                        auth.update(|a| a.resolve(user));
                        navigate("/", leptos_router::NavigateOptions::default());
                    }
                    Err(message) => {
                        info.set(message);
                        busy.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"LME Chat"</h1>
                <p class="login-card__subtitle">
                    {move || match mode.get() {
                        AuthMode::Login => "Log in to your account",
                        AuthMode::Signup => "Create an account",
                    }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || mode.get().submit_label()}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <button
                    class="login-switch"
                    type="button"
                    disabled=move || busy.get()
                    on:click=move |_| {
                        mode.update(|m| *m = m.other());
                        info.set(String::new());
                    }
                >
                    {move || mode.get().switch_label()}
                </button>
            </div>
        </div>
    }
}
