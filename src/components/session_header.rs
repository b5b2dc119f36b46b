//! Persistent top header: brand link, feature quick-links, account menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by every feature page. The user and settings snapshots are
//! passed in as props; the header never resolves them itself and never
//! mutates them. It owns only the account menu state, whose outside-click
//! listener is managed by `state::menu::AccountMenu`.
//!
//! TRADE-OFFS
//! ==========
//! An in-flight logout is not aborted when the header unmounts. Its
//! completion still shows the failure notice, but the redirect is skipped
//! once the header is gone so a stale completion cannot yank the user off
//! whatever page they moved to.

#[cfg(test)]
#[path = "session_header_test.rs"]
mod session_header_test;

use leptos::prelude::*;

use crate::net::api::AuthClient;
use crate::net::transport::{HttpTransport, TransportError};
use crate::net::types::{AuthOutcome, CombinedSettings, User};
#[cfg(feature = "hydrate")]
use crate::state::menu::AccountMenu;
use crate::state::menu::MenuState;
use crate::util::nav::{self, LOGOUT_REDIRECT_PATH};
#[cfg(feature = "hydrate")]
use crate::util::outside_click::BrowserDocument;

pub const LOGOUT_FAILED_NOTICE: &str = "Failed to logout";

/// Log out, tell the user if that failed, then always redirect to login.
///
/// `notify` is called at most once, only for a rejected logout or a
/// transport failure. `redirect` is called exactly once with
/// `/auth/login?disableAutoRedirect=true`, after the request settles.
///
/// # Errors
///
/// Returns the transport failure, after `notify` and `redirect` have run.
pub async fn logout_then_redirect<T, N, R>(
    client: &AuthClient<T>,
    notify: N,
    redirect: R,
) -> Result<AuthOutcome, TransportError>
where
    T: HttpTransport,
    N: FnOnce(&str),
    R: FnOnce(&str),
{
    let result = client.logout().await;
    let failed = match &result {
        Ok(outcome) => !outcome.success,
        Err(e) => {
            log::warn!("logout request did not complete: {e}");
            true
        }
    };
    if failed {
        notify(LOGOUT_FAILED_NOTICE);
    }
    redirect(LOGOUT_REDIRECT_PATH);
    result
}

#[cfg(feature = "hydrate")]
fn show_blocking_notice(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(message) {
            log::warn!("failed to show notice {message:?}: {err:?}");
        }
    }
}

/// Header bar. Renders nothing when `settings` is `None`.
///
/// `on_logged_out` runs after the server confirms a logout, so the owner of
/// the user snapshot can clear it.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn SessionHeader(
    #[prop(into)] user: Signal<Option<User>>,
    #[prop(into)] settings: Signal<Option<CombinedSettings>>,
    #[prop(optional)] on_logged_out: Option<Callback<()>>,
) -> impl IntoView {
    let menu_state = RwSignal::new(MenuState::Closed);
    let menu_root = NodeRef::<leptos::html::Div>::new();
    let links = Memo::new(move |_| nav::header_links(settings.get().as_ref()));

    #[cfg(feature = "hydrate")]
    let menu = StoredValue::new_local(BrowserDocument::current().map(|document| {
        AccountMenu::new(
            document,
            move |target: &web_sys::EventTarget| {
                use wasm_bindgen::JsCast;
                menu_root
                    .get_untracked()
                    .is_some_and(|root| root.contains(target.dyn_ref::<web_sys::Node>()))
            },
            move |state| menu_state.set(state),
        )
    }));

    #[cfg(feature = "hydrate")]
    on_cleanup(move || {
        if menu.try_with_value(|m| m.as_ref().map(AccountMenu::teardown)).is_none() {
            log::debug!("account menu already disposed at header cleanup");
        }
    });

    #[cfg(feature = "hydrate")]
    let start_logout = {
        let navigate = leptos_router::hooks::use_navigate();
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_cleanup = alive.clone();
        on_cleanup(move || alive_cleanup.store(false, std::sync::atomic::Ordering::Relaxed));

        StoredValue::new_local(move || {
            menu.with_value(|m| {
                if let Some(m) = m {
                    m.close();
                }
            });
            let navigate = navigate.clone();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = AuthClient::browser();
                let redirect = |path: &str| {
                    if alive.load(std::sync::atomic::Ordering::Relaxed) {
                        navigate(path, leptos_router::NavigateOptions::default());
                    } else {
                        log::debug!("header unmounted before logout settled; skipping redirect");
                    }
                };
                let result = logout_then_redirect(&client, show_blocking_notice, redirect).await;
                if result.is_ok_and(|outcome| outcome.success) {
                    if let Some(callback) = on_logged_out {
                        callback.run(());
                    }
                }
            });
        })
    };

    let on_trigger = move |_| {
        #[cfg(feature = "hydrate")]
        menu.with_value(|m| {
            if let Some(m) = m {
                m.toggle();
            }
        });
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        start_logout.with_value(|start| start());
    };

    let landing = move || links.get().map_or(nav::SEARCH_PATH, |l| l.landing);
    let trigger_label = move || {
        user.with(|u| u.as_ref().map_or_else(|| "Account".to_owned(), |u| u.email.clone()))
    };
    let user_email = move || user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    view! {
        <Show when=move || links.get().is_some()>
            <header class="session-header">
                <a class="session-header__brand" href=landing>
                    <img src="/logo.png" alt="Logo" width="30" height="32"/>
                    <h1 class="session-header__title">"LME Chat"</h1>
                </a>

                <Show when=move || links.get().is_some_and(|l| l.quick_links)>
                    <a href=nav::SEARCH_PATH class="session-header__link">"Search"</a>
                    <a href=nav::CHAT_PATH class="session-header__link">"Chat"</a>
                </Show>

                <span class="session-header__spacer"></span>

                <div class="session-header__account" node_ref=menu_root>
                    <button class="btn session-header__trigger" on:click=on_trigger title="Account">
                        {trigger_label}
                    </button>
                    <Show when=move || menu_state.get().is_open()>
                        <div class="session-header__menu">
                            <Show
                                when=move || user.with(Option::is_some)
                                fallback=|| view! {
                                    <a href=nav::LOGIN_PATH class="session-header__item">"Log in"</a>
                                }
                            >
                                <span class="session-header__email">{user_email}</span>
                                <Show when=move || user.with(|u| u.as_ref().is_some_and(User::is_admin))>
                                    <a href=nav::ADMIN_PATH class="session-header__item">"Admin Panel"</a>
                                </Show>
                                <button class="session-header__item" on:click=on_logout>
                                    "Log out"
                                </button>
                            </Show>
                        </div>
                    </Show>
                </div>
            </header>
        </Show>
    }
}
