//! Feature-area pages (`/search`, `/chat`) framed by the session header.
//!
//! ARCHITECTURE
//! ============
//! The page owns nothing beyond wiring: it reads the auth and settings
//! contexts and hands explicit snapshots to `SessionHeader`.

#[cfg(test)]
#[path = "feature_test.rs"]
mod feature_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::session_header::SessionHeader;
use crate::net::types::CombinedSettings;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;
use crate::util::nav::{CHAT_PATH, SEARCH_PATH};

/// Which feature area a page hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureArea {
    Search,
    Chat,
}

impl FeatureArea {
    pub fn title(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Chat => "Chat",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Search => SEARCH_PATH,
            Self::Chat => CHAT_PATH,
        }
    }
}

#[component]
pub fn FeaturePage(area: FeatureArea) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let settings = expect_context::<RwSignal<Option<CombinedSettings>>>();
    let logging_out = RwSignal::new(false);
    install_unauth_redirect(auth, move || logging_out.get(), use_navigate());

    let user = Signal::derive(move || auth.get().user);
    let on_logged_out = Callback::new(move |()| {
        logging_out.set(true);
        auth.update(AuthState::clear);
    });

    view! {
        <SessionHeader user=user settings=settings on_logged_out=on_logged_out/>
        <main class="feature-page" data-area=area.path()>
            <h2 class="feature-page__title">{area.title()}</h2>
        </main>
    }
}
