//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

#[cfg(feature = "hydrate")]
use crate::net::api::AuthClient;
use crate::net::types::CombinedSettings;
use crate::pages::{
    feature::{FeatureArea, FeaturePage},
    home::HomePage,
    login::LoginPage,
};
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::util::auth::load_current_user;

/// Root application component.
///
/// Provides the auth and settings contexts and sets up client-side routing.
/// The settings context stays `None` until the settings lookup settles, so
/// headers render nothing until then.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    let settings = RwSignal::new(None::<CombinedSettings>);

    provide_context(auth);
    provide_context(settings);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let client = AuthClient::browser();
        let user = load_current_user(&client).await;
        auth.update(|a| a.resolve(user));
        let loaded = match client.fetch_settings().await {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("settings lookup failed: {e}");
                None
            }
        };
        settings.set(Some(CombinedSettings { settings: loaded }));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/session-shell.css"/>
        <Title text="LME Chat"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginPage/>
                <Route path=StaticSegment("search") view=|| view! { <FeaturePage area=FeatureArea::Search/> }/>
                <Route path=StaticSegment("chat") view=|| view! { <FeaturePage area=FeatureArea::Chat/> }/>
            </Routes>
        </Router>
    }
}
