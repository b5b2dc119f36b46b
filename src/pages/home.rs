//! `/` route: forwards to the configured landing page once settings resolve.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::CombinedSettings;
use crate::util::nav::landing_path;

#[component]
pub fn HomePage() -> impl IntoView {
    let settings = expect_context::<RwSignal<Option<CombinedSettings>>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(context) = settings.get() {
            navigate(landing_path(context.settings.as_ref()), NavigateOptions::default());
        }
    });

    view! { <div class="home-page">"Loading..."</div> }
}
