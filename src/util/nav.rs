//! Header navigation targets derived from workspace settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! The header fails closed when the settings context itself is missing
//! (nothing renders) but fails open on quick-link visibility when the
//! context exists without loaded settings. Both halves are deliberate.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::net::types::{CombinedSettings, DefaultPage, Settings};

pub const LOGIN_PATH: &str = "/auth/login";
pub const DISABLE_AUTO_REDIRECT_PARAM: &str = "disableAutoRedirect";
/// Where logout always lands, with auto-redirect back in suppressed.
pub const LOGOUT_REDIRECT_PATH: &str = "/auth/login?disableAutoRedirect=true";
pub const ADMIN_PATH: &str = "/admin/indexing/status";
pub const SEARCH_PATH: &str = "/search";
pub const CHAT_PATH: &str = "/chat";

/// Link targets the header renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderLinks {
    /// Brand/logo link.
    pub landing: &'static str,
    /// Whether the Search and Chat quick-links are shown (always together).
    pub quick_links: bool,
}

/// `/chat` when chat is the default page, `/search` otherwise or when unknown.
pub fn landing_path(settings: Option<&Settings>) -> &'static str {
    settings.map_or(DefaultPage::Search, |s| s.default_page).path()
}

/// Quick-links are all-or-nothing: hidden if either feature is disabled.
pub fn show_quick_links(settings: Option<&Settings>) -> bool {
    settings.is_none_or(|s| s.search_page_enabled && s.chat_page_enabled)
}

/// `None` means the header renders nothing.
pub fn header_links(context: Option<&CombinedSettings>) -> Option<HeaderLinks> {
    let settings = context?.settings.as_ref();
    Some(HeaderLinks { landing: landing_path(settings), quick_links: show_quick_links(settings) })
}

/// Whether a `disableAutoRedirect` query value suppresses the login page's
/// redirect for an already-signed-in user. Only the literal `true` counts.
pub fn auto_redirect_disabled(raw: Option<&str>) -> bool {
    raw == Some("true")
}
