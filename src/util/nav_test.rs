use super::*;

fn settings(default_page: DefaultPage, search: bool, chat: bool) -> Settings {
    Settings { default_page, search_page_enabled: search, chat_page_enabled: chat }
}

// =============================================================
// landing_path
// =============================================================

#[test]
fn landing_is_chat_when_default_page_chat() {
    let s = settings(DefaultPage::Chat, true, true);
    assert_eq!(landing_path(Some(&s)), "/chat");
}

#[test]
fn landing_is_search_when_default_page_search() {
    let s = settings(DefaultPage::Search, true, true);
    assert_eq!(landing_path(Some(&s)), "/search");
}

#[test]
fn landing_falls_back_to_search_without_settings() {
    assert_eq!(landing_path(None), "/search");
}

// =============================================================
// show_quick_links
// =============================================================

#[test]
fn quick_links_shown_when_both_enabled() {
    assert!(show_quick_links(Some(&settings(DefaultPage::Search, true, true))));
}

#[test]
fn quick_links_hidden_when_either_disabled() {
    assert!(!show_quick_links(Some(&settings(DefaultPage::Chat, true, false))));
    assert!(!show_quick_links(Some(&settings(DefaultPage::Chat, false, true))));
    assert!(!show_quick_links(Some(&settings(DefaultPage::Chat, false, false))));
}

#[test]
fn quick_links_fail_open_without_settings() {
    assert!(show_quick_links(None));
}

// =============================================================
// header_links
// =============================================================

#[test]
fn header_renders_nothing_without_settings_context() {
    assert_eq!(header_links(None), None);
}

#[test]
fn header_renders_with_fallbacks_when_settings_not_loaded() {
    let context = CombinedSettings { settings: None };
    assert_eq!(
        header_links(Some(&context)),
        Some(HeaderLinks { landing: "/search", quick_links: true })
    );
}

#[test]
fn chat_default_with_chat_disabled_hides_quick_links() {
    let context = CombinedSettings { settings: Some(settings(DefaultPage::Chat, true, false)) };
    assert_eq!(
        header_links(Some(&context)),
        Some(HeaderLinks { landing: "/chat", quick_links: false })
    );
}

// =============================================================
// auto_redirect_disabled
// =============================================================

#[test]
fn logout_redirect_path_carries_flag() {
    assert_eq!(LOGOUT_REDIRECT_PATH, format!("{LOGIN_PATH}?{DISABLE_AUTO_REDIRECT_PARAM}=true"));
}

#[test]
fn auto_redirect_disabled_only_for_true() {
    assert!(auto_redirect_disabled(Some("true")));
    assert!(!auto_redirect_disabled(Some("TRUE")));
    assert!(!auto_redirect_disabled(Some("false")));
    assert!(!auto_redirect_disabled(Some("1")));
    assert!(!auto_redirect_disabled(Some("")));
    assert!(!auto_redirect_disabled(None));
}
