//! Wire DTOs for the auth and settings endpoints.
//!
//! DESIGN
//! ======
//! Field defaults are lenient so an older or newer server that omits a flag
//! still deserializes; the header only cares whether a user is present.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Role attached to an account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    /// Also covers roles this client does not know about.
    #[default]
    #[serde(other)]
    Basic,
}

/// Authenticated user as returned by `/api/manage/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier (UUID string).
    pub id: String,
    /// Login email; also used as the username.
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Feature area the landing link points at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPage {
    Chat,
    #[default]
    Search,
}

impl DefaultPage {
    pub fn path(self) -> &'static str {
        match self {
            Self::Chat => "/chat",
            Self::Search => "/search",
        }
    }
}

/// Workspace-level feature flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub default_page: DefaultPage,
    pub search_page_enabled: bool,
    pub chat_page_enabled: bool,
}

/// Settings context as provided to the header.
///
/// `settings` is `None` while the settings provider has nothing loaded; the
/// header still renders in that case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombinedSettings {
    pub settings: Option<Settings>,
}

/// Result of a login, signup, or logout transaction.
///
/// Only the HTTP status class decides `success`; response bodies are never
/// inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub status: u16,
}

impl AuthOutcome {
    pub fn from_status(status: u16) -> Self {
        Self { success: (200..300).contains(&status), status }
    }
}
