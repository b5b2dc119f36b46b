#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
///
/// Provided app-wide as an `RwSignal<AuthState>`. `loading` stays `true`
/// until the first current-user lookup completes.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State before the first lookup has resolved.
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Record a finished lookup.
    pub fn resolve(&mut self, user: Option<User>) {
        self.user = user;
        self.loading = false;
    }

    /// Forget the user after a successful logout.
    pub fn clear(&mut self) {
        self.user = None;
        self.loading = false;
    }
}
