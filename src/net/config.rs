//! Native client configuration parsed from environment variables.
//!
//! The browser build talks to its own origin and never reads this.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// `name=value` cookie to present as an already signed-in session.
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_cookie: None,
        }
    }
}

impl ClientConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `SHELL_BASE_URL`: API origin, default `http://127.0.0.1:8080`
    /// - `SHELL_CONNECT_TIMEOUT_SECS`: default 10
    /// - `SHELL_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHELL_SESSION_COOKIE`: session cookie from an earlier login
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let base_url = lookup("SHELL_BASE_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .unwrap_or_default();
        let base_url = if base_url.is_empty() { DEFAULT_BASE_URL.to_owned() } else { base_url };

        Self {
            base_url,
            connect_timeout_secs: parse_secs(&lookup, "SHELL_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout_secs: parse_secs(&lookup, "SHELL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            session_cookie: match lookup("SHELL_SESSION_COOKIE") {
                Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().to_owned()),
                _ => None,
            },
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => {
                log::warn!("ignoring invalid {key}={raw:?}, using {default}");
                default
            }
            Ok(secs) => secs,
        },
        Err(_) => default,
    }
}
