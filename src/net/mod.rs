//! Networking modules for the auth and settings HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the auth transactions, `transport` the browser/native HTTP
//! seam they run over, `config` the native client settings, and `types`
//! the wire schema.

pub mod api;
pub mod config;
pub mod transport;
pub mod types;

#[cfg(test)]
#[path = "fake_transport_test.rs"]
pub(crate) mod fake_transport;
