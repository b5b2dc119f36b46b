//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shell chrome from explicitly passed snapshots and talk
//! to the API only through `net::api`.

pub mod session_header;
