//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth` for who is signed in, `menu` for the
//! account menu) so components depend on small focused models.

pub mod auth;
pub mod menu;
