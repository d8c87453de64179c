//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation against the shared secret.

pub mod jwt;
