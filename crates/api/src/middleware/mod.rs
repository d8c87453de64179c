//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the calling owner from their access token.

pub mod auth;
