//! `Json` and `Path` wrappers whose rejections render as [`AppError`].
//!
//! Axum's stock extractors answer malformed input with plain-text bodies;
//! these keep every 400 in the `{"error", "code"}` shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
