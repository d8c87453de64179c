//! Bearer-token gate for the `/api/v1` surface.
//!
//! Posty never looks users up: the `sub` claim of a valid access token is
//! the whole identity, and every repository call is scoped by it.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use posty_core::error::CoreError;
use posty_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a request, taken from its verified access token.
///
/// Taking `auth: AuthUser` as a handler argument is what makes a route
/// private; a missing or bad token is answered with 401 before the
/// handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Owner id used to scope projects, ideas and drafts.
    pub user_id: DbId,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme name is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("No access token supplied"))?
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid text"))?;

    let token = match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        _ => "",
    };
    if token.is_empty() {
        return Err(unauthorized("Authorization header must be `Bearer <token>`"));
    }
    Ok(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            unauthorized("Access token is invalid or has expired")
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
