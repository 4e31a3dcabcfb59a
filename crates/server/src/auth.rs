//! Bearer-token authentication middleware.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use sortstash_core::token::hash_token;
use uuid::Uuid;

/// Authenticated caller, resolved from the bearer token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    /// The user's id.
    pub user_id: Uuid,
    /// The user's username.
    pub username: String,
}

/// Extract the bearer token from the Authorization header.
/// Per RFC 6750, the "Bearer" scheme is case-insensitive.
fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            if v.len() >= 7 && v[..7].eq_ignore_ascii_case("bearer ") {
                Some(v[7..].trim())
            } else {
                None
            }
        })
}

/// Authentication middleware for the protected route group.
///
/// Runs before any extractor, so an unauthenticated request with malformed
/// parameters still answers 401 rather than 400. On success the resolved
/// [`CurrentUser`] is inserted into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    let token_hash = hash_token(token);
    let user = state
        .store
        .get_user_by_token_hash(&token_hash)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    req.extensions_mut().insert(CurrentUser {
        user_id: user.user_id,
        username: user.username,
    });

    Ok(next.run(req).await)
}
