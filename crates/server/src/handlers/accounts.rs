//! Account endpoints: registration, login, password change.

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{hash_password, record_request, verify_password};
use crate::state::AppState;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sortstash_core::token::{generate_token, hash_token};
use sortstash_store::models::UserRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Query parameters for registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialParams {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response carrying a freshly issued session token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

/// POST /register - Create a user account and issue its first token.
pub async fn register(
    State(state): State<AppState>,
    Query(params): Query<CredentialParams>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let username = params.username.unwrap_or_default();
    let password = params.password.unwrap_or_default();

    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password required".to_string(),
        ));
    }

    if state
        .store
        .get_user_by_username(&username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(password, state.config.auth.bcrypt_cost).await?;
    let token = generate_token();
    let now = OffsetDateTime::now_utc();

    let user = UserRow {
        user_id: Uuid::new_v4(),
        username,
        password_hash,
        token_hash: hash_token(&token),
        created_at: now,
        updated_at: now,
    };
    state.store.create_user(&user).await?;

    tracing::info!(user_id = %user.user_id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
        }),
    ))
}

/// POST /login - Verify credentials and rotate the session token.
///
/// Unknown usernames and wrong passwords answer identically so the endpoint
/// cannot be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<CredentialParams>,
) -> ApiResult<Json<AuthResponse>> {
    let username = params.username.unwrap_or_default();
    let password = params.password.unwrap_or_default();

    let user = state
        .store
        .get_user_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    if !verify_password(password, user.password_hash.clone()).await? {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = generate_token();
    state
        .store
        .update_token(user.user_id, &hash_token(&token), OffsetDateTime::now_utc())
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// Query parameters for the password change.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordParams {
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

/// Response for a successful password change.
#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub message: String,
    #[serde(rename = "newToken")]
    pub new_token: String,
}

/// PATCH /change_password - Store a new password hash and rotate the token.
///
/// The token that authorized this call is invalid once it returns; the caller
/// must switch to the returned one.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ChangePasswordParams>,
) -> ApiResult<Json<ChangePasswordResponse>> {
    let new_password = params.new_password.unwrap_or_default();
    if new_password.trim().is_empty() {
        return Err(ApiError::BadRequest("New password is required".to_string()));
    }

    let password_hash = hash_password(new_password, state.config.auth.bcrypt_cost).await?;
    let token = generate_token();
    state
        .store
        .update_credentials(
            user.user_id,
            &password_hash,
            &hash_token(&token),
            OffsetDateTime::now_utc(),
        )
        .await?;

    record_request(&state, user.user_id, "PATCH /change_password").await;

    Ok(Json(ChangePasswordResponse {
        message: "Password changed".to_string(),
        new_token: token,
    }))
}
