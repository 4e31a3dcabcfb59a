//! Array endpoints: create, patch, fetch, sort.

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::common::record_request;
use crate::state::AppState;
use axum::extract::{Extension, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sortstash_core::sequence::{decode_elements, encode_elements, random_sequence};
use sortstash_core::sort::shell_sort;
use time::OffsetDateTime;

/// Query parameters for array creation.
#[derive(Debug, Deserialize)]
pub struct CreateArrayParams {
    pub size: Option<i64>,
}

/// Response carrying the current array and a status message.
#[derive(Debug, Serialize)]
pub struct ArrayResponse {
    pub message: String,
    pub array: Vec<i64>,
}

/// Response for a plain array fetch.
#[derive(Debug, Serialize)]
pub struct GetArrayResponse {
    pub array: Vec<i64>,
}

/// POST /array/create - Generate a random array, replacing any existing one.
pub async fn create_array(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<CreateArrayParams>,
) -> ApiResult<Json<ArrayResponse>> {
    let size = params.size.unwrap_or(0);
    if size <= 0 {
        return Err(ApiError::BadRequest("Size must be > 0".to_string()));
    }

    let values = random_sequence(size as usize);
    state
        .store
        .upsert_array(
            user.user_id,
            &encode_elements(&values)?,
            OffsetDateTime::now_utc(),
        )
        .await?;

    record_request(&state, user.user_id, "POST /array/create").await;

    Ok(Json(ArrayResponse {
        message: "Array created/updated".to_string(),
        array: values,
    }))
}

/// PATCH /array - Regenerate and/or replace the stored array.
///
/// `newSize` (> 0) regenerates a fresh random array of that length;
/// `newValues` (repeated query key) then replaces the array verbatim. Applied
/// in that order, so when both are given `newValues` wins. A `newSize` of
/// zero or less counts as not provided.
pub async fn patch_array(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ArrayResponse>> {
    let mut new_size: Option<i64> = None;
    let mut new_values: Vec<i64> = Vec::new();
    for (key, value) in &params {
        match key.as_str() {
            "newSize" => {
                new_size = Some(value.parse().map_err(|_| {
                    ApiError::BadRequest(format!("newSize must be an integer, got '{value}'"))
                })?);
            }
            "newValues" => {
                new_values.push(value.parse().map_err(|_| {
                    ApiError::BadRequest(format!("newValues must be integers, got '{value}'"))
                })?);
            }
            _ => {}
        }
    }

    let existing = state.store.get_array(user.user_id).await?.ok_or_else(|| {
        ApiError::NotFound("Array not found. Create an array first (/array/create)".to_string())
    })?;
    let mut values = decode_elements(&existing.elements)?;

    let mut updated = false;

    if let Some(size) = new_size {
        if size > 0 {
            values = random_sequence(size as usize);
            updated = true;
        }
    }

    if !new_values.is_empty() {
        values = new_values;
        updated = true;
    }

    if !updated {
        return Err(ApiError::BadRequest(
            "Nothing to update. Provide newSize>0 or newValues.".to_string(),
        ));
    }

    state
        .store
        .upsert_array(
            user.user_id,
            &encode_elements(&values)?,
            OffsetDateTime::now_utc(),
        )
        .await?;

    record_request(&state, user.user_id, "PATCH /array").await;

    Ok(Json(ArrayResponse {
        message: "Array updated".to_string(),
        array: values,
    }))
}

/// GET /array - Fetch the stored array.
pub async fn get_array(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<GetArrayResponse>> {
    let existing = state
        .store
        .get_array(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Array not found".to_string()))?;
    let values = decode_elements(&existing.elements)?;

    record_request(&state, user.user_id, "GET /array").await;

    Ok(Json(GetArrayResponse { array: values }))
}

/// POST /array/sort/shell - Shell-sort the stored array in place.
///
/// The sorted result is persisted, not just returned.
pub async fn sort_array(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<ArrayResponse>> {
    let existing = state
        .store
        .get_array(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Array not found".to_string()))?;
    let mut values = decode_elements(&existing.elements)?;

    shell_sort(&mut values);

    state
        .store
        .upsert_array(
            user.user_id,
            &encode_elements(&values)?,
            OffsetDateTime::now_utc(),
        )
        .await?;

    record_request(&state, user.user_id, "POST /array/sort/shell").await;

    Ok(Json(ArrayResponse {
        message: "Shell sort completed".to_string(),
        array: values,
    }))
}
