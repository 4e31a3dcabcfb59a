//! Request helpers for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

/// Send a request and decode the JSON response body.
#[allow(dead_code)]
pub async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    auth_token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = auth_token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = builder.body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Register a user and return the issued token.
#[allow(dead_code)]
pub async fn register_user(router: &axum::Router, username: &str, password: &str) -> String {
    let (status, body) = json_request(
        router,
        "POST",
        &format!("/register?username={username}&password={password}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body["token"]
        .as_str()
        .expect("registration response missing token")
        .to_string()
}

/// Create an array for the given token and return it.
#[allow(dead_code)]
pub async fn create_array(router: &axum::Router, token: &str, size: i64) -> Vec<i64> {
    let (status, body) = json_request(
        router,
        "POST",
        &format!("/array/create?size={size}"),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "array creation failed: {body}");
    body["array"]
        .as_array()
        .expect("array creation response missing array")
        .iter()
        .map(|v| v.as_i64().expect("non-integer array element"))
        .collect()
}
