//! End-to-end integration tests for the HTTP API.

mod common;

use axum::http::StatusCode;
use common::{json_request, TestServer};

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new().await;

    let (status, body) = json_request(&server.router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn protected_endpoints_require_auth() {
    let server = TestServer::new().await;

    let endpoints = [
        ("PATCH", "/change_password?newPassword=x"),
        ("POST", "/array/create?size=5"),
        ("PATCH", "/array?newSize=5"),
        ("GET", "/array"),
        ("POST", "/array/sort/shell"),
        ("GET", "/requests_history"),
        ("DELETE", "/requests_history"),
    ];

    for (method, uri) in endpoints {
        let (status, body) = json_request(&server.router, method, uri, None).await;
        assert_eq!(
            status,
            StatusCode::UNAUTHORIZED,
            "expected 401 for {method} {uri}"
        );
        assert!(
            body["error"].as_str().is_some(),
            "401 body should carry an error field for {method} {uri}"
        );

        let (status, _) = json_request(&server.router, method, uri, Some("bogus-token")).await;
        assert_eq!(
            status,
            StatusCode::UNAUTHORIZED,
            "expected 401 for {method} {uri} with a bogus token"
        );
    }
}

/// Full walkthrough: register, build an array, sort it, rotate the password,
/// and confirm the old session dies while the new one lives.
#[tokio::test]
async fn full_session_walkthrough() {
    let server = TestServer::new().await;

    // Register "a" and receive the first token.
    let (status, body) =
        json_request(&server.router, "POST", "/register?username=a&password=pw1", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let t1 = body["token"].as_str().unwrap().to_string();
    assert!(!t1.is_empty());

    // Create an array of five values.
    let (status, body) =
        json_request(&server.router, "POST", "/array/create?size=5", Some(&t1)).await;
    assert_eq!(status, StatusCode::OK);
    let created: Vec<i64> = body["array"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(created.len(), 5);

    // Sort it: ascending, same multiset.
    let (status, body) =
        json_request(&server.router, "POST", "/array/sort/shell", Some(&t1)).await;
    assert_eq!(status, StatusCode::OK);
    let sorted: Vec<i64> = body["array"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    let mut expected = created;
    expected.sort_unstable();
    assert_eq!(sorted, expected);

    // Change the password; the reply carries a fresh token.
    let (status, body) = json_request(
        &server.router,
        "PATCH",
        "/change_password?newPassword=pw2",
        Some(&t1),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let t2 = body["newToken"].as_str().unwrap().to_string();
    assert_ne!(t2, t1);

    // The old token is rejected; the new one reads the sorted array back.
    let (status, _) = json_request(&server.router, "GET", "/array", Some(&t1)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = json_request(&server.router, "GET", "/array", Some(&t2)).await;
    assert_eq!(status, StatusCode::OK);
    let stored: Vec<i64> = body["array"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(stored, sorted);

    // And the history shows the calls, newest first.
    let (status, body) =
        json_request(&server.router, "GET", "/requests_history", Some(&t2)).await;
    assert_eq!(status, StatusCode::OK);
    let endpoints: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["endpoint"].as_str().unwrap())
        .collect();
    assert_eq!(
        endpoints,
        vec![
            "GET /array",
            "PATCH /change_password",
            "POST /array/sort/shell",
            "POST /array/create",
        ]
    );
}
