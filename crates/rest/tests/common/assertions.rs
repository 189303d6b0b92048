//! HTTP response assertions.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual, expected,
        "Expected status {}, got {}: {}",
        expected,
        actual,
        response.text()
    );
}

/// Asserts the status and the machine-readable error code of an error body.
pub fn assert_error(response: &TestResponse, status: u16, code: &str) {
    assert_status(response, status);
    let body: Value = response.json();
    assert_eq!(body["code"], code, "unexpected error body: {}", body);
    assert!(
        body["detail"].as_str().is_some_and(|d| !d.is_empty()),
        "error body without detail: {}",
        body
    );
}

/// Asserts that the response carries the given media type.
pub fn assert_content_type(response: &TestResponse, expected: &str) {
    let header = response.header("content-type");
    let actual = header.to_str().unwrap_or_default();
    assert!(
        actual.starts_with(expected),
        "Expected content type {}, got {}",
        expected,
        actual
    );
}
