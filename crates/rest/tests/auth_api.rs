//! Signup and login tests.

mod common;

use common::assertions::assert_error;
use common::harness::TestHarness;
use matdb_persistence::core::CredentialStorage;
use matdb_persistence::types::UserCredential;
use serde_json::{Value, json};

fn signup_body(email: &str, password: &str, repeat: &str) -> Value {
    json!({
        "firstname": "Ada",
        "email": email,
        "password": password,
        "repeat_password": repeat
    })
}

#[tokio::test]
async fn test_signup_then_login() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/signup/signup")
        .json(&signup_body("ada@example.org", "pw1", "pw1"))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"message": "User registered successfully"}));
    assert_eq!(harness.backend.user_count(), 1);

    let response = harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "ada@example.org", "password": "pw1"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"message": "Login successful"}));
}

#[tokio::test]
async fn test_wrong_password_is_bad_password() {
    let harness = TestHarness::new();
    harness
        .server
        .post("/signup/signup")
        .json(&signup_body("ada@example.org", "pw1", "pw1"))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "ada@example.org", "password": "pw2"}))
        .await;

    assert_error(&response, 401, "bad_password");
}

async fn seed_user(harness: &TestHarness, email: &str, password_hash: String) {
    harness
        .backend
        .insert_user(UserCredential {
            email: email.to_string(),
            first_name: "Grace".to_string(),
            password_hash,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_against_bcrypt_row() {
    let harness = TestHarness::new();
    seed_user(&harness, "old@example.org", bcrypt::hash("password", 4).unwrap()).await;

    let response = harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "old@example.org", "password": "password"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"message": "Login successful"}));

    let response = harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "old@example.org", "password": "hunter2"}))
        .await;
    assert_error(&response, 401, "bad_password");
}

#[tokio::test]
async fn test_unreadable_stored_hash_is_bad_password() {
    let harness = TestHarness::new();
    seed_user(&harness, "odd@example.org", "not-a-hash".to_string()).await;

    let response = harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "odd@example.org", "password": "not-a-hash"}))
        .await;
    assert_error(&response, 401, "bad_password");
}

#[tokio::test]
async fn test_unknown_email_is_invalid_credentials() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "nobody@example.org", "password": "pw1"}))
        .await;

    assert_error(&response, 401, "invalid_credentials");
}

#[tokio::test]
async fn test_password_mismatch_creates_nothing() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/signup/signup")
        .json(&signup_body("ada@example.org", "pw1", "pw2"))
        .await;

    assert_error(&response, 400, "password_mismatch");
    assert_eq!(harness.backend.user_count(), 0);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let harness = TestHarness::new();
    harness
        .server
        .post("/signup/signup")
        .json(&signup_body("ada@example.org", "pw1", "pw1"))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .post("/signup/signup")
        .json(&signup_body("ada@example.org", "other", "other"))
        .await;

    assert_error(&response, 400, "email_taken");
    assert_eq!(harness.backend.user_count(), 1);

    // The original password still works.
    harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "ada@example.org", "password": "pw1"}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_invalid_email_is_unprocessable() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/signup/signup")
        .json(&signup_body("not-an-email", "pw1", "pw1"))
        .await;

    assert_error(&response, 422, "invalid_email");
}

#[tokio::test]
async fn test_missing_field_is_invalid_body() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/signup/signup")
        .json(&json!({"email": "ada@example.org", "password": "pw1"}))
        .await;

    assert_error(&response, 422, "invalid_body");
}

#[tokio::test]
async fn test_responses_never_echo_password_material() {
    let harness = TestHarness::new();

    let signup = harness
        .server
        .post("/signup/signup")
        .json(&signup_body("ada@example.org", "s3cret-pw", "s3cret-pw"))
        .await;
    let login = harness
        .server
        .post("/auth/login")
        .json(&json!({"email": "ada@example.org", "password": "s3cret-pw"}))
        .await;

    for response in [signup, login] {
        let text = response.text();
        assert!(!text.contains("s3cret-pw"));
        assert!(!text.contains("argon2"));
    }
}
