mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, PASSWORD};

#[tokio::test]
async fn register_login_and_read_profile() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (status, body) = app
        .post_json(
            "/api/register",
            None,
            json!({
                "email": "ada@example.com",
                "password": PASSWORD,
                "role": "candidate",
                "firstName": "Ada",
                "lastName": "Lovelace",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "candidate");
    let user_id = body["user"]["id"].as_i64().unwrap();

    let stored_hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(stored_hash, PASSWORD);
    assert!(stored_hash.starts_with("$argon2"));

    let (status, body) = app
        .post_json(
            "/api/login",
            None,
            json!({ "email": "ada@example.com", "password": PASSWORD, "role": "candidate" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["id"].as_i64(), Some(user_id));
    assert_eq!(body["user"]["profile"]["first_name"], "Ada");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .get(&format!("/api/profile?userId={user_id}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["profile"]["last_name"], "Lovelace");
    assert_eq!(body["profile"]["role"], "candidate");

    app.cleanup().await;
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_stores_one_row() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let payload = json!({
        "email": "dup@example.com",
        "password": PASSWORD,
        "role": "recruiter",
    });

    let (status, _) = app.post_json("/api/register", None, payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.post_json("/api/register", None, payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already registered");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("dup@example.com")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    app.cleanup().await;
}

#[tokio::test]
async fn failed_role_profile_insert_rolls_back_registration() {
    for (role, table) in [
        ("candidate", "candidate_profiles"),
        ("recruiter", "recruiter_profiles"),
        ("admin", "admin_profiles"),
    ] {
        let Some(app) = TestApp::spawn().await else {
            return;
        };
        sqlx::query(&format!("DROP TABLE {table}"))
            .execute(&app.pool)
            .await
            .unwrap();

        let email = format!("{role}-rollback@example.com");
        let (status, body) = app
            .post_json(
                "/api/register",
                None,
                json!({ "email": email, "password": PASSWORD, "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{role}: {body}");
        assert_eq!(body["message"], "Database error");

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&email)
            .fetch_one(&app.pool)
            .await
            .unwrap();
        let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!((users, profiles), (0, 0), "{role} left rows behind");

        app.cleanup().await;
    }
}

#[tokio::test]
async fn login_distinguishes_unknown_user_and_bad_password() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let (status, _) = app
        .post_json(
            "/api/register",
            None,
            json!({ "email": "known@example.com", "password": PASSWORD, "role": "candidate" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post_json(
            "/api/login",
            None,
            json!({ "email": "nobody@example.com", "password": PASSWORD, "role": "candidate" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = app
        .post_json(
            "/api/login",
            None,
            json!({ "email": "known@example.com", "password": "wrong-password", "role": "candidate" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid password");

    let (status, _) = app
        .post_json(
            "/api/login",
            None,
            json!({ "email": "known@example.com", "password": PASSWORD, "role": "recruiter" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
async fn profile_requires_token_and_ownership() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let (alice, alice_token) = app.sign_up("candidate").await;
    let (bob, _) = app.sign_up("candidate").await;

    let (status, _) = app.get(&format!("/api/profile?userId={alice}"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .get(&format!("/api/profile?userId={alice}"), Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .get(&format!("/api/profile?userId={bob}"), Some(&alice_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, admin_token) = app.sign_up("admin").await;
    let (status, _) = app
        .get(&format!("/api/profile?userId={bob}"), Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    app.cleanup().await;
}

#[tokio::test]
async fn update_profile_writes_common_and_role_fields() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let (recruiter, token) = app.sign_up("recruiter").await;

    let (status, body) = app
        .post_json(
            "/api/update-profile",
            Some(&token),
            json!({
                "userId": recruiter,
                "role": "recruiter",
                "firstName": "Grace",
                "lastName": "Hopper",
                "phone": "+1-555-0100",
                "companyName": "Navy",
                "position": "Rear Admiral",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = app
        .get(&format!("/api/profile?userId={recruiter}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["first_name"], "Grace");
    assert_eq!(body["profile"]["phone"], "+1-555-0100");
    assert_eq!(body["profile"]["company_name"], "Navy");
    assert_eq!(body["profile"]["position"], "Rear Admiral");

    let (status, _) = app
        .post_json(
            "/api/update-profile",
            Some(&token),
            json!({ "userId": recruiter, "role": "candidate", "firstName": "G" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.cleanup().await;
}

#[tokio::test]
async fn register_rejects_malformed_payloads() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (status, _) = app
        .post_json(
            "/api/register",
            None,
            json!({ "email": "not-an-email", "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/api/register",
            None,
            json!({ "email": "short@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/api/register",
            None,
            json!({ "email": "who@example.com", "password": PASSWORD, "role": "superuser" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.cleanup().await;
}
