//! Admin login and sliding-session tests

use axum::http::{header, Method, StatusCode};
use scribe_auth::{AuthConfig, TokenClaims, TokenCodec, TOKEN_HEADER};
use scribe_secrets::mock::MockSecretProvider;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::common::{
    assert_status, authed_request, body_json, json_request, TestApp, ADMIN_PASSWORD,
};

async fn login(app: &TestApp, username: &str, password: &str) -> axum::response::Response {
    app.send(json_request(
        Method::POST,
        "/v1/auth/login",
        json!({ "username": username, "password": password }),
    ))
    .await
}

#[tokio::test]
async fn test_login_then_me_with_issued_token() {
    let admin_uuid = Uuid::new_v4();
    let app = TestApp::builder()
        .with_admin("testUser", admin_uuid)
        .build()
        .await;

    let response = login(&app, "testUser", ADMIN_PASSWORD).await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["username"], "testUser");

    let bearer = format!("bearer {}", body["token"].as_str().unwrap());
    let response = app
        .send(authed_request(Method::GET, "/v1/auth/me", &bearer))
        .await;
    assert_status(&response, StatusCode::OK);
    assert!(response.headers().contains_key(TOKEN_HEADER));

    let me = body_json(response).await;
    assert_eq!(me["uuid"], admin_uuid.to_string());
    assert_eq!(me["role"], "admin");
    assert!(me.get("password").is_none());
    assert!(me.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_rejections() {
    let app = TestApp::builder()
        .with_admin("testUser", Uuid::new_v4())
        .build()
        .await;

    assert_status(&login(&app, "", "").await, StatusCode::BAD_REQUEST);
    assert_status(&login(&app, "testUser", "").await, StatusCode::BAD_REQUEST);
    assert_eq!(app.directory.admin_lookups(), 0);

    assert_status(&login(&app, "nobody", "pw").await, StatusCode::UNAUTHORIZED);
    assert_status(
        &login(&app, "testUser", "wrong").await,
        StatusCode::UNAUTHORIZED,
    );
}

#[tokio::test]
async fn test_renewed_token_keeps_session_alive() {
    let admin_uuid = Uuid::new_v4();
    let app = TestApp::builder()
        .with_admin("testUser", admin_uuid)
        .build()
        .await;

    let mut bearer = app
        .bearer_for(&TokenClaims::admin("testUser", admin_uuid))
        .await;

    for _ in 0..3 {
        let response = app
            .send(authed_request(Method::GET, "/v1/auth/me", &bearer))
            .await;
        assert_status(&response, StatusCode::OK);

        let renewed = response
            .headers()
            .get(TOKEN_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let next = format!("bearer {}", renewed);
        assert_ne!(next, bearer);
        bearer = next;
    }
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let admin_uuid = Uuid::new_v4();
    let app = TestApp::builder()
        .with_admin("testUser", admin_uuid)
        .build()
        .await;
    let token = app
        .codec
        .issue(&TokenClaims::admin("testUser", admin_uuid))
        .await
        .unwrap();

    for scheme in ["bearer", "Bearer", "BEARER"] {
        let response = app
            .send(authed_request(
                Method::GET,
                "/v1/auth/me",
                &format!("{} {}", scheme, token),
            ))
            .await;
        assert_status(&response, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_bad_tokens_are_rejected_without_renewal() {
    let app = TestApp::builder()
        .with_admin("testUser", Uuid::new_v4())
        .build()
        .await;

    let foreign_secrets = Arc::new(
        MockSecretProvider::new().with_secret("jwtKeys", &[("privateKey", "someone-else")]),
    );
    let foreign = TokenCodec::new(foreign_secrets, AuthConfig::default())
        .issue(&TokenClaims::admin("testUser", Uuid::new_v4()))
        .await
        .unwrap();

    let expired = TokenCodec::new(
        Arc::new(app.secrets.clone()),
        AuthConfig {
            token_ttl_secs: -600,
            ..AuthConfig::default()
        },
    )
    .issue(&TokenClaims::admin("testUser", Uuid::new_v4()))
    .await
    .unwrap();

    let cases = [
        format!("bearer {}", foreign),
        format!("bearer {}", expired),
        "bearer not.a.jwt".to_string(),
        "bearer".to_string(),
        "Basic dXNlcjpwYXNz".to_string(),
    ];

    for header_value in cases {
        let response = app
            .send(authed_request(Method::GET, "/v1/auth/me", &header_value))
            .await;
        assert_status(&response, StatusCode::UNAUTHORIZED);
        assert!(!response.headers().contains_key(TOKEN_HEADER));
    }

    let response = app
        .send(
            axum::http::Request::builder()
                .uri("/v1/auth/me")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_visitor_token_cannot_reach_admin_routes() {
    let app = TestApp::new().await;
    let bearer = app.visitor_bearer("octocat", Uuid::new_v4()).await;

    for (method, uri) in [
        (Method::GET, "/v1/auth/me".to_string()),
        (Method::GET, "/v1/visitors".to_string()),
        (Method::GET, format!("/v1/visitors/{}", Uuid::new_v4())),
        (Method::DELETE, format!("/v1/visitors/{}", Uuid::new_v4())),
        (Method::DELETE, format!("/v1/posts/{}", Uuid::new_v4())),
    ] {
        let response = app.send(authed_request(method, &uri, &bearer)).await;
        assert_status(&response, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_logout_is_stateless() {
    let app = TestApp::new().await;
    let bearer = app.admin_bearer().await;

    let response = app
        .send(authed_request(Method::GET, "/v1/auth/logout", &bearer))
        .await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "auth": false, "token": null }));

    // Nothing server-side was invalidated
    let response = app
        .send(authed_request(Method::GET, "/v1/auth/logout", &bearer))
        .await;
    assert_status(&response, StatusCode::OK);
}

#[tokio::test]
async fn test_error_body_shape() {
    let app = TestApp::new().await;

    let response = app
        .send(authed_request(Method::GET, "/v1/auth/me", "bearer garbage"))
        .await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body = body_json(response).await;
    assert!(body["error"]["code"].is_string());
    assert!(body["error"]["message"].is_string());
}
