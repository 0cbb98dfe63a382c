//! GitHub login tests against a wiremock provider

use axum::http::{Method, StatusCode};
use scribe_auth::mock::MockDirectory;
use scribe_auth::{VisitorIdentity, TOKEN_HEADER};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{assert_status, authed_request, body_json, json_request, TestApp};

async fn mount_github(app: &TestApp, login: &str) {
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .and(query_param("client_id", "client-id"))
        .and(query_param("client_secret", "client-secret"))
        .and(query_param("code", "code1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t1",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&app.github)
        .await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "token t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": login,
            "avatar_url": "u1",
        })))
        .expect(1)
        .mount(&app.github)
        .await;
}

async fn github_login(app: &TestApp, code: &str) -> axum::response::Response {
    app.send(json_request(
        Method::POST,
        "/v1/oauth",
        json!({ "token": code }),
    ))
    .await
}

#[tokio::test]
async fn test_first_github_login_mints_visitor_session() {
    let app = TestApp::new().await;
    mount_github(&app, "userA").await;

    let response = github_login(&app, "code1").await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["user"]["role"], "visitor");
    assert_eq!(body["user"]["username"], "userA");
    assert_eq!(body["user"]["avatarUrl"], "u1");

    let claims = app
        .codec
        .verify(body["token"].as_str().unwrap())
        .await
        .unwrap();
    assert!(!claims.is_admin);
    assert_eq!(claims.access_token.as_deref(), Some("t1"));
    assert_eq!(claims.uuid.to_string(), body["user"]["uuid"]);
    assert_eq!(claims.uuid.get_version_num(), 4);

    let requests = app.github.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method.as_str(), "POST");
    assert_eq!(requests[1].method.as_str(), "GET");
    assert_eq!(app.secrets.request_count("github"), 1);
}

#[tokio::test]
async fn test_known_visitor_keeps_uuid() {
    let known = Uuid::new_v4();
    let app = TestApp::builder()
        .directory(MockDirectory::new().with_visitor(VisitorIdentity {
            uuid: known,
            username: "userA".to_string(),
            avatar_url: Some("old".to_string()),
        }))
        .build()
        .await;
    mount_github(&app, "userA").await;

    let response = github_login(&app, "code1").await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["uuid"], known.to_string());
}

#[tokio::test]
async fn test_github_session_works_on_visitor_routes() {
    let app = TestApp::new().await;
    mount_github(&app, "userA").await;

    let body = body_json(github_login(&app, "code1").await).await;
    let bearer = format!("bearer {}", body["token"].as_str().unwrap());

    let response = app
        .send(authed_request(Method::GET, "/v1/auth/logout", &bearer))
        .await;
    assert_status(&response, StatusCode::OK);
    assert!(response.headers().contains_key(TOKEN_HEADER));

    let response = app
        .send(authed_request(Method::GET, "/v1/visitors", &bearer))
        .await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_failure_aborts_login() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "t1" })))
        .mount(&app.github)
        .await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
        })))
        .mount(&app.github)
        .await;

    let response = github_login(&app, "code1").await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "OAUTH_FAILED");
    assert_eq!(app.directory.visitor_lookups(), 0);
}

#[tokio::test]
async fn test_rejected_code_aborts_before_profile() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "bad_verification_code",
        })))
        .mount(&app.github)
        .await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.github)
        .await;

    let response = github_login(&app, "stale").await;
    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_code_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(Method::POST, "/v1/oauth", json!({})))
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert!(app.secrets.requests().is_empty());
    assert!(app.github.received_requests().await.unwrap().is_empty());
}
