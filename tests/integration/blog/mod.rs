//! End-to-end blog flows against a real database
//!
//! Run with `cargo test -- --ignored` and `TEST_DATABASE_URL` pointing at a
//! disposable Postgres.

use axum::http::{Method, StatusCode};
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;

use crate::common::{
    assert_status, authed_json_request, authed_request, body_json, json_request, TestApp,
};

async fn reset(app: &TestApp) {
    sqlx::query("TRUNCATE comments, posts, visitors RESTART IDENTITY CASCADE")
        .execute(&app.pool)
        .await
        .expect("truncate");
}

async fn create_post(app: &TestApp, admin: &str, title: &str, created_at: &str) -> Uuid {
    let response = app
        .send(authed_json_request(
            Method::POST,
            "/v1/posts",
            admin,
            json!({
                "title": title,
                "text": format!("{} body", title),
                "isPublished": true,
                "createdAt": created_at,
            }),
        ))
        .await;
    assert_status(&response, StatusCode::CREATED);
    let body = body_json(response).await;
    Uuid::parse_str(body["uuid"].as_str().unwrap()).unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_post_lifecycle_and_pagination() {
    let app = TestApp::with_database().await.unwrap();
    reset(&app).await;
    let admin = app.admin_bearer().await;

    let first = create_post(&app, &admin, "First", "2019-04-01T00:00:00Z").await;
    let second = create_post(&app, &admin, "Second", "2019-04-02T00:00:00Z").await;
    let third = create_post(&app, &admin, "Third", "2019-04-03T00:00:00Z").await;

    let response = app
        .send(json_request(Method::GET, "/v1/posts?offset=0&limit=2", json!(null)))
        .await;
    assert_status(&response, StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["nextOffset"], 2);
    assert_eq!(page["previousOffset"], 0);
    let uuids: Vec<&str> = page["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["uuid"].as_str().unwrap())
        .collect();
    assert_eq!(uuids, vec![third.to_string(), second.to_string()]);

    let response = app
        .send(authed_json_request(
            Method::PATCH,
            &format!("/v1/posts/{}", first),
            &admin,
            json!({ "title": "First, edited", "isPublished": false }),
        ))
        .await;
    assert_status(&response, StatusCode::OK);
    let edited = body_json(response).await;
    assert_eq!(edited["title"], "First, edited");
    assert_eq!(edited["text"], "First body");
    assert_eq!(edited["isPublished"], false);

    let response = app
        .send(authed_json_request(
            Method::POST,
            "/v1/posts",
            &admin,
            json!({ "postUUID": first, "title": "Duplicate" }),
        ))
        .await;
    assert_status(&response, StatusCode::CONFLICT);

    let response = app
        .send(authed_request(
            Method::DELETE,
            &format!("/v1/posts/{}", first),
            &admin,
        ))
        .await;
    assert_status(&response, StatusCode::NO_CONTENT);

    let response = app
        .send(json_request(
            Method::GET,
            &format!("/v1/posts/{}", first),
            json!(null),
        ))
        .await;
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_comment_ownership_flow() {
    let base = TestApp::with_database().await.unwrap();
    reset(&base).await;
    let admin = base.admin_bearer().await;
    let post = create_post(&base, &admin, "Commented", "2019-04-07T00:00:00Z").await;

    let author_uuid = Uuid::new_v4();
    let author = base.visitor_bearer("author", author_uuid).await;
    let stranger = base.visitor_bearer("stranger", Uuid::new_v4()).await;

    let comment_uuid = Uuid::new_v4();
    let response = base
        .send(authed_json_request(
            Method::POST,
            &format!("/v1/posts/{}/comments", post),
            &author,
            json!({ "commentUUID": comment_uuid, "text": "First!" }),
        ))
        .await;
    assert_status(&response, StatusCode::CREATED);
    let comment = body_json(response).await;
    assert_eq!(comment["visitor"]["username"], "author");
    assert_eq!(comment["visitor"]["uuid"], author_uuid.to_string());

    let response = base
        .send(json_request(
            Method::GET,
            &format!("/v1/posts/{}/comments", post),
            json!(null),
        ))
        .await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    // The stranger has a visitor row but no claim on this comment
    let response = base
        .send(authed_json_request(
            Method::POST,
            &format!("/v1/posts/{}/comments", post),
            &stranger,
            json!({ "text": "Me too" }),
        ))
        .await;
    assert_status(&response, StatusCode::CREATED);

    let app = &base;
    let delete_uri = format!("/v1/posts/{}/comments/{}", post, comment_uuid);

    let response = app
        .send(authed_request(Method::DELETE, &delete_uri, &stranger))
        .await;
    assert_status(&response, StatusCode::UNAUTHORIZED);

    let response = app
        .send(authed_request(Method::DELETE, &delete_uri, &author))
        .await;
    assert_status(&response, StatusCode::NO_CONTENT);

    let response = app
        .send(authed_request(Method::DELETE, &delete_uri, &author))
        .await;
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_visitor_management() {
    let app = TestApp::with_database().await.unwrap();
    reset(&app).await;
    let admin = app.admin_bearer().await;
    let post = create_post(&app, &admin, "Guestbook", "2019-04-07T00:00:00Z").await;

    let visitor_uuid = Uuid::new_v4();
    let visitor = app.visitor_bearer("octocat", visitor_uuid).await;

    // No visitor row until the first comment
    let response = app
        .send(authed_request(Method::GET, "/v1/visitors/me", &visitor))
        .await;
    assert_status(&response, StatusCode::NOT_FOUND);

    let response = app
        .send(authed_json_request(
            Method::POST,
            &format!("/v1/posts/{}/comments", post),
            &visitor,
            json!({ "text": "Hello" }),
        ))
        .await;
    assert_status(&response, StatusCode::CREATED);

    let response = app
        .send(authed_request(Method::GET, "/v1/visitors/me", &visitor))
        .await;
    assert_status(&response, StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["role"], "visitor");
    assert_eq!(me["uuid"], visitor_uuid.to_string());

    let response = app
        .send(authed_request(Method::GET, "/v1/visitors", &admin))
        .await;
    assert_status(&response, StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["users"].as_array().unwrap().len(), 1);
    assert_eq!(page["nextOffset"], 1);

    let response = app
        .send(authed_request(
            Method::DELETE,
            &format!("/v1/visitors/{}", visitor_uuid),
            &admin,
        ))
        .await;
    assert_status(&response, StatusCode::NO_CONTENT);

    // Comments went with the visitor
    let response = app
        .send(json_request(
            Method::GET,
            &format!("/v1/posts/{}/comments", post),
            json!(null),
        ))
        .await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_and_contact_without_database() {
    let app = TestApp::new().await;
    let admin = app.admin_bearer().await;

    let boundary = "integration-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cover.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nJPEG\r\n--{b}--\r\n",
        b = boundary
    );
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/v1/upload")
        .header("authorization", admin.as_str())
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = app.send(request).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(app.storage.get("cover.jpg").unwrap().content_type, "image/jpeg");

    let response = app
        .send(json_request(
            Method::POST,
            "/v1/email",
            json!({ "email": "reader@example.com", "message": "Hi there", "name": "Reader" }),
        ))
        .await;
    assert_status(&response, StatusCode::OK);

    let sent = app.email.get_latest_email("owner@example.com").unwrap();
    assert_eq!(sent.message.body_text, "reader@example.com Hi there");
    assert_eq!(sent.message.reply_to.as_deref(), Some("reader@example.com"));
}
