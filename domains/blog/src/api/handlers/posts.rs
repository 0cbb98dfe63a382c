//! Post handlers
//!
//! Reads are public; writes sit behind the admin gate.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use scribe_common::{Pagination, Result, ValidatedJson};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::BlogState;
use crate::domain::entities::{Post, PostDraft, PostsPage};

/// Request for creating a post
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Client-chosen uuid, minted when absent
    #[serde(rename = "postUUID", alias = "uuid")]
    pub post_uuid: Option<Uuid>,

    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[serde(default)]
    pub text: String,

    pub image_url: Option<String>,

    #[serde(default)]
    pub is_published: bool,

    pub created_at: Option<DateTime<Utc>>,
}

/// Request for editing a post; absent fields keep their value
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

/// List posts, newest first
///
/// **GET /v1/posts?offset&limit**
pub async fn list_posts(
    State(state): State<BlogState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PostsPage>> {
    let total = state.repos.posts.count().await?;
    let posts = state
        .repos
        .posts
        .list(pagination.offset(), pagination.limit())
        .await?;
    let page = pagination.page(total);

    Ok(Json(PostsPage {
        next_offset: page.next_offset,
        previous_offset: page.previous_offset,
        posts,
    }))
}

/// **GET /v1/posts/{post_uuid}**
pub async fn get_post(
    State(state): State<BlogState>,
    Path(post_uuid): Path<Uuid>,
) -> Result<Json<Post>> {
    let post = state.repos.posts.get_by_uuid(post_uuid).await?;
    Ok(Json(post))
}

/// Create a post
///
/// **POST /v1/posts**
pub async fn create_post(
    State(state): State<BlogState>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let draft = PostDraft::new(
        request.post_uuid,
        request.title,
        request.text,
        request.image_url,
        request.is_published,
        request.created_at,
    )?;

    let post = state.repos.posts.create(&draft).await?;
    tracing::info!(post_uuid = %post.uuid, "Post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// Edit a post
///
/// **PATCH /v1/posts/{post_uuid}**
pub async fn update_post(
    State(state): State<BlogState>,
    Path(post_uuid): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<Post>> {
    let mut post = state.repos.posts.get_by_uuid(post_uuid).await?;

    let title = request.title.unwrap_or_else(|| post.title.clone());
    let text = request.text.unwrap_or_else(|| post.text.clone());
    let image_url = request.image_url.or_else(|| post.image_url.clone());
    let is_published = request.is_published.unwrap_or(post.is_published);
    post.apply_edit(title, text, image_url, is_published)?;

    let updated = state.repos.posts.update(&post).await?;
    tracing::info!(post_uuid = %updated.uuid, "Post updated");

    Ok(Json(updated))
}

/// Delete a post and its comments
///
/// **DELETE /v1/posts/{post_uuid}**
pub async fn delete_post(
    State(state): State<BlogState>,
    Path(post_uuid): Path<Uuid>,
) -> Result<StatusCode> {
    state.repos.posts.delete_by_uuid(post_uuid).await?;
    tracing::info!(post_uuid = %post_uuid, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_wire_names() {
        let uuid = Uuid::new_v4();
        let body = format!(
            r#"{{"postUUID": "{}", "title": "Hello", "text": "Body",
                "imageUrl": "https://cdn.example.com/a.png", "isPublished": true,
                "createdAt": "2019-04-07T00:00:00Z"}}"#,
            uuid
        );
        let request: CreatePostRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(request.post_uuid, Some(uuid));
        assert!(request.is_published);
        assert!(request.created_at.is_some());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_minimal() {
        let request: CreatePostRequest = serde_json::from_str(r#"{"title": "Hi"}"#).unwrap();
        assert_eq!(request.post_uuid, None);
        assert!(!request.is_published);
        assert!(request.text.is_empty());
    }

    #[test]
    fn test_create_request_title_bounds() {
        let request: CreatePostRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(request.validate().is_err());

        let long = format!(r#"{{"title": "{}"}}"#, "x".repeat(101));
        let request: CreatePostRequest = serde_json::from_str(&long).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let request: UpdatePostRequest =
            serde_json::from_str(r#"{"isPublished": false}"#).unwrap();
        assert_eq!(request.is_published, Some(false));
        assert!(request.title.is_none());
        assert!(request.validate().is_ok());
    }
}
