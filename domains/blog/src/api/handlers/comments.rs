//! Comment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use scribe_auth::Session;
use scribe_common::{Result, ValidatedJson};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::BlogState;
use crate::domain::entities::{Comment, CommentDraft, VisitorProfile};

/// Request for commenting on a post
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(rename = "commentUUID", alias = "uuid")]
    pub comment_uuid: Option<Uuid>,

    #[validate(length(min = 1, max = 5000))]
    pub text: String,

    pub created_at: Option<DateTime<Utc>>,
}

/// Comments on a post, oldest first
///
/// **GET /v1/posts/{post_uuid}/comments**
pub async fn list_comments(
    State(state): State<BlogState>,
    Path(post_uuid): Path<Uuid>,
) -> Result<Json<Vec<Comment>>> {
    let comments = state.repos.comments.list_for_post(post_uuid).await?;
    Ok(Json(comments))
}

/// Comment on a post as the session's visitor.
///
/// The visitor row is materialized here the first time someone comments.
///
/// **POST /v1/posts/{post_uuid}/comments**
pub async fn create_comment(
    Session(claims): Session,
    State(state): State<BlogState>,
    Path(post_uuid): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    let draft = CommentDraft::new(request.comment_uuid, request.text, request.created_at)?;
    let profile = VisitorProfile::new(claims.uuid, claims.username, claims.avatar_url)?;

    let visitor = state.repos.visitors.get_or_create(&profile).await?;
    let comment = state
        .repos
        .comments
        .create(post_uuid, visitor.uuid, &draft)
        .await?;

    tracing::info!(
        post_uuid = %post_uuid,
        comment_uuid = %comment.uuid,
        visitor_uuid = %visitor.uuid,
        "Comment created"
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete a comment; ownership is checked by the route gate
///
/// **DELETE /v1/posts/{post_uuid}/comments/{comment_uuid}**
pub async fn delete_comment(
    State(state): State<BlogState>,
    Path((post_uuid, comment_uuid)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    state.repos.comments.delete(post_uuid, comment_uuid).await?;
    tracing::info!(post_uuid = %post_uuid, comment_uuid = %comment_uuid, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
