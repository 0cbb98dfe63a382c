//! Domain entities for the Scribe blog
//!
//! Rows carry an integer `id` used only for joins; the API speaks in uuids.

use chrono::{DateTime, Utc};
use scribe_common::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{validate_comment_text, validate_title, validate_username};

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(skip)]
    pub id: i32,
    pub uuid: Uuid,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an admin supplies when writing a post
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub uuid: Uuid,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl PostDraft {
    /// Build a draft, minting a uuid and timestamp when the client sent none
    pub fn new(
        uuid: Option<Uuid>,
        title: String,
        text: String,
        image_url: Option<String>,
        is_published: bool,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        validate_title(&title)?;

        Ok(Self {
            uuid: uuid.unwrap_or_else(Uuid::new_v4),
            title,
            text,
            image_url,
            is_published,
            created_at: created_at.unwrap_or_else(Utc::now),
        })
    }
}

impl Post {
    /// Apply an edit; every editable field is replaced
    pub fn apply_edit(
        &mut self,
        title: String,
        text: String,
        image_url: Option<String>,
        is_published: bool,
    ) -> Result<()> {
        validate_title(&title)?;

        self.title = title;
        self.text = text;
        self.image_url = image_url;
        self.is_published = is_published;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Visitor who signed in through GitHub and commented
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    #[serde(skip)]
    pub id: i32,
    pub uuid: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity used to materialize a visitor the first time they comment
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorProfile {
    pub uuid: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

impl VisitorProfile {
    pub fn new(uuid: Uuid, username: String, avatar_url: Option<String>) -> Result<Self> {
        validate_username(&username)?;
        Ok(Self {
            uuid,
            username,
            avatar_url,
        })
    }
}

/// Visitor as returned by `GET /v1/visitors/me`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorMe {
    #[serde(flatten)]
    pub visitor: Visitor,
    pub role: &'static str,
}

impl From<Visitor> for VisitorMe {
    fn from(visitor: Visitor) -> Self {
        Self {
            visitor,
            role: "visitor",
        }
    }
}

/// Comment author embedded in comment listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub uuid: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Comment with its author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub uuid: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub post_uuid: Uuid,
    pub visitor: CommentAuthor,
}

/// Flat row shape of a comment joined with its post and visitor
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CommentRow {
    pub uuid: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub post_uuid: Uuid,
    pub visitor_uuid: Uuid,
    pub visitor_username: String,
    pub visitor_avatar_url: Option<String>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            uuid: row.uuid,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
            post_uuid: row.post_uuid,
            visitor: CommentAuthor {
                uuid: row.visitor_uuid,
                username: row.visitor_username,
                avatar_url: row.visitor_avatar_url,
            },
        }
    }
}

/// Fields a visitor supplies when commenting
#[derive(Debug, Clone, PartialEq)]
pub struct CommentDraft {
    pub uuid: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CommentDraft {
    pub fn new(
        uuid: Option<Uuid>,
        text: String,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        validate_comment_text(&text)?;
        Ok(Self {
            uuid: uuid.unwrap_or_else(Uuid::new_v4),
            text,
            created_at: created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Listing envelope for posts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub next_offset: i64,
    pub previous_offset: i64,
    pub posts: Vec<Post>,
}

/// Listing envelope for visitors; the key is `users` on the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorsPage {
    pub next_offset: i64,
    pub previous_offset: i64,
    pub users: Vec<Visitor>,
}
