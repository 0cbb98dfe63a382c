//! Visitor handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use scribe_auth::Session;
use scribe_common::{Pagination, Result};
use uuid::Uuid;

use crate::api::middleware::BlogState;
use crate::domain::entities::{Visitor, VisitorMe, VisitorsPage};

/// **GET /v1/visitors?offset&limit**
pub async fn list_visitors(
    State(state): State<BlogState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<VisitorsPage>> {
    let total = state.repos.visitors.count().await?;
    let users = state
        .repos
        .visitors
        .list(pagination.offset(), pagination.limit())
        .await?;
    let page = pagination.page(total);

    Ok(Json(VisitorsPage {
        next_offset: page.next_offset,
        previous_offset: page.previous_offset,
        users,
    }))
}

/// **GET /v1/visitors/{visitor_uuid}**
pub async fn get_visitor(
    State(state): State<BlogState>,
    Path(visitor_uuid): Path<Uuid>,
) -> Result<Json<Visitor>> {
    let visitor = state.repos.visitors.get_by_uuid(visitor_uuid).await?;
    Ok(Json(visitor))
}

/// Delete a visitor together with their comments
///
/// **DELETE /v1/visitors/{visitor_uuid}**
pub async fn delete_visitor(
    State(state): State<BlogState>,
    Path(visitor_uuid): Path<Uuid>,
) -> Result<StatusCode> {
    state.repos.visitors.delete_by_uuid(visitor_uuid).await?;
    tracing::info!(visitor_uuid = %visitor_uuid, "Visitor deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// The session's own visitor record
///
/// **GET /v1/visitors/me**
pub async fn me(Session(claims): Session, State(state): State<BlogState>) -> Result<Json<VisitorMe>> {
    let visitor = state.repos.visitors.get_by_uuid(claims.uuid).await?;
    Ok(Json(VisitorMe::from(visitor)))
}
