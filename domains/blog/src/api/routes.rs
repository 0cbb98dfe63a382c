//! Route definitions for the blog API
//!
//! Routes are grouped by the gate they sit behind. Each group is layered
//! before merging so a path can mix public and gated methods.

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use scribe_auth::{authenticate, require_admin, require_comment_owner};

use super::handlers::{auth, comments, email, posts, uploads, visitors};
use super::middleware::BlogState;

/// Routes anyone may call
fn public_routes() -> Router<BlogState> {
    Router::new()
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/oauth", post(auth::login_with_github))
        .route("/v1/email", post(email::send_contact))
        .route("/v1/posts", get(posts::list_posts))
        .route("/v1/posts/{post_uuid}", get(posts::get_post))
        .route(
            "/v1/posts/{post_uuid}/comments",
            get(comments::list_comments),
        )
}

/// Routes for any signed-in principal
fn session_routes(state: &BlogState) -> Router<BlogState> {
    Router::new()
        .route("/v1/auth/logout", get(auth::logout))
        .route(
            "/v1/posts/{post_uuid}/comments",
            post(comments::create_comment),
        )
        .route("/v1/visitors/me", get(visitors::me))
        .route_layer(from_fn_with_state(state.auth.clone(), authenticate))
}

/// Routes reserved for admins
fn admin_routes(state: &BlogState) -> Router<BlogState> {
    Router::new()
        .route("/v1/auth/me", get(auth::me))
        .route("/v1/posts", post(posts::create_post))
        .route(
            "/v1/posts/{post_uuid}",
            patch(posts::update_post).delete(posts::delete_post),
        )
        .route(
            "/v1/upload",
            post(uploads::upload).layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES)),
        )
        .route("/v1/visitors", get(visitors::list_visitors))
        .route(
            "/v1/visitors/{visitor_uuid}",
            get(visitors::get_visitor).delete(visitors::delete_visitor),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.auth.clone(), authenticate))
}

/// Routes for the comment's author or an admin
fn comment_owner_routes(state: &BlogState) -> Router<BlogState> {
    Router::new()
        .route(
            "/v1/posts/{post_uuid}/comments/{comment_uuid}",
            delete(comments::delete_comment),
        )
        .route_layer(from_fn_with_state(state.auth.clone(), require_comment_owner))
        .route_layer(from_fn_with_state(state.auth.clone(), authenticate))
}

/// Create all blog routes
pub fn routes(state: BlogState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(session_routes(&state))
        .merge(admin_routes(&state))
        .merge(comment_owner_routes(&state))
        .with_state(state)
}
