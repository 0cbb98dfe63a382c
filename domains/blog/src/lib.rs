//! Blog domain: posts, comments, visitors, uploads, contact email

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use repository::{BlogRepositories, CommentRepository, PostRepository, VisitorRepository};

// Re-export API types
pub use api::routes;
pub use api::BlogState;
