//! Repository implementations for the blog domain

pub mod comments;
pub mod posts;
pub mod visitors;

use sqlx::PgPool;

pub use comments::CommentRepository;
pub use posts::PostRepository;
pub use visitors::VisitorRepository;

/// Combined repository access for the blog domain
#[derive(Clone)]
pub struct BlogRepositories {
    pub posts: PostRepository,
    pub comments: CommentRepository,
    pub visitors: VisitorRepository,
}

impl BlogRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            visitors: VisitorRepository::new(pool),
        }
    }
}
