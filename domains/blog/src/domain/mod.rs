//! Domain layer for the blog

pub mod entities;
pub mod validation;
