//! HTTP handlers for the blog API

pub mod auth;
pub mod comments;
pub mod email;
pub mod posts;
pub mod uploads;
pub mod visitors;
