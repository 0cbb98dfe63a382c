//! API integration tests
//!
//! Router-level tests for authentication, GitHub login and the blog flows.

#![allow(dead_code)]

mod auth;
mod blog;
mod common;
mod oauth;
