//! Infrastructure layer - External service implementations

pub mod api_key;
pub mod auth;
pub mod logging;
pub mod project;
pub mod storage;
pub mod user;
