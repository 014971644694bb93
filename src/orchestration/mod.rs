//! Orchestration layer for container administration requests
//!
//! This module turns a request into a container command, runs it, parses
//! the output and hands back either a response body or a `ProxyError`.

pub mod admin_service;
pub mod responses;

pub use admin_service::AdminService;
pub use responses::{ApiKeyResponse, ApiKeyResult, PasswordResponse, TokensResponse, WelcomeResponse};
