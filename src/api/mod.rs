//! HTTP surface: route handlers and middleware

pub mod middleware;
pub mod services;

/// Scope for the health endpoints
pub const HEALTH_PREFIX: &str = "/health";
