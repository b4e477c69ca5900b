//! Service layer for business logic
//!
//! This module provides the prediction logic shared between the HTTP API and
//! the CLI.

mod prediction_service;

pub use prediction_service::*;
