//! Shared types for the Caja point-of-sale backend
//!
//! Common types used across the workspace: data models, error types
//! and response structures.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use response::ApiResponse;
