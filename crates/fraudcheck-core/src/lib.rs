//! Fraudcheck Core Library
//!
//! This crate provides the configuration, error types, and submission models
//! shared by the processing pipeline and the API server.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, LogLevel};
pub use models::SubmissionMeta;
