//! Shared types, errors, and configuration for Tesoreria.
//!
//! This crate provides common types used across all other crates:
//! - Money in integer cents and the accepted currencies
//! - Typed IDs for type-safe entity references
//! - Application-wide error types and the backend error body
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorBody};
