//! Samiti Core Library
//!
//! This crate provides the domain models, error types, configuration, field
//! normalization, and password hashing shared across all samiti components.

pub mod config;
pub mod error;
pub mod fields;
pub mod hasher;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use fields::{normalize_email, NormalizedFields};
pub use hasher::{BcryptPasswordHasher, PasswordHasher};
