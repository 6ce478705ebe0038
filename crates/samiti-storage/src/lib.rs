//! Samiti Storage Library
//!
//! This crate owns the file-persistence half of the registration pipeline:
//! the [`UploadStore`] capability (directory creation + relocation) with its
//! local-filesystem implementation, destination-name derivation, and the
//! materializer that turns a buffered upload into a public file reference.
//!
//! # Destination name format
//!
//! `{unix_millis}-{field}-{sanitized_basename}{ext}` under the store's base
//! directory, referenced publicly as `{public_prefix}/{name}`. Names must not
//! contain `..` or path separators; derivation is centralized in the `naming`
//! module so the store and its callers stay consistent.

pub mod local;
pub mod materialize;
pub mod naming;
pub mod traits;

// Re-export commonly used types
pub use local::LocalUploadStore;
pub use materialize::materialize;
pub use naming::destination_name;
pub use traits::{StorageError, StorageResult, UploadStore};
