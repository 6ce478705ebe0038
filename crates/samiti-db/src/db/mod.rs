//! Repository implementations for database operations.

pub mod members;

pub use members::MemberRepository;
