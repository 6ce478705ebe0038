//! Database repositories for the registration data access layer.

pub mod db;

pub use db::MemberRepository;
