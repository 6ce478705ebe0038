//! Data models for the registration service.

mod member;
mod upload;

pub use member::*;
pub use upload::*;
