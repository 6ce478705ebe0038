//! Password policy and one-way hashing.
//!
//! Hashing sits behind the [`PasswordHasher`] trait so the request pipeline
//! never sees the raw-vs-hash distinction and an implementation can later move
//! the work to a blocking pool without changing callers. The bundled bcrypt
//! implementation runs synchronously on the calling task; at the expected
//! request volume the tens-of-milliseconds stall is an accepted trade-off.

use crate::error::AppError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// One-way password hashing seam.
pub trait PasswordHasher: Send + Sync {
    /// Validate the password policy and produce a salted one-way hash.
    ///
    /// The input is trimmed first. Policy failures surface as client input
    /// errors with the exact messages the API contract promises.
    fn hash_password(&self, raw: &str) -> Result<String, AppError>;
}

/// bcrypt-backed hasher with a configurable work factor.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash_password(&self, raw: &str) -> Result<String, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput("Password is required".to_string()));
        }
        if trimmed.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        bcrypt::hash(trimmed, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost; keeps the test fast while exercising the real path.
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4)
    }

    #[test]
    fn empty_password_is_required() {
        let err = hasher().hash_password("   ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Password is required");
    }

    #[test]
    fn short_password_is_rejected() {
        let err = hasher().hash_password("short7!").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Password must be at least 8 characters"
        );
    }

    #[test]
    fn hash_never_equals_the_raw_password() {
        let raw = "correct horse battery staple";
        let hash = hasher().hash_password(raw).unwrap();
        assert_ne!(hash, raw);
        assert!(bcrypt::verify(raw, &hash).unwrap());
    }

    #[test]
    fn password_is_trimmed_before_hashing() {
        let hash = hasher().hash_password("  hunter2hunter2  ").unwrap();
        assert!(bcrypt::verify("hunter2hunter2", &hash).unwrap());
    }
}
