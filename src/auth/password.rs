//! Password hashing

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha2::{Digest, Sha256};
use std::borrow::Cow;

use crate::error::Result;

/// Lowest cost bcrypt accepts. Only suitable for development.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Lowest cost accepted when running in production mode
pub const MIN_PRODUCTION_COST: u32 = 10;

/// Bcrypt only reads this many bytes of its input
pub const BCRYPT_MAX_INPUT: usize = 72;

/// Bcrypt input for a password. Anything longer than bcrypt reads is first
/// reduced to a base64 SHA-256 digest, which fits whole, so that every byte
/// counts.
fn bcrypt_input(plaintext: &str) -> Cow<'_, str> {
    if plaintext.len() <= BCRYPT_MAX_INPUT {
        Cow::Borrowed(plaintext)
    } else {
        Cow::Owned(BASE64.encode(Sha256::digest(plaintext.as_bytes())))
    }
}

/// Salted bcrypt hashing with a fixed cost factor.
///
/// Every call to [`PasswordHasher::hash`] draws a fresh random salt, so the
/// same plaintext never hashes to the same string twice. The salt and cost
/// are embedded in the returned `$2b$...` string, which is all `verify`
/// needs.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// The bcrypt cost factor in use
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        Ok(bcrypt::hash(bcrypt_input(plaintext).as_bytes(), self.cost)?)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed hash is a failed verification, not an error.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(bcrypt_input(plaintext).as_bytes(), hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!("Password verification failed: {}", e);
                false
            }
        }
    }

    /// Hash on the blocking pool so slow bcrypt rounds don't stall the runtime
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| crate::error::Error::Other(format!("Hashing task failed: {}", e)))?
    }

    /// Verify on the blocking pool. A panicked or cancelled task counts as a mismatch.
    pub async fn verify_blocking(&self, plaintext: String, hash: String) -> bool {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .unwrap_or_else(|e| {
                tracing::debug!("Verification task failed: {}", e);
                false
            })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
