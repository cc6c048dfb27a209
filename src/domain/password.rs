//! Credential manager - salted PBKDF2 password secrets.
//!
//! Secrets are PBKDF2-HMAC-SHA512 digests, 64 bytes, hex-encoded. The salt is
//! an opaque hex string stored next to the secret; its text (not the decoded
//! bytes) is the KDF salt input.

use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::config::{DEFAULT_PBKDF2_ITERATIONS, SALT_LENGTH_BYTES, SECRET_LENGTH_BYTES};
use crate::errors::{AppError, AppResult};

/// A derived secret together with the salt it was derived with.
///
/// Both values must be persisted; the secret alone cannot be verified.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedSecret {
    pub secret: String,
    pub salt: String,
}

// Don't expose secret material in debug output
impl std::fmt::Debug for DerivedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedSecret")
            .field("secret", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

/// Derives and verifies password secrets.
///
/// Stateless apart from the iteration count, so it is `Copy` and can be
/// moved into blocking tasks freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialManager {
    iterations: u32,
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl CredentialManager {
    /// Create a manager using `iterations` PBKDF2 rounds.
    ///
    /// # Errors
    /// Returns a validation error if `iterations` is zero.
    pub fn new(iterations: u32) -> AppResult<Self> {
        if iterations == 0 {
            return Err(AppError::validation("Iteration count must be greater than 0"));
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a secret from `password`.
    ///
    /// When `salt` is `None` a fresh random salt is generated.
    ///
    /// # Errors
    /// Returns a validation error for an empty password or a salt that is
    /// empty or not hex.
    pub fn derive_secret(&self, password: &str, salt: Option<&str>) -> AppResult<DerivedSecret> {
        check_password(password)?;

        let salt = match salt {
            Some(salt) => {
                check_salt(salt)?;
                salt.to_string()
            }
            None => generate_salt(),
        };

        let secret = self.derive(password, &salt);
        Ok(DerivedSecret { secret, salt })
    }

    /// Check `password` against a stored secret and its salt.
    ///
    /// The comparison runs in constant time over the encoded secret.
    ///
    /// # Errors
    /// Returns a validation error for an empty password or malformed salt.
    pub fn verify_secret(&self, password: &str, salt: &str, stored_secret: &str) -> AppResult<bool> {
        check_password(password)?;
        check_salt(salt)?;

        let candidate = self.derive(password, salt);
        Ok(candidate.as_bytes().ct_eq(stored_secret.as_bytes()).into())
    }

    fn derive(&self, password: &str, salt: &str) -> String {
        let mut out = [0u8; SECRET_LENGTH_BYTES];
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), self.iterations, &mut out);
        hex::encode(out)
    }
}

/// Generate a random hex-encoded salt.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LENGTH_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn check_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }
    Ok(())
}

fn check_salt(salt: &str) -> AppResult<()> {
    if salt.is_empty() || hex::decode(salt).is_err() {
        return Err(AppError::validation("Salt must be a non-empty hex string"));
    }
    Ok(())
}
