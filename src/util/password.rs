//! Password hash inspection and verification
//!
//! Stored hashes are PHC strings (`$argon2i$v=19$m=...,t=...,p=...$salt$digest`).
//! The seed hash is an opaque literal: nothing here derives it, but it can be
//! parsed to check its scheme and verified against a candidate password.

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use tracing::{debug, error};

/// Error types for password operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),
    #[error("Invalid password hash format")]
    InvalidHashFormat,
    #[error("Missing hash parameter: {0}")]
    MissingParameter(&'static str),
}

/// Parameters embedded in a PHC hash string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashScheme {
    pub algorithm: String,
    pub version: Option<u32>,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: String,
}

pub trait PasswordUtils {
    /// Verifies the given password against the stored hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError>;

    /// Parses the algorithm and cost parameters out of a stored hash
    fn describe_hash(hash: &str) -> Result<HashScheme, PasswordError>;
}

pub struct PasswordUtilsImpl;

impl PasswordUtils for PasswordUtilsImpl {
    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
        debug!("Verifying password against hash");

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(hash) => hash,
            Err(err) => {
                error!("Invalid password hash format: {}", err);
                return Err(PasswordError::InvalidHashFormat);
            }
        };

        // Algorithm, version and costs come from the hash itself
        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => {
                debug!("Password verification successful");
                Ok(true)
            }
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed - invalid password");
                Ok(false)
            }
            Err(err) => {
                error!("Password verification error: {}", err);
                Err(PasswordError::VerificationFailed(err.to_string()))
            }
        }
    }

    fn describe_hash(hash: &str) -> Result<HashScheme, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|err| {
            error!("Invalid password hash format: {}", err);
            PasswordError::InvalidHashFormat
        })?;

        let param = |name: &'static str| {
            parsed
                .params
                .get_decimal(name)
                .ok_or(PasswordError::MissingParameter(name))
        };

        let scheme = HashScheme {
            algorithm: parsed.algorithm.as_str().to_string(),
            version: parsed.version,
            memory_kib: param("m")?,
            iterations: param("t")?,
            parallelism: param("p")?,
            salt: parsed
                .salt
                .map(|s| s.as_str().to_string())
                .ok_or(PasswordError::MissingParameter("salt"))?,
        };
        debug!("Parsed hash scheme: {:?}", scheme);
        Ok(scheme)
    }
}
