//! User Password Value Object
//!
//! Domain wrapper around `platform::password`.

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Registration password bounds (in characters)
pub const REGISTRATION_PASSWORD_MIN_LENGTH: usize = 6;
pub const REGISTRATION_PASSWORD_MAX_LENGTH: usize = 100;

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => {
                AuthError::Validation("Password is required.".to_string())
            }
            other => AuthError::Validation(other.to_string()),
        })?;

        Ok(Self(clear_text))
    }

    /// Apply the self-service registration length rule
    pub fn check_registration_length(&self) -> AuthResult<()> {
        let length = self.0.char_count();
        if (REGISTRATION_PASSWORD_MIN_LENGTH..=REGISTRATION_PASSWORD_MAX_LENGTH).contains(&length) {
            Ok(())
        } else {
            Err(AuthError::Validation(format!(
                "Password must be between {} and {} characters.",
                REGISTRATION_PASSWORD_MIN_LENGTH, REGISTRATION_PASSWORD_MAX_LENGTH
            )))
        }
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed user password (Argon2id PHC string)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn from_db(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}
