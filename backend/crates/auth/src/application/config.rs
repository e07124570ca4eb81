//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Default token lifetime (3 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key, process-wide
    pub jwt_secret: Vec<u8>,
    /// Expected and issued `iss` claim
    pub jwt_issuer: String,
    /// Expected and issued `aud` claim
    pub jwt_audience: String,
    /// Token lifetime (`exp - iat`)
    pub token_ttl: Duration,
    /// Check `iat <= now < exp` on validation
    pub validate_lifetime: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            jwt_issuer: "inventory-api".to_string(),
            jwt_audience: "inventory-client".to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            validate_lifetime: true,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing key
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 64];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    ///
    /// Tokens signed with the random key stop validating after a restart.
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Token lifetime in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("token_ttl", &self.token_ttl)
            .field("validate_lifetime", &self.validate_lifetime)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_secs(), 3 * 3600);
        assert!(config.validate_lifetime);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_with_random_secret() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.jwt_secret, b.jwt_secret);
        assert!(a.jwt_secret.iter().any(|&byte| byte != 0));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::development();
        let output = format!("{config:?}");
        assert!(output.contains("[REDACTED]"));
    }
}
