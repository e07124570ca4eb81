//! Token Codec
//!
//! Issues and validates HS256 JWTs asserting identity and role.
//! Stateless: nothing is stored and nothing is revoked.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// JWT claims embedded in issued tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a decimal string
    pub sub: String,
    /// User name
    pub name: String,
    /// `"Admin"` or `"Supplier"`
    pub role: String,
    /// Random token id (UUIDv4)
    pub jti: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// A freshly signed token and the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Why a presented token was not accepted
#[derive(Debug, Error)]
pub enum TokenRejection {
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("token issued in the future")]
    NotYetValid,

    #[error("invalid subject claim")]
    InvalidSubject,

    #[error("invalid role claim: {0}")]
    InvalidRole(String),

    #[error("invalid token id claim")]
    InvalidTokenId,
}

/// Signs and validates tokens with the process-wide key
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_secs: i64,
    validate_lifetime: bool,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.set_audience(&[config.jwt_audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "aud", "sub"]);
        validation.leeway = 0;
        // lifetime is checked against an explicit clock in `validate_at`
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            ttl_secs: config.token_ttl_secs(),
            validate_lifetime: config.validate_lifetime,
        }
    }

    /// Issue a token for the user, valid from now
    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: user.user_id.to_string(),
            name: user.user_name.to_string(),
            role: user.user_role.code().to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, claims })
    }

    /// Validate a token against the current clock
    pub fn validate(&self, token: &str) -> Result<Principal, TokenRejection> {
        self.validate_at(token, Utc::now())
    }

    /// Signature, issuer and audience always; `iat <= now < exp` when
    /// lifetime validation is on. No leeway.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, TokenRejection> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if self.validate_lifetime {
            let now = now.timestamp();
            if claims.iat > now {
                return Err(TokenRejection::NotYetValid);
            }
            if now >= claims.exp {
                return Err(TokenRejection::Expired);
            }
        }

        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenRejection::InvalidSubject)?;
        let role = UserRole::from_code(&claims.role)
            .ok_or_else(|| TokenRejection::InvalidRole(claims.role.clone()))?;
        let token_id = Uuid::parse_str(&claims.jti).map_err(|_| TokenRejection::InvalidTokenId)?;

        Ok(Principal {
            user_id,
            user_name: claims.name,
            role,
            token_id,
        })
    }
}
