/// JWT token issuance and validation (HS256)
///
/// Access tokens are short-lived; refresh tokens live longer, rotate on every
/// use and are additionally checked against the copy stored on the user row.
use crate::config::AuthConfig;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Email address
    pub email: String,
    /// Username
    pub username: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("malformed subject in token".into()))
    }
}

/// Token pair returned on login and refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Signing and verification keys, injected at construction instead of read
/// from process-global state.
#[derive(Clone)]
pub struct JwtKeys {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl: Duration::seconds(config.access_token_ttl_secs),
            refresh_ttl: Duration::seconds(config.refresh_token_ttl_secs),
        }
    }

    /// Issue an access + refresh token pair for the user
    pub fn issue_pair(&self, user_id: Uuid, email: &str, username: &str) -> Result<TokenPair> {
        let access_token = self.issue(
            user_id,
            email,
            username,
            TOKEN_TYPE_ACCESS,
            self.access_ttl,
            &self.access_encoding,
        )?;
        let refresh_token = self.issue(
            user_id,
            email,
            username,
            TOKEN_TYPE_REFRESH,
            self.refresh_ttl,
            &self.refresh_encoding,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        username: &str,
        token_type: &str,
        ttl: Duration,
        key: &EncodingKey,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type: token_type.to_string(),
            email: email.to_string(),
            username: username.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate an access token and return its claims
    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        self.verify(token, TOKEN_TYPE_ACCESS, &self.access_decoding)
    }

    /// Validate a refresh token and return its claims
    pub fn verify_refresh(&self, token: &str) -> Result<Claims> {
        self.verify(token, TOKEN_TYPE_REFRESH, &self.refresh_decoding)
    }

    fn verify(&self, token: &str, expected_type: &str, key: &DecodingKey) -> Result<Claims> {
        let data = decode::<Claims>(token, key, &Validation::new(Algorithm::HS256))
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        if data.claims.token_type != expected_type {
            return Err(AppError::Unauthorized(format!(
                "Expected {} token",
                expected_type
            )));
        }

        Ok(data.claims)
    }
}
