//! Session token generation and validation
//!
//! Keys are derived once and shared behind `Arc`.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use nutrifit_shared::Id;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Session id, used for revocation on logout
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Id> {
        self.sub
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid user ID in token"))
    }
}

#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Issues and validates session tokens
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    session_expiry_secs: i64,
}

impl JwtService {
    /// Call once at startup and keep in `AppState`
    pub fn new(secret: &str, session_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            session_expiry_secs,
        }
    }

    /// Start a new session for `user_id`
    pub fn issue_session_token(&self, user_id: Id) -> Result<(String, Claims)> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.session_expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate session token: {}", e))?;
        Ok((token, claims))
    }

    /// Check signature and expiry
    #[inline]
    pub fn validate_session_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    #[inline]
    pub fn session_expiry_secs(&self) -> i64 {
        self.session_expiry_secs
    }
}
