//! Access and refresh tokens
//!
//! Keys are derived once from the configured secret and shared behind `Arc`.

use anyhow::Result;
use chrono::{Duration, Utc};
use fitness_tracker_shared::AuthError;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Which of the two token flavours a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub kind: TokenKind,
    /// Unique per token so two tokens minted in the same second differ
    pub jti: Uuid,
}

#[derive(Clone)]
struct Keys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

/// Token issuing and verification
#[derive(Clone)]
pub struct JwtService {
    keys: Keys,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtService {
    /// Derive keys from `secret`. Call once at startup.
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            keys: Keys {
                encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
                decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            },
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn issue(&self, user_id: Uuid, kind: TokenKind) -> Result<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        };
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::seconds(ttl)).timestamp(),
            iat: now.timestamp(),
            kind,
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign {:?} token: {}", kind, e))
    }

    /// Decode a token and require it to be of `expected` kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        if data.claims.kind != expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }

    #[inline]
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }
}
