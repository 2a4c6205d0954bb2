use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// JWT claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The subject, the user's email.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS256 bearer tokens.
///
/// Stateless apart from the signing secret: there is no revocation list and
/// no refresh flow, a token is good until `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Creates a new `TokenService`.
    ///
    /// # Arguments
    ///
    /// * `secret` - The shared signing secret.
    /// * `ttl` - How long an issued token stays valid.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issues a signed token for `subject`, expiring after the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String> {
        let now = Utc::now();
        self.encode_claims(&Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        })
    }

    /// Validates `token` and returns its subject.
    ///
    /// Fails with `AppError::Authentication` when the signature does not
    /// match, the token is malformed, or it has expired.
    pub fn validate(&self, token: &str) -> Result<String> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AppError::Authentication("Could not validate credentials".to_string())
            })
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::Crypto(format!("Token signing failed: {}", e)))
    }
}
