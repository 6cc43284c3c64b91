// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential issuing and verification.
//!
//! Credentials are HS256 JWTs carrying the user id as the subject. Validity
//! is self-contained: verification never consults the session store, which
//! is a separate revocation layer (a logged-out user's credential still
//! verifies until its own expiry).

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::error::AppError;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Issues and verifies session credentials.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    /// Fails closed: an empty signing secret refuses to construct, so the
    /// process never mints or accepts unsigned credentials.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        })
    }

    /// Mint a credential for a user.
    ///
    /// Pure computation; the caller persists the session record.
    pub fn issue(&self, user_id: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Credential encode failed: {}", e)))
    }

    /// Verify a credential and return its subject.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::ExpiredCredential,
                _ => AppError::InvalidCredential,
            }
        })?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_signing_key_32_bytes_long!!";

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = TokenService::new(SECRET, 7 * 86400).unwrap();

        let token = tokens.issue("user-42").unwrap();
        let subject = tokens.verify(&token).unwrap();

        assert_eq!(subject, "user-42");
    }

    #[test]
    fn test_empty_secret_refused() {
        assert!(TokenService::new(b"", 86400).is_err());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let minting = TokenService::new(SECRET, 86400).unwrap();
        let verifying = TokenService::new(b"a_completely_different_secret!!!", 86400).unwrap();

        let token = minting.issue("user-42").unwrap();

        assert!(matches!(
            verifying.verify(&token),
            Err(AppError::InvalidCredential)
        ));
    }
}
