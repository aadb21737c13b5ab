//! Bearer token verification
//!
//! Tokens are issued by the external identity provider; the services only
//! ever verify them with the provider's RS256 public key and read the
//! caller's identity out of the claims.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

use crate::models::UserIdentity;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User uid from the identity provider
    pub sub: String,
    /// Display name, if the provider supplies one
    pub name: Option<String>,
    /// Email address, if the provider supplies one
    pub email: Option<String>,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Public key for verifying tokens
    pub public_key: String,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_PUBLIC_KEY`: Public key for verifying tokens (PEM format) or path to public key file
    pub fn from_env() -> Result<Self> {
        let public_key = env::var("JWT_PUBLIC_KEY")
            .map_err(|_| anyhow::anyhow!("JWT_PUBLIC_KEY environment variable not set"))?;

        // If the public key looks like a file path, read from file
        let public_key = if public_key.starts_with("-----BEGIN") {
            public_key
        } else {
            std::fs::read_to_string(&public_key)
                .map_err(|e| anyhow::anyhow!("Failed to read public key file: {}", e))?
                .trim()
                .to_string()
        };

        Ok(JwtConfig { public_key })
    }
}

/// Token verifier built once at startup and shared through service state
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl JwtVerifier {
    /// Build a verifier from the configured public key
    pub fn new(config: &JwtConfig) -> Result<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(config.public_key.as_bytes())?;
        let mut validation = Validation::new(jsonwebtoken::Algorithm::RS256);
        validation.validate_exp = true;

        Ok(JwtVerifier {
            decoding_key: Arc::new(decoding_key),
            validation,
        })
    }

    /// Verify a bearer token and extract the caller's identity
    pub fn verify(&self, token: &str) -> Result<UserIdentity> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Ok(UserIdentity {
            uid: token_data.claims.sub,
            display_name: token_data.claims.name,
            email: token_data.claims.email,
        })
    }
}
