//! JWT implementation of the `TokenVerifier` trait.
//!
//! Tokens are HS256-signed with a process-wide secret and carry the user
//! id, email and role as claims. Verification is self-contained: no
//! network, no persistence lookup.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use atrio_shared::time::get_timestamp_secs;

use crate::domain::{Role, TokenVerifier, UserId, UserIdentity, VerifyError};

/// Token lifetime in seconds (7 days, same as the issuing side)
const TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Role
    #[serde(default)]
    pub role: Role,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: u64,
    /// Issued at time (Unix timestamp, seconds)
    pub iat: u64,
}

/// HS256 token verifier with a fixed signing secret
pub struct JwtTokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Issue a signed token for an identity.
    ///
    /// The login/registration side of the system signs with the same
    /// secret; this is used there and in tests.
    pub fn issue(&self, identity: &UserIdentity) -> Result<String, jsonwebtoken::errors::Error> {
        let now = get_timestamp_secs();
        let claims = Claims {
            sub: identity.id.as_str().to_string(),
            email: identity.email.clone(),
            role: identity.role,
            exp: now + TOKEN_TTL_SECS,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Issue a token that is already expired (test hook)
    #[doc(hidden)]
    pub fn issue_expired(
        &self,
        identity: &UserIdentity,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = get_timestamp_secs();
        let claims = Claims {
            sub: identity.id.as_str().to_string(),
            email: identity.email.clone(),
            role: identity.role,
            exp: now.saturating_sub(TOKEN_TTL_SECS),
            iat: now.saturating_sub(2 * TOKEN_TTL_SECS),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, credential: &str) -> Result<UserIdentity, VerifyError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(credential, &self.decoding_key, &validation)
            .map_err(|e| VerifyError::InvalidCredential(e.to_string()))?;

        let claims = token_data.claims;
        Ok(UserIdentity::new(
            UserId::new(claims.sub),
            claims.email,
            claims.role,
        ))
    }
}
