//! Bearer-token issuance, validation, and refresh.
//!
//! The signing key is generated once from OS randomness at process start
//! and never persisted: restarting the process invalidates every token
//! still in circulation. Tokens are valid for 20 minutes; a refresh is only
//! honored once less than 2 minutes remain.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const TOKEN_TTL: Duration = Duration::from_secs(20 * 60);
const REFRESH_WINDOW: Duration = Duration::from_secs(2 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    exp: u64,
}

/// Holds the process's signing key and issues/validates tokens against it.
pub struct AuthState {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthState {
    pub fn new() -> Self {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        AuthState {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issues a fresh token valid for [`TOKEN_TTL`] from now.
    pub fn issue(&self) -> Result<String, ApiError> {
        let exp = unix_now()? + TOKEN_TTL.as_secs();
        encode(&Header::new(Algorithm::HS256), &Claims { exp }, &self.encoding_key)
            .map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// Validates a bearer token, failing with `Unauthorized` on any
    /// signature, expiry, or format problem.
    pub fn validate(&self, token: &str) -> Result<(), ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|_| ())
            .map_err(|_| ApiError::Unauthorized)
    }

    /// Exchanges `token` for a new one, only if fewer than [`REFRESH_WINDOW`]
    /// remain on it. Fails `Unauthorized` if the token itself doesn't
    /// validate, `InvalidInput` if it's presented too early.
    pub fn refresh(&self, token: &str) -> Result<String, ApiError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| ApiError::Unauthorized)?;
        let now = unix_now()?;
        let remaining = data.claims.exp.saturating_sub(now);
        if remaining >= REFRESH_WINDOW.as_secs() {
            return Err(ApiError::InvalidInput(
                "token is not yet eligible for refresh".to_string(),
            ));
        }
        self.issue()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now() -> Result<u64, ApiError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| ApiError::Internal(e.to_string()))
}
