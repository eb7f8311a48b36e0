use serde::Deserialize;
use std::num::NonZeroU64;
use validator::{Validate, ValidationError};

use crate::types::Sensitive;

#[derive(Debug, Deserialize, Validate)]
pub struct Auth {
    /// Shared secret used to sign and verify HS512 access tokens.
    ///
    /// **Environment variables**:
    /// - `AGORA_AUTH_JWT_SECRET` or `JWT_SECRET`
    #[validate(custom(function = "validate_jwt_secret"))]
    pub jwt_secret: Sensitive<String>,
    /// How long a freshly issued token stays valid.
    ///
    /// **Environment variables**:
    /// - `AGORA_AUTH_TOKEN_TTL_SECS`
    #[serde(default = "Auth::default_token_ttl_secs")]
    pub token_ttl_secs: NonZeroU64,
}

impl Auth {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 360_000;
    const JWT_SECRET_MIN: usize = 12;
    const JWT_SECRET_MAX: usize = 1024;

    pub(crate) const fn default_token_ttl_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TOKEN_TTL_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TOKEN_TTL_SECS is accidentally set to 0"),
        }
    }
}

fn validate_jwt_secret(secret: &Sensitive<String>) -> Result<(), ValidationError> {
    if (Auth::JWT_SECRET_MIN..=Auth::JWT_SECRET_MAX).contains(&secret.len()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("length");
        error.message = Some("Invalid JWT secret key".into());
        Err(error)
    }
}
