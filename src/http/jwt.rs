use chrono::Utc;
use error_stack::{Result, ResultExt};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::{
    config,
    types::id::{marker::UserMarker, Id},
};

/// Claims of an access token. Tokens are signed with HS512 using
/// the configured `auth.jwt_secret`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Jwt {
    pub user_id: Id<UserMarker>,
    /// Issued at, in seconds since the Unix epoch.
    pub iat: i64,
    /// Expires at, in seconds since the Unix epoch.
    pub exp: i64,
    #[serde(default)]
    pub iss: String,
}

#[derive(Debug, Error)]
#[error("Failed to encode access token")]
pub struct EncodeError;

#[derive(Debug, Error)]
#[error("Invalid access token")]
pub struct DecodeError;

impl Jwt {
    const ISSUER: &'static str = "agora";

    #[tracing::instrument(skip_all, name = "jwt.decode")]
    pub fn decode(token: &str, auth: &config::Auth) -> Result<Self, DecodeError> {
        let key = DecodingKey::from_secret(auth.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS512);
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        jsonwebtoken::decode::<Self>(token, &key, &validation)
            .map(|data| data.claims)
            .change_context(DecodeError)
    }

    #[tracing::instrument(skip_all, name = "jwt.encode")]
    pub fn encode(user_id: Id<UserMarker>, auth: &config::Auth) -> Result<String, EncodeError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(auth.token_ttl_secs.get()).unwrap_or(i64::MAX);
        let claims = Self {
            user_id,
            iat: now,
            exp: now.saturating_add(ttl),
            iss: Self::ISSUER.into(),
        };

        let key = EncodingKey::from_secret(auth.jwt_secret.as_bytes());
        jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &key)
            .change_context(EncodeError)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sensitive;
    use std::num::NonZeroU64;

    fn auth(secret: &str) -> config::Auth {
        config::Auth {
            jwt_secret: Sensitive::from(secret),
            token_ttl_secs: NonZeroU64::new(60).unwrap(),
        }
    }

    #[test]
    fn test_encode_then_decode() {
        let auth = auth("a very secret key");
        let token = Jwt::encode(Id::new(42), &auth).unwrap();

        let jwt = Jwt::decode(&token, &auth).unwrap();
        assert_eq!(jwt.user_id, Id::new(42));
        assert_eq!(jwt.iss, "agora");
        assert_eq!(jwt.exp - jwt.iat, 60);
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = Jwt::encode(Id::new(42), &auth("a very secret key")).unwrap();
        assert!(Jwt::decode(&token, &auth("another secret key")).is_err());
    }

    #[test]
    fn test_rejects_expired() {
        let auth = auth("a very secret key");
        let claims = Jwt {
            user_id: Id::new(42),
            iat: 1_000,
            exp: 2_000,
            iss: String::new(),
        };
        let key = EncodingKey::from_secret(auth.jwt_secret.as_bytes());
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &key).unwrap();

        assert!(Jwt::decode(&token, &auth).is_err());
        assert!(Jwt::decode("not.a.token", &auth).is_err());
    }
}
