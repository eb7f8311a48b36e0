use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use super::{Error, Jwt};
use crate::{
    types::{
        self,
        id::{marker::UserMarker, Id},
    },
    App,
};

/// The user a request is made on behalf of.
///
/// Every post route takes an [`Actor`], so a request without a valid
/// token never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Id<UserMarker>,
}

/// Custom header accepted alongside `Authorization: Bearer <token>`.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

impl Actor {
    fn from_token(req: &HttpRequest) -> Result<Self, Error> {
        let Some(token) = extract_token(req) else {
            #[derive(Debug, thiserror::Error)]
            #[error("Attempt to access user-only route")]
            struct MissingToken;
            return Err(Error::from_context(types::Error::Unauthenticated, MissingToken));
        };

        let Some(app) = req.app_data::<web::Data<App>>() else {
            #[derive(Debug, thiserror::Error)]
            #[error("The web app has no available configuration")]
            struct NoConfig;
            return Err(Error::from_context(types::Error::Internal, NoConfig));
        };

        let jwt = Jwt::decode(token, &app.config.auth)
            .map_err(|e| Error::from_report(types::Error::InvalidToken, e))?;

        Ok(Self {
            user_id: jwt.user_id,
        })
    }
}

fn extract_token(req: &HttpRequest) -> Option<&str> {
    let headers = req.headers();
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    bearer
        .or_else(|| headers.get(AUTH_TOKEN_HEADER).and_then(|v| v.to_str().ok()))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl FromRequest for Actor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_token(req))
    }
}
