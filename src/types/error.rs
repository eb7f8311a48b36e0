use serde::{ser::SerializeMap, Deserialize, Serialize};
use std::fmt::Display;
use validator::ValidationErrors;

/// Everything a client may see when a request fails.
///
/// Most variants are serialized as `{ "msg": "..." }`, field validation
/// failures as `{ "errors": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Internal,
    ReadonlyMode,
    InvalidFormBody(Vec<FieldError>),
    Unauthenticated,
    InvalidToken,
    NotAuthorized,
    NotFound,
    PostNotFound,
    /// A post is referenced by a mutation route but does not exist.
    UnknownPost,
    CommentNotFound,
    UserNotFound,
    AlreadyLiked,
    NotYetLiked,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Internal => f.write_str("Server Error"),
            Error::ReadonlyMode => f.write_str("Service is temporarily read-only"),
            Error::InvalidFormBody(..) => f.write_str("Invalid request body"),
            Error::Unauthenticated => f.write_str("No token, authorization denied"),
            Error::InvalidToken => f.write_str("Token is not valid"),
            Error::NotAuthorized => f.write_str("User not authorized"),
            Error::NotFound => f.write_str("Not found"),
            Error::PostNotFound | Error::UnknownPost => f.write_str("Post not found"),
            Error::CommentNotFound => f.write_str("Comment does not exist"),
            Error::UserNotFound => f.write_str("User not found"),
            Error::AlreadyLiked => f.write_str("Post already liked"),
            Error::NotYetLiked => f.write_str("Post has not yet been liked"),
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Error::InvalidFormBody(errors) => map.serialize_entry("errors", errors)?,
            _ => map.serialize_entry("msg", &self.to_string())?,
        }
        map.end()
    }
}

/// Where the invalid value was found in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLocation {
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: FieldLocation,
}

impl FieldError {
    #[must_use]
    pub fn body(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: param.into(),
            location: FieldLocation::Body,
        }
    }

    /// Flattens [`ValidationErrors`] into a list sorted by field name.
    #[must_use]
    pub fn from_validation(errors: &ValidationErrors) -> Vec<Self> {
        let mut list = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let param = field.to_string();
                errors.iter().map(move |error| {
                    let msg = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    Self::body(param.clone(), msg)
                })
            })
            .collect::<Vec<_>>();

        list.sort_by(|a, b| a.param.cmp(&b.param));
        list
    }
}
