use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::{
    database,
    types::{error::FieldError, Error as ErrorType},
};

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.error_type {
            ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
            ErrorType::InvalidFormBody(..)
            | ErrorType::UnknownPost
            | ErrorType::AlreadyLiked
            | ErrorType::NotYetLiked => StatusCode::BAD_REQUEST,
            ErrorType::Unauthenticated | ErrorType::InvalidToken | ErrorType::NotAuthorized => {
                StatusCode::UNAUTHORIZED
            }
            ErrorType::NotFound
            | ErrorType::PostNotFound
            | ErrorType::CommentNotFound
            | ErrorType::UserNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = ?self.error_type, "request rejected");
        }
        HttpResponse::build(status).json(&self.error_type)
    }
}

impl From<Report<database::Error>> for Error {
    fn from(value: Report<database::Error>) -> Self {
        match value.current_context() {
            database::Error::Readonly => Error::from_report(ErrorType::ReadonlyMode, value),
            _ => Error::from_report(ErrorType::Internal, value),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(value: validator::ValidationErrors) -> Self {
        #[derive(Debug, thiserror::Error)]
        #[error("Validation error occurred")]
        struct ValidateError;

        let fields = FieldError::from_validation(&value);
        Error::from_context(ErrorType::InvalidFormBody(fields), ValidateError)
    }
}
