use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::JsonPayloadError,
    web, HttpRequest,
};
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

use super::Error;
use crate::types::{self, error::FieldError};

/// Request spans are recorded at `DEBUG` so they do not flood
/// the default `info` output.
pub struct QuieterRootSpanBuilder;

impl RootSpanBuilder for QuieterRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        tracing_actix_web::root_span!(level = tracing::Level::DEBUG, request)
    }

    fn on_request_end<B: MessageBody>(
        span: Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Request bodies that are not JSON are reported like any other
/// validation failure, with `body` as the offending parameter.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_error)
}

fn handle_json_error(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    #[derive(Debug, thiserror::Error)]
    #[error("Failed to parse JSON body")]
    struct InvalidJson;

    let msg = match &error {
        JsonPayloadError::ContentType => "Expected a JSON body",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body is too large"
        }
        _ => "Invalid JSON body",
    };

    let report = error_stack::Report::new(InvalidJson).attach_printable(error.to_string());
    let error_type = types::Error::InvalidFormBody(vec![FieldError::body("body", msg)]);
    Error::from_report(error_type, report).into()
}

pub async fn index() -> &'static str {
    "API Running"
}

pub async fn welcome() -> &'static str {
    "Welcome to the site"
}

pub async fn not_found() -> Result<&'static str, Error> {
    Err(Error::new(types::Error::NotFound))
}
