use error_stack::{Context, Report};
use tracing_error::SpanTrace;

use crate::types;

mod impls;

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by every handler and service.
///
/// The [`types::Error`] part is what the client sees, the report and
/// the span trace are only for the server logs.
pub struct Error {
    error_type: types::Error,
    report: Report<HandlerError>,
    trace: SpanTrace,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to handle request")]
pub struct HandlerError;

impl Error {
    #[must_use]
    pub fn new(error_type: types::Error) -> Self {
        Self::from_report(error_type, Report::new(HandlerError))
    }

    #[must_use]
    pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
        Self::from_report(error_type, Report::new(context))
    }

    #[must_use]
    pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
        Self {
            error_type,
            report: report.change_context(HandlerError),
            trace: SpanTrace::capture(),
        }
    }
}

impl Error {
    #[must_use]
    pub fn as_type(&self) -> &types::Error {
        &self.error_type
    }

    #[must_use]
    pub fn change_type(mut self, error_type: types::Error) -> Self {
        self.error_type = error_type;
        self
    }

    #[must_use]
    pub fn downcast_ref<F: Context>(&self) -> Option<&F> {
        self.report.downcast_ref::<F>()
    }
}

impl From<types::Error> for Error {
    fn from(value: types::Error) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("type", &self.error_type)
            .field("report", &self.report)
            .field("trace", &self.trace)
            .finish()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", &self.error_type)?;
        writeln!(f, "{:?}", self.report)?;
        std::fmt::Display::fmt(&self.trace, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;

    #[test]
    fn test_keeps_original_context() {
        let error = Error::from_context(types::Error::Internal, database::Error::UnhealthyPool);
        assert_eq!(error.as_type(), &types::Error::Internal);
        assert!(matches!(
            error.downcast_ref::<database::Error>(),
            Some(database::Error::UnhealthyPool)
        ));

        let error = error.change_type(types::Error::ReadonlyMode);
        assert_eq!(error.as_type(), &types::Error::ReadonlyMode);
    }
}
