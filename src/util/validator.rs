use error_stack::Report;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

/// Turns [`ValidationErrors`] into a [`Report`] where every failed
/// field is attached as `path.to.field: message`.
pub trait IntoValidatorReport<T> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidationErrors> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
        self.map_err(|errors| {
            let mut path = Vec::new();
            read_errors(&errors, &mut path, Report::new(Wrapper))
        })
    }
}

fn read_errors(
    errors: &ValidationErrors,
    path: &mut Vec<String>,
    mut report: Report<Wrapper>,
) -> Report<Wrapper> {
    let mut fields = errors.errors().iter().collect::<Vec<_>>();
    fields.sort_by_key(|(field, _)| *field);

    for (field, kind) in fields {
        path.push((*field).to_string());
        match kind {
            ValidationErrorsKind::Field(list) => {
                let field_path = path.join(".");
                for error in list {
                    report = report.attach_printable(format!("{field_path}: {error}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                report = read_errors(inner, path, report);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    path.push(index.to_string());
                    report = read_errors(inner, path, report);
                    path.pop();
                }
            }
        }
        path.pop();
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Auth;
    use validator::Validate;

    #[test]
    fn test_attaches_nested_fields() {
        let auth = Auth {
            jwt_secret: "short".into(),
            token_ttl_secs: Auth::default_token_ttl_secs(),
        };

        let report = auth.validate().into_validator_report().err();
        let rendered = format!("{report:?}");
        assert!(rendered.contains("jwt_secret: Invalid JWT secret key"), "{rendered}");
    }
}
