use error_stack::{Context, Report};

/// Dissects a [`figment::Error`] into printable attachments so that a
/// configuration failure tells which key and which source caused it.
pub trait FigmentErrorAttachable<T: Context> {
    #[must_use]
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> FigmentErrorAttachable<T> for Report<T> {
    fn attach_figment_error(self, error: figment::Error) -> Report<T> {
        // figment chains every failed key into one error
        error.into_iter().fold(self, |report, e| {
            let mut report = report.attach_printable(e.kind.to_string());

            if let (Some(profile), Some(md)) = (&e.profile, &e.metadata) {
                if !e.path.is_empty() {
                    let key = md.interpolate(profile, &e.path);
                    report = report.attach_printable(format!("for key {key:?}"));
                }
            }

            if let Some(md) = &e.metadata {
                report = match &md.source {
                    Some(source) => report.attach_printable(format!("in {source} {}", md.name)),
                    None => report.attach_printable(format!("in {}", md.name)),
                };
            }

            report
        })
    }
}
