use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer, Registry};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

/// Installs the global subscriber. [`ErrorLayer`] is always included
/// because HTTP errors capture a [`SpanTrace`] for diagnostics.
///
/// [`SpanTrace`]: tracing_error::SpanTrace
pub fn init(config: &Logging) -> Result<(), TracingInitError> {
    let registry = Registry::default()
        .with(format_layer(config.style).with_filter(make_env_filter(&config.targets)))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")
}

fn format_layer<S>(style: LoggingStyle) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer();
    match style {
        LoggingStyle::Compact => layer.compact().boxed(),
        LoggingStyle::Full => layer.boxed(),
        LoggingStyle::Pretty => layer.pretty().boxed(),
        LoggingStyle::Json => layer
            .json()
            .with_current_span(true)
            .flatten_event(true)
            .boxed(),
    }
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
