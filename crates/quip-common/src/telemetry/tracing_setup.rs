//! `tracing` subscriber installation
//!
//! `RUST_LOG` wins when set; otherwise the preset's level applies.

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Environment;

/// Output encoding of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, one event per line
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Emit an event when a span opens and closes (request timing)
    pub span_lifecycle: bool,
    /// Tag events with source file, line and thread name
    pub source_location: bool,
}

impl TracingConfig {
    /// Preset for a deployment environment.
    ///
    /// Development is verbose and annotated, production is JSON at `info`,
    /// staging sits between with plain text at `info`.
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: Level::DEBUG,
                format: LogFormat::Text,
                span_lifecycle: true,
                source_location: true,
            },
            Environment::Staging => Self {
                level: Level::INFO,
                format: LogFormat::Text,
                span_lifecycle: false,
                source_location: true,
            },
            Environment::Production => Self {
                level: Level::INFO,
                format: LogFormat::Json,
                span_lifecycle: false,
                source_location: false,
            },
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
    }

    fn output<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let spans = if self.span_lifecycle {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_thread_names(self.source_location)
            .with_span_events(spans);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Text => layer.boxed(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Install the global subscriber; a second call fails instead of panicking
pub fn init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    tracing_subscriber::registry()
        .with(config.filter())
        .with(config.output())
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}
