use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the process-wide subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a config value; anything other than `json` means compact.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") { Self::Json } else { Self::Compact }
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info,sea_orm=warn"))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info,sea_orm=warn`
/// - Safe to call more than once; later calls are no-ops
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(default_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(default_filter())
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}
