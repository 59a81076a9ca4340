use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives when neither `RUST_LOG` nor a configured level is present.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,axum=info,sea_orm=warn,sqlx=warn";

/// Output shape of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON, everything else compact.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Build the filter: `RUST_LOG` wins, then the configured level, then defaults.
///
/// A bare level such as `debug` is widened so noisy dependencies stay at warn.
pub fn build_filter(configured_level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match configured_level.map(str::trim).filter(|s| !s.is_empty()) {
        Some(level) if !level.contains('=') && !level.contains(',') => {
            EnvFilter::new(format!("{level},sea_orm=warn,sqlx=warn"))
        }
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_DIRECTIVES),
    }
}

/// Initialize tracing with the given format and level.
/// Writes to stdout; a second call is a no-op.
pub fn init_logging(format: LogFormat, configured_level: Option<&str>) {
    let env_filter = build_filter(configured_level);
    let _ = match format {
        LogFormat::Compact => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(io::stdout)
            .try_init(),
        LogFormat::Json => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .with_writer(io::stdout)
            .try_init(),
    };
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `LOG_LEVEL`, then [`DEFAULT_DIRECTIVES`]
pub fn init_logging_default() {
    let level = std::env::var("LOG_LEVEL").ok();
    init_logging(LogFormat::Compact, level.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parse_is_case_insensitive() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" json "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Compact);
        assert_eq!(LogFormat::parse(""), LogFormat::Compact);
    }
}
