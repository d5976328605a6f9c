use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable single-line output for terminals.
    Compact,
    /// Structured output for log shippers.
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Directives used when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "campus_roster=debug,tower_http=debug,info"
    } else {
        "campus_roster=info,tower_http=info"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(format == LogFormat::Json)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    let fmt_layer = match format {
        LogFormat::Compact => fmt_layer.compact().boxed(),
        LogFormat::Json => fmt_layer.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_flag() {
        assert_eq!(LogFormat::from_json_flag(true), LogFormat::Json);
        assert_eq!(LogFormat::from_json_flag(false), LogFormat::Compact);
    }

    #[test]
    fn test_default_directives_parse() {
        for verbose in [true, false] {
            let directives = default_directives(verbose);
            assert!(directives.starts_with("campus_roster="));
            assert!(EnvFilter::try_new(directives).is_ok());
        }
        assert!(default_directives(true).contains("campus_roster=debug"));
        assert!(default_directives(false).contains("campus_roster=info"));
    }
}
