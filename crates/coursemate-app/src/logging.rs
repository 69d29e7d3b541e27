use coursemate_config::LogLevel;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "coursemate=info";

/// Pick the filter: CLI flag, then `RUST_LOG`, then the config level.
fn resolve_directive(cli: Option<&str>, rust_log: Option<&str>, level: LogLevel) -> String {
    cli.or(rust_log)
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .unwrap_or_else(|| level.as_directive())
        .to_string()
}

pub fn init(cli: Option<&str>, level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = resolve_directive(cli, rust_log.as_deref(), level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{directive}': {e}; using {DEFAULT_DIRECTIVE}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins() {
        assert_eq!(
            resolve_directive(Some("debug"), Some("warn"), LogLevel::Error),
            "debug"
        );
    }

    #[test]
    fn rust_log_beats_config() {
        assert_eq!(
            resolve_directive(None, Some("coursemate_rag=trace"), LogLevel::Error),
            "coursemate_rag=trace"
        );
    }

    #[test]
    fn config_level_is_the_fallback() {
        assert_eq!(
            resolve_directive(None, None, LogLevel::Warning),
            "coursemate=warn"
        );
        assert_eq!(
            resolve_directive(None, Some("  "), LogLevel::default()),
            DEFAULT_DIRECTIVE
        );
    }
}
