use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Env var selecting the diagnostic log level (`error`, `warn`, `info`, `debug`, `trace`).
pub const LOG_ENV_VAR: &str = "KUBECTL_GUARD_LOG";

/// Parse a level name; unknown or empty values disable logging.
pub fn parse_level(value: &str) -> LevelFilter {
    value.trim().parse().unwrap_or(LevelFilter::Off)
}

/// Install a stderr logger if `KUBECTL_GUARD_LOG` asks for one.
///
/// Best-effort: without the env var nothing is installed, so kubectl's own
/// output is all the user sees.
pub fn init() {
    let level = std::env::var(LOG_ENV_VAR)
        .map(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Off);
    if level == LevelFilter::Off {
        return;
    }

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_levels() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level(" trace "), LevelFilter::Trace);
    }

    #[test]
    fn parse_unknown_disables() {
        assert_eq!(parse_level(""), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Off);
    }
}
