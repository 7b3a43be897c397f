use tracing_subscriber::filter::LevelFilter;

/// Environment variable selecting the plugin's log verbosity.
pub const LOG_ENV: &str = "SUBSAMPLING_DETECTOR_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_ENV).ok().as_deref())
    }

    /// Unknown values fall back to the default level.
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|value| value.trim().parse::<LevelFilter>().ok())
            .map(|level| Self { level })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(LogConfig::parse(Some("debug")).level, LevelFilter::DEBUG);
        assert_eq!(LogConfig::parse(Some(" off ")).level, LevelFilter::OFF);
        assert_eq!(LogConfig::parse(Some("WARN")).level, LevelFilter::WARN);
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(LogConfig::parse(None), LogConfig::default());
        assert_eq!(LogConfig::parse(Some("chatty")).level, LevelFilter::INFO);
    }
}
