//! Logging utilities and configuration for the profiler.
//!
//! The library only emits `tracing` events and spans; it never installs a
//! subscriber. Binaries that want output call [`setup::init_logging`].

use tracing::Level;

/// Controls how chatty a [`crate::analyzers::Profiler`] is.
///
/// Column-level decisions (why a column became an identifier, why its
/// statistics were replaced by a marker) can be numerous on wide tables, so
/// they are gated separately from the per-stage messages.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for profiler components
    pub base_level: Level,
    /// Whether to log per-column classification and statistics decisions
    pub log_column_details: bool,
    /// Whether to log stage progress and timings
    pub log_stage_timings: bool,
    /// Maximum length for logged field values such as column names
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_column_details: true,
            log_stage_timings: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_column_details: true,
            log_stage_timings: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_column_details: false,
            log_stage_timings: false,
            max_field_length: 128,
        }
    }
}

/// Debug-level logging of a per-column decision, gated by
/// [`LogConfig::log_column_details`].
#[macro_export]
macro_rules! log_column {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_column_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Info-level logging of stage progress, gated by
/// [`LogConfig::log_stage_timings`].
#[macro_export]
macro_rules! log_stage {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_stage_timings {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a string to at most `max_length` bytes, on a char boundary.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Subscriber setup for binaries and demos.
pub mod setup {
    use tracing::Level;

    /// Configuration for the process-wide subscriber.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for everything else
        pub level: Level,
        /// Log level for the profiler crate
        pub profiler_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                profiler_level: Level::DEBUG,
                json_format: false,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                ..Self::default()
            }
        }

        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            format!(
                "{},insight_profiler={}",
                self.level.as_str().to_lowercase(),
                self.profiler_level.as_str().to_lowercase()
            )
        }
    }

    /// Installs a global `tracing` subscriber.
    ///
    /// Events go to stderr so reports on stdout stay clean. `RUST_LOG` takes
    /// precedence over the configured filter. Fails if a global subscriber
    /// is already installed.
    ///
    /// ```rust,no_run
    /// use insight_profiler::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}
