//! Logging configuration for quality-review.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application. [`setup::init_logging`] is a convenience for binaries and
//! demos that want the usual `tracing-subscriber` setup.

use tracing::Level;

/// Controls how much the profiler logs while it runs.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for profiler events
    pub base_level: Level,
    /// Whether to log one detail event per profiled column
    pub log_column_details: bool,
    /// Whether to log data source registration and collection
    pub log_data_operations: bool,
    /// Maximum length for logged field values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_column_details: false,
            log_data_operations: true,
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
            log_data_operations: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_column_details: false,
            log_data_operations: false,
            max_field_length: 128,
        }
    }

    /// Creates a balanced configuration suitable for most use cases.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Returns true if events at `level` pass the configured base level.
    pub fn logs_at(&self, level: Level) -> bool {
        level <= self.base_level
    }
}

/// Logs a review lifecycle event at info level when the base level allows it.
#[macro_export]
macro_rules! log_review {
    ($config:expr, $($arg:tt)*) => {
        if $config.logs_at(tracing::Level::INFO) {
            tracing::info!($($arg)*);
        }
    };
}

/// Logs per-column detail at debug level when enabled in the [`LogConfig`].
#[macro_export]
macro_rules! log_column {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_column_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Logs a data operation at info level when enabled in the [`LogConfig`].
#[macro_export]
macro_rules! log_data_op {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_data_operations {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a string to the maximum field length if needed.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((cut, _)) => {
            let truncated = &value[..cut];
            format!("{truncated}...(truncated)")
        }
    }
}

/// Utilities for installing a `tracing-subscriber` subscriber.
pub mod setup {
    use tracing::Level;

    use crate::error::{Result, ReviewError};

    /// Configuration for the subscriber installed by [`init_logging`].
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for quality-review events specifically
        pub crate_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                crate_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                crate_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                crate_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for quality-review events.
        pub fn with_crate_level(mut self, level: Level) -> Self {
            self.crate_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},quality_review={}",
                    self.level.as_str().to_lowercase(),
                    self.crate_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Installs a global fmt subscriber. `RUST_LOG` takes precedence over the
    /// configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use quality_review::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(config.env_filter()).map_err(|e| {
                ReviewError::Configuration(format!("Invalid log filter: {e}"))
            })?,
        };

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| ReviewError::Configuration(format!("Logging already initialized: {e}")))
    }
}
