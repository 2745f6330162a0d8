//! Logging infrastructure for symreg
//!
//! Provides unified logging setup using the tracing ecosystem.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::{paths, Result, SymregError};

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log to stderr
    Stderr,
    /// Log to a file under the symreg log directory
    File,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output destination
    pub output: LogOutput,
    /// Log level filter (e.g., "info", "symreg=debug")
    pub filter: String,
    /// Include file/line in logs
    pub file_line: bool,
    /// Optional custom log file name (defaults to "symreg.log")
    pub file_name: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "info".into(),
            file_line: false,
            file_name: None,
        }
    }
}

impl LogConfig {
    /// Create config for client tools (filter from SYMREG_LOG, quiet default)
    pub fn client() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: std::env::var("SYMREG_LOG").unwrap_or_else(|_| "warn".into()),
            file_line: false,
            file_name: None,
        }
    }

    /// Create config for development (verbose stderr)
    pub fn development() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "debug".into(),
            file_line: true,
            file_name: None,
        }
    }
}

/// Initialize logging with default configuration
///
/// Uses SYMREG_LOG env var for the filter, defaults to "info"
pub fn init_logging() -> Result<()> {
    init_logging_with_config(LogConfig {
        filter: std::env::var("SYMREG_LOG").unwrap_or_else(|_| "info".into()),
        ..LogConfig::default()
    })
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| SymregError::config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(config.file_line)
        .with_line_number(config.file_line);

    match config.output {
        LogOutput::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| SymregError::internal(format!("Failed to init logging: {}", e)))?;
        }
        LogOutput::File => {
            let log_dir = paths::log_dir();
            std::fs::create_dir_all(&log_dir)?;

            let file_name = config.file_name.as_deref().unwrap_or("symreg.log");
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join(file_name))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_writer(file).with_ansi(false))
                .try_init()
                .map_err(|e| SymregError::internal(format!("Failed to init logging: {}", e)))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.filter, "info");
        assert!(!config.file_line);
        assert!(config.file_name.is_none());
    }

    #[test]
    fn test_log_config_development() {
        let config = LogConfig::development();
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.filter, "debug");
        assert!(config.file_line);
    }

    #[test]
    fn test_log_config_client_quiet_by_default() {
        let original = std::env::var("SYMREG_LOG").ok();
        std::env::remove_var("SYMREG_LOG");

        let config = LogConfig::client();
        assert_eq!(config.filter, "warn");

        if let Some(val) = original {
            std::env::set_var("SYMREG_LOG", val);
        }
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let config = LogConfig {
            filter: "not a [valid] filter!!".into(),
            ..LogConfig::default()
        };
        let result = init_logging_with_config(config);
        assert!(matches!(result, Err(SymregError::Config(_))));
    }

    #[test]
    fn test_log_config_clone() {
        let config = LogConfig {
            output: LogOutput::File,
            filter: "symreg=trace".into(),
            file_line: true,
            file_name: Some("test.log".into()),
        };
        let cloned = config.clone();
        assert_eq!(config.output, cloned.output);
        assert_eq!(config.filter, cloned.filter);
        assert_eq!(config.file_name, cloned.file_name);
    }

    // init_logging() itself is not exercised here: the tracing subscriber can
    // only be installed once per process and tests share one process.
}
