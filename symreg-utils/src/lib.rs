//! symreg-utils: Common utilities shared across symreg crates
//!
//! This crate provides:
//! - Unified error types ([`SymregError`], [`Result`])
//! - Logging infrastructure ([`init_logging`], [`LogConfig`])
//! - XDG-compliant path utilities ([`paths`] module)

pub mod error;
pub mod logging;
pub mod paths;

// Re-export main types at crate root for convenience
pub use error::{Result, SymregError};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogOutput};

// Re-export commonly used path functions
pub use paths::{cache_dir, config_dir, config_file, data_dir, log_dir};
