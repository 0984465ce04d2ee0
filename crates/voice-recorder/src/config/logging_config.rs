use crate::config::{default_log_filter, default_log_to_file};

use serde::{Deserialize, Serialize};

/// Logging configuration. `RUST_LOG` overrides `filter` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directives.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Whether to also write a daily log file in the data directory.
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            log_to_file: default_log_to_file(),
        }
    }
}
