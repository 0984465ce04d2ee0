use crate::config::default_file_name;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where recordings are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the recording (None = application cache directory).
    #[serde(default)]
    pub recording_dir: Option<PathBuf>,

    /// File name of the recording, overwritten on every new recording.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            recording_dir: None,
            file_name: default_file_name(),
        }
    }
}
