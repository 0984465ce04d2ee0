use crate::config::default_show_notifications;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Whether notices are shown as desktop notifications.
    #[serde(default = "default_show_notifications")]
    pub show_notifications: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            show_notifications: default_show_notifications(),
        }
    }
}
