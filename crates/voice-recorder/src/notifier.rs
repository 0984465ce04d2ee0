use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use notify_rust::{Notification, Timeout};
use tracing::{info, instrument};
use voice_recorder_core::Notice;

/// How long a notice stays on screen.
const NOTICE_TIMEOUT_MS: u32 = 3_500;

const NOTICE_SUMMARY: &str = "Voice Recorder";

/// Shows transient notices as desktop notifications.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    /// Create a notifier. When disabled, notices are only logged.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Log `notice` and, when enabled, show it.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn show(&self, notice: Notice) -> AppResult<()> {
        info!(%notice, "Notice");

        if !self.enabled {
            return Ok(());
        }

        Notification::new()
            .summary(NOTICE_SUMMARY)
            .body(&notice.to_string())
            .timeout(Timeout::Milliseconds(NOTICE_TIMEOUT_MS))
            .show()
            .map(|_| ())
            .map_err(|e| AppError::NotificationFailed {
                reason: format!("Failed to show notice: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
