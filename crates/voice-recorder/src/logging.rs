//! Tracing subscriber setup: stderr plus an optional daily JSON log file.

use crate::config::{Config, LoggingConfig};

use tracing::warn;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "voice-recorder";
const LOG_FILE_SUFFIX: &str = "log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped and must be held
/// for the life of the process.
pub(crate) fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let mut file_error = None;
    let (file_layer, guard) = if config.log_to_file {
        let appender = Config::log_dir().map_err(|e| e.to_string()).and_then(|dir| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(dir)
                .map_err(|e| e.to_string())
        });

        match appender {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (
                    Some(fmt::layer().json().with_writer(writer)),
                    Some(guard),
                )
            }
            Err(e) => {
                file_error = Some(e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        warn!(error = %e, "File logging disabled");
    }

    guard
}
