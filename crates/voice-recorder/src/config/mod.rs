mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod storage_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, logging_config::LoggingConfig,
    storage_config::StorageConfig,
};

pub(crate) const DEFAULT_FILE_NAME: &str = "Record.wav";
pub(crate) const DEFAULT_SHOW_NOTIFICATIONS: bool = true;
pub(crate) const DEFAULT_LOG_FILTER: &str = "voice_recorder=debug,voice_recorder_core=debug";
pub(crate) const DEFAULT_LOG_TO_FILE: bool = true;

pub(crate) fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

pub(crate) fn default_show_notifications() -> bool {
    DEFAULT_SHOW_NOTIFICATIONS
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

pub(crate) fn default_log_to_file() -> bool {
    DEFAULT_LOG_TO_FILE
}
