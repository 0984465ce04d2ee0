use crate::Capability;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder and player errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No audio output device found.
    #[error("No output device found {location}")]
    NoOutputDevice {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Playback was requested before anything was recorded.
    #[error("No recording at path: {path:?} {location}")]
    RecordingNotFound {
        /// Path that was expected to hold a recording.
        path: std::path::PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Reading or writing the WAV container failed.
    #[error("WAV error: {reason} {location}")]
    WavError {
        /// Description of the container error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio resampling failed.
    #[error("Resampling error: {reason} {location}")]
    ResamplingError {
        /// Description of the resampling error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A capability required for the action has not been granted.
    #[error("Permission denied: {capability} {location}")]
    PermissionDenied {
        /// The missing capability.
        capability: Capability,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
