//! Capability gating for capture.
//!
//! Recording needs both microphone capture and storage write access. The
//! controller asks a [`PermissionGate`] before acquiring a recorder; when a
//! capability is missing it fires a request and returns. The answer arrives
//! later as a [`PermissionResult`] and only produces a [`Notice`].

mod probe;

pub use probe::{probe_microphone, probe_storage};

use crate::{CoreResult, RecorderError};

use std::{fmt, panic::Location};

use error_location::ErrorLocation;

/// An OS-granted permission gating an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Capturing audio from the microphone.
    MicrophoneCapture,
    /// Writing the recording to storage.
    StorageWrite,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::MicrophoneCapture => write!(f, "microphone capture"),
            Capability::StorageWrite => write!(f, "storage write"),
        }
    }
}

/// Capabilities requested together before a recording can start.
pub const RECORDING_CAPABILITIES: [Capability; 2] =
    [Capability::MicrophoneCapture, Capability::StorageWrite];

/// Grant state delivered by the permission callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionResult {
    /// Whether microphone capture was granted.
    pub microphone: bool,
    /// Whether storage write was granted.
    pub storage: bool,
}

impl PermissionResult {
    /// Result with every capability granted.
    pub fn granted() -> Self {
        Self {
            microphone: true,
            storage: true,
        }
    }

    /// Result with every capability refused.
    pub fn denied() -> Self {
        Self::default()
    }

    /// Grant state of a single capability.
    pub fn is_granted(&self, capability: Capability) -> bool {
        match capability {
            Capability::MicrophoneCapture => self.microphone,
            Capability::StorageWrite => self.storage,
        }
    }

    /// Fails with the first refused capability.
    #[track_caller]
    pub fn ensure_granted(&self) -> CoreResult<()> {
        match RECORDING_CAPABILITIES
            .iter()
            .find(|capability| !self.is_granted(**capability))
        {
            Some(capability) => Err(RecorderError::PermissionDenied {
                capability: *capability,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}

/// Transient user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Every requested capability was granted.
    PermissionGranted,
    /// At least one requested capability was refused.
    PermissionDenied,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PermissionGranted => write!(f, "Permission Granted"),
            Notice::PermissionDenied => write!(f, "Permission Denied"),
        }
    }
}

/// Capability source consulted by the controller.
pub trait PermissionGate {
    /// Whether `capability` is currently granted.
    fn is_granted(&self, capability: Capability) -> bool;

    /// Ask for `capabilities`. Fire-and-forget: the answer is delivered
    /// later through `RecordingController::on_permission_result`.
    fn request(&mut self, capabilities: &[Capability]);

    /// Record a delivered answer.
    fn on_result(&mut self, _result: &PermissionResult) {}
}
