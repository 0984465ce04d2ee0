//! Voice Recorder Core Library
//!
//! Record / pause / stop / play controller over microphone capture and
//! file playback, using CPAL for devices and hound for the WAV container.
//!
//! # Example
//!
//! ```no_run
//! use voice_recorder_core::{
//!     Action, Capability, DeviceMediaServices, PermissionGate, RecordingController,
//! };
//!
//! struct AlwaysGranted;
//!
//! impl PermissionGate for AlwaysGranted {
//!     fn is_granted(&self, _capability: Capability) -> bool {
//!         true
//!     }
//!
//!     fn request(&mut self, _capabilities: &[Capability]) {}
//! }
//!
//! let mut controller =
//!     RecordingController::new(DeviceMediaServices::new(), AlwaysGranted, "/tmp/Record.wav");
//!
//! controller.dispatch(Action::Start);
//! std::thread::sleep(std::time::Duration::from_secs(3));
//! controller.dispatch(Action::Stop);
//! controller.dispatch(Action::Play);
//!
//! println!("{}", controller.status());
//! ```

mod audio;
mod controller;
mod error;
mod permission;
mod services;

pub use {
    audio::{AudioCapturer, AudioPlayer, DeviceMediaServices},
    controller::{Action, Outcome, RecordingController, SessionMode, Status},
    error::RecorderError,
    error::Result as CoreResult,
    permission::{
        Capability, Notice, PermissionGate, PermissionResult, RECORDING_CAPABILITIES,
        probe_microphone, probe_storage,
    },
    services::{MediaServices, PlaybackSession, RecordingSession},
};

#[cfg(test)]
mod tests;
