//! Seams between the controller and the media layer.
//!
//! The controller never talks to a device directly. It asks a
//! [`MediaServices`] implementation for a recorder or a player, keeps the
//! returned handle while the session is live, and releases it by calling
//! `stop`, which consumes the handle.

use crate::CoreResult;

use std::path::Path;

/// A live capture session writing to an output resource.
pub trait RecordingSession {
    /// Stop feeding captured audio into the output.
    fn pause(&mut self) -> CoreResult<()>;

    /// Stop capture, finalise the output and release the device.
    fn stop(self) -> CoreResult<()>;
}

/// A live playback session reading from an input resource.
pub trait PlaybackSession {
    /// Hold the current position and output silence.
    fn pause(&mut self) -> CoreResult<()>;

    /// Stop playback and release the device.
    fn stop(self) -> CoreResult<()>;
}

/// Factory for recorder and player sessions.
pub trait MediaServices {
    /// Recorder handle type.
    type Recorder: RecordingSession;
    /// Player handle type.
    type Player: PlaybackSession;

    /// Acquire a recorder and begin capture into `output`.
    fn start_recorder(&mut self, output: &Path) -> CoreResult<Self::Recorder>;

    /// Acquire a player and begin playback of `input`.
    fn start_player(&mut self, input: &Path) -> CoreResult<Self::Player>;
}
