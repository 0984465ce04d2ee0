use std::fmt;

/// Text mirrored into the status label after each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing has happened yet.
    #[default]
    Ready,
    /// Capture running.
    RecordingInProgress,
    /// Capture paused.
    RecordingPaused,
    /// Capture stopped and the file finalised.
    RecordingStopped,
    /// Playback running.
    PlayingRecording,
    /// Playback paused.
    PlaybackPaused,
    /// Playback stopped.
    PlaybackStopped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::Ready => "Ready",
            Status::RecordingInProgress => "Recording in progress",
            Status::RecordingPaused => "Recording paused",
            Status::RecordingStopped => "Recording stopped",
            Status::PlayingRecording => "Playing recording",
            Status::PlaybackPaused => "Playback paused",
            Status::PlaybackStopped => "Playback stopped",
        };
        f.write_str(text)
    }
}
