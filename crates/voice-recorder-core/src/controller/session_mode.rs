use std::fmt;

/// Which session, if any, is live. Recording and playback never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionMode {
    /// Nothing live.
    #[default]
    Idle,
    /// Capturing from the microphone.
    Recording,
    /// Recorder held, input discarded.
    RecordingPaused,
    /// Rendering the last recording.
    Playing,
    /// Player held, output silent.
    PlaybackPaused,
}

impl SessionMode {
    /// Every mode, in declaration order.
    pub const ALL: [SessionMode; 5] = [
        SessionMode::Idle,
        SessionMode::Recording,
        SessionMode::RecordingPaused,
        SessionMode::Playing,
        SessionMode::PlaybackPaused,
    ];

    /// True while a recorder is held.
    pub fn holds_recorder(self) -> bool {
        matches!(self, SessionMode::Recording | SessionMode::RecordingPaused)
    }

    /// True while a player is held.
    pub fn holds_player(self) -> bool {
        matches!(self, SessionMode::Playing | SessionMode::PlaybackPaused)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Idle => write!(f, "Idle"),
            SessionMode::Recording => write!(f, "Recording"),
            SessionMode::RecordingPaused => write!(f, "RecordingPaused"),
            SessionMode::Playing => write!(f, "Playing"),
            SessionMode::PlaybackPaused => write!(f, "PlaybackPaused"),
        }
    }
}
