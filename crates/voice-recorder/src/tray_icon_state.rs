use voice_recorder_core::SessionMode;

/// Tray icon states corresponding to the session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Nothing live.
    Idle,
    /// Capturing audio.
    Recording,
    /// A recording or playback is paused.
    Paused,
    /// Playing the last recording.
    Playing,
}

impl TrayIconState {
    /// RGB fill of the icon dot.
    pub fn color(self) -> [u8; 3] {
        match self {
            TrayIconState::Idle => [0x9e, 0x9e, 0x9e],
            TrayIconState::Recording => [0xe5, 0x39, 0x35],
            TrayIconState::Paused => [0xff, 0xb3, 0x00],
            TrayIconState::Playing => [0x43, 0xa0, 0x47],
        }
    }
}

impl From<SessionMode> for TrayIconState {
    fn from(mode: SessionMode) -> Self {
        match mode {
            SessionMode::Idle => TrayIconState::Idle,
            SessionMode::Recording => TrayIconState::Recording,
            SessionMode::RecordingPaused | SessionMode::PlaybackPaused => TrayIconState::Paused,
            SessionMode::Playing => TrayIconState::Playing,
        }
    }
}
