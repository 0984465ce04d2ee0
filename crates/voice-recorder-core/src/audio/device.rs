use crate::{
    CoreResult, MediaServices,
    audio::{AudioCapturer, AudioPlayer, playback::ensure_recording_exists},
};

use std::path::Path;

use tracing::{debug, instrument};

/// [`MediaServices`] backed by the default cpal input and output devices.
///
/// Devices are opened on every acquisition so that a microphone or
/// headset plugged in between sessions is picked up.
#[derive(Debug, Default)]
pub struct DeviceMediaServices;

impl DeviceMediaServices {
    /// Create the device-backed services.
    pub fn new() -> Self {
        Self
    }
}

impl MediaServices for DeviceMediaServices {
    type Recorder = AudioCapturer;
    type Player = AudioPlayer;

    #[instrument(skip(self))]
    fn start_recorder(&mut self, output: &Path) -> CoreResult<AudioCapturer> {
        let mut capturer = AudioCapturer::new()?;
        capturer.start(output)?;

        debug!(
            sample_rate = capturer.sample_rate(),
            channels = capturer.channels(),
            "Recorder acquired"
        );

        Ok(capturer)
    }

    #[instrument(skip(self))]
    fn start_player(&mut self, input: &Path) -> CoreResult<AudioPlayer> {
        ensure_recording_exists(input)?;

        let mut player = AudioPlayer::new()?;
        player.start(input)?;

        debug!("Player acquired");

        Ok(player)
    }
}
