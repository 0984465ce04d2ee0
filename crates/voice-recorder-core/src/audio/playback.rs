use crate::{
    CoreResult, PlaybackSession, RecorderError,
    audio::{Resampler, wav::read_wav},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// WAV playback on the default output device.
///
/// The whole recording is decoded up front into a mono signal at the
/// device rate. The output callback fans each sample out to every device
/// channel and advances a shared cursor; while paused it writes silence
/// and leaves the cursor alone.
pub struct AudioPlayer {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    signal: Arc<Vec<f32>>,
    cursor: Arc<AtomicUsize>,
    paused: Arc<AtomicBool>,
    input: PathBuf,
    session_id: Uuid,
}

impl AudioPlayer {
    /// Open the default output device.
    #[track_caller]
    #[instrument]
    pub fn new() -> CoreResult<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(RecorderError::NoOutputDevice {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = device
            .default_output_config()
            .map_err(|e| RecorderError::DeviceError {
                reason: format!("Failed to get output config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "AudioPlayer initialized"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            signal: Arc::new(Vec::new()),
            cursor: Arc::new(AtomicUsize::new(0)),
            paused: Arc::new(AtomicBool::new(false)),
            input: PathBuf::new(),
            session_id: Uuid::new_v4(),
        })
    }

    /// Decode `input` and start playing it from the beginning.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn start(&mut self, input: &Path) -> CoreResult<()> {
        ensure_recording_exists(input)?;

        let wav = read_wav(input)?;
        let mono = downmix_to_mono(&wav.samples, wav.channels);

        let signal = if wav.sample_rate == self.config.sample_rate {
            mono
        } else {
            Resampler::new(wav.sample_rate, self.config.sample_rate)?.resample(&mono)?
        };

        debug!(
            frames = signal.len(),
            file_rate = wav.sample_rate,
            device_rate = self.config.sample_rate,
            "Playback signal prepared"
        );

        self.signal = Arc::new(signal);
        self.cursor.store(0, Ordering::Release);
        self.paused.store(false, Ordering::Release);

        let channels = usize::from(self.config.channels);
        let signal = Arc::clone(&self.signal);
        let cursor = Arc::clone(&self.cursor);
        let paused = Arc::clone(&self.paused);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    render_frames(
                        data,
                        channels,
                        &signal,
                        &cursor,
                        paused.load(Ordering::Acquire),
                    );
                },
                |err| {
                    error!("Audio output stream error: {}", err);
                },
                None,
            )
            .map_err(|e| RecorderError::DeviceError {
                reason: format!("Failed to build output stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| RecorderError::DeviceError {
            reason: format!("Failed to start output stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        self.input = input.to_path_buf();

        info!(input = ?input, "Playback started");

        Ok(())
    }

    /// Hold the current position and output silence.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn pause(&mut self) {
        self.paused.store(true, Ordering::Release);
        info!(
            position = self.cursor.load(Ordering::Acquire),
            "Playback paused"
        );
    }

    /// Stop playback and release the output stream.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn finish(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!(input = ?self.input, "Playback stopped");
        }
    }
}

impl PlaybackSession for AudioPlayer {
    fn pause(&mut self) -> CoreResult<()> {
        AudioPlayer::pause(self);
        Ok(())
    }

    fn stop(mut self) -> CoreResult<()> {
        self.finish();
        Ok(())
    }
}

/// Fail with [`RecorderError::RecordingNotFound`] unless `input` is a file.
#[track_caller]
pub(crate) fn ensure_recording_exists(input: &Path) -> CoreResult<()> {
    if !input.is_file() {
        return Err(RecorderError::RecordingNotFound {
            path: input.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

/// Average interleaved frames down to a single channel.
pub(crate) fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = usize::from(channels.max(1));
    if channels == 1 {
        return samples.to_vec();
    }

    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Fill one output buffer from `signal` starting at `cursor`.
///
/// Frames past the end of the signal are silent. The cursor only moves
/// when not paused and never passes the end of the signal.
pub(crate) fn render_frames(
    data: &mut [f32],
    channels: usize,
    signal: &[f32],
    cursor: &AtomicUsize,
    paused: bool,
) {
    if paused || channels == 0 {
        data.fill(0.0);
        return;
    }

    let start = cursor.load(Ordering::Acquire);
    let mut frames = 0;

    for (offset, frame) in data.chunks_mut(channels).enumerate() {
        frame.fill(signal.get(start + offset).copied().unwrap_or(0.0));
        frames += 1;
    }

    cursor.store((start + frames).min(signal.len()), Ordering::Release);
}
