use crate::{
    CoreResult, RecorderError, RecordingSession,
    audio::wav::{PendingWav, recording_spec, to_pcm16},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

type SharedWriter = Arc<Mutex<Option<PendingWav>>>;

/// Time given to an in-flight callback to observe the shutdown flag after
/// the stream is dropped.
const CALLBACK_DRAIN: Duration = Duration::from_millis(5);

/// Microphone capture into a WAV file.
///
/// The audio callback runs on a cpal thread and shares only the writer and
/// two flags with this struct. `pause` makes the callback discard input;
/// `stop` drops the stream, finalises the WAV header and moves the file
/// over the previous recording.
pub struct AudioCapturer {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    writer: SharedWriter,
    paused: Arc<AtomicBool>,
    /// Set before the stream is dropped so a late callback never writes
    /// after the writer has been taken.
    shutdown: Arc<AtomicBool>,
    output: PathBuf,
    session_id: Uuid,
}

impl AudioCapturer {
    /// Open the default input device.
    #[track_caller]
    #[instrument]
    pub fn new() -> CoreResult<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or(RecorderError::NoMicrophoneFound {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = device
            .default_input_config()
            .map_err(|e| RecorderError::DeviceError {
                reason: format!("Failed to get input config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "AudioCapturer initialized"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            writer: Arc::new(Mutex::new(None)),
            paused: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
            output: PathBuf::new(),
            session_id: Uuid::new_v4(),
        })
    }

    /// Start capturing into a part file next to `output`.
    ///
    /// The previous recording at `output` is only replaced when the session
    /// is finished, so a start that fails leaves it playable.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn start(&mut self, output: &Path) -> CoreResult<()> {
        self.shutdown.store(false, Ordering::Release);
        self.paused.store(false, Ordering::Release);

        let writer = Arc::clone(&self.writer);
        let paused = Arc::clone(&self.paused);
        let shutdown = Arc::clone(&self.shutdown);
        let write_failed = Arc::new(AtomicBool::new(false));

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if shutdown.load(Ordering::Acquire) || paused.load(Ordering::Acquire) {
                        return;
                    }
                    // A poisoned lock still guards a usable writer.
                    let mut guard = writer.lock().unwrap_or_else(|e| {
                        error!("WAV writer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    let Some(wav) = guard.as_mut() else {
                        return;
                    };
                    for &sample in data {
                        if let Err(e) = wav.write_sample(to_pcm16(sample)) {
                            if !write_failed.swap(true, Ordering::AcqRel) {
                                error!("Failed to write captured audio: {}", e);
                            }
                            break;
                        }
                    }
                },
                |err| {
                    error!("Audio input stream error: {}", err);
                },
                None,
            )
            .map_err(|e| RecorderError::DeviceError {
                reason: format!("Failed to build input stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let spec = recording_spec(self.config.sample_rate, self.config.channels);
        let wav = PendingWav::create(output, spec)?;
        *self.lock_writer()? = Some(wav);

        if let Err(e) = stream.play() {
            drop(stream);
            if let Some(wav) = self.lock_writer()?.take() {
                wav.discard();
            }
            return Err(RecorderError::DeviceError {
                reason: format!("Failed to start input stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.stream = Some(stream);
        self.output = output.to_path_buf();

        info!(output = ?output, "Audio capture started");

        Ok(())
    }

    /// Discard input until the session is stopped.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn pause(&mut self) {
        self.paused.store(true, Ordering::Release);
        info!("Audio capture paused");
    }

    /// Stop capture and replace the output with the finished recording.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn finish(&mut self) -> CoreResult<()> {
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            std::thread::sleep(CALLBACK_DRAIN);
        }

        let wav = self.lock_writer()?.take();

        let Some(wav) = wav else {
            warn!("Capture stopped without an open output");
            return Ok(());
        };

        let sample_count = wav.len();
        wav.commit()?;

        let frames = u64::from(sample_count) / u64::from(self.config.channels.max(1));
        debug!(
            frames,
            duration_ms = frames * 1000 / u64::from(self.config.sample_rate.max(1)),
            "Recording finalized"
        );
        info!(output = ?self.output, "Audio capture stopped");

        Ok(())
    }

    #[track_caller]
    fn lock_writer(&self) -> CoreResult<MutexGuard<'_, Option<PendingWav>>> {
        self.writer.lock().map_err(|e| RecorderError::DeviceError {
            reason: format!("Failed to lock writer: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Native sample rate of the input device.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Native channel count of the input device.
    pub fn channels(&self) -> u16 {
        self.config.channels
    }
}

impl RecordingSession for AudioCapturer {
    fn pause(&mut self) -> CoreResult<()> {
        AudioCapturer::pause(self);
        Ok(())
    }

    fn stop(mut self) -> CoreResult<()> {
        self.finish()
    }
}

impl Drop for AudioCapturer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        drop(self.stream.take());

        let pending = self
            .writer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(wav) = pending {
            warn!(output = ?self.output, "Capture dropped before stop, discarding");
            wav.discard();
        }
    }
}
