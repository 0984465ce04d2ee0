use crate::{CoreResult, RecorderError};

use std::{
    fs::{self, File},
    io::BufWriter,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{debug, instrument, warn};

/// Suffix of the file a recording is written to until it is committed.
const PART_SUFFIX: &str = ".part";

/// Bit depth of recorded files.
pub(crate) const RECORDING_BITS_PER_SAMPLE: u16 = 16;

/// Container spec for a recording at the device's native format.
pub(crate) fn recording_spec(sample_rate: u32, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: RECORDING_BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Convert a normalised sample to 16-bit PCM, clamping out-of-range input.
pub(crate) fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Path a pending recording for `output` is written to.
pub(crate) fn part_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    output.with_file_name(name)
}

/// A recording being written next to its final location.
///
/// The previous file at `output` stays intact until [`commit`](Self::commit)
/// renames the finished recording over it.
pub(crate) struct PendingWav {
    writer: WavWriter<BufWriter<File>>,
    part: PathBuf,
    output: PathBuf,
}

impl PendingWav {
    /// Create the part file for `output`.
    #[track_caller]
    pub(crate) fn create(output: &Path, spec: WavSpec) -> CoreResult<Self> {
        let part = part_path(output);

        let writer = WavWriter::create(&part, spec).map_err(|e| RecorderError::WavError {
            reason: format!("Failed to create {:?}: {}", part, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            writer,
            part,
            output: output.to_path_buf(),
        })
    }

    pub(crate) fn write_sample(&mut self, sample: i16) -> hound::Result<()> {
        self.writer.write_sample(sample)
    }

    /// Samples written so far, across all channels.
    pub(crate) fn len(&self) -> u32 {
        self.writer.len()
    }

    /// Finalise the header and replace `output` with this recording.
    #[track_caller]
    pub(crate) fn commit(self) -> CoreResult<()> {
        self.writer.finalize().map_err(|e| RecorderError::WavError {
            reason: format!("Failed to finalize {:?}: {}", self.part, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&self.part, &self.output).map_err(|e| RecorderError::WavError {
            reason: format!("Failed to move recording to {:?}: {}", self.output, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Drop the recording, leaving `output` untouched.
    pub(crate) fn discard(self) {
        let part = self.part;
        if let Err(e) = self.writer.finalize() {
            debug!(error = %e, "Discarded recording did not finalize");
        }
        if let Err(e) = fs::remove_file(&part) {
            warn!(error = %e, part = ?part, "Failed to remove discarded recording");
        }
    }
}

/// Decoded contents of a WAV file, interleaved and normalised to `[-1, 1]`.
#[derive(Debug, Clone)]
pub(crate) struct WavAudio {
    pub(crate) samples: Vec<f32>,
    pub(crate) sample_rate: u32,
    pub(crate) channels: u16,
}

/// Read an entire WAV file into memory.
#[track_caller]
#[instrument]
pub(crate) fn read_wav(path: &Path) -> CoreResult<WavAudio> {
    let mut reader = WavReader::open(path).map_err(|e| RecorderError::WavError {
        reason: format!("Failed to open {:?}: {}", path, e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let spec = reader.spec();

    let read_error = |e: hound::Error| RecorderError::WavError {
        reason: format!("Failed to read sample: {}", e),
        location: ErrorLocation::from(Location::caller()),
    };

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(read_error)?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| f32::from(v) / f32::from(i16::MAX)))
            .collect::<Result<_, _>>()
            .map_err(read_error)?,
        (SampleFormat::Int, bits @ (24 | 32)) => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(read_error)?
        }
        (format, bits) => {
            return Err(RecorderError::WavError {
                reason: format!("Unsupported sample format: {:?} at {} bits", format, bits),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    debug!(
        sample_count = samples.len(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        "WAV file decoded"
    );

    Ok(WavAudio {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}
