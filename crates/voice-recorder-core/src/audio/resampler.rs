use crate::{CoreResult, RecorderError};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler as RubatoResampler};
use tracing::{debug, instrument};

const CHUNK_SIZE: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Mono sample-rate converter used to match a recording to the output
/// device before playback.
pub(crate) struct Resampler {
    resampler: Fft<f32>,
    input_rate: u32,
    output_rate: u32,
    input_chunk: Vec<f32>,
    output_chunk: Vec<f32>,
}

impl Resampler {
    #[track_caller]
    #[instrument]
    pub(crate) fn new(input_rate: u32, output_rate: u32) -> CoreResult<Self> {
        let resampler = Fft::<f32>::new(
            input_rate as usize,
            output_rate as usize,
            CHUNK_SIZE,
            SUB_CHUNKS,
            1,
            FixedSync::Input,
        )
        .map_err(|e| RecorderError::ResamplingError {
            reason: format!("Failed to create resampler: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let output_frames = resampler.output_frames_max();

        debug!(input_rate, output_rate, "Resampler initialized");

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
            input_chunk: vec![0.0; CHUNK_SIZE],
            output_chunk: vec![0.0; output_frames],
        })
    }

    /// Convert a whole mono signal.
    ///
    /// The final partial chunk is zero-padded and zero chunks are fed until
    /// the tail has left the filter. The leading filter delay is dropped so
    /// the output lines up with the input and ends with its last samples.
    #[track_caller]
    #[instrument(skip(self, samples))]
    pub(crate) fn resample(&mut self, samples: &[f32]) -> CoreResult<Vec<f32>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let expected_len = (samples.len() as u64 * u64::from(self.output_rate)
            / u64::from(self.input_rate)) as usize;
        let delay = self.resampler.output_delay();
        let mut output = Vec::with_capacity(delay + expected_len + self.output_chunk.len());

        for chunk in samples.chunks(CHUNK_SIZE) {
            self.process_chunk(chunk, &mut output)?;
        }

        while output.len() < delay + expected_len {
            if self.process_chunk(&[], &mut output)? == 0 {
                break;
            }
        }

        output.drain(..delay.min(output.len()));
        output.truncate(expected_len);

        debug!(
            input_len = samples.len(),
            output_len = output.len(),
            delay,
            input_rate = self.input_rate,
            output_rate = self.output_rate,
            "Resampled recording"
        );

        Ok(output)
    }

    /// Run one zero-padded chunk through the resampler, appending to `output`.
    #[track_caller]
    fn process_chunk(&mut self, chunk: &[f32], output: &mut Vec<f32>) -> CoreResult<usize> {
        self.input_chunk[..chunk.len()].copy_from_slice(chunk);
        self.input_chunk[chunk.len()..].fill(0.0);

        let input_adapter = InterleavedSlice::new(&self.input_chunk, 1, CHUNK_SIZE).map_err(
            |e| RecorderError::ResamplingError {
                reason: format!("Failed to create input adapter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            },
        )?;

        let output_frames = self.output_chunk.len();
        let mut output_adapter =
            InterleavedSlice::new_mut(&mut self.output_chunk, 1, output_frames).map_err(|e| {
                RecorderError::ResamplingError {
                    reason: format!("Failed to create output adapter: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        let (_, written) = self
            .resampler
            .process_into_buffer(&input_adapter, &mut output_adapter, None)
            .map_err(|e| RecorderError::ResamplingError {
                reason: format!("Resampling failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        output.extend_from_slice(&self.output_chunk[..written]);

        Ok(written)
    }
}
