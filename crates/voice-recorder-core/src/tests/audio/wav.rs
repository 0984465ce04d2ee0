use crate::{
    RecorderError,
    audio::wav::{
        PendingWav, RECORDING_BITS_PER_SAMPLE, part_path, read_wav, recording_spec, to_pcm16,
    },
};

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

const SAMPLE_RATE: u32 = 44_100;
const PCM_TOLERANCE: f32 = 1.0 / 16_384.0;

/// WHAT: Out-of-range samples are clamped before conversion
/// WHY: Hot microphone input must not wrap around into noise
#[test]
fn given_out_of_range_samples_when_converting_then_clamped_to_pcm_limits() {
    // Given/When/Then: Extremes and zero map to PCM limits
    assert_eq!(to_pcm16(2.0), i16::MAX);
    assert_eq!(to_pcm16(-2.0), -i16::MAX);
    assert_eq!(to_pcm16(0.0), 0);
}

/// WHAT: Recordings are written as 16-bit integer PCM at device format
/// WHY: Playback and external players expect a plain PCM container
#[test]
fn given_device_format_when_building_spec_then_16_bit_int_pcm() {
    // Given/When: Spec for a stereo 48kHz device
    let spec = recording_spec(48_000, 2);

    // Then: Device rate and channels with 16-bit integer samples
    assert_eq!(spec.sample_rate, 48_000);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.bits_per_sample, RECORDING_BITS_PER_SAMPLE);
    assert_eq!(spec.sample_format, SampleFormat::Int);
}

/// WHAT: A file written the way the recorder writes reads back normalised
/// WHY: The player must decode exactly what the recorder produced
#[test]
#[allow(clippy::unwrap_used)]
fn given_recorded_pcm16_file_when_reading_then_samples_normalised() {
    // Given: A 16-bit file written with the recorder's spec
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Record.wav");
    let input = [0.0f32, 0.5, -0.5, 0.25];
    let mut writer = WavWriter::create(&path, recording_spec(SAMPLE_RATE, 1)).unwrap();
    for &sample in &input {
        writer.write_sample(to_pcm16(sample)).unwrap();
    }
    writer.finalize().unwrap();

    // When: Reading it back
    let audio = read_wav(&path).unwrap();

    // Then: Same format and samples within PCM quantisation error
    assert_eq!(audio.sample_rate, SAMPLE_RATE);
    assert_eq!(audio.channels, 1);
    assert_eq!(audio.samples.len(), input.len());
    for (read, written) in audio.samples.iter().zip(input) {
        assert!((read - written).abs() < PCM_TOLERANCE, "{read} vs {written}");
    }
}

/// WHAT: 32-bit float files are read as-is
/// WHY: Recordings copied in from other tools may be float WAV
#[test]
#[allow(clippy::unwrap_used)]
fn given_float_file_when_reading_then_samples_unchanged() {
    // Given: A stereo float file
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("float.wav");
    let spec = WavSpec {
        channels: 2,
        sample_rate: 48_000,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for sample in [0.1f32, -0.1, 0.7, -0.7] {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();

    // When: Reading it back
    let audio = read_wav(&path).unwrap();

    // Then: Interleaved samples preserved exactly
    assert_eq!(audio.channels, 2);
    assert_eq!(audio.samples, vec![0.1, -0.1, 0.7, -0.7]);
}

/// WHAT: A file that is not WAV is rejected with a container error
/// WHY: A corrupted recording must fail preparation, not crash playback
#[test]
#[allow(clippy::unwrap_used)]
fn given_garbage_file_when_reading_then_wav_error() {
    // Given: A file containing text
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Record.wav");
    std::fs::write(&path, b"not a riff file").unwrap();

    // When: Reading it
    let result = read_wav(&path);

    // Then: WavError
    assert!(matches!(result, Err(RecorderError::WavError { .. })));
}

#[allow(clippy::unwrap_used)]
fn record(output: &Path, samples: &[f32]) -> PendingWav {
    let mut wav = PendingWav::create(output, recording_spec(SAMPLE_RATE, 1)).unwrap();
    for &sample in samples {
        wav.write_sample(to_pcm16(sample)).unwrap();
    }
    wav
}

/// WHAT: A committed recording replaces the output and leaves no part file
/// WHY: Playback reads the output path once the session is stopped
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_recording_when_committed_then_output_replaced() {
    // Given: An earlier recording and a new one in progress
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Record.wav");
    record(&output, &[0.5; 4]).commit().unwrap();
    let pending = record(&output, &[-0.25; 8]);

    // When: Committing the new one
    assert_eq!(pending.len(), 8);
    pending.commit().unwrap();

    // Then: The output holds the new samples, no part file remains
    let audio = read_wav(&output).unwrap();
    assert_eq!(audio.samples.len(), 8);
    assert!((audio.samples[0] + 0.25).abs() < PCM_TOLERANCE);
    assert!(!part_path(&output).exists());
}

/// WHAT: A recording that never finishes leaves the previous one intact
/// WHY: A failed start must not wipe the file that Play will read
#[test]
#[allow(clippy::unwrap_used)]
fn given_previous_recording_when_new_one_discarded_then_previous_still_plays() {
    // Given: A finished recording
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Record.wav");
    record(&output, &[0.5; 4]).commit().unwrap();

    // When: A second recording is started, written to, then abandoned
    let pending = record(&output, &[-0.25; 16]);
    let untouched_while_recording = read_wav(&output).unwrap();
    pending.discard();

    // Then: The first recording is unchanged throughout and no part file remains
    for audio in [untouched_while_recording, read_wav(&output).unwrap()] {
        assert_eq!(audio.samples.len(), 4);
        assert!((audio.samples[0] - 0.5).abs() < PCM_TOLERANCE);
    }
    assert!(!part_path(&output).exists());
}

/// WHAT: The part file sits next to the output with a suffix
/// WHY: Rename over the output must stay on one filesystem
#[test]
fn given_output_when_deriving_part_path_then_sibling_with_suffix() {
    // Given/When/Then: Same directory, suffixed name
    assert_eq!(
        part_path(Path::new("/cache/Record.wav")),
        Path::new("/cache/Record.wav.part")
    );
}
