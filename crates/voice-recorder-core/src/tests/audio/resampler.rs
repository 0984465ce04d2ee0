use crate::audio::Resampler;

const RECORDING_RATE: u32 = 16_000;
const DEVICE_RATE: u32 = 48_000;
const ONE_SECOND_RECORDING: usize = RECORDING_RATE as usize;
const ONE_SECOND_DEVICE: usize = DEVICE_RATE as usize;
const ALIGNMENT_TOLERANCE: usize = 32;
const TONE_AMPLITUDE: f32 = 0.5;
const MAX_AMPLITUDE: f32 = 1.5;

/// WHAT: A low-rate recording is upsampled to the device rate
/// WHY: Playing 16kHz audio on a 48kHz device at native rate would be 3x fast
#[test]
#[allow(clippy::unwrap_used)]
fn given_16khz_recording_when_resampling_to_48khz_then_duration_preserved() {
    // Given: One second at 16kHz
    let mut resampler = Resampler::new(RECORDING_RATE, DEVICE_RATE).unwrap();
    let input = vec![TONE_AMPLITUDE; ONE_SECOND_RECORDING];

    // When: Resampling
    let output = resampler.resample(&input).unwrap();

    // Then: Exactly one second at 48kHz, all finite
    assert_eq!(output.len(), ONE_SECOND_DEVICE);
    assert!(output.iter().all(|&s| s.is_finite()));
}

/// WHAT: Empty input gives empty output
/// WHY: A recording stopped immediately has no frames
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_recording_when_resampling_then_empty_output() {
    // Given: Resampler and empty input
    let mut resampler = Resampler::new(DEVICE_RATE, RECORDING_RATE).unwrap();

    // When: Resampling nothing
    let output = resampler.resample(&[]).unwrap();

    // Then: Nothing
    assert!(output.is_empty());
}

/// WHAT: Downsampling a tone stays bounded and sized
/// WHY: Recordings made at 48kHz played on a 16kHz headset must not clip
#[test]
#[allow(clippy::unwrap_used)]
fn given_tone_when_downsampling_then_output_bounded() {
    // Given: A 0.1s tone at 48kHz, not a multiple of the chunk size
    let mut resampler = Resampler::new(DEVICE_RATE, RECORDING_RATE).unwrap();
    let input: Vec<f32> = (0..4_800).map(|i| (i as f32 * 0.1).sin()).collect();

    // When: Resampling
    let output = resampler.resample(&input).unwrap();

    // Then: A third of the length, samples bounded
    assert_eq!(output.len(), 1_600);
    assert!(
        output
            .iter()
            .all(|&s| s.is_finite() && s.abs() <= MAX_AMPLITUDE)
    );
}

/// WHAT: A step late in the recording lands at the same time after resampling
/// WHY: Filter delay left at the front would shift playback and cut off the ending
#[test]
#[allow(clippy::unwrap_used)]
fn given_step_near_end_when_upsampling_then_step_aligned_and_tail_kept() {
    // Given: One second of silence with a tone level in the last eighth
    let mut resampler = Resampler::new(RECORDING_RATE, DEVICE_RATE).unwrap();
    let step_at = ONE_SECOND_RECORDING - ONE_SECOND_RECORDING / 8;
    let input: Vec<f32> = (0..ONE_SECOND_RECORDING)
        .map(|i| if i < step_at { 0.0 } else { TONE_AMPLITUDE })
        .collect();

    // When: Resampling to the device rate
    let output = resampler.resample(&input).unwrap();

    // Then: The step crosses half level where it should, and the level holds near the end
    let expected_step = step_at * (DEVICE_RATE / RECORDING_RATE) as usize;
    let crossing = output.iter().position(|&s| s > TONE_AMPLITUDE / 2.0).unwrap();
    assert!(
        crossing.abs_diff(expected_step) <= ALIGNMENT_TOLERANCE,
        "Step expected near {}, found at {}",
        expected_step,
        crossing
    );
    let near_end = output[output.len() - 2_000];
    assert!(
        (near_end - TONE_AMPLITUDE).abs() < 0.05,
        "Tail level {} lost",
        near_end
    );
}
