use crate::audio::playback::{downmix_to_mono, render_frames};

use std::sync::atomic::{AtomicUsize, Ordering};

/// WHAT: Stereo frames average down to one channel
/// WHY: The player renders a mono signal to every output channel
#[test]
fn given_stereo_frames_when_downmixing_then_channels_averaged() {
    // Given: Two stereo frames
    let stereo = [1.0f32, 0.0, 0.5, -0.5];

    // When: Downmixing
    let mono = downmix_to_mono(&stereo, 2);

    // Then: One sample per frame
    assert_eq!(mono, vec![0.5, 0.0]);
}

/// WHAT: Mono input passes through untouched
/// WHY: Microphone recordings are usually mono already
#[test]
fn given_mono_samples_when_downmixing_then_unchanged() {
    // Given/When/Then: Mono is copied as-is
    assert_eq!(downmix_to_mono(&[0.1, 0.2, 0.3], 1), vec![0.1, 0.2, 0.3]);
}

/// WHAT: Each mono sample is written to every output channel
/// WHY: Stereo devices must hear the recording on both sides
#[test]
fn given_stereo_output_when_rendering_then_sample_fanned_out_and_cursor_advanced() {
    // Given: A three-sample signal and a stereo buffer for two frames
    let signal = [0.1f32, 0.2, 0.3];
    let cursor = AtomicUsize::new(0);
    let mut data = [9.0f32; 4];

    // When: Rendering
    render_frames(&mut data, 2, &signal, &cursor, false);

    // Then: Frames duplicated and cursor at the third sample
    assert_eq!(data, [0.1, 0.1, 0.2, 0.2]);
    assert_eq!(cursor.load(Ordering::Acquire), 2);
}

/// WHAT: Frames past the end of the signal are silent
/// WHY: Finished playback must not replay stale buffer contents
#[test]
fn given_signal_exhausted_when_rendering_then_silence_and_cursor_clamped() {
    // Given: One sample left
    let signal = [0.1f32, 0.2, 0.3];
    let cursor = AtomicUsize::new(2);
    let mut data = [9.0f32; 3];

    // When: Rendering three mono frames
    render_frames(&mut data, 1, &signal, &cursor, false);

    // Then: Last sample then silence, cursor parked at the end
    assert_eq!(data, [0.3, 0.0, 0.0]);
    assert_eq!(cursor.load(Ordering::Acquire), signal.len());
}

/// WHAT: Paused playback writes silence without moving
/// WHY: Pause must hold the position
#[test]
fn given_paused_when_rendering_then_silence_and_cursor_unchanged() {
    // Given: A paused player mid-signal
    let signal = [0.1f32, 0.2, 0.3];
    let cursor = AtomicUsize::new(1);
    let mut data = [9.0f32; 4];

    // When: Rendering while paused
    render_frames(&mut data, 2, &signal, &cursor, true);

    // Then: Silence and same position
    assert!(data.iter().all(|&s| s == 0.0));
    assert_eq!(cursor.load(Ordering::Acquire), 1);
}
