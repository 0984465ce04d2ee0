use crate::{DeviceMediaServices, MediaServices, PlaybackSession, RecorderError, RecordingSession};

use std::{thread::sleep, time::Duration};

/// WHAT: Playing a path with no recording fails preparation before any device is opened
/// WHY: A missing file must be reported as such, even on a host with no output device
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_starting_player_then_recording_not_found() {
    // Given: An empty directory
    let dir = tempfile::tempdir().unwrap();
    let mut services = DeviceMediaServices::new();

    // When: Starting a player on a file that does not exist
    let result = services.start_player(&dir.path().join("Record.wav"));

    // Then: RecordingNotFound
    assert!(matches!(
        result,
        Err(RecorderError::RecordingNotFound { .. })
    ));
}

/// WHAT: Record, pause, stop, then play the same file on real devices
/// WHY: End-to-end check of the cpal + hound services
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_devices_when_recording_then_playing_then_file_round_trips() {
    // Given: Device services and a scratch directory
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Record.wav");
    let mut services = DeviceMediaServices::new();

    // When: Recording half a second, pausing, stopping
    let mut recorder = services.start_recorder(&path).unwrap();
    sleep(Duration::from_millis(500));
    RecordingSession::pause(&mut recorder).unwrap();
    recorder.stop().unwrap();

    // Then: A readable WAV file exists and plays
    assert!(hound::WavReader::open(&path).is_ok());
    let mut player = services.start_player(&path).unwrap();
    sleep(Duration::from_millis(200));
    PlaybackSession::pause(&mut player).unwrap();
    player.stop().unwrap();
}
