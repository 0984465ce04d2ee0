use crate::{Capability, CoreResult, RecorderError};

use std::{fs, io::Write, panic::Location, path::Path};

use cpal::traits::{DeviceTrait, HostTrait};
use error_location::ErrorLocation;
use tracing::{debug, instrument};

const PROBE_FILE_NAME: &str = ".write-probe";

/// Check that a default input device exists and reports a usable config.
#[track_caller]
#[instrument]
pub fn probe_microphone() -> CoreResult<()> {
    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .ok_or(RecorderError::PermissionDenied {
            capability: Capability::MicrophoneCapture,
            location: ErrorLocation::from(Location::caller()),
        })?;

    device
        .default_input_config()
        .map_err(|e| RecorderError::DeviceError {
            reason: format!("Microphone refused config query: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    debug!("Microphone probe passed");

    Ok(())
}

/// Check that `dir` can be created and written to.
///
/// Writes and removes a small probe file.
#[track_caller]
#[instrument]
pub fn probe_storage(dir: &Path) -> CoreResult<()> {
    let denied = |_| RecorderError::PermissionDenied {
        capability: Capability::StorageWrite,
        location: ErrorLocation::from(Location::caller()),
    };

    fs::create_dir_all(dir).map_err(denied)?;

    let probe_path = dir.join(PROBE_FILE_NAME);
    let mut probe = fs::File::create(&probe_path).map_err(denied)?;
    probe.write_all(b"probe").map_err(denied)?;
    drop(probe);
    fs::remove_file(&probe_path).map_err(denied)?;

    debug!(dir = ?dir, "Storage probe passed");

    Ok(())
}
