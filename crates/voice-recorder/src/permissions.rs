//! Desktop stand-in for the OS permission prompt.
//!
//! Desktop platforms grant microphone and file access implicitly or through
//! their own prompts, so a request here probes both capabilities on a
//! background thread and posts the answer back to the event loop.

use crate::AppEvent;

use std::{
    path::{Path, PathBuf},
    thread,
};

use tao::event_loop::EventLoopProxy;
use tracing::{debug, info, instrument, warn};
use voice_recorder_core::{
    Capability, PermissionGate, PermissionResult, probe_microphone, probe_storage,
};

/// Where a finished probe is delivered.
pub trait PermissionSink: Clone + Send + 'static {
    /// Hand the result to the UI thread.
    fn deliver(&self, result: PermissionResult);
}

/// Delivers probe results as [`AppEvent::Permission`].
#[derive(Clone)]
pub struct ProxySink(pub EventLoopProxy<AppEvent>);

impl PermissionSink for ProxySink {
    fn deliver(&self, result: PermissionResult) {
        if let Err(e) = self.0.send_event(AppEvent::Permission(result)) {
            warn!(error = ?e, "Event loop closed, permission result dropped");
        }
    }
}

/// Permission gate that caches the last probe result.
pub struct DesktopPermissionGate<S: PermissionSink> {
    grants: PermissionResult,
    recording_dir: PathBuf,
    sink: S,
    pending: bool,
}

impl<S: PermissionSink> DesktopPermissionGate<S> {
    /// Create a gate with nothing granted yet.
    pub fn new(recording_dir: impl Into<PathBuf>, sink: S) -> Self {
        Self {
            grants: PermissionResult::denied(),
            recording_dir: recording_dir.into(),
            sink,
            pending: false,
        }
    }
}

impl<S: PermissionSink> PermissionGate for DesktopPermissionGate<S> {
    fn is_granted(&self, capability: Capability) -> bool {
        self.grants.is_granted(capability)
    }

    #[instrument(skip(self))]
    fn request(&mut self, capabilities: &[Capability]) {
        if self.pending {
            debug!("Permission request already in flight");
            return;
        }
        self.pending = true;

        let dir = self.recording_dir.clone();
        let sink = self.sink.clone();

        info!(?capabilities, "Probing recording capabilities");
        thread::spawn(move || sink.deliver(probe_capabilities(&dir)));
    }

    fn on_result(&mut self, result: &PermissionResult) {
        self.grants = *result;
        self.pending = false;
    }
}

/// Probe the microphone and the recording directory.
pub(crate) fn probe_capabilities(recording_dir: &Path) -> PermissionResult {
    let microphone = probe_microphone()
        .inspect_err(|e| warn!(error = ?e, "Microphone unavailable"))
        .is_ok();
    let storage = probe_storage(recording_dir)
        .inspect_err(|e| warn!(error = ?e, "Recording directory not writable"))
        .is_ok();

    PermissionResult {
        microphone,
        storage,
    }
}
