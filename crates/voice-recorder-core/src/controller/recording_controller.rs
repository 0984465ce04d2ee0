//! Record / pause / stop / play state machine.
//!
//! The live service handle is stored inside the session variant, so a
//! recorder only exists in the recording modes and a player only exists in
//! the playback modes. Every operation takes the session out, decides the
//! next one, and puts it back.

use crate::{
    Action, MediaServices, Notice, Outcome, PermissionGate, PermissionResult, PlaybackSession,
    RECORDING_CAPABILITIES, RecordingSession, SessionMode, Status,
};

use std::{
    mem,
    path::{Path, PathBuf},
};

use tracing::{debug, error, info, instrument, warn};

enum Session<R, P> {
    Idle,
    Recording(R),
    RecordingPaused(R),
    Playing(P),
    PlaybackPaused(P),
}

impl<R, P> Session<R, P> {
    fn mode(&self) -> SessionMode {
        match self {
            Session::Idle => SessionMode::Idle,
            Session::Recording(_) => SessionMode::Recording,
            Session::RecordingPaused(_) => SessionMode::RecordingPaused,
            Session::Playing(_) => SessionMode::Playing,
            Session::PlaybackPaused(_) => SessionMode::PlaybackPaused,
        }
    }
}

/// Finite-state controller owning at most one recorder or one player.
///
/// All methods run on the UI thread. Failures are logged and absorbed;
/// callers learn what happened from the returned [`Outcome`] and from
/// [`status`](Self::status).
pub struct RecordingController<M: MediaServices, G: PermissionGate> {
    services: M,
    permissions: G,
    session: Session<M::Recorder, M::Player>,
    status: Status,
    capture_path: PathBuf,
    /// Last successfully started recording. Overwritten by each new one.
    output: Option<PathBuf>,
}

impl<M: MediaServices, G: PermissionGate> RecordingController<M, G> {
    /// Create an idle controller that records into `capture_path`.
    pub fn new(services: M, permissions: G, capture_path: impl Into<PathBuf>) -> Self {
        Self {
            services,
            permissions,
            session: Session::Idle,
            status: Status::Ready,
            capture_path: capture_path.into(),
            output: None,
        }
    }

    /// Route a UI action to the matching operation.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::Start => self.start(),
            Action::Pause => self.pause(),
            Action::Stop => self.stop(),
            Action::Play => self.play(),
        }
    }

    /// Begin recording into the capture path.
    ///
    /// Only applies from Idle. Missing capabilities are requested and the
    /// controller stays Idle; the user starts again once granted.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn start(&mut self) -> Outcome {
        let from = self.mode();
        if from != SessionMode::Idle {
            debug!("Start ignored, session already live");
            return Outcome::Ignored { mode: from };
        }

        if !self.capabilities_granted() {
            info!("Recording capabilities missing, requesting");
            self.permissions.request(&RECORDING_CAPABILITIES);
            return Outcome::PermissionRequested;
        }

        match self.services.start_recorder(&self.capture_path) {
            Ok(recorder) => {
                self.session = Session::Recording(recorder);
                self.output = Some(self.capture_path.clone());
                self.status = Status::RecordingInProgress;
                self.transitioned(from)
            }
            Err(e) => {
                error!(error = ?e, path = ?self.capture_path, "Failed to prepare recorder");
                Outcome::Failed { mode: from }
            }
        }
    }

    /// Pause the running recording or playback.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn pause(&mut self) -> Outcome {
        let from = self.mode();

        match self.take_session() {
            Session::Recording(mut recorder) => {
                if let Err(e) = recorder.pause() {
                    error!(error = ?e, "Failed to pause recorder");
                    self.session = Session::Recording(recorder);
                    return Outcome::Failed { mode: from };
                }
                self.session = Session::RecordingPaused(recorder);
                self.status = Status::RecordingPaused;
            }
            Session::Playing(mut player) => {
                if let Err(e) = player.pause() {
                    error!(error = ?e, "Failed to pause player");
                    self.session = Session::Playing(player);
                    return Outcome::Failed { mode: from };
                }
                self.session = Session::PlaybackPaused(player);
                self.status = Status::PlaybackPaused;
            }
            other => {
                self.session = other;
                debug!("Pause ignored, nothing running");
                return Outcome::Ignored { mode: from };
            }
        }

        self.transitioned(from)
    }

    /// Stop and release whichever service is held. No-op from Idle.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn stop(&mut self) -> Outcome {
        let from = self.mode();

        match self.take_session() {
            Session::Recording(recorder) | Session::RecordingPaused(recorder) => {
                Self::release_recorder(recorder);
                self.status = Status::RecordingStopped;
            }
            Session::Playing(player) | Session::PlaybackPaused(player) => {
                Self::release_player(player);
                self.status = Status::PlaybackStopped;
            }
            Session::Idle => {
                debug!("Stop ignored, nothing live");
                return Outcome::Ignored { mode: from };
            }
        }

        self.transitioned(from)
    }

    /// Play the last recording from the beginning.
    ///
    /// A paused recorder is stopped first so the file is complete before it
    /// is read; a paused player is released and replaced. In both cases the
    /// paused session is already gone if the new player then fails, so the
    /// controller ends Idle rather than in the mode it started from.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn play(&mut self) -> Outcome {
        let from = self.mode();

        let Some(input) = self.output.clone() else {
            debug!("Play ignored, nothing recorded yet");
            return Outcome::Ignored { mode: from };
        };

        match self.take_session() {
            live @ (Session::Recording(_) | Session::Playing(_)) => {
                self.session = live;
                debug!("Play ignored, session running");
                return Outcome::Ignored { mode: from };
            }
            Session::RecordingPaused(recorder) => {
                Self::release_recorder(recorder);
                self.status = Status::RecordingStopped;
            }
            Session::PlaybackPaused(player) => {
                Self::release_player(player);
                self.status = Status::PlaybackStopped;
            }
            Session::Idle => {}
        }

        match self.services.start_player(&input) {
            Ok(player) => {
                self.session = Session::Playing(player);
                self.status = Status::PlayingRecording;
                self.transitioned(from)
            }
            Err(e) => {
                error!(error = ?e, path = ?input, "Failed to prepare player");
                Outcome::Failed { mode: self.mode() }
            }
        }
    }

    /// Deliver the answer to an earlier capability request.
    ///
    /// Only produces the notice to show; the user presses start again.
    #[instrument(skip(self))]
    pub fn on_permission_result(&mut self, result: PermissionResult) -> Notice {
        self.permissions.on_result(&result);

        match result.ensure_granted() {
            Ok(()) => {
                info!("Recording capabilities granted");
                Notice::PermissionGranted
            }
            Err(e) => {
                warn!(error = ?e, "Recording capabilities refused");
                Notice::PermissionDenied
            }
        }
    }

    /// Current session mode.
    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    /// Current status label.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Location of the last successfully started recording.
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Where the next recording will be written.
    pub fn capture_path(&self) -> &Path {
        &self.capture_path
    }

    /// True only while capture is running (not while paused).
    pub fn is_recording(&self) -> bool {
        matches!(self.session, Session::Recording(_))
    }

    /// True only while playback is running (not while paused).
    pub fn is_playing(&self) -> bool {
        matches!(self.session, Session::Playing(_))
    }

    /// The media services in use.
    pub fn services(&self) -> &M {
        &self.services
    }

    /// The permission gate in use.
    pub fn permissions(&self) -> &G {
        &self.permissions
    }

    fn capabilities_granted(&self) -> bool {
        RECORDING_CAPABILITIES
            .iter()
            .all(|capability| self.permissions.is_granted(*capability))
    }

    fn take_session(&mut self) -> Session<M::Recorder, M::Player> {
        mem::replace(&mut self.session, Session::Idle)
    }

    fn release_recorder(recorder: M::Recorder) {
        if let Err(e) = recorder.stop() {
            error!(error = ?e, "Recorder did not stop cleanly");
        }
    }

    fn release_player(player: M::Player) {
        if let Err(e) = player.stop() {
            error!(error = ?e, "Player did not stop cleanly");
        }
    }

    fn transitioned(&self, from: SessionMode) -> Outcome {
        let to = self.mode();
        info!(%from, %to, status = %self.status, "Session transition");
        Outcome::Transitioned { from, to }
    }
}

impl<M: MediaServices, G: PermissionGate> Drop for RecordingController<M, G> {
    fn drop(&mut self) {
        if self.mode() != SessionMode::Idle {
            let _ = self.stop();
        }
    }
}
