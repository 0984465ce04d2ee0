use crate::SessionMode;

/// User actions exposed as buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Begin a new recording.
    Start,
    /// Pause whichever session is running.
    Pause,
    /// Stop whichever session is live.
    Stop,
    /// Play the last recording.
    Play,
}

/// Result of dispatching an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mode changed.
    Transitioned {
        /// Mode before the action.
        from: SessionMode,
        /// Mode after the action.
        to: SessionMode,
    },
    /// Capabilities were missing and have been requested. Mode unchanged.
    PermissionRequested,
    /// The action does not apply in the current mode.
    Ignored {
        /// Current mode.
        mode: SessionMode,
    },
    /// A service could not be acquired or driven. The error has been logged.
    Failed {
        /// Mode after the failure.
        mode: SessionMode,
    },
}

impl Outcome {
    /// Mode after the action. A permission request only happens from Idle.
    pub fn mode(&self) -> SessionMode {
        match self {
            Outcome::Transitioned { to, .. } => *to,
            Outcome::Ignored { mode } | Outcome::Failed { mode } => *mode,
            Outcome::PermissionRequested => SessionMode::Idle,
        }
    }

    /// Whether the mode changed.
    pub fn is_transition(&self) -> bool {
        matches!(self, Outcome::Transitioned { .. })
    }
}
