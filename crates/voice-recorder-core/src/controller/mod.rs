mod action;
mod recording_controller;
mod session_mode;
mod status;

pub use {
    action::{Action, Outcome},
    recording_controller::RecordingController,
    session_mode::SessionMode,
    status::Status,
};
