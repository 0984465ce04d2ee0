use voice_recorder_core::Action;

/// What a tray menu click asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    /// Forward a button press to the recording controller.
    Dispatch(Action),
    /// Stop any live session and exit the event loop.
    Exit,
}
