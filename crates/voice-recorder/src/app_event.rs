use tray_icon::menu::MenuEvent;
use voice_recorder_core::PermissionResult;

/// Events delivered to the main UI thread through the tao event loop proxy.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A tray menu item was clicked.
    Menu(MenuEvent),
    /// A capability request finished on the probe thread.
    Permission(PermissionResult),
}
