//! Voice Recorder: record, pause, stop and play back one audio clip from the
//! system tray.

mod app;
mod app_event;
mod config;
mod error;
mod logging;
mod notifier;
mod permissions;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::{App, AppFlow},
    app_event::AppEvent,
    error::{AppError, Result as AppResult},
    notifier::Notifier,
    permissions::{DesktopPermissionGate, ProxySink},
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::{Config, LoggingConfig};

use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{error, info, warn};
use tray_icon::menu::MenuEvent;

/// Application entry point.
fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            let guard = logging::init_tracing(&LoggingConfig::default());
            error!(error = ?e, "Failed to load config");
            drop(guard);
            std::process::exit(1);
        }
    };

    // Flushes the log file on drop; held until the process exits.
    let mut log_guard = logging::init_tracing(&config.logging);

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event| {
        if let Err(e) = menu_proxy.send_event(AppEvent::Menu(event)) {
            warn!(error = ?e, "Event loop closed, menu event dropped");
        }
    }));

    // App lives on the main thread - TrayIcon is !Send on all platforms.
    let mut app: Option<App> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                match App::new(&config, proxy.clone()) {
                    Ok(created) => app = Some(created),
                    Err(e) => {
                        error!(error = ?e, "Failed to start Voice Recorder");
                        drop(log_guard.take());
                        std::process::exit(1);
                    }
                }

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }
            }
            Event::UserEvent(event) => {
                let Some(app) = app.as_mut() else {
                    return;
                };

                if app.handle_event(event) == AppFlow::Exit {
                    app.shutdown();
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            }
            Event::LoopDestroyed => {
                info!("Event loop destroyed");
                drop(log_guard.take());
            }
            _ => {}
        }
    });
}
