use crate::{
    AppEvent, AppResult, DesktopPermissionGate, Notifier, ProxySink, TrayCommand, TrayManager,
    config::Config,
};

use tao::event_loop::EventLoopProxy;
use tracing::{error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use voice_recorder_core::{
    DeviceMediaServices, Outcome, PermissionResult, RecordingController, SessionMode,
};

type Controller = RecordingController<DeviceMediaServices, DesktopPermissionGate<ProxySink>>;

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    /// Keep waiting for events.
    Continue,
    /// Leave the event loop.
    Exit,
}

/// Main application state.
///
/// Lives on the main thread: the tray icon is `!Send` and cpal streams are
/// not `Send` on every platform, so the controller stays here too.
pub struct App {
    controller: Controller,
    tray: TrayManager,
    notifier: Notifier,
}

impl App {
    /// Build the controller and tray from `config`.
    #[track_caller]
    #[instrument(skip(config, proxy))]
    pub fn new(config: &Config, proxy: EventLoopProxy<AppEvent>) -> AppResult<Self> {
        let output_path = config.output_path()?;
        let permissions = DesktopPermissionGate::new(config.recording_dir()?, ProxySink(proxy));
        let controller = RecordingController::new(
            DeviceMediaServices::new(),
            permissions,
            output_path.clone(),
        );
        let tray = TrayManager::new(controller.status())?;

        info!(output_path = ?output_path, "Voice Recorder ready");

        Ok(Self {
            controller,
            tray,
            notifier: Notifier::new(config.behavior.show_notifications),
        })
    }

    /// Handle one event from the event loop.
    pub fn handle_event(&mut self, event: AppEvent) -> AppFlow {
        match event {
            AppEvent::Menu(event) => self.handle_menu_event(event),
            AppEvent::Permission(result) => {
                self.handle_permission_result(result);
                AppFlow::Continue
            }
        }
    }

    /// Stop any live session so the recording file is finalised.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) {
        if self.controller.mode() != SessionMode::Idle {
            self.controller.stop();
        }
        info!("Voice Recorder shut down");
    }

    #[instrument(skip(self))]
    fn handle_menu_event(&mut self, event: MenuEvent) -> AppFlow {
        match self.tray.command_for(&event.id) {
            Some(TrayCommand::Dispatch(action)) => {
                let outcome = self.controller.dispatch(action);
                if let Outcome::Failed { mode } = outcome {
                    warn!(?action, %mode, "Action failed, see previous error");
                }
                self.refresh_tray();
                AppFlow::Continue
            }
            Some(TrayCommand::Exit) => {
                info!("Exit requested from tray menu");
                AppFlow::Exit
            }
            None => AppFlow::Continue,
        }
    }

    #[instrument(skip(self))]
    fn handle_permission_result(&mut self, result: PermissionResult) {
        let notice = self.controller.on_permission_result(result);

        if let Err(e) = self.tray.show_notice(notice) {
            error!(error = ?e, %notice, "Failed to show notice in tray");
        }

        if let Err(e) = self.notifier.show(notice) {
            warn!(error = ?e, %notice, "Notice not shown");
        }
    }

    fn refresh_tray(&mut self) {
        if let Err(e) = self
            .tray
            .update(self.controller.mode(), self.controller.status())
        {
            error!(error = ?e, "Failed to update tray icon");
        }
    }
}
