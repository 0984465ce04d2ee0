//! System tray icon acting as the application's single screen.
//!
//! The menu carries a read-only status line, the Record / Pause / Stop /
//! Play buttons and Exit. The icon colour and tooltip follow the session
//! mode. A notice is appended to the status line until the next action.

use crate::{AppError, AppResult, TrayCommand, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};
use tracing::{debug, info, instrument};
use tray_icon::menu::{IsMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use voice_recorder_core::{Action, Notice, SessionMode, Status};

/// Edge length of the generated icon in pixels.
pub(crate) const ICON_SIZE: u32 = 32;

const TOOLTIP_PREFIX: &str = "Voice Recorder";

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    status_item: MenuItem,
    record_item_id: MenuId,
    pause_item_id: MenuId,
    stop_item_id: MenuId,
    play_item_id: MenuId,
    exit_item_id: MenuId,
    state: TrayIconState,
    status: Status,
    notice: Option<Notice>,
}

impl TrayManager {
    /// Create the tray icon showing `status`.
    #[track_caller]
    #[instrument]
    pub fn new(status: Status) -> AppResult<Self> {
        let menu = Menu::new();

        let status_item = MenuItem::new(status_text(status, None), false, None);
        let record_item = MenuItem::new("Record", true, None);
        let pause_item = MenuItem::new("Pause", true, None);
        let stop_item = MenuItem::new("Stop", true, None);
        let play_item = MenuItem::new("Play", true, None);
        let exit_item = MenuItem::new("Exit", true, None);
        let first_separator = PredefinedMenuItem::separator();
        let second_separator = PredefinedMenuItem::separator();

        let items: [&dyn IsMenuItem; 8] = [
            &status_item,
            &first_separator,
            &record_item,
            &pause_item,
            &stop_item,
            &play_item,
            &second_separator,
            &exit_item,
        ];

        menu.append_items(&items).map_err(|e| AppError::TrayError {
            reason: format!("Failed to build menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let state = TrayIconState::Idle;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(&status_text(status, None)))
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(state)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            record_item_id: record_item.id().clone(),
            pause_item_id: pause_item.id().clone(),
            stop_item_id: stop_item.id().clone(),
            play_item_id: play_item.id().clone(),
            exit_item_id: exit_item.id().clone(),
            status_item,
            state,
            status,
            notice: None,
        })
    }

    /// Mirror the controller's mode and status label, clearing any notice.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update(&mut self, mode: SessionMode, status: Status) -> AppResult<()> {
        self.status = status;
        self.notice = None;
        self.refresh_text()?;

        let state = TrayIconState::from(mode);
        if state != self.state {
            self.tray_icon
                .set_icon(Some(Self::load_icon(state)?))
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to update icon: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            self.state = state;
            debug!(?state, "Tray icon updated");
        }

        Ok(())
    }

    /// Show `notice` on the status line and tooltip until the next update.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn show_notice(&mut self, notice: Notice) -> AppResult<()> {
        self.notice = Some(notice);
        self.refresh_text()
    }

    #[track_caller]
    fn refresh_text(&mut self) -> AppResult<()> {
        let text = status_text(self.status, self.notice);
        self.status_item.set_text(&text);

        self.tray_icon
            .set_tooltip(Some(tooltip(&text)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Map a clicked menu item to a command.
    pub fn command_for(&self, id: &MenuId) -> Option<TrayCommand> {
        let command = if *id == self.record_item_id {
            TrayCommand::Dispatch(Action::Start)
        } else if *id == self.pause_item_id {
            TrayCommand::Dispatch(Action::Pause)
        } else if *id == self.stop_item_id {
            TrayCommand::Dispatch(Action::Stop)
        } else if *id == self.play_item_id {
            TrayCommand::Dispatch(Action::Play)
        } else if *id == self.exit_item_id {
            TrayCommand::Exit
        } else {
            return None;
        };

        Some(command)
    }

    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        let image = render_icon(state);
        let (width, height) = image.dimensions();

        Icon::from_rgba(image.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Status line text, with the pending notice if any.
pub(crate) fn status_text(status: Status, notice: Option<Notice>) -> String {
    match notice {
        Some(notice) => format!("{} ({})", status, notice),
        None => status.to_string(),
    }
}

fn tooltip(text: &str) -> String {
    format!("{} - {}", TOOLTIP_PREFIX, text)
}

/// Draw the icon for `state`: a filled dot on a transparent square.
pub(crate) fn render_icon(state: TrayIconState) -> RgbaImage {
    let [r, g, b] = state.color();
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        if dx * dx + dy * dy <= radius * radius {
            Rgba([r, g, b, 0xff])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
