#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod local_drive;
mod logging;
mod search;
mod ui;

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use drivecore_auth::{AuthError, AuthService, LocalAuth};
use drivecore_client::{DriveClient, Thumbnails};
use drivecore_config::{default_settings_path, Settings};
use drived::{Activation, Command, SearchController, SearchOutcome, SessionReport, SessionState};
use iced::{window, Size, Task, Theme};
use tracing::{info, warn};

use local_drive::LocalDrive;

const PANEL_WIDTH: f32 = 760.0;
const PANEL_HEIGHT: f32 = 540.0;
const LABEL_MAX_CHARS: usize = 80;
const ITEM_FONT_SIZE: u32 = 14;
const STATUS_FONT_SIZE: u32 = 12;

fn main() -> iced::Result {
    if let Err(err) = logging::init() {
        eprintln!("logging disabled: {err:#}");
    }

    let settings_path = default_settings_path();
    let settings = load_settings(&settings_path);

    iced::application(
        move || (App::new(settings.clone()), Task::none()),
        update,
        ui::view,
    )
    .title("DriveSearch")
    .theme(theme)
    .window(native_window_settings())
    .run()
}

#[derive(Debug, Clone)]
pub(crate) enum Message {
    QueryChanged(String),
    SearchControlPressed,
    SearchFinished(SearchOutcome),
    SignOutPressed,
    SignedOut(Result<(), AuthError>),
}

pub(crate) struct App {
    settings: Settings,
    pub(crate) query: String,
    pub(crate) controller: SearchController,
    pub(crate) auth: Arc<dyn AuthService>,
    pub(crate) status: String,
}

impl App {
    fn new(settings: Settings) -> Self {
        let root = drive_root(&settings);
        info!(root = %root.display(), "serving local drive");
        let client = Arc::new(LocalDrive::new(root, settings.max_results));
        Self::with_services(settings, client, Arc::new(LocalAuth::signed_in()))
    }

    fn with_services(
        settings: Settings,
        client: Arc<dyn DriveClient>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        let thumbnails = Thumbnails::new(
            settings.thumbnails.enabled,
            settings.thumbnails.stub_delay(),
        );

        Self {
            controller: SearchController::new(client).with_thumbnails(thumbnails),
            settings,
            query: String::new(),
            auth,
            status: String::new(),
        }
    }
}

/// Loads settings, writing the defaults out on first run so they can be edited.
fn load_settings(path: &Path) -> Settings {
    let settings = Settings::load_or_default(path);
    if !path.exists() {
        match settings.save(path) {
            Ok(()) => info!(path = %path.display(), "wrote default settings"),
            Err(err) => warn!(path = %path.display(), "could not write default settings: {err}"),
        }
    }
    info!(path = %path.display(), "settings loaded");
    settings
}

fn drive_root(settings: &Settings) -> PathBuf {
    if let Some(root) = &settings.drive_root {
        return root.clone();
    }

    home_dir().unwrap_or_else(|err| {
        warn!("{err:#}, searching the working directory");
        PathBuf::from(".")
    })
}

fn home_dir() -> anyhow::Result<PathBuf> {
    env::var_os("USERPROFILE")
        .or_else(|| env::var_os("HOME"))
        .map(PathBuf::from)
        .context("neither USERPROFILE nor HOME is set")
}

fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::QueryChanged(query) => {
            app.query = query;
        }
        Message::SearchControlPressed => {
            if !app.auth.is_signed_in() {
                app.status = "Signed out".to_string();
                return Task::none();
            }

            match app.controller.activate(&app.query) {
                Activation::Started(job) => {
                    app.status = format!("Searching for \"{}\"...", job.query());
                    return Task::perform(job.run(), Message::SearchFinished);
                }
                Activation::CancelRequested => {
                    app.status = "Cancelling...".to_string();
                }
                Activation::Ignored => {}
            }
        }
        Message::SearchFinished(outcome) => {
            let report = app.controller.complete(outcome);
            if let Some(status) = status_line(&report) {
                app.status = status;
            }
        }
        Message::SignOutPressed => {
            if app.controller.state() == SessionState::Searching {
                app.controller.dispatch(Command::Cancel);
            }

            let auth = app.auth.clone();
            return Task::perform(async move { auth.sign_out().await }, Message::SignedOut);
        }
        Message::SignedOut(result) => match result {
            Ok(()) => {
                app.controller.clear_results();
                app.status = "Signed out".to_string();
            }
            Err(err) => {
                warn!("sign out failed: {err}");
                app.status = format!("Sign out failed: {err}");
            }
        },
    }

    Task::none()
}

fn status_line(report: &SessionReport) -> Option<String> {
    let line = match report {
        SessionReport::Rendered {
            rendered,
            total,
            cancelled: true,
        } => format!("Cancelled after {rendered} of {total} results"),
        SessionReport::Rendered { rendered, .. } => format!("{rendered} results"),
        SessionReport::NoResults => "No results".to_string(),
        SessionReport::DriveUnavailable => "Drive unavailable".to_string(),
        SessionReport::Failed(err) => format!("Search failed: {err}"),
        SessionReport::Stale => return None,
    };
    Some(line)
}

fn theme(app: &App) -> Theme {
    match app.settings.theme {
        drivecore_config::Theme::TerminalDark => Theme::TokyoNight,
        drivecore_config::Theme::TerminalLight => Theme::Light,
    }
}

fn native_window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(PANEL_WIDTH, PANEL_HEIGHT),
        min_size: Some(Size::new(420.0, 240.0)),
        ..window::Settings::default()
    }
}

#[cfg(test)]
mod tests {
    use drivecore_client::MemoryDrive;
    use drivecore_item::DriveItemResult;
    use drived::ControlLabel;

    use super::*;

    fn app() -> App {
        let drive = MemoryDrive::new(vec![DriveItemResult::new("1", "Report.pdf")]);
        App::with_services(
            Settings::default(),
            Arc::new(drive),
            Arc::new(LocalAuth::signed_in()),
        )
    }

    #[test]
    fn blank_query_press_does_nothing() {
        let mut app = app();
        let _ = update(&mut app, Message::QueryChanged("   ".to_string()));
        let _ = update(&mut app, Message::SearchControlPressed);

        assert_eq!(app.controller.state(), SessionState::Idle);
        assert_eq!(app.controller.label(), ControlLabel::Search);
        assert!(app.status.is_empty());
    }

    #[test]
    fn press_twice_starts_then_cancels() {
        let mut app = app();
        let _ = update(&mut app, Message::QueryChanged("report".to_string()));

        let _ = update(&mut app, Message::SearchControlPressed);
        assert_eq!(app.controller.label(), ControlLabel::Cancel);
        assert_eq!(app.status, "Searching for \"report\"...");

        let _ = update(&mut app, Message::SearchControlPressed);
        assert!(app.controller.cancel_requested());
        assert_eq!(app.controller.state(), SessionState::Searching);
        assert_eq!(app.status, "Cancelling...");
    }

    #[test]
    fn first_run_writes_default_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DriveSearch").join("settings.json");

        let settings = load_settings(&path);

        assert_eq!(settings, Settings::default());
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn existing_settings_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"max_results":7}"#).unwrap();

        assert_eq!(load_settings(&path).max_results, 7);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"max_results":7}"#);
    }

    #[test]
    fn status_lines() {
        assert_eq!(
            status_line(&SessionReport::Rendered {
                rendered: 2,
                total: 5,
                cancelled: true
            })
            .as_deref(),
            Some("Cancelled after 2 of 5 results")
        );
        assert_eq!(
            status_line(&SessionReport::NoResults).as_deref(),
            Some("No results")
        );
        assert_eq!(status_line(&SessionReport::Stale), None);
    }
}
