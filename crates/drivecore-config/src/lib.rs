use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings io: {0}")]
    Io(#[from] io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder searched by the local drive. `None` means the user's home directory.
    pub drive_root: Option<PathBuf>,
    pub thumbnails: ThumbnailSettings,
    pub max_results: usize,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    pub enabled: bool,
    pub stub_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    TerminalDark,
    TerminalLight,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drive_root: None,
            thumbnails: ThumbnailSettings::default(),
            max_results: 500,
            theme: Theme::TerminalDark,
        }
    }
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            stub_delay_ms: 10,
        }
    }
}

impl ThumbnailSettings {
    pub fn stub_delay(&self) -> Duration {
        Duration::from_millis(self.stub_delay_ms)
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!(path = %path.display(), "falling back to default settings: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

pub fn default_settings_path() -> PathBuf {
    let base = env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(base)
        .join("DriveSearch")
        .join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"thumbnails":{"enabled":true},"theme":"terminal_light"}"#)
                .unwrap();
        assert!(settings.thumbnails.enabled);
        assert_eq!(settings.thumbnails.stub_delay_ms, 10);
        assert_eq!(settings.max_results, 500);
        assert_eq!(settings.theme, Theme::TerminalLight);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            drive_root: Some(PathBuf::from("/srv/share")),
            max_results: 25,
            ..Settings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn missing_or_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(Settings::load_or_default(&missing), Settings::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Settings::load(&broken), Err(ConfigError::Json(_))));
        assert_eq!(Settings::load_or_default(&broken), Settings::default());
    }
}
