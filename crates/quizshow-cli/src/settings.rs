//! Settings types and persistence.
//!
//! Settings are stored as TOML in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.quizshow.Quiz-Show/
//! - Windows: %APPDATA%/quizshow/Quiz Show/config/
//! - Linux: ~/.config/quizshow/
//!
//! Quiz data lives separately, in the platform data folder unless
//! `[storage] data_dir` says otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use quizshow_core::OverwritePolicy;
use quizshow_persistence::STORAGE_KEY;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "quizshow";
const APP_NAME: &str = "Quiz Show";
const CONFIG_FILENAME: &str = "settings.toml";

// ============================================================================
// Settings
// ============================================================================

/// Application settings (persisted to disk as TOML).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub session: SessionSettings,
    pub display: DisplaySettings,
}

/// Where quiz data is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the state file. Platform data folder when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Namespace key; the state file is `<namespace>.json`.
    pub namespace: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            namespace: STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// What `session start` does while a game is running.
    pub overwrite: OverwritePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub table_style: TableStyle,
    /// Maximum table width in columns.
    pub table_width: u16,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            table_style: TableStyle::default(),
            table_width: 100,
        }
    }
}

/// Border style for printed tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    #[default]
    Rounded,
    Ascii,
}

impl Settings {
    /// Directory of the state file: explicit override, then settings, then
    /// the platform data folder.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir.or(self.storage.data_dir.as_deref()) {
            return Ok(dir.to_path_buf());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))
    }
}

// ============================================================================
// Persistence
// ============================================================================

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the default location.
///
/// Returns default settings if:
/// - The settings file doesn't exist
/// - The settings file cannot be parsed
/// - The platform-specific directory cannot be determined
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path.map(Path::to_path_buf).or_else(settings_path) else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Settings::default();
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Save settings to `path`, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;

    tracing::info!("Saved settings to {:?}", path);
    Ok(())
}
