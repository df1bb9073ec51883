use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decoration::DecorationState;
use crate::error::Result;
use crate::geometry::Size;
use crate::sizing::{DEFAULT_NO_VIDEO_SIZE, ZOOM_100, clamp_size_factor};
use crate::view::PanelVisibility;

/// User settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub decoration: DecorationState,
    pub panels: PanelVisibility,
    pub size_factor: f64,
    pub no_video_size: Size,
    pub volume: i32,
    pub engine: EngineSettings,
}

/// How to launch the playback engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub mpv_binary: PathBuf,
    /// Extra command line arguments passed through to mpv
    pub extra_args: Vec<String>,
}

/// Values given on the command line. They shape this run only and are kept
/// out of the settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOverrides {
    pub size_factor: Option<f64>,
    pub mpv_binary: Option<PathBuf>,
}

impl LaunchOverrides {
    /// Settings for this run: `persisted` with the overrides applied.
    pub fn apply(&self, persisted: &Settings) -> Settings {
        let mut settings = persisted.clone();
        if let Some(factor) = self.size_factor {
            settings.size_factor = clamp_size_factor(factor);
        }
        if let Some(mpv) = &self.mpv_binary {
            settings.engine.mpv_binary = mpv.clone();
        }
        settings
    }

    /// A zoom picked in the window replaces the one from the command line
    /// and is saved like any other change.
    pub fn clear_size_factor(&mut self) {
        self.size_factor = None;
    }

    /// Put the persisted value back into every field still overridden, so
    /// `settings` can be written to disk.
    pub fn restore(&self, settings: &mut Settings, persisted: &Settings) {
        if self.size_factor.is_some() {
            settings.size_factor = persisted.size_factor;
        }
        if self.mpv_binary.is_some() {
            settings.engine.mpv_binary = persisted.engine.mpv_binary.clone();
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            decoration: DecorationState::default(),
            panels: PanelVisibility::default(),
            size_factor: ZOOM_100,
            no_video_size: DEFAULT_NO_VIDEO_SIZE,
            volume: 100,
            engine: EngineSettings::default(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mpv_binary: PathBuf::from("mpv"),
            extra_args: Vec::new(),
        }
    }
}

impl Settings {
    fn state_file_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("vidshell").join("settings.json"))
    }

    /// Load the user's settings, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::state_file_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&contents)?;
        settings.size_factor = clamp_size_factor(settings.size_factor);
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        match Self::state_file_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
