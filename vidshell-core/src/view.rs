use serde::{Deserialize, Serialize};

use crate::decoration::DecorationState;

/// Optional panels around the video area, each with its own view toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Seekbar,
    Controls,
    Information,
    Statistics,
    Status,
    Subresync,
    Playlist,
    Capture,
    Navigation,
}

impl Panel {
    pub const ALL: [Panel; 9] = [
        Panel::Seekbar,
        Panel::Controls,
        Panel::Information,
        Panel::Statistics,
        Panel::Status,
        Panel::Subresync,
        Panel::Playlist,
        Panel::Capture,
        Panel::Navigation,
    ];
}

/// Persisted on/off state of every view toggle.
///
/// Statistics, subresync, playlist, capture and navigation have no panel of
/// their own yet; hosts that grow one read its flag from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelVisibility {
    pub seekbar: bool,
    pub controls: bool,
    pub information: bool,
    pub statistics: bool,
    pub status: bool,
    pub subresync: bool,
    pub playlist: bool,
    pub capture: bool,
    pub navigation: bool,
}

impl PanelVisibility {
    pub fn get(&self, panel: Panel) -> bool {
        match panel {
            Panel::Seekbar => self.seekbar,
            Panel::Controls => self.controls,
            Panel::Information => self.information,
            Panel::Statistics => self.statistics,
            Panel::Status => self.status,
            Panel::Subresync => self.subresync,
            Panel::Playlist => self.playlist,
            Panel::Capture => self.capture,
            Panel::Navigation => self.navigation,
        }
    }

    pub fn set(&mut self, panel: Panel, visible: bool) {
        let flag = match panel {
            Panel::Seekbar => &mut self.seekbar,
            Panel::Controls => &mut self.controls,
            Panel::Information => &mut self.information,
            Panel::Statistics => &mut self.statistics,
            Panel::Status => &mut self.status,
            Panel::Subresync => &mut self.subresync,
            Panel::Playlist => &mut self.playlist,
            Panel::Capture => &mut self.capture,
            Panel::Navigation => &mut self.navigation,
        };
        *flag = visible;
    }
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Preset::Normal.panels()
    }
}

/// One-click view layouts from the View > Presets menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Borderless video only
    Minimal,
    /// Borderless video with a seek bar
    Compact,
    /// Full chrome with the usual panels
    Normal,
}

impl Preset {
    pub fn decoration(self) -> DecorationState {
        match self {
            Self::Minimal | Self::Compact => DecorationState::NoDecorations,
            Self::Normal => DecorationState::AllDecorations,
        }
    }

    pub fn panels(self) -> PanelVisibility {
        let none = PanelVisibility {
            seekbar: false,
            controls: false,
            information: false,
            statistics: false,
            status: false,
            subresync: false,
            playlist: false,
            capture: false,
            navigation: false,
        };
        match self {
            Self::Minimal => none,
            Self::Compact => PanelVisibility {
                seekbar: true,
                ..none
            },
            Self::Normal => PanelVisibility {
                seekbar: true,
                controls: true,
                information: true,
                status: true,
                ..none
            },
        }
    }
}

/// What the host should currently draw around the video area.
///
/// Fullscreen hides the menu bar and both panel sections without touching
/// the persisted toggles, so leaving fullscreen brings back exactly what the
/// user had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub menu_bar: bool,
    /// Seek bar and transport controls
    pub control_section: bool,
    /// Information and status panels
    pub info_section: bool,
    pub panels: PanelVisibility,
}

impl Chrome {
    /// Whether `panel` is on screen right now.
    pub fn shows(&self, panel: Panel) -> bool {
        let section = match panel {
            Panel::Seekbar | Panel::Controls => self.control_section,
            _ => self.info_section,
        };
        section && self.panels.get(panel)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeekTick {
    pub time: f64,
    pub title: String,
}

/// Model behind the position slider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeekBar {
    pub value: f64,
    pub maximum: f64,
    pub ticks: Vec<SeekTick>,
    pub enabled: bool,
}

impl SeekBar {
    /// Played fraction in `0.0..=1.0`, zero while the length is unknown.
    pub fn fraction(&self) -> f64 {
        if self.maximum > 0.0 {
            (self.value / self.maximum).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
