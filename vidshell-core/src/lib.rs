/*!
    Main window controller for a desktop video player.

    Routes UI actions to a playback engine and mirrors engine state back into
    the window: transport status, time display, chapter and track menus, and
    the window's size and decoration mode. The toolkit and the engine are only
    reached through the [`WindowHost`] and [`PlaybackEngine`] traits, so any
    windowing layer can host a [`MainWindow`].
*/

pub mod actions;
pub mod controller;
pub mod decoration;
pub mod engine;
pub mod error;
pub mod format;
pub mod geometry;
pub mod menu;
#[cfg(unix)]
pub mod mpv;
pub mod scheduler;
pub mod settings;
pub mod sizing;
pub mod view;
pub mod window;

pub use actions::{ActionId, ActionTable, DEFAULT_KEY_BINDINGS};
pub use controller::{DeferredOutcome, MainWindow, PlaybackStatus};
pub use decoration::{DecorationChange, DecorationState, DecorationStateMachine, WindowFrame};
pub use engine::{Chapter, EngineEvent, PlaybackEngine, Track, TrackKind};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
pub use menu::{DynamicMenu, DynamicMenuKind, MenuCommand, MenuEntry, TrackMenus};
pub use scheduler::{DeferredQueue, DeferredTask};
#[cfg(unix)]
pub use mpv::{EngineEvents, MpvEngine};
pub use settings::{EngineSettings, LaunchOverrides, Settings};
pub use sizing::{AutoSizeController, SizeState};
pub use view::{Chrome, Panel, PanelVisibility, Preset, SeekBar, SeekTick};
pub use window::{WindowHost, WindowRequest};

/// Name shown in the window title and the about dialog.
pub const APP_NAME: &str = "Video Player";
