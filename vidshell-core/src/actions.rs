use std::collections::HashMap;

use crate::controller::MainWindow;
use crate::engine::PlaybackEngine;

/// Every user-triggerable action of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    FileOpenQuick,
    FileOpen,
    FileClose,
    FileExit,

    ViewHideMenu,
    ViewSeekbar,
    ViewControls,
    ViewInformation,
    ViewStatistics,
    ViewStatus,
    ViewSubresync,
    ViewPlaylist,
    ViewCapture,
    ViewNavigation,
    ViewPresetMinimal,
    ViewPresetCompact,
    ViewPresetNormal,
    ViewFullscreen,
    ViewZoom50,
    ViewZoom100,
    ViewZoom200,
    ViewZoomAutofit,
    ViewZoomAutofitLarger,
    ViewZoomDisable,

    Play,
    PlayPause,
    PlayStop,
    PlayFrameBackward,
    PlayFrameForward,
    PlayRateDecrease,
    PlayRateIncrease,
    PlayRateReset,
    PlayVolumeUp,
    PlayVolumeDown,
    PlayVolumeMute,

    NavigateChapterPrevious,
    NavigateChapterNext,

    HelpHomepage,
    HelpAbout,
}

impl ActionId {
    /// Toggle actions carry a checked state; activating one flips it.
    pub fn is_checkable(self) -> bool {
        matches!(
            self,
            Self::ViewSeekbar
                | Self::ViewControls
                | Self::ViewInformation
                | Self::ViewStatistics
                | Self::ViewStatus
                | Self::ViewSubresync
                | Self::ViewPlaylist
                | Self::ViewCapture
                | Self::ViewNavigation
                | Self::ViewFullscreen
                | Self::PlayPause
                | Self::PlayVolumeMute
        )
    }

    /// Actions that only make sense while media is loaded; disabled otherwise.
    pub fn requires_media(self) -> bool {
        matches!(
            self,
            Self::FileClose
                | Self::Play
                | Self::PlayPause
                | Self::PlayStop
                | Self::PlayFrameBackward
                | Self::PlayFrameForward
                | Self::PlayRateDecrease
                | Self::PlayRateIncrease
                | Self::PlayRateReset
                | Self::PlayVolumeUp
                | Self::PlayVolumeDown
                | Self::PlayVolumeMute
                | Self::NavigateChapterPrevious
                | Self::NavigateChapterNext
        )
    }

    /// Entries of the View > Zoom menu.
    pub fn sets_size_factor(self) -> bool {
        matches!(
            self,
            Self::ViewZoom50
                | Self::ViewZoom100
                | Self::ViewZoom200
                | Self::ViewZoomAutofit
                | Self::ViewZoomAutofitLarger
                | Self::ViewZoomDisable
        )
    }

    /// Static menu text. The decoration cycle action is relabelled at
    /// runtime, see [`MainWindow::action_label`].
    pub fn label(self) -> &'static str {
        match self {
            Self::FileOpenQuick => "Quick Open File...",
            Self::FileOpen => "Open File...",
            Self::FileClose => "Close",
            Self::FileExit => "Exit",
            Self::ViewHideMenu => "Hide Menu",
            Self::ViewSeekbar => "Seek Bar",
            Self::ViewControls => "Controls",
            Self::ViewInformation => "Information",
            Self::ViewStatistics => "Statistics",
            Self::ViewStatus => "Status",
            Self::ViewSubresync => "Subresync",
            Self::ViewPlaylist => "Playlist",
            Self::ViewCapture => "Capture",
            Self::ViewNavigation => "Navigation",
            Self::ViewPresetMinimal => "Minimal",
            Self::ViewPresetCompact => "Compact",
            Self::ViewPresetNormal => "Normal",
            Self::ViewFullscreen => "Full Screen",
            Self::ViewZoom50 => "Zoom 50%",
            Self::ViewZoom100 => "Zoom 100%",
            Self::ViewZoom200 => "Zoom 200%",
            Self::ViewZoomAutofit => "Auto Fit",
            Self::ViewZoomAutofitLarger => "Auto Fit (Larger Only)",
            Self::ViewZoomDisable => "Disable Auto Sizing",
            Self::Play => "Play",
            Self::PlayPause => "Pause",
            Self::PlayStop => "Stop",
            Self::PlayFrameBackward => "Frame Step Backward",
            Self::PlayFrameForward => "Frame Step",
            Self::PlayRateDecrease => "Decrease Rate",
            Self::PlayRateIncrease => "Increase Rate",
            Self::PlayRateReset => "Reset Rate",
            Self::PlayVolumeUp => "Volume Up",
            Self::PlayVolumeDown => "Volume Down",
            Self::PlayVolumeMute => "Mute",
            Self::NavigateChapterPrevious => "Previous",
            Self::NavigateChapterNext => "Next",
            Self::HelpHomepage => "Home Page",
            Self::HelpAbout => "About...",
        }
    }
}

/// Default keystrokes in gpui notation. Several keystrokes may share an
/// action.
pub const DEFAULT_KEY_BINDINGS: &[(&str, ActionId)] = &[
    ("ctrl-q", ActionId::FileOpenQuick),
    ("ctrl-o", ActionId::FileOpen),
    ("ctrl-c", ActionId::FileClose),
    ("alt-x", ActionId::FileExit),
    ("cmd-q", ActionId::FileExit),
    ("ctrl-0", ActionId::ViewHideMenu),
    ("1", ActionId::ViewPresetMinimal),
    ("2", ActionId::ViewPresetCompact),
    ("3", ActionId::ViewPresetNormal),
    ("alt-enter", ActionId::ViewFullscreen),
    ("alt-1", ActionId::ViewZoom50),
    ("alt-2", ActionId::ViewZoom100),
    ("alt-3", ActionId::ViewZoom200),
    ("space", ActionId::PlayPause),
    ("ctrl-s", ActionId::PlayStop),
    (".", ActionId::PlayFrameForward),
    (",", ActionId::PlayFrameBackward),
    ("ctrl-down", ActionId::PlayRateDecrease),
    ("ctrl-up", ActionId::PlayRateIncrease),
    ("ctrl-r", ActionId::PlayRateReset),
    ("up", ActionId::PlayVolumeUp),
    ("down", ActionId::PlayVolumeDown),
    ("m", ActionId::PlayVolumeMute),
    ("pageup", ActionId::NavigateChapterPrevious),
    ("pagedown", ActionId::NavigateChapterNext),
    ("f1", ActionId::HelpAbout),
];

/// Handler invoked for an action. The flag is the new checked state for
/// checkable actions and `false` otherwise.
pub type Handler<E> = fn(&mut MainWindow<E>, bool);

/// Dispatch table from action identifiers to their handlers.
pub struct ActionTable<E> {
    handlers: HashMap<ActionId, Handler<E>>,
}

impl<E: PlaybackEngine> ActionTable<E> {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Table with every main window action wired up.
    pub fn new() -> Self {
        let mut table = Self::empty();

        table.register(ActionId::FileOpenQuick, MainWindow::file_open);
        table.register(ActionId::FileOpen, MainWindow::file_open);
        table.register(ActionId::FileClose, MainWindow::play_stop);
        table.register(ActionId::FileExit, MainWindow::file_exit);

        table.register(ActionId::ViewHideMenu, MainWindow::view_hide_menu);
        table.register(ActionId::ViewSeekbar, MainWindow::view_seekbar);
        table.register(ActionId::ViewControls, MainWindow::view_controls);
        table.register(ActionId::ViewInformation, MainWindow::view_information);
        table.register(ActionId::ViewStatistics, MainWindow::view_statistics);
        table.register(ActionId::ViewStatus, MainWindow::view_status);
        table.register(ActionId::ViewSubresync, MainWindow::view_subresync);
        table.register(ActionId::ViewPlaylist, MainWindow::view_playlist);
        table.register(ActionId::ViewCapture, MainWindow::view_capture);
        table.register(ActionId::ViewNavigation, MainWindow::view_navigation);
        table.register(ActionId::ViewPresetMinimal, MainWindow::view_preset_minimal);
        table.register(ActionId::ViewPresetCompact, MainWindow::view_preset_compact);
        table.register(ActionId::ViewPresetNormal, MainWindow::view_preset_normal);
        table.register(ActionId::ViewFullscreen, MainWindow::view_fullscreen);
        table.register(ActionId::ViewZoom50, MainWindow::view_zoom_50);
        table.register(ActionId::ViewZoom100, MainWindow::view_zoom_100);
        table.register(ActionId::ViewZoom200, MainWindow::view_zoom_200);
        // Auto fit has no sizing rule of its own yet and falls back to
        // manual sizing.
        table.register(ActionId::ViewZoomAutofit, MainWindow::view_zoom_disable);
        table.register(ActionId::ViewZoomAutofitLarger, MainWindow::view_zoom_disable);
        table.register(ActionId::ViewZoomDisable, MainWindow::view_zoom_disable);

        table.register(ActionId::Play, MainWindow::play);
        table.register(ActionId::PlayPause, MainWindow::play_pause);
        table.register(ActionId::PlayStop, MainWindow::play_stop);
        table.register(ActionId::PlayFrameBackward, MainWindow::play_frame_backward);
        table.register(ActionId::PlayFrameForward, MainWindow::play_frame_forward);
        table.register(ActionId::PlayRateDecrease, MainWindow::play_rate_decrease);
        table.register(ActionId::PlayRateIncrease, MainWindow::play_rate_increase);
        table.register(ActionId::PlayRateReset, MainWindow::play_rate_reset);
        table.register(ActionId::PlayVolumeUp, MainWindow::play_volume_up);
        table.register(ActionId::PlayVolumeDown, MainWindow::play_volume_down);
        table.register(ActionId::PlayVolumeMute, MainWindow::play_volume_mute);

        table.register(
            ActionId::NavigateChapterPrevious,
            MainWindow::navigate_chapter_previous,
        );
        table.register(ActionId::NavigateChapterNext, MainWindow::navigate_chapter_next);

        table.register(ActionId::HelpHomepage, MainWindow::help_homepage);
        table.register(ActionId::HelpAbout, MainWindow::help_about);

        table
    }

    pub fn register(&mut self, id: ActionId, handler: Handler<E>) {
        self.handlers.insert(id, handler);
    }

    pub fn handler(&self, id: ActionId) -> Option<Handler<E>> {
        self.handlers.get(&id).copied()
    }
}

impl<E: PlaybackEngine> Default for ActionTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::engine::EngineEvent;
    use crate::geometry::Size;
    use crate::settings::Settings;

    #[test]
    fn test_keystrokes_are_unique() {
        let mut seen = HashSet::new();
        for (keystroke, _) in DEFAULT_KEY_BINDINGS {
            assert!(seen.insert(*keystroke), "{keystroke} bound twice");
        }
    }

    #[test]
    fn test_checkable_actions_need_no_media_for_view_toggles() {
        assert!(ActionId::ViewStatus.is_checkable());
        assert!(!ActionId::ViewStatus.requires_media());
        assert!(ActionId::PlayVolumeMute.is_checkable());
        assert!(ActionId::PlayVolumeMute.requires_media());
        assert!(!ActionId::ViewPresetNormal.is_checkable());
    }

    #[test]
    fn test_zoom_menu_entries() {
        assert!(ActionId::ViewZoom200.sets_size_factor());
        assert!(ActionId::ViewZoomDisable.sets_size_factor());
        assert!(!ActionId::ViewFullscreen.sets_size_factor());
    }

    struct NullEngine;

    impl PlaybackEngine for NullEngine {
        fn open(&mut self, _path: &std::path::Path) {}
        fn stop(&mut self) {}
        fn set_paused(&mut self, _paused: bool) {}
        fn set_speed(&mut self, _speed: f64) {}
        fn set_volume(&mut self, _volume: i32) {}
        fn set_mute(&mut self, _muted: bool) {}
        fn set_time(&mut self, _seconds: f64) {}
        fn step_forward(&mut self) {}
        fn step_backward(&mut self) {}
        fn set_chapter(&mut self, _index: i64) -> bool {
            false
        }
        fn set_audio_track(&mut self, _id: i64) {}
        fn set_subtitle_track(&mut self, _id: i64) {}
        fn set_video_track(&mut self, _id: i64) {}
        fn show_message(&mut self, _text: &str) {}
        fn play_time(&self) -> f64 {
            0.0
        }
        fn play_length(&self) -> f64 {
            0.0
        }
        fn video_size(&self) -> Size {
            Size::default()
        }
        fn chapter(&self) -> i64 {
            0
        }
    }

    #[test]
    fn test_empty_table_has_no_handlers() {
        let table = ActionTable::<NullEngine>::empty();
        assert!(table.handler(ActionId::PlayPause).is_none());
    }

    #[test]
    fn test_registered_handler_replaces_default() {
        fn record_exit(window: &mut MainWindow<NullEngine>, _checked: bool) {
            window.handle_event(EngineEvent::MediaTitleChanged("exit".to_string()));
        }

        let mut table = ActionTable::new();
        table.register(ActionId::FileExit, record_exit);

        let mut window = MainWindow::new(NullEngine, &Settings::default());
        let handler = table.handler(ActionId::FileExit).unwrap();
        handler(&mut window, false);
        assert_eq!(window.title(), "Video Player - exit");
    }
}
