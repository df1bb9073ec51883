use std::path::Path;

use tracing::{debug, info};

use crate::actions::{ActionId, ActionTable};
use crate::decoration::{DecorationChange, DecorationState, DecorationStateMachine};
use crate::engine::{EngineEvent, PlaybackEngine};
use crate::format;
use crate::geometry::{Rect, Size};
use crate::menu::{DynamicMenu, DynamicMenuKind, MenuCommand, TrackMenus};
use crate::scheduler::{DeferredQueue, DeferredTask};
use crate::settings::Settings;
use crate::sizing::{AutoSizeController, SizeState, ZOOM_50, ZOOM_100, ZOOM_200, ZOOM_DISABLED};
use crate::view::{Chrome, Panel, PanelVisibility, Preset, SeekBar, SeekTick};
use crate::window::{WindowHost, WindowRequest};

pub const MIN_SPEED: f64 = 0.125;
pub const MAX_SPEED: f64 = 8.0;
pub const MAX_VOLUME: i32 = 100;
const VOLUME_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Paused,
    Playing,
}

impl PlaybackStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Paused => "Paused",
            Self::Playing => "Playing",
        }
    }
}

/// Result of draining the deferred queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeferredOutcome {
    /// Geometry applied to the window, if it was resized
    pub resized: Option<Rect>,
    /// Settings changed and should be written out
    pub save_settings: bool,
}

/// The main window controller.
///
/// Owns all window and playback state, receives UI actions and engine
/// notifications, and tells the host what to change through
/// [`WindowRequest`]s and deferred geometry updates. Runs entirely on the
/// UI thread.
pub struct MainWindow<E> {
    engine: E,
    actions: ActionTable<E>,
    decoration: DecorationStateMachine,
    sizing: AutoSizeController,
    panels: PanelVisibility,
    fullscreen: bool,
    playing: bool,
    paused: bool,
    muted: bool,
    speed: f64,
    volume: i32,
    ui_enabled: bool,
    seek_bar: SeekBar,
    chapters: DynamicMenu,
    tracks: TrackMenus,
    time_text: String,
    title: String,
    first_run: bool,
    deferred: DeferredQueue,
    requests: Vec<WindowRequest>,
}

impl<E: PlaybackEngine> MainWindow<E> {
    pub fn new(engine: E, settings: &Settings) -> Self {
        let mut window = Self {
            engine,
            actions: ActionTable::new(),
            decoration: DecorationStateMachine::new(settings.decoration),
            sizing: AutoSizeController::new(settings.size_factor, settings.no_video_size),
            panels: settings.panels,
            fullscreen: false,
            playing: false,
            paused: false,
            muted: false,
            speed: 1.0,
            volume: settings.volume.clamp(0, MAX_VOLUME),
            ui_enabled: false,
            seek_bar: SeekBar::default(),
            chapters: DynamicMenu::default(),
            tracks: TrackMenus::default(),
            time_text: format::time_display(0.0, 0.0),
            title: format::window_title(""),
            first_run: true,
            deferred: DeferredQueue::default(),
            requests: Vec::new(),
        };

        window.engine.set_volume(window.volume);
        window.apply_decoration(window.decoration.current());
        window
            .requests
            .push(WindowRequest::SetTitle(window.title.clone()));
        window.set_ui_enabled(false);
        window.request_resize();
        window
    }

    // Actions

    /// Activate an action the way a menu click or key press does: checkable
    /// actions flip their checked state.
    pub fn trigger(&mut self, id: ActionId) {
        let checked = id.is_checkable() && !self.is_checked(id);
        self.dispatch(id, checked);
    }

    /// Drive a checkable action to an explicit state. Does nothing if the
    /// action is already in that state.
    pub fn set_checked(&mut self, id: ActionId, checked: bool) {
        if !id.is_checkable() || self.is_checked(id) == checked {
            return;
        }
        self.dispatch(id, checked);
    }

    fn dispatch(&mut self, id: ActionId, checked: bool) {
        if !self.is_enabled(id) {
            debug!(?id, "ignoring disabled action");
            return;
        }
        match self.actions.handler(id) {
            Some(handler) => handler(self, checked),
            None => debug!(?id, "no handler registered"),
        }
    }

    /// Run the command behind a generated chapter or track menu entry.
    pub fn run_menu_command(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::SelectChapter(index) => {
                self.engine.set_chapter(index);
            }
            MenuCommand::SelectAudioTrack(id) => self.engine.set_audio_track(id),
            MenuCommand::SelectSubtitleTrack(id) => self.engine.set_subtitle_track(id),
            MenuCommand::SelectVideoTrack(id) => self.engine.set_video_track(id),
        }
    }

    /// Open the file chosen in the open dialog. A cancelled dialog or an
    /// empty path does nothing.
    pub fn open_path(&mut self, path: Option<&Path>) {
        match path {
            Some(path) if !path.as_os_str().is_empty() => {
                info!(path = %path.display(), "opening file");
                self.engine.open(path);
            }
            _ => debug!("file open cancelled"),
        }
    }

    /// Seek bar dragged to `seconds`.
    pub fn seek(&mut self, seconds: f64) {
        if self.seek_bar.enabled {
            self.engine.set_time(seconds);
        }
    }

    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, MAX_VOLUME);
        self.engine.set_volume(self.volume);
        self.engine
            .show_message(&format!("Volume: {}%", self.volume));
        self.deferred.post(DeferredTask::SaveSettings);
    }

    pub fn set_playback_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.engine.set_speed(self.speed);
        self.engine.show_message(&format!("Speed: {}", self.speed));
    }

    pub fn set_size_factor(&mut self, factor: f64) {
        if self.sizing.set_size_factor(factor) {
            self.request_resize();
        }
        self.deferred.post(DeferredTask::SaveSettings);
    }

    pub fn set_no_video_size(&mut self, size: Size) {
        self.sizing.set_no_video_size(size);
        self.request_resize();
    }

    /// Enter or leave fullscreen. The decoration state is left untouched;
    /// chrome comes back from it and the panel toggles on exit.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen == fullscreen {
            return;
        }
        self.fullscreen = fullscreen;
        self.requests.push(WindowRequest::SetFullscreen(fullscreen));
        self.requests.push(WindowRequest::SetMenuBarVisible(
            !fullscreen && self.decoration.state().menu_bar_visible(),
        ));
    }

    // Engine notifications

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::PlayTimeChanged(time) => {
                self.seek_bar.value = time.max(0.0);
                self.update_time();
            }
            EngineEvent::PlayLengthChanged(length) => {
                self.seek_bar.maximum = length.max(0.0);
                self.update_time();
            }
            EngineEvent::PlaybackStarted => {
                self.playing = true;
                self.paused_changed(false);
                self.set_ui_enabled(true);
            }
            EngineEvent::PausedChanged(paused) => self.paused_changed(paused),
            EngineEvent::PlaybackFinished => {
                self.stop_playback(true);
                self.set_ui_enabled(false);
            }
            EngineEvent::MediaTitleChanged(media_title) => {
                self.title = format::window_title(&media_title);
                self.requests.push(WindowRequest::SetTitle(self.title.clone()));
            }
            EngineEvent::ChaptersChanged(chapters) => {
                self.seek_bar.ticks = chapters
                    .iter()
                    .map(|c| SeekTick {
                        time: c.time,
                        title: c.title.clone(),
                    })
                    .collect();
                self.chapters.rebuild_chapters(&chapters);
            }
            EngineEvent::TracksChanged(tracks) => self.tracks.rebuild(&tracks),
            EngineEvent::VideoSizeChanged(size) => {
                debug!(width = size.width, height = size.height, "video size changed");
                self.request_resize();
            }
        }
    }

    // Deferred work

    /// Ask for the window geometry to be recomputed once the toolkit has
    /// finished laying out. Repeated requests before that collapse into one.
    pub fn request_resize(&mut self) {
        self.deferred.post(DeferredTask::UpdateSize);
    }

    /// Whether the host has anything to apply: window requests or deferred
    /// tasks.
    pub fn has_pending_work(&self) -> bool {
        !self.requests.is_empty() || !self.deferred.is_empty()
    }

    pub fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Run every queued deferred task against the laid-out window.
    pub fn run_deferred<H: WindowHost>(&mut self, host: &mut H) -> DeferredOutcome {
        let mut outcome = DeferredOutcome::default();
        for task in self.deferred.take() {
            match task {
                DeferredTask::UpdateSize => {
                    let first_run = std::mem::replace(&mut self.first_run, false);
                    outcome.resized = self.update_size(host, first_run);
                }
                DeferredTask::SaveSettings => outcome.save_settings = true,
            }
        }
        outcome
    }

    fn update_size<H: WindowHost>(&mut self, host: &mut H, first_run: bool) -> Option<Rect> {
        let state = SizeState {
            playing: self.playing,
            video_size: if self.playing {
                self.engine.video_size()
            } else {
                Size::default()
            },
            fullscreen: self.fullscreen,
        };
        self.sizing.update_size(host, &state, first_run)
    }

    // State for the host to render

    pub fn status(&self) -> PlaybackStatus {
        if !self.playing {
            PlaybackStatus::Stopped
        } else if self.paused {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        }
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn seek_bar(&self) -> &SeekBar {
        &self.seek_bar
    }

    pub fn dynamic_menu(&self, kind: DynamicMenuKind) -> &DynamicMenu {
        match kind {
            DynamicMenuKind::AudioTracks => &self.tracks.audio,
            DynamicMenuKind::SubtitleTracks => &self.tracks.subtitles,
            DynamicMenuKind::VideoTracks => &self.tracks.video,
            DynamicMenuKind::Chapters => &self.chapters,
        }
    }

    pub fn chrome(&self) -> Chrome {
        Chrome {
            menu_bar: !self.fullscreen && self.decoration.state().menu_bar_visible(),
            control_section: !self.fullscreen,
            info_section: !self.fullscreen,
            panels: self.panels,
        }
    }

    pub fn decoration_state(&self) -> DecorationState {
        self.decoration.state()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn playback_speed(&self) -> f64 {
        self.speed
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn size_factor(&self) -> f64 {
        self.sizing.size_factor()
    }

    pub fn is_enabled(&self, id: ActionId) -> bool {
        !id.requires_media() || self.ui_enabled
    }

    pub fn is_checked(&self, id: ActionId) -> bool {
        let factor = self.sizing.size_factor();
        match id {
            ActionId::ViewSeekbar => self.panels.get(Panel::Seekbar),
            ActionId::ViewControls => self.panels.get(Panel::Controls),
            ActionId::ViewInformation => self.panels.get(Panel::Information),
            ActionId::ViewStatistics => self.panels.get(Panel::Statistics),
            ActionId::ViewStatus => self.panels.get(Panel::Status),
            ActionId::ViewSubresync => self.panels.get(Panel::Subresync),
            ActionId::ViewPlaylist => self.panels.get(Panel::Playlist),
            ActionId::ViewCapture => self.panels.get(Panel::Capture),
            ActionId::ViewNavigation => self.panels.get(Panel::Navigation),
            ActionId::ViewFullscreen => self.fullscreen,
            ActionId::ViewZoom50 => factor == ZOOM_50,
            ActionId::ViewZoom100 => factor == ZOOM_100,
            ActionId::ViewZoom200 => factor == ZOOM_200,
            ActionId::ViewZoomDisable => factor == ZOOM_DISABLED,
            ActionId::PlayPause => self.paused,
            ActionId::PlayVolumeMute => self.muted,
            _ => false,
        }
    }

    pub fn action_label(&self, id: ActionId) -> &'static str {
        match id {
            ActionId::ViewHideMenu => self.decoration.state().toggle_label(),
            _ => id.label(),
        }
    }

    /// Copy the persisted parts of the window state into `settings`.
    pub fn write_settings(&self, settings: &mut Settings) {
        settings.decoration = self.decoration.state();
        settings.panels = self.panels;
        settings.size_factor = self.sizing.size_factor();
        settings.no_video_size = self.sizing.no_video_size();
        settings.volume = self.volume;
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // Internal state transitions

    fn apply_decoration(&mut self, change: DecorationChange) {
        if !self.fullscreen {
            self.requests
                .push(WindowRequest::SetMenuBarVisible(change.menu_bar_visible));
        }
        self.requests.push(WindowRequest::SetFrame(change.frame));
        self.requests.push(WindowRequest::Show);
    }

    fn apply_preset(&mut self, preset: Preset) {
        let change = self.decoration.set(preset.decoration());
        self.apply_decoration(change);
        self.panels = preset.panels();
        self.request_resize();
        self.deferred.post(DeferredTask::SaveSettings);
    }

    fn toggle_panel(&mut self, panel: Panel, visible: bool) {
        self.panels.set(panel, visible);
        self.request_resize();
        self.deferred.post(DeferredTask::SaveSettings);
    }

    fn paused_changed(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn set_ui_enabled(&mut self, enabled: bool) {
        self.ui_enabled = enabled;
        self.seek_bar.enabled = enabled;
        self.paused = false;
    }

    /// Mark playback as stopped. With `engine_already_stopped` the engine is
    /// not told, because it reported the stop itself.
    fn stop_playback(&mut self, engine_already_stopped: bool) {
        if !engine_already_stopped {
            self.engine.stop();
        }
        self.playing = false;
        self.request_resize();
    }

    fn update_time(&mut self) {
        self.time_text = format::time_display(self.engine.play_time(), self.engine.play_length());
    }

    // Action handlers, wired up in `ActionTable::new`

    pub(crate) fn file_open(&mut self, _checked: bool) {
        self.requests.push(WindowRequest::PromptOpenFile);
    }

    pub(crate) fn file_exit(&mut self, _checked: bool) {
        self.requests.push(WindowRequest::Close);
    }

    pub(crate) fn view_hide_menu(&mut self, _checked: bool) {
        // Chrome is not managed in fullscreen
        if self.fullscreen {
            return;
        }
        let change = self.decoration.cycle();
        self.apply_decoration(change);
        self.request_resize();
        self.deferred.post(DeferredTask::SaveSettings);
    }

    pub(crate) fn view_seekbar(&mut self, checked: bool) {
        self.toggle_panel(Panel::Seekbar, checked);
    }

    pub(crate) fn view_controls(&mut self, checked: bool) {
        self.toggle_panel(Panel::Controls, checked);
    }

    pub(crate) fn view_information(&mut self, checked: bool) {
        self.toggle_panel(Panel::Information, checked);
    }

    pub(crate) fn view_statistics(&mut self, checked: bool) {
        self.toggle_panel(Panel::Statistics, checked);
    }

    pub(crate) fn view_status(&mut self, checked: bool) {
        self.toggle_panel(Panel::Status, checked);
    }

    pub(crate) fn view_subresync(&mut self, checked: bool) {
        self.toggle_panel(Panel::Subresync, checked);
    }

    pub(crate) fn view_playlist(&mut self, checked: bool) {
        self.toggle_panel(Panel::Playlist, checked);
    }

    pub(crate) fn view_capture(&mut self, checked: bool) {
        self.toggle_panel(Panel::Capture, checked);
    }

    pub(crate) fn view_navigation(&mut self, checked: bool) {
        self.toggle_panel(Panel::Navigation, checked);
    }

    pub(crate) fn view_preset_minimal(&mut self, _checked: bool) {
        self.apply_preset(Preset::Minimal);
    }

    pub(crate) fn view_preset_compact(&mut self, _checked: bool) {
        self.apply_preset(Preset::Compact);
    }

    pub(crate) fn view_preset_normal(&mut self, _checked: bool) {
        self.apply_preset(Preset::Normal);
    }

    pub(crate) fn view_fullscreen(&mut self, checked: bool) {
        self.set_fullscreen(checked);
    }

    pub(crate) fn view_zoom_50(&mut self, _checked: bool) {
        self.set_size_factor(ZOOM_50);
    }

    pub(crate) fn view_zoom_100(&mut self, _checked: bool) {
        self.set_size_factor(ZOOM_100);
    }

    pub(crate) fn view_zoom_200(&mut self, _checked: bool) {
        self.set_size_factor(ZOOM_200);
    }

    pub(crate) fn view_zoom_disable(&mut self, _checked: bool) {
        self.set_size_factor(ZOOM_DISABLED);
    }

    pub(crate) fn play(&mut self, _checked: bool) {
        if !self.playing {
            return;
        }
        if self.paused {
            self.engine.set_paused(false);
            self.paused_changed(false);
        }
        self.play_rate_reset(false);
    }

    pub(crate) fn play_pause(&mut self, checked: bool) {
        self.engine.set_paused(checked);
        self.paused_changed(checked);
    }

    pub(crate) fn play_stop(&mut self, _checked: bool) {
        self.stop_playback(false);
    }

    pub(crate) fn play_frame_backward(&mut self, _checked: bool) {
        self.engine.step_backward();
        self.paused_changed(true);
    }

    pub(crate) fn play_frame_forward(&mut self, _checked: bool) {
        self.engine.step_forward();
        self.paused_changed(true);
    }

    pub(crate) fn play_rate_decrease(&mut self, _checked: bool) {
        self.set_playback_speed(self.speed / 2.0);
    }

    pub(crate) fn play_rate_increase(&mut self, _checked: bool) {
        self.set_playback_speed(self.speed * 2.0);
    }

    pub(crate) fn play_rate_reset(&mut self, _checked: bool) {
        if self.speed == 1.0 {
            return;
        }
        self.set_playback_speed(1.0);
    }

    pub(crate) fn play_volume_up(&mut self, _checked: bool) {
        self.set_volume((self.volume + VOLUME_STEP).min(MAX_VOLUME));
    }

    pub(crate) fn play_volume_down(&mut self, _checked: bool) {
        self.set_volume((self.volume - VOLUME_STEP).max(0));
    }

    pub(crate) fn play_volume_mute(&mut self, checked: bool) {
        if !self.playing {
            return;
        }
        self.engine.set_mute(checked);
        self.muted = checked;
    }

    pub(crate) fn navigate_chapter_previous(&mut self, _checked: bool) {
        let chapter = self.engine.chapter();
        self.engine.set_chapter((chapter - 1).max(0));
    }

    pub(crate) fn navigate_chapter_next(&mut self, _checked: bool) {
        let chapter = self.engine.chapter() + 1;
        if !self.engine.set_chapter(chapter) {
            // Past the last chapter means the end of the content
            info!(chapter, "no next chapter, stopping playback");
            self.stop_playback(false);
        }
    }

    pub(crate) fn help_homepage(&mut self, _checked: bool) {
        self.requests.push(WindowRequest::OpenHomepage);
    }

    pub(crate) fn help_about(&mut self, _checked: bool) {
        self.requests.push(WindowRequest::ShowAbout);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::decoration::WindowFrame;
    use crate::engine::{Chapter, Track, TrackKind};
    use crate::sizing::MAX_SIZE_FACTOR;
    use crate::sizing::tests::FakeHost;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Open(PathBuf),
        Stop,
        Paused(bool),
        Speed(f64),
        Volume(i32),
        Mute(bool),
        Time(f64),
        StepForward,
        StepBackward,
        Chapter(i64),
        AudioTrack(i64),
        SubtitleTrack(i64),
        VideoTrack(i64),
        Message(String),
    }

    #[derive(Default)]
    struct FakeEngine {
        calls: Vec<Call>,
        chapter: i64,
        chapter_count: i64,
        video_size: Size,
        time: f64,
        length: f64,
    }

    impl PlaybackEngine for FakeEngine {
        fn open(&mut self, path: &Path) {
            self.calls.push(Call::Open(path.to_path_buf()));
        }

        fn stop(&mut self) {
            self.calls.push(Call::Stop);
        }

        fn set_paused(&mut self, paused: bool) {
            self.calls.push(Call::Paused(paused));
        }

        fn set_speed(&mut self, speed: f64) {
            self.calls.push(Call::Speed(speed));
        }

        fn set_volume(&mut self, volume: i32) {
            self.calls.push(Call::Volume(volume));
        }

        fn set_mute(&mut self, muted: bool) {
            self.calls.push(Call::Mute(muted));
        }

        fn set_time(&mut self, seconds: f64) {
            self.calls.push(Call::Time(seconds));
        }

        fn step_forward(&mut self) {
            self.calls.push(Call::StepForward);
        }

        fn step_backward(&mut self) {
            self.calls.push(Call::StepBackward);
        }

        fn set_chapter(&mut self, index: i64) -> bool {
            if index < 0 || index >= self.chapter_count {
                return false;
            }
            self.chapter = index;
            self.calls.push(Call::Chapter(index));
            true
        }

        fn set_audio_track(&mut self, id: i64) {
            self.calls.push(Call::AudioTrack(id));
        }

        fn set_subtitle_track(&mut self, id: i64) {
            self.calls.push(Call::SubtitleTrack(id));
        }

        fn set_video_track(&mut self, id: i64) {
            self.calls.push(Call::VideoTrack(id));
        }

        fn show_message(&mut self, text: &str) {
            self.calls.push(Call::Message(text.to_string()));
        }

        fn play_time(&self) -> f64 {
            self.time
        }

        fn play_length(&self) -> f64 {
            self.length
        }

        fn video_size(&self) -> Size {
            self.video_size
        }

        fn chapter(&self) -> i64 {
            self.chapter
        }
    }

    const CHROME: Size = Size::new(0, 120);

    /// Controller whose first deferred run already happened, with the
    /// engine's call log and the request queue cleared.
    fn idle_window() -> (MainWindow<FakeEngine>, FakeHost) {
        let mut window = MainWindow::new(FakeEngine::default(), &Settings::default());
        let mut host = FakeHost::new(Size::new(800, 600), CHROME);
        window.run_deferred(&mut host);
        window.take_requests();
        window.engine_mut().calls.clear();
        host.geometry_calls.clear();
        (window, host)
    }

    fn playing_window() -> (MainWindow<FakeEngine>, FakeHost) {
        let (mut window, mut host) = idle_window();
        window.engine_mut().video_size = Size::new(1280, 720);
        window.handle_event(EngineEvent::PlaybackStarted);
        window.run_deferred(&mut host);
        window.engine_mut().calls.clear();
        host.geometry_calls.clear();
        (window, host)
    }

    #[test]
    fn test_new_applies_initial_state() {
        let settings = Settings {
            decoration: DecorationState::NoDecorations,
            volume: 70,
            ..Settings::default()
        };
        let mut window = MainWindow::new(FakeEngine::default(), &settings);

        assert_eq!(window.engine().calls, vec![Call::Volume(70)]);
        assert_eq!(
            window.take_requests(),
            vec![
                WindowRequest::SetMenuBarVisible(false),
                WindowRequest::SetFrame(WindowFrame::Frameless),
                WindowRequest::Show,
                WindowRequest::SetTitle("Video Player".to_string()),
            ]
        );
        assert!(window.has_pending_work());
        assert!(!window.is_enabled(ActionId::PlayPause));
        assert_eq!(window.status(), PlaybackStatus::Stopped);
        assert_eq!(window.time_text(), "0:00:00.000 / 0:00:00.000");
    }

    #[test]
    fn test_first_run_centers_placeholder_on_cursor_screen() {
        let mut window = MainWindow::new(FakeEngine::default(), &Settings::default());
        let mut host = FakeHost::new(Size::new(800, 600), CHROME);

        let outcome = window.run_deferred(&mut host);
        assert_eq!(outcome.resized, Some(Rect::new(710, 345, 500, 390)));

        window.request_resize();
        let outcome = window.run_deferred(&mut host);
        let rect = outcome.resized.unwrap();
        assert_eq!(rect.origin.x, 1920 + (2560 - 500) / 2);
    }

    #[test]
    fn test_speed_is_clamped() {
        let (mut window, _host) = playing_window();

        window.set_playback_speed(16.0);
        assert_eq!(window.playback_speed(), 8.0);
        assert_eq!(
            window.engine().calls,
            vec![Call::Speed(8.0), Call::Message("Speed: 8".to_string())]
        );

        window.set_playback_speed(0.01);
        assert_eq!(window.playback_speed(), 0.125);
    }

    #[test]
    fn test_rate_actions() {
        let (mut window, _host) = playing_window();

        window.trigger(ActionId::PlayRateIncrease);
        window.trigger(ActionId::PlayRateIncrease);
        assert_eq!(window.playback_speed(), 4.0);

        window.trigger(ActionId::PlayRateDecrease);
        assert_eq!(window.playback_speed(), 2.0);

        window.trigger(ActionId::PlayRateReset);
        assert_eq!(window.playback_speed(), 1.0);

        window.engine_mut().calls.clear();
        window.trigger(ActionId::PlayRateReset);
        assert!(window.engine().calls.is_empty());
    }

    #[test]
    fn test_volume_steps_are_clamped() {
        let (mut window, _host) = playing_window();

        window.set_volume(95);
        window.trigger(ActionId::PlayVolumeUp);
        assert_eq!(window.volume(), 100);
        assert_eq!(
            window.engine().calls.last(),
            Some(&Call::Message("Volume: 100%".to_string()))
        );

        window.set_volume(5);
        window.trigger(ActionId::PlayVolumeDown);
        assert_eq!(window.volume(), 0);
        assert!(window.engine().calls.contains(&Call::Volume(0)));

        window.set_volume(250);
        assert_eq!(window.volume(), 100);
    }

    #[test]
    fn test_decoration_cycle() {
        let (mut window, _host) = idle_window();

        window.trigger(ActionId::ViewHideMenu);
        assert_eq!(window.decoration_state(), DecorationState::NoMenu);
        assert_eq!(window.action_label(ActionId::ViewHideMenu), "Hide Borders");
        assert_eq!(
            window.take_requests(),
            vec![
                WindowRequest::SetMenuBarVisible(false),
                WindowRequest::SetFrame(WindowFrame::Standard),
                WindowRequest::Show,
            ]
        );

        window.trigger(ActionId::ViewHideMenu);
        assert_eq!(window.decoration_state(), DecorationState::NoDecorations);
        assert!(
            window
                .take_requests()
                .contains(&WindowRequest::SetFrame(WindowFrame::Frameless))
        );

        window.trigger(ActionId::ViewHideMenu);
        assert_eq!(window.decoration_state(), DecorationState::AllDecorations);
        assert!(window.chrome().menu_bar);
    }

    #[test]
    fn test_fullscreen_round_trip_keeps_decoration_and_toggles() {
        let (mut window, _host) = idle_window();
        window.trigger(ActionId::ViewHideMenu);
        window.trigger(ActionId::ViewStatus);
        let before = window.chrome();
        assert!(!before.panels.status);
        window.take_requests();

        window.trigger(ActionId::ViewFullscreen);
        assert!(window.is_fullscreen());
        let chrome = window.chrome();
        assert!(!chrome.menu_bar && !chrome.control_section && !chrome.info_section);
        assert_eq!(
            window.take_requests(),
            vec![
                WindowRequest::SetFullscreen(true),
                WindowRequest::SetMenuBarVisible(false),
            ]
        );

        // Chrome is unmanaged while fullscreen
        window.trigger(ActionId::ViewHideMenu);
        assert_eq!(window.decoration_state(), DecorationState::NoMenu);

        window.trigger(ActionId::ViewFullscreen);
        assert!(!window.is_fullscreen());
        assert_eq!(window.decoration_state(), DecorationState::NoMenu);
        assert_eq!(window.chrome(), before);
    }

    #[test]
    fn test_leaving_fullscreen_restores_menu_bar() {
        let (mut window, _host) = idle_window();
        window.set_checked(ActionId::ViewFullscreen, true);
        window.take_requests();

        window.set_checked(ActionId::ViewFullscreen, false);
        assert_eq!(
            window.take_requests(),
            vec![
                WindowRequest::SetFullscreen(false),
                WindowRequest::SetMenuBarVisible(true),
            ]
        );
    }

    #[test]
    fn test_presets() {
        let (mut window, _host) = idle_window();

        window.trigger(ActionId::ViewPresetCompact);
        assert_eq!(window.decoration_state(), DecorationState::NoDecorations);
        let chrome = window.chrome();
        assert!(!chrome.menu_bar);
        assert!(chrome.shows(Panel::Seekbar));
        assert!(!chrome.shows(Panel::Controls));

        window.trigger(ActionId::ViewPresetMinimal);
        assert!(Panel::ALL.iter().all(|&p| !window.chrome().shows(p)));

        window.trigger(ActionId::ViewPresetNormal);
        assert_eq!(window.decoration_state(), DecorationState::AllDecorations);
        assert!(window.chrome().menu_bar);
        assert!(window.chrome().shows(Panel::Status));
    }

    #[test]
    fn test_resize_requests_coalesce() {
        let (mut window, mut host) = playing_window();

        window.trigger(ActionId::ViewSeekbar);
        window.trigger(ActionId::ViewStatus);
        window.set_size_factor(ZOOM_50);
        window.handle_event(EngineEvent::VideoSizeChanged(Size::new(1280, 720)));

        let outcome = window.run_deferred(&mut host);
        assert_eq!(host.geometry_calls.len(), 1);
        assert_eq!(outcome.resized.unwrap().size, Size::new(640, 360) + CHROME);
        assert!(outcome.save_settings);

        assert_eq!(window.run_deferred(&mut host), DeferredOutcome::default());
        assert_eq!(host.geometry_calls.len(), 1);
    }

    #[test]
    fn test_idle_placeholder_never_shrinks() {
        let (mut window, mut host) = idle_window();
        window.set_size_factor(ZOOM_50);
        let outcome = window.run_deferred(&mut host);
        assert_eq!(outcome.resized.unwrap().size, Size::new(500, 270) + CHROME);

        window.set_size_factor(ZOOM_200);
        let outcome = window.run_deferred(&mut host);
        assert_eq!(outcome.resized.unwrap().size, Size::new(1000, 540) + CHROME);
    }

    #[test]
    fn test_huge_zoom_from_settings_is_capped() {
        let settings = Settings {
            size_factor: 1e10,
            ..Settings::default()
        };
        let mut window = MainWindow::new(FakeEngine::default(), &settings);
        let mut host = FakeHost::new(Size::new(800, 600), CHROME);
        window.engine_mut().video_size = Size::new(1920, 1080);
        window.handle_event(EngineEvent::PlaybackStarted);

        let outcome = window.run_deferred(&mut host);
        assert_eq!(window.size_factor(), MAX_SIZE_FACTOR);
        assert_eq!(outcome.resized.unwrap().size, Size::new(7680, 4320) + CHROME);

        window.set_size_factor(f64::INFINITY);
        assert_eq!(window.size_factor(), MAX_SIZE_FACTOR);
    }

    #[test]
    fn test_no_video_size_resizes_idle_window() {
        let (mut window, mut host) = idle_window();
        window.set_no_video_size(Size::new(640, 360));
        let outcome = window.run_deferred(&mut host);
        assert_eq!(outcome.resized.unwrap().size, Size::new(640, 360) + CHROME);

        let mut settings = Settings::default();
        window.write_settings(&mut settings);
        assert_eq!(settings.no_video_size, Size::new(640, 360));
    }

    #[test]
    fn test_disabling_zoom_does_not_resize() {
        let (mut window, mut host) = playing_window();
        window.trigger(ActionId::ViewZoomDisable);
        assert!(window.is_checked(ActionId::ViewZoomDisable));
        assert_eq!(window.run_deferred(&mut host).resized, None);

        // Panels toggled while sizing is manual leave the geometry alone
        window.trigger(ActionId::ViewControls);
        assert_eq!(window.run_deferred(&mut host).resized, None);
        assert!(host.geometry_calls.is_empty());
    }

    #[test]
    fn test_maximized_window_is_left_alone() {
        let (mut window, mut host) = playing_window();
        host.maximized = true;
        window.request_resize();
        assert_eq!(window.run_deferred(&mut host).resized, None);
        assert_eq!(host.layout_refreshes, 1);
    }

    #[test]
    fn test_status_follows_transport() {
        let (mut window, _host) = idle_window();
        assert_eq!(window.status().label(), "Stopped");

        window.handle_event(EngineEvent::PlaybackStarted);
        assert_eq!(window.status().label(), "Playing");
        assert!(window.seek_bar().enabled);

        window.handle_event(EngineEvent::PausedChanged(true));
        assert_eq!(window.status().label(), "Paused");

        window.handle_event(EngineEvent::PlaybackFinished);
        assert_eq!(window.status().label(), "Stopped");
        assert!(!window.seek_bar().enabled);
        assert!(!window.is_enabled(ActionId::PlayStop));
        // The engine reported the stop, so it is not told again
        assert!(!window.engine().calls.contains(&Call::Stop));
    }

    #[test]
    fn test_pause_toggle_and_play_button() {
        let (mut window, _host) = playing_window();

        window.trigger(ActionId::PlayPause);
        assert!(window.is_paused());
        assert!(window.is_checked(ActionId::PlayPause));

        window.set_playback_speed(2.0);
        window.engine_mut().calls.clear();
        window.trigger(ActionId::Play);
        assert!(!window.is_paused());
        assert_eq!(
            window.engine().calls,
            vec![
                Call::Paused(false),
                Call::Speed(1.0),
                Call::Message("Speed: 1".to_string()),
            ]
        );
    }

    #[test]
    fn test_frame_step_pauses() {
        let (mut window, _host) = playing_window();
        window.trigger(ActionId::PlayFrameForward);
        assert_eq!(window.status(), PlaybackStatus::Paused);
        window.trigger(ActionId::PlayFrameBackward);
        assert_eq!(
            window.engine().calls,
            vec![Call::StepForward, Call::StepBackward]
        );
    }

    #[test]
    fn test_stop_requests_resize_to_placeholder() {
        let (mut window, mut host) = playing_window();
        window.trigger(ActionId::PlayStop);
        assert_eq!(window.engine().calls, vec![Call::Stop]);
        assert_eq!(window.status(), PlaybackStatus::Stopped);
        assert!(window.is_enabled(ActionId::Play));

        let outcome = window.run_deferred(&mut host);
        assert_eq!(outcome.resized.unwrap().size, Size::new(500, 270) + CHROME);
    }

    #[test]
    fn test_transport_actions_disabled_without_media() {
        let (mut window, _host) = idle_window();
        window.trigger(ActionId::PlayStop);
        window.trigger(ActionId::PlayVolumeUp);
        window.trigger(ActionId::NavigateChapterNext);
        assert!(window.engine().calls.is_empty());
    }

    #[test]
    fn test_mute_ignored_when_not_playing() {
        let (mut window, _host) = playing_window();
        window.trigger(ActionId::PlayVolumeMute);
        assert!(window.is_muted());
        assert_eq!(window.engine().calls, vec![Call::Mute(true)]);

        window.trigger(ActionId::PlayStop);
        window.engine_mut().calls.clear();
        window.play_volume_mute(false);
        assert!(window.is_muted());
        assert!(window.engine().calls.is_empty());
    }

    #[test]
    fn test_chapter_navigation() {
        let (mut window, _host) = playing_window();
        window.engine_mut().chapter_count = 2;

        window.trigger(ActionId::NavigateChapterPrevious);
        assert_eq!(window.engine().calls, vec![Call::Chapter(0)]);

        window.trigger(ActionId::NavigateChapterNext);
        assert_eq!(window.engine().chapter, 1);
        assert!(window.is_playing());

        window.engine_mut().calls.clear();
        window.trigger(ActionId::NavigateChapterNext);
        assert_eq!(window.engine().calls, vec![Call::Stop]);
        assert!(!window.is_playing());
    }

    #[test]
    fn test_time_and_length_updates() {
        let (mut window, _host) = playing_window();
        window.engine_mut().time = 65.0;
        window.engine_mut().length = 3600.0;

        window.handle_event(EngineEvent::PlayLengthChanged(3600.0));
        window.handle_event(EngineEvent::PlayTimeChanged(-1.0));
        assert_eq!(window.seek_bar().value, 0.0);
        assert_eq!(window.seek_bar().maximum, 3600.0);
        assert_eq!(window.time_text(), "0:01:05.000 / 1:00:00.000");

        window.seek(120.0);
        assert_eq!(window.engine().calls, vec![Call::Time(120.0)]);
    }

    #[test]
    fn test_title_change() {
        let (mut window, _host) = idle_window();
        window.handle_event(EngineEvent::MediaTitleChanged("clip.webm".to_string()));
        assert_eq!(window.title(), "Video Player - clip.webm");
        assert_eq!(
            window.take_requests(),
            vec![WindowRequest::SetTitle("Video Player - clip.webm".to_string())]
        );
    }

    #[test]
    fn test_chapter_and_track_menus() {
        let (mut window, _host) = playing_window();
        window.handle_event(EngineEvent::ChaptersChanged(vec![
            Chapter {
                time: 0.0,
                title: "Start".to_string(),
            },
            Chapter {
                time: 300.0,
                title: "End".to_string(),
            },
        ]));
        assert_eq!(window.seek_bar().ticks.len(), 2);
        assert_eq!(window.seek_bar().ticks[1].time, 300.0);
        let chapters = window.dynamic_menu(DynamicMenuKind::Chapters).entries();
        assert_eq!(chapters[1].label, "[0:05:00.000] - End");

        window.handle_event(EngineEvent::TracksChanged(vec![Track {
            id: 2,
            kind: TrackKind::Subtitle,
            codec: Some("ass".to_string()),
            lang: None,
            title: None,
        }]));
        let subtitles = window.dynamic_menu(DynamicMenuKind::SubtitleTracks);
        assert_eq!(subtitles.entries()[0].label, "2: [ass] ");
        assert!(window.dynamic_menu(DynamicMenuKind::AudioTracks).is_empty());

        let command = subtitles.entries()[0].command;
        window.run_menu_command(command);
        assert_eq!(window.engine().calls, vec![Call::SubtitleTrack(2)]);
    }

    #[test]
    fn test_open_path_ignores_cancelled_dialog() {
        let (mut window, _host) = idle_window();
        window.trigger(ActionId::FileOpen);
        assert_eq!(window.take_requests(), vec![WindowRequest::PromptOpenFile]);

        window.open_path(None);
        window.open_path(Some(Path::new("")));
        assert!(window.engine().calls.is_empty());

        window.open_path(Some(Path::new("/media/movie.mkv")));
        assert_eq!(
            window.engine().calls,
            vec![Call::Open(PathBuf::from("/media/movie.mkv"))]
        );
    }

    #[test]
    fn test_write_settings() {
        let (mut window, _host) = playing_window();
        window.trigger(ActionId::ViewHideMenu);
        window.trigger(ActionId::ViewZoom200);
        window.set_volume(30);

        let mut settings = Settings::default();
        window.write_settings(&mut settings);
        assert_eq!(settings.decoration, DecorationState::NoMenu);
        assert_eq!(settings.size_factor, 2.0);
        assert_eq!(settings.volume, 30);
    }
}
