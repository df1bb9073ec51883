use tracing::debug;

use crate::geometry::{Rect, Size};
use crate::window::WindowHost;

/// Placeholder video area used until media is playing.
pub const DEFAULT_NO_VIDEO_SIZE: Size = Size::new(500, 270);

/// Zoom presets from the View > Zoom menu. Zero disables auto-sizing.
pub const ZOOM_50: f64 = 0.5;
pub const ZOOM_100: f64 = 1.0;
pub const ZOOM_200: f64 = 2.0;
pub const ZOOM_DISABLED: f64 = 0.0;

/// Largest zoom factor accepted from settings or the command line.
pub const MAX_SIZE_FACTOR: f64 = 4.0;

/// Bring a zoom factor from outside into range: capped at
/// [`MAX_SIZE_FACTOR`], with negative or NaN values disabling auto-sizing.
pub fn clamp_size_factor(factor: f64) -> f64 {
    if factor.is_nan() || factor <= ZOOM_DISABLED {
        ZOOM_DISABLED
    } else {
        factor.min(MAX_SIZE_FACTOR)
    }
}

/// Playback facts the size computation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeState {
    pub playing: bool,
    /// Native video size reported by the engine
    pub video_size: Size,
    pub fullscreen: bool,
}

/// Fits the window around the video at a chosen zoom factor.
///
/// The window is never sized from absolute chrome heights. Instead the
/// space currently taken by menus, panels and borders is measured as the
/// difference between the window and its video area, and carried over to
/// the new size. Whatever panels are visible, the video area comes out at
/// the wanted size.
#[derive(Debug, Clone)]
pub struct AutoSizeController {
    size_factor: f64,
    no_video_size: Size,
}

impl AutoSizeController {
    pub fn new(size_factor: f64, no_video_size: Size) -> Self {
        Self {
            size_factor: clamp_size_factor(size_factor),
            no_video_size,
        }
    }

    pub fn size_factor(&self) -> f64 {
        self.size_factor
    }

    /// Store a new zoom factor. Returns true when the window should be
    /// resized right away; zero switches to manual sizing and leaves the
    /// window alone.
    pub fn set_size_factor(&mut self, factor: f64) -> bool {
        self.size_factor = clamp_size_factor(factor);
        self.size_factor != ZOOM_DISABLED
    }

    pub fn no_video_size(&self) -> Size {
        self.no_video_size
    }

    pub fn set_no_video_size(&mut self, size: Size) {
        self.no_video_size = size;
    }

    /// Zoom applied to the base size. While idle the placeholder is never
    /// shrunk below its native size.
    pub fn effective_factor(&self, playing: bool) -> f64 {
        if playing {
            self.size_factor
        } else {
            self.size_factor.max(1.0)
        }
    }

    /// Size the video area should have.
    pub fn wanted_video_size(&self, state: &SizeState) -> Size {
        let base = if state.playing {
            state.video_size
        } else {
            self.no_video_size
        };
        base.scaled(self.effective_factor(state.playing))
    }

    /// Whether the controller owns the window geometry at all. With
    /// auto-sizing disabled, in fullscreen, or while maximized, the user and
    /// the window manager do.
    pub fn is_active(&self, state: &SizeState, maximized: bool) -> bool {
        self.size_factor > 0.0 && !state.fullscreen && !maximized
    }

    /// Recompute and apply the window geometry.
    ///
    /// On the first run the window is centered on the screen under the
    /// cursor, afterwards on the screen it is already on. Returns the
    /// applied geometry, or `None` when sizing was skipped.
    pub fn update_size<H: WindowHost>(
        &self,
        host: &mut H,
        state: &SizeState,
        first_run: bool,
    ) -> Option<Rect> {
        if !self.is_active(state, host.is_maximized()) {
            host.refresh_info_layout();
            return None;
        }

        let wanted = self.wanted_video_size(state);
        let chrome = host.window_size() - host.video_area_size();
        let desired = wanted + chrome;

        let area = if first_run {
            host.available_area_at_cursor()
        } else {
            host.available_area_of_window()
        };
        let rect = Rect::centered_in(desired, area);

        debug!(
            factor = self.size_factor,
            width = rect.size.width,
            height = rect.size.height,
            first_run,
            "resizing window"
        );
        host.set_geometry(rect);
        Some(rect)
    }
}

impl Default for AutoSizeController {
    fn default() -> Self {
        Self::new(ZOOM_100, DEFAULT_NO_VIDEO_SIZE)
    }
}
