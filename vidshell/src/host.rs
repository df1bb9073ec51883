use gpui::{App, Bounds, Pixels, Window, px, size};
use tracing::debug;

use vidshell_core::{Chrome, Panel, Rect, Size, WindowHost};

pub const MENU_BAR_HEIGHT: f32 = 26.0;
pub const SEEKBAR_HEIGHT: f32 = 18.0;
pub const CONTROLS_HEIGHT: f32 = 34.0;
pub const PANEL_HEIGHT: f32 = 22.0;

/// Height of the strip drawn for `panel` when it is shown.
pub fn panel_height(panel: Panel) -> f32 {
    match panel {
        Panel::Seekbar => SEEKBAR_HEIGHT,
        Panel::Controls => CONTROLS_HEIGHT,
        _ => PANEL_HEIGHT,
    }
}

/// Space taken by everything drawn around the video area.
pub fn chrome_size(chrome: &Chrome) -> Size {
    let mut height = if chrome.menu_bar { MENU_BAR_HEIGHT } else { 0.0 };
    for panel in Panel::ALL {
        if chrome.shows(panel) {
            height += panel_height(panel);
        }
    }
    Size::new(0, height.round() as i32)
}

fn to_rect(bounds: Bounds<Pixels>) -> Rect {
    let x: f32 = bounds.origin.x.into();
    let y: f32 = bounds.origin.y.into();
    let width: f32 = bounds.size.width.into();
    let height: f32 = bounds.size.height.into();
    Rect::new(
        x.round() as i32,
        y.round() as i32,
        width.round() as i32,
        height.round() as i32,
    )
}

/// [`WindowHost`] over an open gpui window.
///
/// gpui cannot move an open window, so only the size part of a new geometry
/// is applied. Placement happens once, when the window is opened, see
/// [`PendingHost`].
pub struct GpuiHost<'a> {
    window: &'a mut Window,
    chrome: Size,
    work_area: Rect,
}

impl<'a> GpuiHost<'a> {
    pub fn new(window: &'a mut Window, chrome: &Chrome, cx: &App) -> Self {
        let work_area = window
            .display(cx)
            .map(|display| to_rect(display.bounds()))
            .unwrap_or_else(|| to_rect(window.bounds()));
        Self {
            window,
            chrome: chrome_size(chrome),
            work_area,
        }
    }
}

impl WindowHost for GpuiHost<'_> {
    fn window_size(&self) -> Size {
        let viewport = self.window.viewport_size();
        let width: f32 = viewport.width.into();
        let height: f32 = viewport.height.into();
        Size::new(width.round() as i32, height.round() as i32)
    }

    fn video_area_size(&self) -> Size {
        self.window_size() - self.chrome
    }

    fn is_maximized(&self) -> bool {
        self.window.is_maximized()
    }

    fn available_area_at_cursor(&self) -> Rect {
        self.work_area
    }

    fn available_area_of_window(&self) -> Rect {
        self.work_area
    }

    fn set_geometry(&mut self, rect: Rect) {
        debug!(
            width = rect.size.width,
            height = rect.size.height,
            "resizing window"
        );
        self.window.resize(size(
            px(rect.size.width as f32),
            px(rect.size.height as f32),
        ));
    }

    fn refresh_info_layout(&mut self) {
        self.window.refresh();
    }
}

/// Host for the first sizing pass, run before the window exists. The video
/// area starts empty, so the whole window is chrome, and the computed
/// geometry becomes the window's initial bounds.
pub struct PendingHost {
    chrome: Size,
    screen: Rect,
    geometry: Option<Rect>,
}

impl PendingHost {
    pub fn new(chrome: &Chrome, cx: &App) -> Self {
        let screen = cx
            .primary_display()
            .map(|display| to_rect(display.bounds()))
            .unwrap_or(Rect::new(0, 0, 1280, 720));
        Self {
            chrome: chrome_size(chrome),
            screen,
            geometry: None,
        }
    }

    /// Bounds to open the window with.
    pub fn bounds(&self) -> Bounds<Pixels> {
        let rect = self.geometry.unwrap_or_else(|| {
            let fallback = Size::new(1280, 720);
            Rect::centered_in(fallback, self.screen)
        });
        Bounds {
            origin: gpui::point(px(rect.origin.x as f32), px(rect.origin.y as f32)),
            size: size(px(rect.size.width as f32), px(rect.size.height as f32)),
        }
    }
}

impl WindowHost for PendingHost {
    fn window_size(&self) -> Size {
        self.chrome
    }

    fn video_area_size(&self) -> Size {
        Size::default()
    }

    fn is_maximized(&self) -> bool {
        false
    }

    fn available_area_at_cursor(&self) -> Rect {
        self.screen
    }

    fn available_area_of_window(&self) -> Rect {
        self.screen
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.geometry = Some(rect);
    }

    fn refresh_info_layout(&mut self) {}
}

#[cfg(test)]
mod tests {
    use vidshell_core::{PanelVisibility, Preset};

    use super::*;

    fn chrome(menu_bar: bool, panels: PanelVisibility) -> Chrome {
        Chrome {
            menu_bar,
            control_section: true,
            info_section: true,
            panels,
        }
    }

    #[test]
    fn test_chrome_size_sums_visible_strips() {
        let normal = chrome(true, Preset::Normal.panels());
        let expected = MENU_BAR_HEIGHT + SEEKBAR_HEIGHT + CONTROLS_HEIGHT + 2.0 * PANEL_HEIGHT;
        assert_eq!(chrome_size(&normal), Size::new(0, expected as i32));

        let minimal = chrome(false, Preset::Minimal.panels());
        assert_eq!(chrome_size(&minimal), Size::default());
    }

    #[test]
    fn test_fullscreen_chrome_is_empty() {
        let fullscreen = Chrome {
            menu_bar: false,
            control_section: false,
            info_section: false,
            panels: Preset::Normal.panels(),
        };
        assert_eq!(chrome_size(&fullscreen), Size::default());
    }
}
