use crate::decoration::WindowFrame;
use crate::geometry::{Rect, Size};

/// Geometry primitives of the toolkit window hosting the controller.
///
/// Queried only while running deferred work, after the toolkit has laid
/// out the current set of panels.
pub trait WindowHost {
    /// Current size of the whole window.
    fn window_size(&self) -> Size;
    /// Current size of the area the video is drawn in.
    fn video_area_size(&self) -> Size;
    fn is_maximized(&self) -> bool;
    /// Work area (screen minus taskbars) of the screen under the cursor.
    fn available_area_at_cursor(&self) -> Rect;
    /// Work area of the screen currently showing the window.
    fn available_area_of_window(&self) -> Rect;
    fn set_geometry(&mut self, rect: Rect);
    /// Re-run layout of the information panel without resizing.
    fn refresh_info_layout(&mut self);
}

/// Window-level side effects requested by the controller, applied by the
/// host in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowRequest {
    SetMenuBarVisible(bool),
    SetFrame(WindowFrame),
    /// Re-show the window; some platforms hide it when frame flags change.
    Show,
    SetFullscreen(bool),
    SetTitle(String),
    /// Ask the user for a file and hand it to `MainWindow::open_path`.
    PromptOpenFile,
    OpenHomepage,
    ShowAbout,
    Close,
}
