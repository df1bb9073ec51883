use gpui::{Global, WindowHandle};

use super::root_view::RootView;

/// Application-wide handle to the player window, used by the global action
/// handlers to reach the controller.
#[derive(Default)]
pub struct AppState {
    pub window: Option<WindowHandle<RootView>>,
}

impl Global for AppState {}

impl AppState {
    pub fn new(window: WindowHandle<RootView>) -> Self {
        Self {
            window: Some(window),
        }
    }
}
