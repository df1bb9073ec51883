mod actions;
mod app_state;
mod menu_bar;
mod root_view;

pub use actions::register_shortcuts;
pub use app_state::AppState;
pub use root_view::RootView;
