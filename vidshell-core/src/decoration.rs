use serde::{Deserialize, Serialize};

/// Which window chrome is visible.
///
/// The menu bar belongs to the application; the frame (borders and title
/// bar) belongs to the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DecorationState {
    /// OS frame and in-app menu bar
    #[default]
    AllDecorations,
    /// OS frame, no menu bar
    NoMenu,
    /// Borderless, no menu bar
    NoDecorations,
}

/// Window frame flags applied for a decoration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFrame {
    /// Title bar, system menu, min/max and close buttons
    Standard,
    /// No OS-drawn chrome at all
    Frameless,
}

impl DecorationState {
    /// State reached by the "hide menu" cycle action.
    pub fn next(self) -> Self {
        match self {
            Self::AllDecorations => Self::NoMenu,
            Self::NoMenu => Self::NoDecorations,
            Self::NoDecorations => Self::AllDecorations,
        }
    }

    pub fn menu_bar_visible(self) -> bool {
        self == Self::AllDecorations
    }

    pub fn frame(self) -> WindowFrame {
        match self {
            Self::AllDecorations | Self::NoMenu => WindowFrame::Standard,
            Self::NoDecorations => WindowFrame::Frameless,
        }
    }

    /// Label for the cycle action while in this state; it names what
    /// triggering the action will do next.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::AllDecorations => "Hide Menu",
            Self::NoMenu => "Hide Borders",
            Self::NoDecorations => "Show Caption and Menu",
        }
    }
}

/// Everything a host must apply after the decoration state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationChange {
    pub state: DecorationState,
    pub menu_bar_visible: bool,
    pub frame: WindowFrame,
    pub toggle_label: &'static str,
}

impl From<DecorationState> for DecorationChange {
    fn from(state: DecorationState) -> Self {
        Self {
            state,
            menu_bar_visible: state.menu_bar_visible(),
            frame: state.frame(),
            toggle_label: state.toggle_label(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecorationStateMachine {
    state: DecorationState,
}

impl DecorationStateMachine {
    pub fn new(state: DecorationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> DecorationState {
        self.state
    }

    /// Advance to the next state in the cycle.
    pub fn cycle(&mut self) -> DecorationChange {
        self.set(self.state.next())
    }

    /// Force a state, as the view presets do.
    pub fn set(&mut self, state: DecorationState) -> DecorationChange {
        self.state = state;
        DecorationChange::from(state)
    }

    /// The change that re-applies the current state, used when a window is
    /// first shown.
    pub fn current(&self) -> DecorationChange {
        DecorationChange::from(self.state)
    }
}
