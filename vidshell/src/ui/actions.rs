use gpui::{Action, App, KeyBinding};
use tracing::debug;

use vidshell_core::{ActionId, DEFAULT_KEY_BINDINGS};

use super::app_state::AppState;

gpui::actions!(
    vidshell,
    [
        QuickOpen,
        Open,
        Close,
        Exit,
        CycleDecorations,
        PresetMinimal,
        PresetCompact,
        PresetNormal,
        ToggleFullscreen,
        Zoom50,
        Zoom100,
        Zoom200,
        TogglePause,
        Stop,
        FrameStep,
        FrameStepBackward,
        DecreaseRate,
        IncreaseRate,
        ResetRate,
        VolumeUp,
        VolumeDown,
        ToggleMute,
        PreviousChapter,
        NextChapter,
        SeekForward,
        SeekBackward,
        About,
    ]
);

/// Seconds jumped by the arrow keys.
const SEEK_STEP: f64 = 10.0;

pub fn register_shortcuts(app: &mut App) {
    app.bind_keys(key_bindings());

    route::<QuickOpen>(app, ActionId::FileOpenQuick);
    route::<Open>(app, ActionId::FileOpen);
    route::<Close>(app, ActionId::FileClose);
    route::<Exit>(app, ActionId::FileExit);
    route::<CycleDecorations>(app, ActionId::ViewHideMenu);
    route::<PresetMinimal>(app, ActionId::ViewPresetMinimal);
    route::<PresetCompact>(app, ActionId::ViewPresetCompact);
    route::<PresetNormal>(app, ActionId::ViewPresetNormal);
    route::<ToggleFullscreen>(app, ActionId::ViewFullscreen);
    route::<Zoom50>(app, ActionId::ViewZoom50);
    route::<Zoom100>(app, ActionId::ViewZoom100);
    route::<Zoom200>(app, ActionId::ViewZoom200);
    route::<TogglePause>(app, ActionId::PlayPause);
    route::<Stop>(app, ActionId::PlayStop);
    route::<FrameStep>(app, ActionId::PlayFrameForward);
    route::<FrameStepBackward>(app, ActionId::PlayFrameBackward);
    route::<DecreaseRate>(app, ActionId::PlayRateDecrease);
    route::<IncreaseRate>(app, ActionId::PlayRateIncrease);
    route::<ResetRate>(app, ActionId::PlayRateReset);
    route::<VolumeUp>(app, ActionId::PlayVolumeUp);
    route::<VolumeDown>(app, ActionId::PlayVolumeDown);
    route::<ToggleMute>(app, ActionId::PlayVolumeMute);
    route::<PreviousChapter>(app, ActionId::NavigateChapterPrevious);
    route::<NextChapter>(app, ActionId::NavigateChapterNext);
    route::<About>(app, ActionId::HelpAbout);

    app.on_action(|_: &SeekForward, app: &mut App| seek_by(app, SEEK_STEP));
    app.on_action(|_: &SeekBackward, app: &mut App| seek_by(app, -SEEK_STEP));
}

/// Forward a key-bound gpui action to the controller's action table.
fn route<A: Action>(app: &mut App, id: ActionId) {
    app.on_action(move |_: &A, app: &mut App| {
        let Some(handle) = app.try_global::<AppState>().and_then(|state| state.window) else {
            debug!(?id, "no player window for action");
            return;
        };
        handle
            .update(app, |view, _window, cx| view.trigger(id, cx))
            .ok();
    });
}

fn seek_by(app: &mut App, delta: f64) {
    if let Some(handle) = app.try_global::<AppState>().and_then(|state| state.window) {
        handle
            .update(app, |view, _window, cx| view.seek_by(delta, cx))
            .ok();
    }
}

/// gpui binding for a keystroke from the controller's default table.
fn key_binding(keystroke: &str, id: ActionId) -> Option<KeyBinding> {
    let binding = match id {
        ActionId::FileOpenQuick => KeyBinding::new(keystroke, QuickOpen, None),
        ActionId::FileOpen => KeyBinding::new(keystroke, Open, None),
        ActionId::FileClose => KeyBinding::new(keystroke, Close, None),
        ActionId::FileExit => KeyBinding::new(keystroke, Exit, None),
        ActionId::ViewHideMenu => KeyBinding::new(keystroke, CycleDecorations, None),
        ActionId::ViewPresetMinimal => KeyBinding::new(keystroke, PresetMinimal, None),
        ActionId::ViewPresetCompact => KeyBinding::new(keystroke, PresetCompact, None),
        ActionId::ViewPresetNormal => KeyBinding::new(keystroke, PresetNormal, None),
        ActionId::ViewFullscreen => KeyBinding::new(keystroke, ToggleFullscreen, None),
        ActionId::ViewZoom50 => KeyBinding::new(keystroke, Zoom50, None),
        ActionId::ViewZoom100 => KeyBinding::new(keystroke, Zoom100, None),
        ActionId::ViewZoom200 => KeyBinding::new(keystroke, Zoom200, None),
        ActionId::PlayPause => KeyBinding::new(keystroke, TogglePause, None),
        ActionId::PlayStop => KeyBinding::new(keystroke, Stop, None),
        ActionId::PlayFrameForward => KeyBinding::new(keystroke, FrameStep, None),
        ActionId::PlayFrameBackward => KeyBinding::new(keystroke, FrameStepBackward, None),
        ActionId::PlayRateDecrease => KeyBinding::new(keystroke, DecreaseRate, None),
        ActionId::PlayRateIncrease => KeyBinding::new(keystroke, IncreaseRate, None),
        ActionId::PlayRateReset => KeyBinding::new(keystroke, ResetRate, None),
        ActionId::PlayVolumeUp => KeyBinding::new(keystroke, VolumeUp, None),
        ActionId::PlayVolumeDown => KeyBinding::new(keystroke, VolumeDown, None),
        ActionId::PlayVolumeMute => KeyBinding::new(keystroke, ToggleMute, None),
        ActionId::NavigateChapterPrevious => KeyBinding::new(keystroke, PreviousChapter, None),
        ActionId::NavigateChapterNext => KeyBinding::new(keystroke, NextChapter, None),
        ActionId::HelpAbout => KeyBinding::new(keystroke, About, None),
        _ => {
            debug!(?id, keystroke, "no gpui action for key binding");
            return None;
        }
    };
    Some(binding)
}

fn key_bindings() -> Vec<KeyBinding> {
    let mut bindings: Vec<KeyBinding> = DEFAULT_KEY_BINDINGS
        .iter()
        .filter_map(|&(keystroke, id)| key_binding(keystroke, id))
        .collect();
    bindings.push(KeyBinding::new("right", SeekForward, None));
    bindings.push(KeyBinding::new("left", SeekBackward, None));
    bindings
}
