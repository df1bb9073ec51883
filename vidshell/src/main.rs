/*!
    vidshell

    Desktop video player window around an mpv engine. The window carries a
    menu bar, seek bar, transport controls and info panels, sizes itself to
    the video at the chosen zoom, and can hide its menu and borders.

    Keyboard Controls:
    - Space: Pause/Resume
    - . / ,: Frame step forward/backward
    - Ctrl+Up/Down: Playback rate
    - Up/Down: Volume
    - Left/Right: Seek 10s
    - PageUp/PageDown: Previous/next chapter
    - Ctrl+0: Cycle menu and borders
    - 1/2/3: Minimal/Compact/Normal view
    - Alt+Enter: Fullscreen
    - Alt+X: Exit

    Prerequisites:
    - mpv on PATH, or pass `--mpv`

    Usage:
      cargo run --release -- /path/to/video.mkv
      RUST_LOG=vidshell_core=debug cargo run -- --zoom 0.5
*/

#[cfg(not(unix))]
compile_error!("vidshell talks to mpv over a unix socket and only builds on unix targets");

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use gpui::{App, AppContext, Application, TitlebarOptions, WindowBounds, WindowOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vidshell_core::{APP_NAME, EngineEvents, LaunchOverrides, MainWindow, MpvEngine, Settings};

mod host;
mod ui;

use host::PendingHost;
use ui::{AppState, RootView, register_shortcuts};

#[derive(Parser, Debug)]
#[command(name = "vidshell")]
#[command(about = "Video player window driving an mpv engine")]
struct Args {
    /// Media file to open on startup
    path: Option<PathBuf>,

    /// Auto-size zoom factor (0.5, 1, 2); 0 disables auto-sizing
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Start in fullscreen
    #[arg(short, long)]
    fullscreen: bool,

    /// mpv binary to launch
    #[arg(long)]
    mpv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let settings = Settings::load();
    let overrides = LaunchOverrides {
        size_factor: args.zoom,
        mpv_binary: args.mpv.clone(),
    };
    let runtime = overrides.apply(&settings);

    let (engine, events) = MpvEngine::spawn(&runtime.engine).context("failed to start mpv")?;
    let controller = MainWindow::new(engine, &runtime);

    Application::new().run(move |cx: &mut App| {
        register_shortcuts(cx);

        if let Err(e) = open_player_window(controller, events, settings, overrides, args, cx) {
            error!("failed to open player window: {e:#}");
            cx.quit();
        }
    });

    Ok(())
}

fn open_player_window(
    mut controller: MainWindow<MpvEngine>,
    events: EngineEvents,
    settings: Settings,
    overrides: LaunchOverrides,
    args: Args,
    cx: &mut App,
) -> anyhow::Result<()> {
    // gpui places a window only when opening it, so the first sizing pass
    // runs here and its geometry becomes the initial bounds
    let mut pending = PendingHost::new(&controller.chrome(), cx);
    controller.run_deferred(&mut pending);

    if args.fullscreen {
        controller.set_fullscreen(true);
    }
    controller.open_path(args.path.as_deref());

    let title = controller.title().to_string();
    let window = cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(pending.bounds())),
            focus: true,
            titlebar: Some(TitlebarOptions {
                title: Some(title.into()),
                appears_transparent: false,
                ..Default::default()
            }),
            ..Default::default()
        },
        |_window, cx| cx.new(|cx| RootView::new(controller, events, settings, overrides, cx)),
    )?;

    cx.set_global(AppState::new(window));
    cx.activate(true);
    info!("{APP_NAME} window opened");
    Ok(())
}
