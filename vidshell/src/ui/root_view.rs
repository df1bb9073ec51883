use std::time::Duration;

use gpui::{
    AnyElement, App, ClickEvent, Context, Div, ElementId, IntoElement, MouseButton,
    MouseDownEvent, PathPromptOptions, PromptButton, PromptLevel, Render, Stateful, Timer, Window,
    WindowDecorations, div, prelude::*, px, relative, rgb,
};
use tracing::{debug, info, warn};

use vidshell_core::{
    APP_NAME, ActionId, EngineEvents, LaunchOverrides, MainWindow, MenuCommand, MpvEngine, Panel,
    Settings, WindowFrame, WindowRequest,
};

use crate::host::{self, GpuiHost};

use super::menu_bar::{MENUS, MenuItem};

/// Minimum time between settings writes
const SAVE_DEBOUNCE: Duration = Duration::from_secs(1);

const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");

const MENU_TITLE_WIDTH: f32 = 72.0;
const MENU_WIDTH: f32 = 260.0;

/// Panels drawn below the transport controls, in order.
const INFO_PANELS: [Panel; 7] = [
    Panel::Information,
    Panel::Statistics,
    Panel::Status,
    Panel::Subresync,
    Panel::Playlist,
    Panel::Capture,
    Panel::Navigation,
];

const CONTROL_BUTTONS: &[(ActionId, &str)] = &[
    (ActionId::Play, "Play"),
    (ActionId::PlayPause, "Pause"),
    (ActionId::PlayStop, "Stop"),
    (ActionId::PlayFrameBackward, "|<"),
    (ActionId::PlayFrameForward, ">|"),
    (ActionId::PlayRateDecrease, "<<"),
    (ActionId::PlayRateIncrease, ">>"),
    (ActionId::PlayVolumeMute, "Mute"),
    (ActionId::PlayVolumeDown, "Vol -"),
    (ActionId::PlayVolumeUp, "Vol +"),
];

/// The player window: draws the chrome the controller asks for and applies
/// its window requests.
pub struct RootView {
    controller: MainWindow<MpvEngine>,
    /// Settings as stored on disk, without command line overrides
    settings: Settings,
    overrides: LaunchOverrides,
    open_menu: Option<usize>,
    flush_scheduled: bool,
    save_scheduled: bool,
}

impl RootView {
    pub fn new(
        controller: MainWindow<MpvEngine>,
        mut events: EngineEvents,
        settings: Settings,
        overrides: LaunchOverrides,
        cx: &mut Context<Self>,
    ) -> Self {
        // Engine notifications are applied on the UI thread
        cx.spawn(async move |this, cx| {
            while let Some(event) = events.next().await {
                let delivered = this.update(cx, |this, cx| {
                    this.controller.handle_event(event);
                    cx.notify();
                });
                if delivered.is_err() {
                    return;
                }
            }
            info!("mpv exited, quitting");
            cx.update(|cx| cx.quit()).ok();
        })
        .detach();

        Self {
            controller,
            settings,
            overrides,
            open_menu: None,
            flush_scheduled: false,
            save_scheduled: false,
        }
    }

    pub fn trigger(&mut self, id: ActionId, cx: &mut Context<Self>) {
        self.open_menu = None;
        if id.sets_size_factor() {
            self.overrides.clear_size_factor();
        }
        self.controller.trigger(id);
        cx.notify();
    }

    pub fn seek_by(&mut self, delta: f64, cx: &mut Context<Self>) {
        let target = (self.controller.seek_bar().value + delta).max(0.0);
        self.controller.seek(target);
        cx.notify();
    }

    fn run_menu_command(&mut self, command: MenuCommand, cx: &mut Context<Self>) {
        self.open_menu = None;
        self.controller.run_menu_command(command);
        cx.notify();
    }

    /// Apply queued window requests, then run the controller's deferred
    /// tasks against the laid-out window.
    fn flush(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.flush_scheduled = false;

        for request in self.controller.take_requests() {
            self.apply_request(request, window, cx);
        }

        let chrome = self.controller.chrome();
        let outcome = {
            let mut host = GpuiHost::new(window, &chrome, cx);
            self.controller.run_deferred(&mut host)
        };
        if outcome.save_settings {
            self.schedule_save(cx);
        }
        cx.notify();
    }

    fn apply_request(&mut self, request: WindowRequest, window: &mut Window, cx: &mut Context<Self>) {
        debug!(?request, "applying window request");
        match request {
            WindowRequest::SetMenuBarVisible(visible) => {
                if !visible {
                    self.open_menu = None;
                }
            }
            WindowRequest::SetFrame(frame) => window.request_decorations(match frame {
                WindowFrame::Standard => WindowDecorations::Server,
                WindowFrame::Frameless => WindowDecorations::Client,
            }),
            WindowRequest::Show => window.activate_window(),
            WindowRequest::SetFullscreen(fullscreen) => {
                if window.is_fullscreen() != fullscreen {
                    window.toggle_fullscreen();
                }
            }
            WindowRequest::SetTitle(title) => window.set_window_title(&title),
            WindowRequest::PromptOpenFile => self.prompt_open_file(cx),
            WindowRequest::OpenHomepage => open_homepage(cx),
            WindowRequest::ShowAbout => show_about(window, cx),
            WindowRequest::Close => {
                self.save_settings();
                cx.quit();
            }
        }
    }

    fn prompt_open_file(&mut self, cx: &mut Context<Self>) {
        let paths = cx.prompt_for_paths(PathPromptOptions {
            files: true,
            directories: false,
            multiple: false,
            prompt: Some("Open".into()),
        });

        cx.spawn(async move |this, cx| {
            let path = match paths.await {
                Ok(Ok(Some(paths))) => paths.into_iter().next(),
                Ok(Err(e)) => {
                    warn!(error = %e, "file dialog failed");
                    None
                }
                _ => None,
            };
            this.update(cx, |this, cx| {
                this.controller.open_path(path.as_deref());
                cx.notify();
            })
            .ok();
        })
        .detach();
    }

    fn schedule_save(&mut self, cx: &mut Context<Self>) {
        if self.save_scheduled {
            return;
        }
        self.save_scheduled = true;
        cx.spawn(async move |this, cx| {
            Timer::after(SAVE_DEBOUNCE).await;
            this.update(cx, |this, _cx| this.save_settings()).ok();
        })
        .detach();
    }

    fn save_settings(&mut self) {
        self.save_scheduled = false;
        let mut settings = self.settings.clone();
        self.controller.write_settings(&mut settings);
        self.overrides.restore(&mut settings, &self.settings);
        match settings.save() {
            Ok(()) => debug!("settings saved"),
            Err(e) => warn!(error = %e, "failed to save settings"),
        }
        self.settings = settings;
    }

    fn close_menu(&mut self, cx: &mut Context<Self>) {
        if self.open_menu.take().is_some() {
            cx.notify();
        }
    }

    fn render_menu_bar(&self, cx: &Context<Self>) -> impl IntoElement {
        div()
            .id("menu-bar")
            .h(px(host::MENU_BAR_HEIGHT))
            .flex()
            .flex_row()
            .items_center()
            .bg(rgb(0x2b2b2b))
            .children(MENUS.iter().enumerate().map(|(index, menu)| {
                div()
                    .id(("menu-title", index))
                    .w(px(MENU_TITLE_WIDTH))
                    .h_full()
                    .flex()
                    .items_center()
                    .justify_center()
                    .cursor_pointer()
                    .hover(|el| el.bg(rgb(0x3d3d3d)))
                    .when(self.open_menu == Some(index), |el| el.bg(rgb(0x3d3d3d)))
                    .child(menu.title)
                    .on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                        this.open_menu = match this.open_menu {
                            Some(open) if open == index => None,
                            _ => Some(index),
                        };
                        cx.notify();
                    }))
            }))
    }

    fn render_menu_dropdown(&self, index: usize, cx: &Context<Self>) -> impl IntoElement {
        let items = MENUS.get(index).map(|menu| menu.items).unwrap_or_default();
        div()
            .id("menu-dropdown")
            .absolute()
            .top(px(host::MENU_BAR_HEIGHT))
            .left(px(index as f32 * MENU_TITLE_WIDTH))
            .w(px(MENU_WIDTH))
            .py(px(4.0))
            .bg(rgb(0x2b2b2b))
            .border_1()
            .border_color(rgb(0x555555))
            .occlude()
            .children(
                items
                    .iter()
                    .enumerate()
                    .flat_map(|(position, item)| self.render_menu_item(position, item, cx)),
            )
    }

    fn render_menu_item(
        &self,
        position: usize,
        item: &MenuItem,
        cx: &Context<Self>,
    ) -> Vec<AnyElement> {
        match item {
            MenuItem::Separator => vec![
                div()
                    .h(px(1.0))
                    .my(px(4.0))
                    .bg(rgb(0x555555))
                    .into_any_element(),
            ],
            MenuItem::Action(id) => {
                let id = *id;
                let enabled = self.controller.is_enabled(id);
                let mark = if self.controller.is_checked(id) { "* " } else { "  " };
                let label = format!("{mark}{}", self.controller.action_label(id));
                vec![
                    menu_row(("menu-item", position), label, enabled)
                        .when(enabled, |el| {
                            el.on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                                this.trigger(id, cx)
                            }))
                        })
                        .into_any_element(),
                ]
            }
            MenuItem::Dynamic(kind) => {
                let menu = self.controller.dynamic_menu(*kind);
                let mut rows = vec![
                    div()
                        .px(px(10.0))
                        .py(px(2.0))
                        .text_color(rgb(0x888888))
                        .child(kind.title())
                        .into_any_element(),
                ];
                rows.extend(menu.entries().iter().enumerate().map(|(i, entry)| {
                    let command = entry.command;
                    menu_row((kind.title(), i), format!("    {}", entry.label), true)
                        .on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                            this.run_menu_command(command, cx)
                        }))
                        .into_any_element()
                }));
                rows
            }
        }
    }

    fn render_video_area(&self, cx: &Context<Self>) -> impl IntoElement {
        let caption = if self.controller.is_playing() {
            self.controller.title().to_string()
        } else {
            "Open a file to start playback".to_string()
        };
        div()
            .id("video")
            .flex_1()
            .flex()
            .items_center()
            .justify_center()
            .bg(rgb(0x000000))
            .text_color(rgb(0x555555))
            .child(caption)
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _: &MouseDownEvent, _window, cx| this.close_menu(cx)),
            )
    }

    fn render_seekbar(&self, cx: &Context<Self>) -> impl IntoElement {
        let bar = self.controller.seek_bar();
        let maximum = bar.maximum;
        div()
            .id("seekbar")
            .h(px(host::SEEKBAR_HEIGHT))
            .w_full()
            .relative()
            .bg(rgb(0x1e1e1e))
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .h_full()
                    .w(relative(bar.fraction() as f32))
                    .bg(if bar.enabled {
                        rgb(0x3d7cc9)
                    } else {
                        rgb(0x3a3a3a)
                    }),
            )
            .children(bar.ticks.iter().filter(|_| maximum > 0.0).map(|tick| {
                div()
                    .absolute()
                    .top_0()
                    .h_full()
                    .w(px(2.0))
                    .left(relative((tick.time / maximum) as f32))
                    .bg(rgb(0xe0c060))
            }))
            .when(bar.enabled, |el| {
                el.cursor_pointer().on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, event: &MouseDownEvent, window, cx| {
                        let width: f32 = window.viewport_size().width.into();
                        let x: f32 = event.position.x.into();
                        if width > 0.0 {
                            let fraction = f64::from((x / width).clamp(0.0, 1.0));
                            let target = fraction * this.controller.seek_bar().maximum;
                            this.controller.seek(target);
                            cx.notify();
                        }
                    }),
                )
            })
    }

    fn render_controls(&self, cx: &Context<Self>) -> impl IntoElement {
        div()
            .id("controls")
            .h(px(host::CONTROLS_HEIGHT))
            .flex()
            .flex_row()
            .items_center()
            .gap(px(4.0))
            .px(px(6.0))
            .bg(rgb(0x252525))
            .children(
                CONTROL_BUTTONS
                    .iter()
                    .map(|&(id, label)| self.render_button(id, label, cx)),
            )
            .child(div().flex_1())
            .child(format!("{}%", self.controller.volume()))
    }

    fn render_button(&self, id: ActionId, label: &'static str, cx: &Context<Self>) -> impl IntoElement {
        let enabled = self.controller.is_enabled(id);
        let checked = self.controller.is_checked(id);
        div()
            .id(label)
            .px(px(8.0))
            .py(px(4.0))
            .rounded(px(4.0))
            .bg(if checked { rgb(0x3d5a80) } else { rgb(0x333333) })
            .child(label)
            .when(!enabled, |el| el.text_color(rgb(0x666666)))
            .when(enabled, |el| {
                el.cursor_pointer()
                    .hover(|el| el.bg(rgb(0x444444)))
                    .on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                        this.trigger(id, cx)
                    }))
            })
    }

    fn render_info_panel(&self, panel: Panel) -> impl IntoElement {
        let text = match panel {
            Panel::Information => self.controller.title().to_string(),
            Panel::Statistics => format!(
                "Speed: {}x  Volume: {}%{}",
                self.controller.playback_speed(),
                self.controller.volume(),
                if self.controller.is_muted() { " (muted)" } else { "" }
            ),
            Panel::Status => format!(
                "{}    {}",
                self.controller.status().label(),
                self.controller.time_text()
            ),
            other => format!("{other:?}"),
        };
        div()
            .h(px(host::panel_height(panel)))
            .px(px(8.0))
            .flex()
            .items_center()
            .border_t_1()
            .border_color(rgb(0x333333))
            .bg(rgb(0x1e1e1e))
            .child(text)
    }
}

fn menu_row(id: impl Into<ElementId>, label: String, enabled: bool) -> Stateful<Div> {
    div()
        .id(id)
        .px(px(10.0))
        .py(px(3.0))
        .child(label)
        .when(enabled, |el| {
            el.cursor_pointer().hover(|el| el.bg(rgb(0x3d5a80)))
        })
        .when(!enabled, |el| el.text_color(rgb(0x666666)))
}

fn open_homepage(cx: &mut App) {
    if HOMEPAGE.is_empty() {
        warn!("no homepage configured for this build");
        return;
    }
    cx.open_url(HOMEPAGE);
}

fn show_about(window: &mut Window, cx: &mut Context<RootView>) {
    let detail = format!(
        "{APP_NAME} {}\nPlayback by mpv",
        env!("CARGO_PKG_VERSION")
    );
    let answer = window.prompt(
        PromptLevel::Info,
        &format!("About {APP_NAME}"),
        Some(&detail),
        &[PromptButton::ok("OK")],
        cx,
    );
    cx.spawn(async move |_this, _cx| {
        answer.await.ok();
    })
    .detach();
}

impl Render for RootView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if self.controller.has_pending_work() && !self.flush_scheduled {
            self.flush_scheduled = true;
            cx.defer_in(window, |this, window, cx| this.flush(window, cx));
        }

        let chrome = self.controller.chrome();
        let open_menu = self.open_menu.filter(|_| chrome.menu_bar);

        div()
            .id("root")
            .size_full()
            .relative()
            .flex()
            .flex_col()
            .bg(rgb(0x000000))
            .text_color(rgb(0xdddddd))
            .text_size(px(13.0))
            .when(chrome.menu_bar, |el| el.child(self.render_menu_bar(cx)))
            .child(self.render_video_area(cx))
            .when(chrome.shows(Panel::Seekbar), |el| {
                el.child(self.render_seekbar(cx))
            })
            .when(chrome.shows(Panel::Controls), |el| {
                el.child(self.render_controls(cx))
            })
            .children(
                INFO_PANELS
                    .into_iter()
                    .filter(|&panel| chrome.shows(panel))
                    .map(|panel| self.render_info_panel(panel)),
            )
            .when_some(open_menu, |el, index| {
                el.child(self.render_menu_dropdown(index, cx))
            })
    }
}
