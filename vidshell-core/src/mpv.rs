//! [`PlaybackEngine`] backed by an external mpv process.
//!
//! mpv is started in idle mode with its JSON IPC server on a unix socket.
//! Commands are written from the UI thread; a reader thread parses
//! property changes and events, keeps a snapshot of the values the
//! controller queries synchronously, and forwards [`EngineEvent`]s over a
//! channel.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{Chapter, EngineEvent, PlaybackEngine};
use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::settings::EngineSettings;

const CONNECT_ATTEMPTS: u32 = 50;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(100);
const MESSAGE_DURATION_MS: u64 = 1000;

/// Properties observed for the lifetime of the process. The observer id is
/// the index in this list.
const OBSERVED_PROPERTIES: &[&str] = &[
    "time-pos",
    "duration",
    "pause",
    "media-title",
    "chapter-list",
    "track-list",
    "video-params",
    "chapter",
];

/// Latest property values, answered from memory by the query methods.
#[derive(Debug, Clone, Default, PartialEq)]
struct Snapshot {
    time: f64,
    length: f64,
    video_size: Size,
    chapter: i64,
    chapter_count: i64,
}

pub struct MpvEngine {
    child: Child,
    writer: UnixStream,
    socket_path: PathBuf,
    snapshot: Arc<Mutex<Snapshot>>,
    reader: Option<JoinHandle<()>>,
}

/// Receiving end of the engine's notifications.
pub struct EngineEvents {
    rx: mpsc::UnboundedReceiver<EngineEvent>,
}

impl EngineEvents {
    /// Wait for the next event. `None` once mpv has exited.
    pub async fn next(&mut self) -> Option<EngineEvent> {
        self.rx.recv().await
    }
}

impl MpvEngine {
    /// Start mpv and connect to its IPC socket.
    pub fn spawn(settings: &EngineSettings) -> Result<(Self, EngineEvents)> {
        let socket_path =
            std::env::temp_dir().join(format!("vidshell-mpv-{}.sock", std::process::id()));
        // A stale socket from a crashed run would satisfy the first connect
        let _ = fs::remove_file(&socket_path);

        let mut child = Command::new(&settings.mpv_binary)
            .args(command_args(settings, &socket_path))
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| Error::EngineSpawn {
                binary: settings.mpv_binary.display().to_string(),
                source,
            })?;

        let (writer, reader_stream) = match connect(&socket_path) {
            Ok(pair) => pair,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };

        let snapshot = Arc::new(Mutex::new(Snapshot::default()));
        let (tx, rx) = mpsc::unbounded_channel();

        let reader = {
            let snapshot = Arc::clone(&snapshot);
            thread::Builder::new()
                .name("mpv-ipc".to_string())
                .spawn(move || read_messages(reader_stream, snapshot, tx))?
        };

        let mut engine = Self {
            child,
            writer,
            socket_path,
            snapshot,
            reader: Some(reader),
        };
        for (id, name) in OBSERVED_PROPERTIES.iter().enumerate() {
            engine.command(json!(["observe_property", id, name]));
        }

        info!(
            pid = engine.child.id(),
            socket = %engine.socket_path.display(),
            "mpv started"
        );
        Ok((engine, EngineEvents { rx }))
    }

    fn command(&mut self, args: Value) {
        let mut line = json!({ "command": &args }).to_string();
        line.push('\n');
        if let Err(e) = self.writer.write_all(line.as_bytes()) {
            warn!(error = %e, command = %args, "mpv command failed");
        }
    }

    fn set_property(&mut self, name: &str, value: Value) {
        self.command(json!(["set_property", name, value]));
    }
}

impl PlaybackEngine for MpvEngine {
    fn open(&mut self, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }
        self.command(json!(["loadfile", path.to_string_lossy(), "replace"]));
    }

    fn stop(&mut self) {
        self.command(json!(["stop"]));
    }

    fn set_paused(&mut self, paused: bool) {
        self.set_property("pause", json!(paused));
    }

    fn set_speed(&mut self, speed: f64) {
        self.set_property("speed", json!(speed));
    }

    fn set_volume(&mut self, volume: i32) {
        self.set_property("volume", json!(volume));
    }

    fn set_mute(&mut self, muted: bool) {
        self.set_property("mute", json!(muted));
    }

    fn set_time(&mut self, seconds: f64) {
        self.command(json!(["seek", seconds, "absolute"]));
    }

    fn step_forward(&mut self) {
        self.command(json!(["frame-step"]));
    }

    fn step_backward(&mut self) {
        self.command(json!(["frame-back-step"]));
    }

    fn set_chapter(&mut self, index: i64) -> bool {
        {
            let mut snapshot = self.snapshot.lock();
            if index < 0 || index >= snapshot.chapter_count {
                return false;
            }
            snapshot.chapter = index;
        }
        self.set_property("chapter", json!(index));
        true
    }

    fn set_audio_track(&mut self, id: i64) {
        self.set_property("aid", json!(id));
    }

    fn set_subtitle_track(&mut self, id: i64) {
        self.set_property("sid", json!(id));
    }

    fn set_video_track(&mut self, id: i64) {
        self.set_property("vid", json!(id));
    }

    fn show_message(&mut self, text: &str) {
        self.command(json!(["show-text", text, MESSAGE_DURATION_MS]));
    }

    fn play_time(&self) -> f64 {
        self.snapshot.lock().time
    }

    fn play_length(&self) -> f64 {
        self.snapshot.lock().length
    }

    fn video_size(&self) -> Size {
        self.snapshot.lock().video_size
    }

    fn chapter(&self) -> i64 {
        self.snapshot.lock().chapter
    }
}

impl Drop for MpvEngine {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = self.writer.shutdown(Shutdown::Both);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        let _ = fs::remove_file(&self.socket_path);
        debug!("mpv stopped");
    }
}

fn command_args(settings: &EngineSettings, socket_path: &Path) -> Vec<String> {
    let mut args = vec![
        "--idle=yes".to_string(),
        "--force-window=yes".to_string(),
        "--no-terminal".to_string(),
        format!("--input-ipc-server={}", socket_path.display()),
    ];
    args.extend(settings.extra_args.iter().cloned());
    args
}

/// Connect to the IPC socket, waiting for mpv to create it. Returns a
/// writer and a reader handle on the same connection.
fn connect(socket_path: &Path) -> Result<(UnixStream, UnixStream)> {
    for attempt in 1..=CONNECT_ATTEMPTS {
        match UnixStream::connect(socket_path) {
            Ok(stream) => {
                let reader = stream.try_clone()?;
                return Ok((stream, reader));
            }
            Err(e) => {
                debug!(attempt, error = %e, "waiting for mpv IPC socket");
                thread::sleep(CONNECT_RETRY_DELAY);
            }
        }
    }
    Err(Error::EngineConnect(socket_path.display().to_string()))
}

fn read_messages(
    stream: UnixStream,
    snapshot: Arc<Mutex<Snapshot>>,
    tx: mpsc::UnboundedSender<EngineEvent>,
) {
    for line in BufReader::new(stream).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "mpv IPC read failed");
                break;
            }
        };
        let message: Value = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, line, "skipping malformed mpv message");
                continue;
            }
        };
        let event = translate(&message, &mut snapshot.lock());
        if let Some(event) = event {
            if tx.send(event).is_err() {
                break;
            }
        }
    }
    debug!("mpv IPC connection closed");
}

/// Turn one IPC message into an engine notification, updating the snapshot
/// on the way. Command replies and unobserved events yield nothing.
fn translate(message: &Value, snapshot: &mut Snapshot) -> Option<EngineEvent> {
    match message.get("event")?.as_str()? {
        "file-loaded" => Some(EngineEvent::PlaybackStarted),
        "end-file" => {
            // A user stop or a replacing loadfile is already handled by the
            // controller, and a redirect is followed by the real file
            let reason = message.get("reason").and_then(Value::as_str);
            (!matches!(reason, Some("stop" | "redirect")))
                .then_some(EngineEvent::PlaybackFinished)
        }
        "property-change" => {
            let name = message.get("name")?.as_str()?;
            match message.get("data") {
                Some(data) => property_changed(name, data, snapshot),
                None => property_changed(name, &Value::Null, snapshot),
            }
        }
        _ => None,
    }
}

fn property_changed(name: &str, data: &Value, snapshot: &mut Snapshot) -> Option<EngineEvent> {
    match name {
        "time-pos" => {
            let time = data.as_f64()?;
            snapshot.time = time;
            Some(EngineEvent::PlayTimeChanged(time))
        }
        "duration" => {
            let length = data.as_f64()?;
            snapshot.length = length;
            Some(EngineEvent::PlayLengthChanged(length))
        }
        "pause" => Some(EngineEvent::PausedChanged(data.as_bool()?)),
        "media-title" => Some(EngineEvent::MediaTitleChanged(
            data.as_str().unwrap_or_default().to_string(),
        )),
        "chapter-list" => {
            let chapters: Vec<Chapter> = parse_list(name, data);
            snapshot.chapter_count = chapters.len() as i64;
            Some(EngineEvent::ChaptersChanged(chapters))
        }
        "track-list" => Some(EngineEvent::TracksChanged(parse_list(name, data))),
        "video-params" => {
            let size = Size::new(
                data.get("dw").and_then(Value::as_i64).unwrap_or(0) as i32,
                data.get("dh").and_then(Value::as_i64).unwrap_or(0) as i32,
            );
            if size == snapshot.video_size {
                return None;
            }
            snapshot.video_size = size;
            (!size.is_empty()).then_some(EngineEvent::VideoSizeChanged(size))
        }
        "chapter" => {
            snapshot.chapter = data.as_i64().unwrap_or(-1);
            None
        }
        _ => None,
    }
}

fn parse_list<T: serde::de::DeserializeOwned>(name: &str, data: &Value) -> Vec<T> {
    if data.is_null() {
        return Vec::new();
    }
    serde_json::from_value(data.clone()).unwrap_or_else(|e| {
        warn!(property = name, error = %e, "unexpected mpv property value");
        Vec::new()
    })
}
