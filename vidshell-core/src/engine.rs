use std::path::Path;

use serde::Deserialize;

use crate::geometry::Size;

/// Commands and queries the controller needs from a playback engine.
///
/// Commands are fire-and-forget: a command the engine cannot honor leaves
/// its state unchanged, and the next notification reconciles the display.
/// The only command with a result is [`set_chapter`](Self::set_chapter),
/// whose failure means "past the last chapter".
pub trait PlaybackEngine {
    /// Load and start playing a file. An empty path is ignored.
    fn open(&mut self, path: &Path);
    fn stop(&mut self);
    fn set_paused(&mut self, paused: bool);
    fn set_speed(&mut self, speed: f64);
    /// Volume in percent, 0..=100.
    fn set_volume(&mut self, volume: i32);
    fn set_mute(&mut self, muted: bool);
    /// Seek to an absolute position in seconds.
    fn set_time(&mut self, seconds: f64);
    fn step_forward(&mut self);
    fn step_backward(&mut self);
    fn set_chapter(&mut self, index: i64) -> bool;
    fn set_audio_track(&mut self, id: i64);
    fn set_subtitle_track(&mut self, id: i64);
    fn set_video_track(&mut self, id: i64);
    /// Show a transient on-screen message over the video.
    fn show_message(&mut self, text: &str);

    fn play_time(&self) -> f64;
    fn play_length(&self) -> f64;
    /// Native pixel size of the current video.
    fn video_size(&self) -> Size;
    fn chapter(&self) -> i64;
}

/// Asynchronous notifications from the engine, delivered on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PlayTimeChanged(f64),
    PlayLengthChanged(f64),
    PlaybackStarted,
    PausedChanged(bool),
    PlaybackFinished,
    MediaTitleChanged(String),
    ChaptersChanged(Vec<Chapter>),
    TracksChanged(Vec<Track>),
    VideoSizeChanged(Size),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chapter {
    /// Start time in seconds
    pub time: f64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TrackKind {
    Audio,
    Subtitle,
    Video,
    /// Any track type without a menu of its own
    Other(String),
}

impl From<String> for TrackKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "audio" => Self::Audio,
            "sub" => Self::Subtitle,
            "video" => Self::Video,
            _ => Self::Other(kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub codec: Option<String>,
    pub lang: Option<String>,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_kind_from_type_string() {
        assert_eq!(TrackKind::from("audio".to_string()), TrackKind::Audio);
        assert_eq!(TrackKind::from("sub".to_string()), TrackKind::Subtitle);
        assert_eq!(TrackKind::from("video".to_string()), TrackKind::Video);
        assert_eq!(
            TrackKind::from("attachment".to_string()),
            TrackKind::Other("attachment".to_string())
        );
    }

    #[test]
    fn test_track_deserializes_optional_fields() {
        let track: Track = serde_json::from_str(
            r#"{"id": 2, "type": "sub", "lang": "eng", "default": false, "external": false}"#,
        )
        .unwrap();
        assert_eq!(track.id, 2);
        assert_eq!(track.kind, TrackKind::Subtitle);
        assert_eq!(track.codec, None);
        assert_eq!(track.lang.as_deref(), Some("eng"));
        assert_eq!(track.title, None);
    }

    #[test]
    fn test_chapter_title_defaults_to_empty() {
        let chapter: Chapter = serde_json::from_str(r#"{"time": 12.5}"#).unwrap();
        assert_eq!(chapter.time, 12.5);
        assert!(chapter.title.is_empty());
    }
}
