use crate::APP_NAME;
use crate::engine::{Chapter, Track};

/// Format seconds as `h:mm:ss.mmm`.
///
/// Milliseconds are rounded half up and negative times clamp to zero.
pub fn timestamp(seconds: f64) -> String {
    let millis = ((seconds * 1000.0 + 0.5) as i64).max(0);
    format!(
        "{}:{:02}:{:02}.{:03}",
        millis / 3_600_000,
        millis / 60_000 % 60,
        millis % 60_000 / 1000,
        millis % 1000
    )
}

/// Text for the time readout: `<time> / <length>`.
pub fn time_display(time: f64, length: f64) -> String {
    format!("{} / {}", timestamp(time), timestamp(length))
}

pub fn chapter_label(chapter: &Chapter) -> String {
    format!("[{}] - {}", timestamp(chapter.time), chapter.title)
}

/// Menu label for a track: `id: [codec] lang - title `.
///
/// Only the parts the engine reported are included.
pub fn track_label(track: &Track) -> String {
    let mut label = format!("{}: ", track.id);
    if let Some(codec) = &track.codec {
        label.push_str(&format!("[{codec}] "));
    }
    if let Some(lang) = &track.lang {
        label.push_str(&format!("{lang} "));
    }
    if let Some(title) = &track.title {
        label.push_str(&format!("- {title} "));
    }
    label
}

pub fn window_title(media_title: &str) -> String {
    if media_title.is_empty() {
        APP_NAME.to_string()
    } else {
        format!("{APP_NAME} - {media_title}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TrackKind;

    #[test]
    fn test_timestamp() {
        assert_eq!(timestamp(0.0), "0:00:00.000");
        assert_eq!(timestamp(61.5), "0:01:01.500");
        assert_eq!(timestamp(3723.0456), "1:02:03.046");
        assert_eq!(timestamp(36000.0), "10:00:00.000");
    }

    #[test]
    fn test_timestamp_rounds_half_up() {
        // 2.0625s is exact in binary: 2062.5ms rounds up
        assert_eq!(timestamp(2.0625), "0:00:02.063");
        assert_eq!(timestamp(59.9996), "0:01:00.000");
    }

    #[test]
    fn test_timestamp_clamps_negative() {
        assert_eq!(timestamp(-5.0), "0:00:00.000");
        assert_eq!(timestamp(-0.0004), "0:00:00.000");
    }

    #[test]
    fn test_time_display() {
        assert_eq!(time_display(5.0, 90.0), "0:00:05.000 / 0:01:30.000");
    }

    #[test]
    fn test_chapter_label() {
        let chapter = Chapter {
            time: 75.25,
            title: "Opening".to_string(),
        };
        assert_eq!(chapter_label(&chapter), "[0:01:15.250] - Opening");
    }

    #[test]
    fn test_track_label_full() {
        let track = Track {
            id: 1,
            kind: TrackKind::Audio,
            codec: Some("aac".to_string()),
            lang: Some("jpn".to_string()),
            title: Some("Stereo".to_string()),
        };
        assert_eq!(track_label(&track), "1: [aac] jpn - Stereo ");
    }

    #[test]
    fn test_track_label_sparse() {
        let track = Track {
            id: 3,
            kind: TrackKind::Subtitle,
            codec: None,
            lang: Some("eng".to_string()),
            title: None,
        };
        assert_eq!(track_label(&track), "3: eng ");
    }

    #[test]
    fn test_window_title() {
        assert_eq!(window_title(""), "Video Player");
        assert_eq!(window_title("movie.mkv"), "Video Player - movie.mkv");
    }
}
