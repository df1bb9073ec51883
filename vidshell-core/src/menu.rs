use crate::engine::{Chapter, Track, TrackKind};
use crate::format;

/// What a generated menu entry does when activated.
///
/// Each entry carries the identifier it was built for, so activation needs
/// no lookup back into the engine's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    SelectChapter(i64),
    SelectAudioTrack(i64),
    SelectSubtitleTrack(i64),
    SelectVideoTrack(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub command: MenuCommand,
}

/// Menus whose entries come from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicMenuKind {
    AudioTracks,
    SubtitleTracks,
    VideoTracks,
    Chapters,
}

impl DynamicMenuKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::AudioTracks => "Audio",
            Self::SubtitleTracks => "Subtitles",
            Self::VideoTracks => "Video Track",
            Self::Chapters => "Chapters",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicMenu {
    entries: Vec<MenuEntry>,
}

impl DynamicMenu {
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, label: String, command: MenuCommand) {
        self.entries.push(MenuEntry { label, command });
    }

    /// Replace the entries with one per chapter, in list order.
    pub fn rebuild_chapters(&mut self, chapters: &[Chapter]) {
        self.clear();
        for (index, chapter) in chapters.iter().enumerate() {
            self.push(
                format::chapter_label(chapter),
                MenuCommand::SelectChapter(index as i64),
            );
        }
    }
}

/// The three track selection menus, rebuilt together from one track list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMenus {
    pub audio: DynamicMenu,
    pub subtitles: DynamicMenu,
    pub video: DynamicMenu,
}

impl TrackMenus {
    /// Sort `tracks` into the menus by type, keeping list order. Tracks of
    /// any other type are dropped.
    pub fn rebuild(&mut self, tracks: &[Track]) {
        self.audio.clear();
        self.subtitles.clear();
        self.video.clear();

        for track in tracks {
            let label = format::track_label(track);
            match &track.kind {
                TrackKind::Audio => self
                    .audio
                    .push(label, MenuCommand::SelectAudioTrack(track.id)),
                TrackKind::Subtitle => self
                    .subtitles
                    .push(label, MenuCommand::SelectSubtitleTrack(track.id)),
                TrackKind::Video => self
                    .video
                    .push(label, MenuCommand::SelectVideoTrack(track.id)),
                TrackKind::Other(_) => {}
            }
        }
    }
}
