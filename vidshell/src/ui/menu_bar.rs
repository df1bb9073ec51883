use vidshell_core::{ActionId, DynamicMenuKind};

pub enum MenuItem {
    Action(ActionId),
    /// Entries generated from the playing media
    Dynamic(DynamicMenuKind),
    Separator,
}

pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

use MenuItem::{Action, Dynamic, Separator};

pub const MENUS: &[Menu] = &[
    Menu {
        title: "File",
        items: &[
            Action(ActionId::FileOpenQuick),
            Action(ActionId::FileOpen),
            Separator,
            Action(ActionId::FileClose),
            Separator,
            Action(ActionId::FileExit),
        ],
    },
    Menu {
        title: "View",
        items: &[
            Action(ActionId::ViewHideMenu),
            Separator,
            Action(ActionId::ViewSeekbar),
            Action(ActionId::ViewControls),
            Action(ActionId::ViewInformation),
            Action(ActionId::ViewStatistics),
            Action(ActionId::ViewStatus),
            Action(ActionId::ViewSubresync),
            Action(ActionId::ViewPlaylist),
            Action(ActionId::ViewCapture),
            Action(ActionId::ViewNavigation),
            Separator,
            Action(ActionId::ViewPresetMinimal),
            Action(ActionId::ViewPresetCompact),
            Action(ActionId::ViewPresetNormal),
            Separator,
            Action(ActionId::ViewFullscreen),
            Separator,
            Action(ActionId::ViewZoom50),
            Action(ActionId::ViewZoom100),
            Action(ActionId::ViewZoom200),
            Action(ActionId::ViewZoomAutofit),
            Action(ActionId::ViewZoomAutofitLarger),
            Action(ActionId::ViewZoomDisable),
        ],
    },
    Menu {
        title: "Play",
        items: &[
            Action(ActionId::Play),
            Action(ActionId::PlayPause),
            Action(ActionId::PlayStop),
            Separator,
            Action(ActionId::PlayFrameBackward),
            Action(ActionId::PlayFrameForward),
            Separator,
            Action(ActionId::PlayRateDecrease),
            Action(ActionId::PlayRateIncrease),
            Action(ActionId::PlayRateReset),
            Separator,
            Dynamic(DynamicMenuKind::AudioTracks),
            Dynamic(DynamicMenuKind::SubtitleTracks),
            Dynamic(DynamicMenuKind::VideoTracks),
            Separator,
            Action(ActionId::PlayVolumeUp),
            Action(ActionId::PlayVolumeDown),
            Action(ActionId::PlayVolumeMute),
        ],
    },
    Menu {
        title: "Navigate",
        items: &[
            Action(ActionId::NavigateChapterPrevious),
            Action(ActionId::NavigateChapterNext),
            Separator,
            Dynamic(DynamicMenuKind::Chapters),
        ],
    },
    Menu {
        title: "Help",
        items: &[Action(ActionId::HelpHomepage), Action(ActionId::HelpAbout)],
    },
];
