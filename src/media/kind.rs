//! Media kinds and their extension classes.

use std::fmt;

/// Category of a downloaded artifact.
///
/// Every kind owns exactly one extension class and one destination folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Picture,
    Video,
    Caption,
    Profile,
}

/// Kinds sorted after a video post is downloaded.
const VIDEO_POST_KINDS: &[MediaKind] = &[MediaKind::Video];

/// Kinds sorted after any other post is downloaded.
const IMAGE_POST_KINDS: &[MediaKind] = &[MediaKind::Picture, MediaKind::Caption, MediaKind::Profile];

impl MediaKind {
    pub const ALL: [MediaKind; 4] = [
        MediaKind::Picture,
        MediaKind::Video,
        MediaKind::Caption,
        MediaKind::Profile,
    ];

    /// Filename suffix matched when sorting.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Picture => ".jpg",
            MediaKind::Video => ".mp4",
            MediaKind::Caption => ".txt",
            MediaKind::Profile => ".json.xz",
        }
    }

    /// Settings path holding the folder name for this kind.
    pub fn config_key(&self) -> &'static str {
        match self {
            MediaKind::Picture => "directories.types.picture",
            MediaKind::Video => "directories.types.video",
            MediaKind::Caption => "directories.types.caption",
            MediaKind::Profile => "directories.types.profile",
        }
    }

    /// Folder name used when the settings do not name one.
    pub fn default_folder(&self) -> &'static str {
        match self {
            MediaKind::Picture => "images",
            MediaKind::Video => "videos",
            MediaKind::Caption => "captions",
            MediaKind::Profile => "profiles",
        }
    }

    /// Kinds to sort for a post, depending on whether it is a video.
    pub fn for_post(is_video: bool) -> &'static [MediaKind] {
        if is_video {
            VIDEO_POST_KINDS
        } else {
            IMAGE_POST_KINDS
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Picture => write!(f, "picture"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Caption => write!(f, "caption"),
            MediaKind::Profile => write!(f, "profile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_extensions_are_distinct() {
        let extensions: HashSet<_> = MediaKind::ALL.iter().map(|k| k.extension()).collect();
        assert_eq!(extensions.len(), MediaKind::ALL.len());
    }

    #[test]
    fn test_for_post() {
        assert_eq!(MediaKind::for_post(true), &[MediaKind::Video]);
        assert_eq!(
            MediaKind::for_post(false),
            &[MediaKind::Picture, MediaKind::Caption, MediaKind::Profile]
        );
    }
}
