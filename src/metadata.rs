//! Media metadata types.
//!
//! This module defines the metadata returned by
//! [`MediaFile::metadata`](crate::MediaFile::metadata) and
//! [`MediaProbe::probe`](crate::MediaProbe::probe). Metadata is extracted once
//! when the file is opened and never mutated afterwards.

use std::time::Duration;

use serde::Serialize;

/// Container-level metadata plus one descriptor per subtitle stream.
///
/// # Example
///
/// ```no_run
/// use subselect::MediaFile;
///
/// let media = MediaFile::open("episode.mkv").unwrap();
/// let metadata = media.metadata();
/// println!("{} subtitle streams in {}", metadata.subtitle_streams.len(), metadata.format);
/// ```
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct MediaMetadata {
    /// Total duration of the media file.
    pub duration: Duration,
    /// Container format name (e.g. `"matroska,webm"`, `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
    /// All subtitle streams, in container order.
    pub subtitle_streams: Vec<SubtitleStreamDescriptor>,
}

/// Per-stream boolean flags carried by the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Disposition {
    /// The stream is marked as the default subtitle track.
    pub default: bool,
    /// The stream is marked as forced (foreign dialogue, signs).
    pub forced: bool,
}

/// Description of one subtitle stream, as reported by the demuxer.
///
/// The builder methods exist so that descriptors can be assembled by hand,
/// e.g. from another probing tool or in tests:
///
/// ```
/// use subselect::SubtitleStreamDescriptor;
///
/// let stream = SubtitleStreamDescriptor::new(2, "subrip")
///     .with_language("jpn")
///     .with_title("Full Subtitles")
///     .with_default(true);
/// assert!(stream.disposition.default);
/// assert!(!stream.disposition.forced);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleStreamDescriptor {
    /// Native stream index in the container.
    pub index: usize,
    /// Codec name, lower-case (e.g. `"subrip"`, `"hdmv_pgs_subtitle"`).
    /// Empty when FFmpeg could not identify the codec.
    pub codec_name: String,
    /// Language tag from stream metadata, if present.
    pub language: Option<String>,
    /// Disposition flags.
    pub disposition: Disposition,
    /// Free-text title from stream metadata, if present.
    pub title: Option<String>,
}

impl SubtitleStreamDescriptor {
    /// Create a descriptor with no language, title, or disposition flags.
    pub fn new(index: usize, codec_name: impl Into<String>) -> Self {
        Self {
            index,
            codec_name: codec_name.into().to_lowercase(),
            language: None,
            disposition: Disposition::default(),
            title: None,
        }
    }

    /// Set the language tag.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the `default` disposition flag.
    #[must_use]
    pub fn with_default(mut self, default: bool) -> Self {
        self.disposition.default = default;
        self
    }

    /// Set the `forced` disposition flag.
    #[must_use]
    pub fn with_forced(mut self, forced: bool) -> Self {
        self.disposition.forced = forced;
        self
    }

    /// Lower-cased title, or an empty string when there is none.
    pub(crate) fn title_lowercase(&self) -> String {
        self.title.as_deref().unwrap_or_default().to_lowercase()
    }
}
