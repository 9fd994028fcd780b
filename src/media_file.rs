//! Core [`MediaFile`] implementation.
//!
//! `MediaFile` opens a container with FFmpeg, describes every subtitle
//! stream as a [`SubtitleStreamDescriptor`], and hands out
//! [`SubtitleHandle`]s for decoding a chosen stream.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    format::{context::Input, stream::Disposition as StreamDisposition},
    media::Type,
};

use crate::{
    config::SelectionOptions,
    error::SubselectError,
    metadata::{Disposition, MediaMetadata, SubtitleStreamDescriptor},
    selection::{Selection, select},
    subtitle::SubtitleHandle,
};

/// An opened media container.
///
/// Created via [`MediaFile::open`], this struct holds the demuxer context
/// and the cached metadata.
///
/// # Example
///
/// ```no_run
/// use subselect::{MediaFile, SelectionOptions, SubselectError, SubtitleFormat};
///
/// let mut media = MediaFile::open("episode.mkv")?;
/// let selection = media.select(&SelectionOptions::new());
/// if let Some(index) = selection.index() {
///     media.subtitle_stream(index)?.save("episode.ja.srt", SubtitleFormat::Srt)?;
/// }
/// # Ok::<(), SubselectError>(())
/// ```
pub struct MediaFile {
    /// The opened FFmpeg input (demuxer) context.
    pub(crate) input_context: Input,
    /// Cached metadata extracted at open time.
    pub(crate) metadata: MediaMetadata,
    /// Path to the opened media file (kept for error messages).
    pub(crate) file_path: PathBuf,
}

impl Debug for MediaFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MediaFile")
            .field("metadata", &self.metadata)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl MediaFile {
    /// Open a media file.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, and caches one
    /// descriptor per subtitle stream.
    ///
    /// # Errors
    ///
    /// Returns [`SubselectError::FileOpen`] if the file cannot be opened or
    /// is not a recognisable media container.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SubselectError> {
        let file_path = path.as_ref().to_path_buf();

        log::debug!("Opening media file: {}", file_path.display());

        // Safe to call multiple times.
        ffmpeg_next::init().map_err(|error| SubselectError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&file_path).map_err(|error| SubselectError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let format = input_context.format().name().to_string();

        let subtitle_streams: Vec<SubtitleStreamDescriptor> = input_context
            .streams()
            .filter(|stream| stream.parameters().medium() == Type::Subtitle)
            .map(|stream| {
                let tags = stream.metadata();
                let flags = stream.disposition();
                let descriptor = SubtitleStreamDescriptor {
                    index: stream.index(),
                    codec_name: codec_name(stream.parameters().id()),
                    language: tags.get("language").map(str::to_string),
                    disposition: Disposition {
                        default: flags.contains(StreamDisposition::DEFAULT),
                        forced: flags.contains(StreamDisposition::FORCED),
                    },
                    title: tags.get("title").map(str::to_string),
                };
                log::debug!(
                    "Subtitle stream {}: codec={}, language={:?}, title={:?}, default={}, forced={}",
                    descriptor.index,
                    descriptor.codec_name,
                    descriptor.language,
                    descriptor.title,
                    descriptor.disposition.default,
                    descriptor.disposition.forced,
                );
                descriptor
            })
            .collect();

        let metadata = MediaMetadata {
            duration,
            format,
            subtitle_streams,
        };

        log::info!(
            "Opened media file: {} (format={}, duration={:.2}s, subtitle_streams={})",
            file_path.display(),
            metadata.format,
            metadata.duration.as_secs_f64(),
            metadata.subtitle_streams.len(),
        );

        Ok(Self {
            input_context,
            metadata,
            file_path,
        })
    }

    /// Get a reference to the cached metadata.
    pub fn metadata(&self) -> &MediaMetadata {
        &self.metadata
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Run track selection on this file's subtitle streams.
    pub fn select(&self, options: &SelectionOptions) -> Selection {
        select(&self.metadata.subtitle_streams, options)
    }

    /// Obtain a [`SubtitleHandle`] for the subtitle stream with native
    /// index `stream_index`.
    ///
    /// # Errors
    ///
    /// Returns [`SubselectError::NoSubtitleStream`] if no subtitle stream
    /// has that index.
    pub fn subtitle_stream(
        &mut self,
        stream_index: usize,
    ) -> Result<SubtitleHandle<'_>, SubselectError> {
        let known = self
            .metadata
            .subtitle_streams
            .iter()
            .any(|descriptor| descriptor.index == stream_index);
        if !known {
            return Err(SubselectError::NoSubtitleStream(stream_index));
        }

        Ok(SubtitleHandle {
            media: self,
            stream_index,
        })
    }

    /// Obtain a [`SubtitleHandle`] for the first subtitle stream, whatever
    /// its language or codec. Used for standalone subtitle files.
    ///
    /// # Errors
    ///
    /// Returns [`SubselectError::NoSubtitleStream`] if the file has no
    /// subtitle stream.
    pub fn first_subtitle_stream(&mut self) -> Result<SubtitleHandle<'_>, SubselectError> {
        let stream_index = self
            .metadata
            .subtitle_streams
            .first()
            .map(|descriptor| descriptor.index)
            .ok_or(SubselectError::NoSubtitleStream(0))?;
        self.subtitle_stream(stream_index)
    }
}

/// FFmpeg's short codec name, empty for unknown codecs.
fn codec_name(id: ffmpeg_next::codec::Id) -> String {
    match id {
        ffmpeg_next::codec::Id::None => String::new(),
        id => id.name().to_lowercase(),
    }
}
