//! Error types for the `subselect` crate.
//!
//! This module defines [`SubselectError`], the error type returned by every
//! operation that touches the filesystem, FFmpeg, or an external tool. The
//! track selection core never fails: its outcomes are plain values
//! ([`Selection`](crate::Selection) and [`Rejection`](crate::Rejection)).

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all fallible `subselect` operations.
///
/// Variants carry enough context (paths, stream indices, tool names) to
/// diagnose the problem without additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubselectError {
    /// The media file could not be opened.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::MediaFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// The requested stream does not exist or is not a subtitle stream.
    #[error("No subtitle stream with index {0} found in file")]
    NoSubtitleStream(usize),

    /// Subtitle data could not be decoded.
    #[error("Failed to decode subtitle: {0}")]
    SubtitleDecodeError(String),

    /// Neither the container nor a sidecar file provided usable subtitles.
    #[error("No usable subtitles: {reason}")]
    NoSubtitleSource {
        /// The rejection reason reported by track selection.
        reason: String,
    },

    /// An output file already exists and overwriting was not allowed.
    #[error("Output already exists: {0} (use --overwrite to replace)")]
    OutputExists(PathBuf),

    /// An external tool could not be run or exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    Tool {
        /// Name of the program that was invoked.
        tool: String,
        /// Spawn error or exit status description.
        message: String,
    },

    /// A configuration document could not be read or parsed.
    #[error("Invalid configuration in {path}: {reason}")]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser or I/O error message.
        reason: String,
    },
}

impl From<FfmpegError> for SubselectError {
    fn from(error: FfmpegError) -> Self {
        SubselectError::FfmpegError(error.to_string())
    }
}
