//! Selection and processing configuration.
//!
//! [`SelectionOptions`] carries the target language and ranking heuristics
//! into [`select`](crate::select). [`ProcessOptions`] wraps it with the
//! settings of the extract, clean, and embed pipeline.
//!
//! # Example
//!
//! ```
//! use subselect::{Heuristics, ProcessOptions, SelectionOptions, TargetLanguage};
//!
//! let options = ProcessOptions::new()
//!     .with_selection(
//!         SelectionOptions::new()
//!             .with_language(TargetLanguage::japanese())
//!             .with_heuristics(Heuristics::default()),
//!     )
//!     .with_clean_only(true)
//!     .with_audio_bitrate("256k");
//! assert!(options.clean_only);
//! ```

use std::path::PathBuf;

use crate::heuristics::Heuristics;
use crate::language::TargetLanguage;

/// Default audio bitrate for the AAC track of embedded output.
pub const DEFAULT_AUDIO_BITRATE: &str = "192k";

/// Settings for track selection.
///
/// Defaults: Japanese, default heuristics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Language to look for.
    pub language: TargetLanguage,
    /// Title substrings and weights used for ranking.
    pub heuristics: Heuristics,
}

impl SelectionOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target language.
    #[must_use]
    pub fn with_language(mut self, language: TargetLanguage) -> Self {
        self.language = language;
        self
    }

    /// Set the ranking heuristics.
    #[must_use]
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }
}

/// Settings for [`process_file`](crate::process_file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Track selection settings.
    pub selection: SelectionOptions,
    /// Stop after writing the cleaned SRT; do not embed.
    pub clean_only: bool,
    /// Replace existing output files.
    pub overwrite: bool,
    /// Path or name of the `ffmpeg` executable used for embedding.
    pub ffmpeg_program: PathBuf,
    /// Bitrate of the AAC audio written during embedding.
    pub audio_bitrate: String,
    /// Let `ffmpeg` print encoding statistics while embedding.
    pub show_stats: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessOptions {
    /// Create options with default settings.
    ///
    /// Defaults: embed, refuse to overwrite, `ffmpeg` from `PATH`, 192k
    /// audio, statistics shown.
    pub fn new() -> Self {
        Self {
            selection: SelectionOptions::default(),
            clean_only: false,
            overwrite: false,
            ffmpeg_program: PathBuf::from("ffmpeg"),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
            show_stats: true,
        }
    }

    /// Set the track selection settings.
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionOptions) -> Self {
        self.selection = selection;
        self
    }

    /// Only extract and clean; skip embedding.
    #[must_use]
    pub fn with_clean_only(mut self, clean_only: bool) -> Self {
        self.clean_only = clean_only;
        self
    }

    /// Allow replacing existing outputs.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Use a specific `ffmpeg` executable.
    #[must_use]
    pub fn with_ffmpeg_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.ffmpeg_program = program.into();
        self
    }

    /// Set the AAC bitrate (an `ffmpeg` bitrate string such as `"192k"`).
    #[must_use]
    pub fn with_audio_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.audio_bitrate = bitrate.into();
        self
    }

    /// Show or hide `ffmpeg` statistics while embedding.
    #[must_use]
    pub fn with_show_stats(mut self, show_stats: bool) -> Self {
        self.show_stats = show_stats;
        self
    }
}
