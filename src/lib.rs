//! # subselect
//!
//! Pick the full Japanese text subtitle track out of a video container,
//! clean it, and embed it into an MP4.
//!
//! Release files often carry several subtitle tracks for the same language:
//! a full dialogue track, a forced "signs & songs" track, an SDH variant, or
//! image-based PGS/VobSub copies. `subselect` classifies every subtitle
//! stream, ranks the text candidates so that a full, non-forced track wins,
//! and falls back to sidecar `.srt`/`.ass` files when the container has
//! nothing usable. Decoding and probing are powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ### Choose a Track
//!
//! ```no_run
//! use subselect::{MediaFile, SelectionOptions};
//!
//! let media = MediaFile::open("episode01.mkv")?;
//! let selection = media.select(&SelectionOptions::new());
//! println!("{selection}");
//! # Ok::<(), subselect::SubselectError>(())
//! ```
//!
//! ### Rank Descriptors Without FFmpeg
//!
//! ```
//! use subselect::{SelectionOptions, SubtitleStreamDescriptor, select};
//!
//! let streams = vec![
//!     SubtitleStreamDescriptor::new(2, "hdmv_pgs_subtitle").with_language("jpn"),
//!     SubtitleStreamDescriptor::new(3, "ass").with_language("ja").with_title("SDH"),
//! ];
//! assert_eq!(select(&streams, &SelectionOptions::new()).index(), Some(3));
//! ```
//!
//! ### Run the Whole Pipeline
//!
//! ```no_run
//! use subselect::{ProcessOptions, process_file};
//!
//! let report = process_file("episode01.mkv", &ProcessOptions::new())?;
//! println!("cleaned: {}", report.cleaned_path.display());
//! # Ok::<(), subselect::SubselectError>(())
//! ```
//!
//! ## Features
//!
//! - **Stream classification**: language match plus text/image codec family
//! - **Ranking**: forced-track exclusion, title heuristics, default flag,
//!   container order as tie-break
//! - **Configurable heuristics**: title markers and weights loadable from
//!   JSON
//! - **Sidecar fallback**: `<base>.ja.srt`, `<base>.srt`, `<base>.ass`, ...
//! - **Text normalization**: strips `&lrm;`, U+200E and `{\anN}` overrides
//! - **Embedding**: copies video, re-encodes audio to AAC, and muxes the
//!   cleaned subtitles as `mov_text`
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed to build, and the
//! `ffmpeg` executable must be on `PATH` (or passed explicitly) for
//! embedding.

pub mod classify;
pub mod codec;
pub mod config;
pub mod embed;
pub mod error;
pub mod fallback;
pub mod ffmpeg;
pub mod heuristics;
pub mod language;
pub mod media_file;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod probe;
pub mod rank;
pub mod selection;
pub mod subtitle;

pub use classify::{Classification, Rejection, classify};
pub use codec::CodecFamily;
pub use config::{DEFAULT_AUDIO_BITRATE, ProcessOptions, SelectionOptions};
pub use embed::Embedder;
pub use error::SubselectError;
pub use fallback::{find_sidecar, sidecar_candidates};
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use heuristics::Heuristics;
pub use language::TargetLanguage;
pub use media_file::MediaFile;
pub use metadata::{Disposition, MediaMetadata, SubtitleStreamDescriptor};
pub use normalize::{normalize_bytes, normalize_file, normalize_text};
pub use pipeline::{FileReport, OutputPaths, SubtitleSource, process_file};
pub use probe::MediaProbe;
pub use rank::{
    CandidateScore, RankedCandidate, filter_non_forced, rank, rank_non_empty, ranking_pool, score,
};
pub use selection::{Selection, select};
pub use subtitle::{SubtitleEvent, SubtitleFormat, SubtitleHandle, format_subtitles};
