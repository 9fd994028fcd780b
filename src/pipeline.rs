//! Per-file processing: select, extract, clean, embed.
//!
//! [`process_file`] runs the whole workflow for one input and returns a
//! [`FileReport`]. Selection rejections are not errors by themselves: the
//! pipeline falls back to sidecar files and only fails with
//! [`SubselectError::NoSubtitleSource`] when that finds nothing either.
//!
//! # Example
//!
//! ```no_run
//! use subselect::{ProcessOptions, process_file};
//!
//! let report = process_file("episode01.mkv", &ProcessOptions::new().with_clean_only(true))?;
//! println!("{} -> {}", report.selection, report.cleaned_path.display());
//! # Ok::<(), subselect::SubselectError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use crate::config::ProcessOptions;
use crate::embed::Embedder;
use crate::error::SubselectError;
use crate::fallback::{find_sidecar, with_suffix};
use crate::language::TargetLanguage;
use crate::media_file::MediaFile;
use crate::normalize::normalize_file;
use crate::selection::Selection;
use crate::subtitle::SubtitleFormat;

/// Where the subtitles that were cleaned came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleSource {
    /// A subtitle stream of the input container.
    Stream(usize),
    /// A sibling subtitle file.
    Sidecar(PathBuf),
}

impl Display for SubtitleSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubtitleSource::Stream(index) => write!(f, "stream {index}"),
            SubtitleSource::Sidecar(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Output file names derived from an input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Raw extraction target, removed once cleaned.
    pub temporary: PathBuf,
    /// Cleaned SRT.
    pub cleaned: PathBuf,
    /// MP4 with embedded subtitles.
    pub embedded: PathBuf,
}

impl OutputPaths {
    /// Derive output paths for `input`.
    ///
    /// `dir/ep.mkv` yields `dir/ep-ja.tmp.srt`, `dir/ep-ja.clean.srt` and
    /// `dir/ep.mp4`. When the input already is `dir/ep.mp4`, the embedded
    /// output becomes `dir/ep-ja.mp4` so the input is never overwritten.
    pub fn for_input<P: AsRef<Path>>(input: P, language: &TargetLanguage) -> Self {
        let input = input.as_ref();
        let base = input.with_extension("");
        let tag = &language.file_tag;

        let embedded = with_suffix(&base, ".mp4");
        let embedded = if embedded == input {
            with_suffix(&base, &format!("-{tag}.mp4"))
        } else {
            embedded
        };

        Self {
            temporary: with_suffix(&base, &format!("-{tag}.tmp.srt")),
            cleaned: with_suffix(&base, &format!("-{tag}.clean.srt")),
            embedded,
        }
    }
}

/// What happened to one input file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The processed input.
    pub input: PathBuf,
    /// Track selection outcome for the container.
    pub selection: Selection,
    /// The subtitles that were actually used.
    pub source: SubtitleSource,
    /// Cleaned SRT file.
    pub cleaned_path: PathBuf,
    /// MP4 output, unless running clean-only.
    pub embedded_path: Option<PathBuf>,
}

/// Select, extract, clean and (optionally) embed subtitles for `input`.
///
/// # Errors
///
/// - [`SubselectError::FileOpen`] if the input or a sidecar cannot be opened.
/// - [`SubselectError::NoSubtitleSource`] if neither the container nor a
///   sidecar provides subtitles.
/// - [`SubselectError::OutputExists`] if an output exists and
///   `options.overwrite` is off.
/// - Decoding, I/O and [`SubselectError::Tool`] errors from the steps.
pub fn process_file<P: AsRef<Path>>(
    input: P,
    options: &ProcessOptions,
) -> Result<FileReport, SubselectError> {
    let input = input.as_ref();
    let language = &options.selection.language;
    let paths = OutputPaths::for_input(input, language);

    ensure_writable(&paths.cleaned, options.overwrite)?;
    if !options.clean_only {
        ensure_writable(&paths.embedded, options.overwrite)?;
    }

    let mut media = MediaFile::open(input)?;
    let selection = media.select(&options.selection);

    let source = match selection.index() {
        Some(index) => {
            media
                .subtitle_stream(index)?
                .save(&paths.temporary, SubtitleFormat::Srt)?;
            SubtitleSource::Stream(index)
        }
        None => {
            log::warn!(
                "{}: {}; looking for sidecar subtitles",
                input.display(),
                selection.reason()
            );
            let sidecar = find_sidecar(input, language).ok_or_else(|| {
                SubselectError::NoSubtitleSource {
                    reason: selection.reason().to_string(),
                }
            })?;
            MediaFile::open(&sidecar)?
                .first_subtitle_stream()?
                .save(&paths.temporary, SubtitleFormat::Srt)?;
            SubtitleSource::Sidecar(sidecar)
        }
    };

    clean_into(&paths.temporary, &paths.cleaned)?;
    log::info!("Cleaned subtitles written to {}", paths.cleaned.display());

    let embedded_path = if options.clean_only {
        None
    } else {
        Embedder::new(input, &paths.cleaned, &paths.embedded)
            .program(&options.ffmpeg_program)
            .audio_bitrate(&options.audio_bitrate)
            .language(&language.metadata_code)
            .show_stats(options.show_stats)
            .run()?;
        Some(paths.embedded)
    };

    Ok(FileReport {
        input: input.to_path_buf(),
        selection,
        source,
        cleaned_path: paths.cleaned,
        embedded_path,
    })
}

/// Normalize `temporary` and move it to `cleaned`. On failure the
/// temporary file is removed.
fn clean_into(temporary: &Path, cleaned: &Path) -> Result<(), SubselectError> {
    let result = normalize_file(temporary)
        .and_then(|_| std::fs::rename(temporary, cleaned).map_err(SubselectError::from));

    if result.is_err() && temporary.exists() {
        if let Err(error) = std::fs::remove_file(temporary) {
            log::warn!("Failed to remove {}: {error}", temporary.display());
        }
    }
    result
}

fn ensure_writable(path: &Path, overwrite: bool) -> Result<(), SubselectError> {
    if !path.exists() {
        return Ok(());
    }
    if overwrite {
        log::warn!("Overwriting {}", path.display());
        Ok(())
    } else {
        Err(SubselectError::OutputExists(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_for_mkv() {
        let paths = OutputPaths::for_input("dir/Show 01.mkv", &TargetLanguage::japanese());
        assert_eq!(paths.temporary, PathBuf::from("dir/Show 01-ja.tmp.srt"));
        assert_eq!(paths.cleaned, PathBuf::from("dir/Show 01-ja.clean.srt"));
        assert_eq!(paths.embedded, PathBuf::from("dir/Show 01.mp4"));
    }

    #[test]
    fn mp4_input_is_never_the_output() {
        let paths = OutputPaths::for_input("movie.mp4", &TargetLanguage::japanese());
        assert_eq!(paths.embedded, PathBuf::from("movie-ja.mp4"));
    }

    #[test]
    fn existing_output_requires_overwrite() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let path = directory.path().join("out.srt");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            ensure_writable(&path, false),
            Err(SubselectError::OutputExists(_))
        ));
        assert!(ensure_writable(&path, true).is_ok());
        assert!(ensure_writable(&directory.path().join("new.srt"), false).is_ok());
    }

    #[test]
    fn cleaning_moves_the_temporary_file() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let temporary = directory.path().join("ep-ja.tmp.srt");
        let cleaned = directory.path().join("ep-ja.clean.srt");
        std::fs::write(&temporary, "1\n00:00:01,000 --> 00:00:02,000\n&lrm;x\n\n").unwrap();

        clean_into(&temporary, &cleaned).unwrap();
        assert!(!temporary.exists());
        assert_eq!(
            std::fs::read_to_string(&cleaned).unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\nx\n\n"
        );
    }

    #[test]
    fn failed_cleaning_removes_the_temporary_file() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let temporary = directory.path().join("ep-ja.tmp.srt");
        let unreachable = directory.path().join("missing-dir").join("ep-ja.clean.srt");
        std::fs::write(&temporary, "{\\an8}x").unwrap();

        let result = clean_into(&temporary, &unreachable);
        assert!(matches!(result, Err(SubselectError::IoError(_))));
        assert!(!temporary.exists());
        assert!(!unreachable.exists());
    }
}
