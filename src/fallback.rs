//! Sidecar subtitle lookup.
//!
//! When a container has no usable subtitle stream, subtitles often sit next
//! to it on disk. [`sidecar_candidates`] lists the sibling file names to try,
//! in priority order; [`find_sidecar`] returns the first one that exists.
//! There is nothing to rank here, only presence.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::language::TargetLanguage;

/// Sibling subtitle paths for `input`, highest priority first.
///
/// For `show/ep01.mkv` and Japanese this yields `show/ep01.ja.srt`,
/// `show/ep01.jpn.srt`, `show/ep01.jp.srt`, `show/ep01.srt`,
/// `show/ep01.ass`, `show/ep01.ssa`.
///
/// ```
/// use std::path::PathBuf;
/// use subselect::{TargetLanguage, sidecar_candidates};
///
/// let candidates = sidecar_candidates("ep01.mkv", &TargetLanguage::japanese());
/// assert_eq!(candidates[0], PathBuf::from("ep01.ja.srt"));
/// assert_eq!(candidates[5], PathBuf::from("ep01.ssa"));
/// ```
pub fn sidecar_candidates<P: AsRef<Path>>(input: P, language: &TargetLanguage) -> Vec<PathBuf> {
    let base = input.as_ref().with_extension("");

    let tagged = language
        .sidecar_tags
        .iter()
        .map(|tag| format!(".{tag}.srt"));
    let untagged = [".srt", ".ass", ".ssa"].into_iter().map(str::to_string);

    tagged
        .chain(untagged)
        .map(|suffix| with_suffix(&base, &suffix))
        .collect()
}

/// The first sidecar candidate that exists as a regular file.
pub fn find_sidecar<P: AsRef<Path>>(input: P, language: &TargetLanguage) -> Option<PathBuf> {
    let input = input.as_ref();
    let found = sidecar_candidates(input, language)
        .into_iter()
        .find(|candidate| candidate.is_file());

    match &found {
        Some(path) => log::info!("Using sidecar subtitles {}", path.display()),
        None => log::debug!("No sidecar subtitles next to {}", input.display()),
    }
    found
}

/// Append `suffix` to the file name of `base` (`a/b` + `.srt` → `a/b.srt`).
pub(crate) fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
