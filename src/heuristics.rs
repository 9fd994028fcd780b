//! Title and disposition heuristics used to rank subtitle candidates.
//!
//! Release groups label their tracks by hand ("Full Subtitles",
//! "Signs & Songs", "SDH"...). The substrings and weights that interpret those
//! labels are data, not code: [`Heuristics`] holds them, ships with defaults
//! tuned for common anime and film releases, and can be loaded from a JSON
//! document to adapt to other labeling conventions.
//!
//! # Example
//!
//! ```
//! use subselect::Heuristics;
//!
//! let heuristics = Heuristics::from_json(r#"{ "full_bonus": 4 }"#).unwrap();
//! assert_eq!(heuristics.full_bonus, 4);
//! // Fields that are not mentioned keep their defaults.
//! assert_eq!(heuristics.base_score, 100);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::SubselectError;

/// Substring lists and score weights for candidate ranking.
///
/// All substring matching is case-insensitive: markers are lower-cased before
/// comparison with the lower-cased title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Heuristics {
    /// Title substrings that mark a track as forced-style. Such tracks are
    /// left out of the ranking pool whenever any other candidate remains.
    pub forced_style_markers: Vec<String>,
    /// Title substrings that mark a full dialogue track.
    pub full_markers: Vec<String>,
    /// Added when the title contains a full marker.
    pub full_bonus: i64,
    /// Title substrings that mark a hearing-impaired track.
    pub hearing_impaired_markers: Vec<String>,
    /// Added when the title contains a hearing-impaired marker.
    pub hearing_impaired_bonus: i64,
    /// Title substrings that mark a signs or forced track.
    pub signs_markers: Vec<String>,
    /// Subtracted when the title contains a signs marker.
    pub signs_penalty: i64,
    /// Score every candidate starts from.
    pub base_score: i64,
    /// Added when the stream carries the `default` disposition.
    pub default_bonus: i64,
    /// Added when the stream does not carry the `forced` disposition.
    pub not_forced_bonus: i64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            forced_style_markers: strings(&["forced", "signs", "songs & signs", "songs/signs"]),
            full_markers: strings(&["full"]),
            full_bonus: 3,
            hearing_impaired_markers: strings(&["sdh", "hearing"]),
            hearing_impaired_bonus: 1,
            signs_markers: strings(&["forced", "sign"]),
            signs_penalty: 5,
            base_score: 100,
            default_bonus: 5,
            not_forced_bonus: 10,
        }
    }
}

impl Heuristics {
    /// Parse heuristics from a JSON document. Missing fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the document is not valid JSON, a
    /// field has the wrong type, or a field name is unknown.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read heuristics from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SubselectError::Config`] if the file cannot be read or
    /// parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SubselectError> {
        let path = path.as_ref();
        let config_error = |reason: String| SubselectError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let json = std::fs::read_to_string(path).map_err(|error| config_error(error.to_string()))?;
        let heuristics = Self::from_json(&json).map_err(|error| config_error(error.to_string()))?;
        log::debug!("Loaded ranking heuristics from {}", path.display());
        Ok(heuristics)
    }

    /// Returns `true` if `title` (already lower-cased) looks forced-style.
    pub(crate) fn is_forced_style(&self, title: &str) -> bool {
        contains_any(title, &self.forced_style_markers)
    }

    /// Sum of the title bonuses and penalties for a lower-cased title.
    ///
    /// Bonuses are additive: a title claiming "full" that also mentions
    /// "sign" nets `full_bonus - signs_penalty`.
    pub(crate) fn title_bonus(&self, title: &str) -> i64 {
        let mut bonus = 0;
        if contains_any(title, &self.full_markers) {
            bonus += self.full_bonus;
        }
        if contains_any(title, &self.hearing_impaired_markers) {
            bonus += self.hearing_impaired_bonus;
        }
        if contains_any(title, &self.signs_markers) {
            bonus -= self.signs_penalty;
        }
        bonus
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn contains_any(haystack: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .any(|marker| haystack.contains(&marker.to_lowercase()))
}
