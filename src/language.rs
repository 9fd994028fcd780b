//! Target language description.
//!
//! A [`TargetLanguage`] names the language whose subtitles should be picked,
//! the stream language tags that count as a match, and the tags used for
//! sidecar and output file names. [`TargetLanguage::japanese`] is the
//! default.

use serde::Deserialize;

/// The language subtitle selection is looking for.
///
/// # Example
///
/// ```
/// use subselect::TargetLanguage;
///
/// let japanese = TargetLanguage::japanese();
/// assert!(japanese.matches(Some("JPN")));
/// assert!(!japanese.matches(Some("eng")));
/// assert!(!japanese.matches(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TargetLanguage {
    /// Human-readable name used in selection reasons (e.g. `"Japanese"`).
    pub name: String,
    /// Stream language tags that match this language, lower-case.
    pub aliases: Vec<String>,
    /// ISO 639-2 code written into embedded subtitle metadata.
    pub metadata_code: String,
    /// Tags tried as `<base>.<tag>.srt` sidecar files, in priority order.
    pub sidecar_tags: Vec<String>,
    /// Tag used in generated file names (`<base>-<tag>.clean.srt`).
    pub file_tag: String,
}

impl TargetLanguage {
    /// Japanese: matches `jpn` and `ja`.
    pub fn japanese() -> Self {
        Self {
            name: "Japanese".to_string(),
            aliases: vec!["jpn".to_string(), "ja".to_string()],
            metadata_code: "jpn".to_string(),
            sidecar_tags: vec!["ja".to_string(), "jpn".to_string(), "jp".to_string()],
            file_tag: "ja".to_string(),
        }
    }

    /// Returns `true` if `tag` names this language.
    ///
    /// Comparison is case-insensitive. A missing or empty tag never matches.
    pub fn matches(&self, tag: Option<&str>) -> bool {
        let Some(tag) = tag.map(str::trim).filter(|tag| !tag.is_empty()) else {
            return false;
        };
        let tag = tag.to_lowercase();
        self.aliases.iter().any(|alias| alias.to_lowercase() == tag)
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::japanese()
    }
}

#[cfg(test)]
mod tests {
    use super::TargetLanguage;

    #[test]
    fn japanese_aliases_match_case_insensitively() {
        let language = TargetLanguage::japanese();
        assert!(language.matches(Some("jpn")));
        assert!(language.matches(Some("ja")));
        assert!(language.matches(Some("JA")));
        assert!(!language.matches(Some("jp")));
        assert!(!language.matches(Some("und")));
    }

    #[test]
    fn missing_or_empty_tag_never_matches() {
        let language = TargetLanguage::japanese();
        assert!(!language.matches(None));
        assert!(!language.matches(Some("")));
        assert!(!language.matches(Some("   ")));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let language: TargetLanguage =
            serde_json::from_str(r#"{"name": "Korean", "aliases": ["kor", "ko"]}"#).unwrap();
        assert!(language.matches(Some("kor")));
        assert_eq!(language.name, "Korean");
        assert_eq!(language.file_tag, "ja");
    }
}
