//! Subtitle text cleanup.
//!
//! Extracted subtitles often carry left-to-right marks (as the `&lrm;`
//! entity or the raw U+200E character) and ASS positioning overrides such as
//! `{\an8}` that render as garbage in players without ASS support. The
//! rules below remove them. The rule set is applied until nothing changes,
//! so cleaning already-clean text is a no-op.
//!
//! # Example
//!
//! ```
//! assert_eq!(subselect::normalize_text("&lrm;{\\an8}Hello"), "Hello");
//! ```

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::error::SubselectError;

/// Patterns removed from subtitle text, in application order.
const RULES: &[&str] = &[
    // HTML entity for LEFT-TO-RIGHT MARK.
    r"&lrm;",
    // U+200E LEFT-TO-RIGHT MARK.
    r"\x{200E}",
    // ASS alignment override.
    r"\{\\an[1-9]\}",
];

static COMPILED_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RULES
        .iter()
        .filter_map(|rule| Regex::new(rule).ok())
        .collect()
});

/// Remove all rule matches from raw bytes.
///
/// Works on bytes so sidecar files in legacy encodings are cleaned without
/// being transcoded. Only complete matches are removed.
pub fn normalize_bytes(input: &[u8]) -> Vec<u8> {
    let mut current = input.to_vec();
    loop {
        let mut changed = false;
        for rule in COMPILED_RULES.iter() {
            let replaced = match rule.replace_all(&current, &b""[..]) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                current = replaced;
                changed = true;
            }
        }
        if !changed {
            return current;
        }
    }
}

/// Remove all rule matches from `input`.
pub fn normalize_text(input: &str) -> String {
    // Removing whole UTF-8 sequences keeps the text valid UTF-8.
    String::from_utf8_lossy(&normalize_bytes(input.as_bytes())).into_owned()
}

/// Clean a subtitle file in place.
///
/// Returns `true` if the file content changed.
///
/// # Errors
///
/// Returns [`SubselectError::IoError`] if the file cannot be read or
/// written.
pub fn normalize_file<P: AsRef<Path>>(path: P) -> Result<bool, SubselectError> {
    let path = path.as_ref();
    let original = std::fs::read(path)?;
    let cleaned = normalize_bytes(&original);
    if cleaned == original {
        log::debug!("{} already clean", path.display());
        return Ok(false);
    }

    log::debug!(
        "Cleaned {}: removed {} bytes",
        path.display(),
        original.len() - cleaned.len()
    );
    std::fs::write(path, cleaned)?;
    Ok(true)
}
