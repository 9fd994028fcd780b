//! Stream classification.
//!
//! [`classify`] keeps the subtitle streams tagged with the target language
//! and splits them by codec family. The result tells the caller either which
//! text streams are worth ranking or, through [`Classification::rejection`],
//! precisely why there are none.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::codec::CodecFamily;
use crate::language::TargetLanguage;
use crate::metadata::SubtitleStreamDescriptor;

/// Language-matched subtitle streams, split by codec family.
///
/// Both lists preserve the relative order of the input.
#[derive(Debug, Clone)]
pub struct Classification<'a> {
    /// Language-matched streams with a text-based codec.
    pub text: Vec<&'a SubtitleStreamDescriptor>,
    /// Language-matched streams with a bitmap codec.
    pub image: Vec<&'a SubtitleStreamDescriptor>,
    /// Number of subtitle streams that were classified.
    pub stream_count: usize,
}

/// Why no subtitle stream can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The file has no subtitle streams at all.
    NoStreams,
    /// Subtitle streams exist but none is tagged with a usable codec in the
    /// target language.
    NoLanguageMatch,
    /// Only bitmap tracks are tagged with the target language; OCR would be
    /// needed and is not supported.
    ImageOnly,
}

impl Rejection {
    /// Human-readable reason naming the target language.
    pub fn reason(self, language: &TargetLanguage) -> String {
        let name = &language.name;
        match self {
            Rejection::NoStreams => "No subtitle streams found".to_string(),
            Rejection::NoLanguageMatch => format!("No {name} subtitle streams found"),
            Rejection::ImageOnly => format!(
                "{name} subtitles are image-based only (OCR required, not supported)"
            ),
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Rejection::NoStreams => write!(f, "NoStreams"),
            Rejection::NoLanguageMatch => write!(f, "NoLanguageMatch"),
            Rejection::ImageOnly => write!(f, "ImageOnly"),
        }
    }
}

impl Classification<'_> {
    /// Why nothing can be selected, or `None` when text candidates exist.
    pub fn rejection(&self) -> Option<Rejection> {
        if self.text.is_empty() {
            Some(self.rejection_without_text())
        } else {
            None
        }
    }

    /// The rejection that applies once there are no text candidates.
    pub(crate) fn rejection_without_text(&self) -> Rejection {
        if self.stream_count == 0 {
            Rejection::NoStreams
        } else if self.image.is_empty() {
            Rejection::NoLanguageMatch
        } else {
            Rejection::ImageOnly
        }
    }
}

/// Split `descriptors` into language-matched text and image streams.
///
/// Streams in another language, without a language tag, or with a codec
/// that is neither text nor bitmap are dropped from both groups.
///
/// # Example
///
/// ```
/// use subselect::{Rejection, SubtitleStreamDescriptor, TargetLanguage, classify};
///
/// let streams = vec![
///     SubtitleStreamDescriptor::new(3, "hdmv_pgs_subtitle").with_language("jpn"),
///     SubtitleStreamDescriptor::new(4, "subrip").with_language("eng"),
/// ];
/// let classification = classify(&streams, &TargetLanguage::japanese());
/// assert!(classification.text.is_empty());
/// assert_eq!(classification.rejection(), Some(Rejection::ImageOnly));
/// ```
pub fn classify<'a>(
    descriptors: &'a [SubtitleStreamDescriptor],
    language: &TargetLanguage,
) -> Classification<'a> {
    let mut text = Vec::new();
    let mut image = Vec::new();

    for descriptor in descriptors {
        if !language.matches(descriptor.language.as_deref()) {
            continue;
        }
        match CodecFamily::of(&descriptor.codec_name) {
            CodecFamily::Text => text.push(descriptor),
            CodecFamily::Image => image.push(descriptor),
            CodecFamily::Other => {
                log::debug!(
                    "Ignoring stream {}: codec '{}' is neither text nor bitmap",
                    descriptor.index,
                    descriptor.codec_name,
                );
            }
        }
    }

    Classification {
        text,
        image,
        stream_count: descriptors.len(),
    }
}
