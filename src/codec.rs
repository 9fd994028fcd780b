//! Subtitle codec families.
//!
//! Subtitle codecs are either text-based (convertible straight to SRT) or
//! image-based (rendered bitmaps that would need OCR). The two sets are
//! disjoint; codecs in neither set are [`CodecFamily::Other`].

/// FFmpeg codec names of text-based subtitle formats.
pub const TEXT_SUBTITLE_CODECS: &[&str] =
    &["subrip", "srt", "ass", "ssa", "mov_text", "webvtt", "text"];

/// FFmpeg codec names of bitmap subtitle formats.
pub const IMAGE_SUBTITLE_CODECS: &[&str] =
    &["hdmv_pgs_subtitle", "dvd_subtitle", "dvb_subtitle", "xsub"];

/// The family a subtitle codec belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecFamily {
    /// Characters; directly convertible to plain text.
    Text,
    /// Bitmaps per event; text needs OCR.
    Image,
    /// Unknown or unusable for text extraction.
    Other,
}

impl CodecFamily {
    /// Classify a codec name. Case-insensitive; empty names are `Other`.
    ///
    /// ```
    /// use subselect::CodecFamily;
    ///
    /// assert_eq!(CodecFamily::of("SubRip"), CodecFamily::Text);
    /// assert_eq!(CodecFamily::of("hdmv_pgs_subtitle"), CodecFamily::Image);
    /// assert_eq!(CodecFamily::of("eia_608"), CodecFamily::Other);
    /// ```
    pub fn of(codec_name: &str) -> Self {
        let name = codec_name.trim().to_lowercase();
        if TEXT_SUBTITLE_CODECS.contains(&name.as_str()) {
            CodecFamily::Text
        } else if IMAGE_SUBTITLE_CODECS.contains(&name.as_str()) {
            CodecFamily::Image
        } else {
            CodecFamily::Other
        }
    }
}
