//! Subtitle extraction.
//!
//! This module provides [`SubtitleHandle`] for decoding one text-based
//! subtitle stream into [`SubtitleEvent`]s and writing them as SRT or
//! WebVTT.
//!
//! # Example
//!
//! ```no_run
//! use subselect::{MediaFile, SubselectError};
//!
//! let mut media = MediaFile::open("input.mkv")?;
//! let events = media.subtitle_stream(2)?.extract()?;
//! for event in &events {
//!     println!("[{:?} → {:?}] {}", event.start_time, event.end_time, event.text);
//! }
//! # Ok::<(), SubselectError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult, Write};
use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{Subtitle, codec::context::Context as CodecContext, subtitle::Rect};

use crate::error::SubselectError;
use crate::media_file::MediaFile;

/// A single subtitle event with timing and text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEvent {
    /// When this subtitle starts displaying.
    pub start_time: Duration,
    /// When this subtitle stops displaying.
    pub end_time: Duration,
    /// The text content. ASS styling overrides are stripped; `{\anN}`
    /// positioning is kept for [`normalize`](crate::normalize_text) to
    /// handle.
    pub text: String,
}

/// Output format for saved subtitle files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip Text (.srt).
    Srt,
    /// Web Video Text Tracks (.vtt).
    WebVtt,
}

impl Display for SubtitleFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubtitleFormat::Srt => write!(f, "SRT"),
            SubtitleFormat::WebVtt => write!(f, "WebVTT"),
        }
    }
}

/// Decoding operations on one subtitle stream.
///
/// Obtained via [`MediaFile::subtitle_stream`] or
/// [`MediaFile::first_subtitle_stream`].
pub struct SubtitleHandle<'a> {
    pub(crate) media: &'a mut MediaFile,
    /// Native index of the stream to decode.
    pub(crate) stream_index: usize,
}

impl SubtitleHandle<'_> {
    /// Native index of the stream this handle decodes.
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Decode every event of the stream.
    ///
    /// Returns events sorted by start time. Bitmap rects are skipped.
    ///
    /// # Errors
    ///
    /// - [`SubselectError::NoSubtitleStream`] if the stream vanished.
    /// - [`SubselectError::SubtitleDecodeError`] if decoding fails.
    pub fn extract(&mut self) -> Result<Vec<SubtitleEvent>, SubselectError> {
        let subtitle_stream_index = self.stream_index;
        log::debug!("Extracting subtitles from stream {subtitle_stream_index}");

        let stream = self
            .media
            .input_context
            .stream(subtitle_stream_index)
            .ok_or(SubselectError::NoSubtitleStream(subtitle_stream_index))?;

        let time_base = stream.time_base();
        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let mut decoder = decoder_context.decoder().subtitle().map_err(|e| {
            SubselectError::SubtitleDecodeError(format!("Failed to create subtitle decoder: {e}"))
        })?;

        let mut events = Vec::new();
        let mut subtitle = Subtitle::new();

        for (stream, packet) in self.media.input_context.packets() {
            if stream.index() != subtitle_stream_index {
                continue;
            }

            let got_subtitle = decoder.decode(&packet, &mut subtitle).map_err(|e| {
                SubselectError::SubtitleDecodeError(format!("Subtitle decode error: {e}"))
            })?;
            if !got_subtitle {
                continue;
            }

            // Subtitle PTS is in AV_TIME_BASE (microseconds); fall back to
            // the packet PTS in stream time base.
            let base_pts_us = match subtitle.pts() {
                Some(pts) => pts.max(0) as u64,
                None => {
                    let packet_pts = packet.pts().unwrap_or(0).max(0) as u64;
                    let numerator = time_base.numerator().max(0) as u64;
                    let denominator = time_base.denominator().max(1) as u64;
                    packet_pts * numerator * 1_000_000 / denominator
                }
            };
            let base = Duration::from_micros(base_pts_us);
            let start_time = base + Duration::from_millis(subtitle.start() as u64);
            let mut end_time = base + Duration::from_millis(subtitle.end() as u64);

            // Some demuxers leave end_display_time at zero and carry the
            // duration on the packet instead.
            if end_time <= start_time && packet.duration() > 0 {
                let numerator = time_base.numerator().max(0) as u64;
                let denominator = time_base.denominator().max(1) as u64;
                let duration_us = packet.duration() as u64 * numerator * 1_000_000 / denominator;
                end_time = start_time + Duration::from_micros(duration_us);
            }

            let text_parts: Vec<String> = subtitle
                .rects()
                .filter_map(|rect| match rect {
                    Rect::Text(text) => Some(text.get().trim().to_string()),
                    Rect::Ass(ass) => Some(strip_ass_tags(ass.get())),
                    _ => None,
                })
                .filter(|text| !text.is_empty())
                .collect();

            if !text_parts.is_empty() {
                events.push(SubtitleEvent {
                    start_time,
                    end_time,
                    text: text_parts.join("\n"),
                });
            }
        }

        events.sort_by_key(|event| event.start_time);
        log::debug!(
            "Decoded {} subtitle events from stream {subtitle_stream_index}",
            events.len()
        );
        Ok(events)
    }

    /// Decode the stream and format it as a string.
    ///
    /// # Errors
    ///
    /// Returns errors from [`extract`](SubtitleHandle::extract).
    pub fn extract_text(&mut self, format: SubtitleFormat) -> Result<String, SubselectError> {
        let events = self.extract()?;
        Ok(format_subtitles(&events, format))
    }

    /// Decode the stream and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns errors from [`extract`](SubtitleHandle::extract) or I/O
    /// errors when writing the file.
    pub fn save<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: SubtitleFormat,
    ) -> Result<(), SubselectError> {
        let content = self.extract_text(format)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Format subtitle events in the given format.
pub fn format_subtitles(events: &[SubtitleEvent], format: SubtitleFormat) -> String {
    let mut output = String::new();
    if format == SubtitleFormat::WebVtt {
        output.push_str("WEBVTT\n\n");
    }

    for (i, event) in events.iter().enumerate() {
        let (start, end) = match format {
            SubtitleFormat::Srt => (
                format_timestamp(event.start_time, ','),
                format_timestamp(event.end_time, ','),
            ),
            SubtitleFormat::WebVtt => (
                format_timestamp(event.start_time, '.'),
                format_timestamp(event.end_time, '.'),
            ),
        };
        // Writing to a String cannot fail.
        let _ = write!(output, "{}\n{start} --> {end}\n{}\n\n", i + 1, event.text);
    }

    output
}

/// Format a duration as `HH:MM:SS<sep>mmm`.
fn format_timestamp(duration: Duration, millis_separator: char) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = duration.subsec_millis();
    format!("{hours:02}:{minutes:02}:{seconds:02}{millis_separator}{millis:03}")
}

/// Strip ASS/SSA formatting from a decoded dialogue line.
///
/// Removes the leading event fields and `{\...}` override blocks, except
/// alignment overrides (`{\an1}`..`{\an9}`), and turns `\N` into newlines.
fn strip_ass_tags(input: &str) -> String {
    // FFmpeg hands out either a full "Dialogue: 0,start,end,Style,..." line
    // (9 commas before the text) or the packet form
    // "ReadOrder,Layer,Style,Name,MarginL,MarginR,MarginV,Effect,Text"
    // (8 commas before the text).
    let text = match input.strip_prefix("Dialogue:") {
        Some(rest) => after_nth_comma(rest, 9),
        None => after_nth_comma(input, 8),
    };

    let mut result = String::with_capacity(text.len());
    let mut block = String::new();
    let mut in_block = false;

    for c in text.chars() {
        match c {
            '{' if !in_block => {
                in_block = true;
                block.clear();
            }
            '}' if in_block => {
                in_block = false;
                if is_alignment_override(&block) {
                    result.push('{');
                    result.push_str(&block);
                    result.push('}');
                }
            }
            c if in_block => block.push(c),
            c => result.push(c),
        }
    }

    result
        .replace("\\N", "\n")
        .replace("\\n", "\n")
        .replace("\\h", " ")
        .trim()
        .to_string()
}

/// Text after the `n`th comma, or the whole input if there are fewer.
fn after_nth_comma(input: &str, n: usize) -> &str {
    input
        .match_indices(',')
        .nth(n - 1)
        .map_or(input, |(i, _)| &input[i + 1..])
}

fn is_alignment_override(block: &str) -> bool {
    let bytes = block.as_bytes();
    bytes.len() == 4 && block.starts_with("\\an") && (b'1'..=b'9').contains(&bytes[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_dialogue_line_fields() {
        let line = "Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,こんにちは";
        assert_eq!(strip_ass_tags(line), "こんにちは");
    }

    #[test]
    fn strips_packet_form_fields() {
        let line = "0,0,Default,,0,0,0,,{\\i1}Hello{\\i0}\\Nworld";
        assert_eq!(strip_ass_tags(line), "Hello\nworld");
    }

    #[test]
    fn keeps_alignment_override() {
        let line = "0,0,Default,,0,0,0,,{\\an8}{\\fs20}上の字幕";
        assert_eq!(strip_ass_tags(line), "{\\an8}上の字幕");
    }

    #[test]
    fn commas_inside_text_survive() {
        let line = "0,0,Default,,0,0,0,,well, yes";
        assert_eq!(strip_ass_tags(line), "well, yes");
    }

    #[test]
    fn srt_formatting() {
        let events = vec![SubtitleEvent {
            start_time: Duration::from_millis(3_723_004),
            end_time: Duration::from_millis(3_725_500),
            text: "こんにちは".to_string(),
        }];
        assert_eq!(
            format_subtitles(&events, SubtitleFormat::Srt),
            "1\n01:02:03,004 --> 01:02:05,500\nこんにちは\n\n"
        );
    }

    #[test]
    fn webvtt_formatting() {
        let events = vec![SubtitleEvent {
            start_time: Duration::from_millis(1_000),
            end_time: Duration::from_millis(2_000),
            text: "a".to_string(),
        }];
        assert_eq!(
            format_subtitles(&events, SubtitleFormat::WebVtt),
            "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\na\n\n"
        );
    }
}
