//! Subtitle embedding into MP4.
//!
//! This module provides [`Embedder`], which muxes the video and audio of a
//! source container together with a cleaned SRT file into an MP4. The video
//! is copied, the audio re-encoded to AAC, and the subtitles converted to
//! `mov_text` and tagged with a language. The work is delegated to the
//! `ffmpeg` command-line tool; this is equivalent to
//!
//! ```text
//! ffmpeg -i input.mkv -i subs.srt -map 0:v -map 0:a -map 1:s \
//!        -c:v copy -c:a aac -b:a 192k -c:s mov_text \
//!        -metadata:s:s:0 language=jpn -movflags +faststart output.mp4
//! ```
//!
//! # Example
//!
//! ```no_run
//! use subselect::Embedder;
//!
//! Embedder::new("input.mkv", "input-ja.clean.srt", "input.mp4")
//!     .audio_bitrate("256k")
//!     .run()?;
//! # Ok::<(), subselect::SubselectError>(())
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::DEFAULT_AUDIO_BITRATE;
use crate::error::SubselectError;

/// Muxes a video file and an external subtitle file into an MP4.
#[derive(Debug, Clone)]
pub struct Embedder {
    input_path: PathBuf,
    subtitle_path: PathBuf,
    output_path: PathBuf,
    program: PathBuf,
    audio_bitrate: String,
    language: String,
    show_stats: bool,
}

impl Embedder {
    /// Create an embedder with default settings: `ffmpeg` from `PATH`,
    /// 192k AAC audio, `jpn` subtitle language, statistics shown.
    pub fn new<P1, P2, P3>(input: P1, subtitles: P2, output: P3) -> Self
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
    {
        Self {
            input_path: input.as_ref().to_path_buf(),
            subtitle_path: subtitles.as_ref().to_path_buf(),
            output_path: output.as_ref().to_path_buf(),
            program: PathBuf::from("ffmpeg"),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
            language: "jpn".to_string(),
            show_stats: true,
        }
    }

    /// Use a specific `ffmpeg` executable.
    #[must_use]
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Bitrate of the AAC audio track.
    #[must_use]
    pub fn audio_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.audio_bitrate = bitrate.into();
        self
    }

    /// Language tag written on the subtitle track.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Show or hide `ffmpeg`'s progress statistics.
    #[must_use]
    pub fn show_stats(mut self, show_stats: bool) -> Self {
        self.show_stats = show_stats;
        self
    }

    /// The arguments passed to `ffmpeg`.
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["-hide_banner", "-loglevel", "error"]
            .into_iter()
            .map(str::to_string)
            .collect();
        if self.show_stats {
            args.push("-stats".to_string());
        }

        args.extend([
            "-i".to_string(),
            self.input_path.to_string_lossy().into_owned(),
            "-i".to_string(),
            self.subtitle_path.to_string_lossy().into_owned(),
            "-map".to_string(),
            "0:v".to_string(),
            "-map".to_string(),
            "0:a".to_string(),
            "-map".to_string(),
            "1:s".to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
            "-c:s".to_string(),
            "mov_text".to_string(),
            "-metadata:s:s:0".to_string(),
            format!("language={}", self.language),
            "-movflags".to_string(),
            "+faststart".to_string(),
            "-y".to_string(),
            self.output_path.to_string_lossy().into_owned(),
        ]);
        args
    }

    /// Run `ffmpeg`.
    ///
    /// Output is written over any existing file at the output path; callers
    /// decide beforehand whether that is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`SubselectError::Tool`] if `ffmpeg` cannot be started or
    /// exits unsuccessfully.
    pub fn run(&self) -> Result<(), SubselectError> {
        let tool = self.program.to_string_lossy().into_owned();
        let args = self.args();
        log::debug!("Executing {tool} {}", args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|error| SubselectError::Tool {
                tool: tool.clone(),
                message: format!("failed to spawn: {error}"),
            })?;

        if !status.success() {
            return Err(SubselectError::Tool {
                tool,
                message: match status.code() {
                    Some(code) => format!("exited with code {code}"),
                    None => "terminated by signal".to_string(),
                },
            });
        }

        log::info!("Embedded subtitles into {}", self.output_path.display());
        Ok(())
    }
}
