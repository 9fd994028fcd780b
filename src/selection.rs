//! Track selection: classification and ranking composed into one decision.
//!
//! [`select`] is a total function from a file's subtitle descriptors to a
//! [`Selection`]. It never fails and never touches the filesystem; the
//! caller decides what to do with a rejection (try a sidecar file, skip the
//! file, or stop the batch).
//!
//! # Example
//!
//! ```
//! use subselect::{Selection, SelectionOptions, SubtitleStreamDescriptor, select};
//!
//! let streams = vec![
//!     SubtitleStreamDescriptor::new(2, "subrip")
//!         .with_language("jpn")
//!         .with_title("Full Subtitles")
//!         .with_default(true),
//!     SubtitleStreamDescriptor::new(3, "subrip")
//!         .with_language("jpn")
//!         .with_title("Signs & Songs")
//!         .with_forced(true),
//! ];
//!
//! let selection = select(&streams, &SelectionOptions::new());
//! assert_eq!(selection.index(), Some(2));
//! assert_eq!(selection.reason(), "Selected Japanese full text subtitles");
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::classify::{Rejection, classify};
use crate::config::SelectionOptions;
use crate::metadata::SubtitleStreamDescriptor;
use crate::rank::{CandidateScore, rank_non_empty};

/// Outcome of track selection for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A text stream was chosen.
    Selected {
        /// Native index of the chosen stream.
        index: usize,
        /// Human-readable justification.
        reason: String,
        /// Ranking key of the chosen stream.
        score: CandidateScore,
    },
    /// Nothing in the container is usable.
    Rejected {
        /// Why nothing was chosen.
        rejection: Rejection,
        /// Human-readable reason naming the target language.
        reason: String,
    },
}

impl Selection {
    /// Native index of the chosen stream, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Selected { index, .. } => Some(*index),
            Selection::Rejected { .. } => None,
        }
    }

    /// The rejection, if nothing was chosen.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Selection::Selected { .. } => None,
            Selection::Rejected { rejection, .. } => Some(*rejection),
        }
    }

    /// Human-readable reason for the outcome.
    pub fn reason(&self) -> &str {
        match self {
            Selection::Selected { reason, .. } | Selection::Rejected { reason, .. } => reason,
        }
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Selection::Selected { index, reason, .. } => write!(f, "{reason} (stream {index})"),
            Selection::Rejected { reason, .. } => write!(f, "{reason}"),
        }
    }
}

/// Choose the best subtitle stream among `descriptors`.
pub fn select(descriptors: &[SubtitleStreamDescriptor], options: &SelectionOptions) -> Selection {
    let language = &options.language;
    let classification = classify(descriptors, language);

    let Some((&first, rest)) = classification.text.split_first() else {
        let rejection = classification.rejection_without_text();
        let reason = rejection.reason(language);
        log::info!("{reason}");
        return Selection::Rejected { rejection, reason };
    };

    let winner = rank_non_empty(first, rest, &options.heuristics);
    let reason = format!("Selected {} full text subtitles", language.name);
    log::info!(
        "{reason}: stream {} ({}, title {:?})",
        winner.descriptor.index,
        winner.descriptor.codec_name,
        winner.descriptor.title,
    );
    Selection::Selected {
        index: winner.descriptor.index,
        reason,
        score: winner.score,
    }
}
