//! Candidate ranking.
//!
//! Ranking works on the language-matched text streams produced by
//! [`classify`](crate::classify) in two tiers:
//!
//! 1. [`ranking_pool`] drops forced and forced-style tracks, unless that would
//!    leave nothing, in which case every candidate stays in the pool.
//! 2. [`score`] computes a [`CandidateScore`] per candidate and [`rank`] picks
//!    the highest, breaking exact ties by input order.

use std::cmp::Reverse;

use crate::heuristics::Heuristics;
use crate::metadata::SubtitleStreamDescriptor;

/// Ranking key of a candidate, compared lexicographically; higher wins.
///
/// The fields are, in order of precedence: the heuristic score, the native
/// stream index (lower wins), and the forced flag (unforced wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateScore {
    /// Base score plus title, default, and non-forced bonuses.
    pub heuristic: i64,
    /// Native stream index, reversed so earlier streams compare higher.
    pub stream_order: Reverse<usize>,
    /// Forced flag, reversed so unforced streams compare higher.
    pub forced_order: Reverse<bool>,
}

/// A ranked candidate: the winning descriptor and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedCandidate<'a> {
    /// The selected stream.
    pub descriptor: &'a SubtitleStreamDescriptor,
    /// Its ranking key.
    pub score: CandidateScore,
}

/// Candidates that are neither flagged forced nor titled like a forced
/// track.
pub fn filter_non_forced<'a>(
    candidates: &[&'a SubtitleStreamDescriptor],
    heuristics: &Heuristics,
) -> Vec<&'a SubtitleStreamDescriptor> {
    candidates
        .iter()
        .copied()
        .filter(|candidate| {
            !candidate.disposition.forced
                && !heuristics.is_forced_style(&candidate.title_lowercase())
        })
        .collect()
}

/// The pool to rank: non-forced candidates, or all of them if none are.
///
/// The pool is empty only when `candidates` is.
pub fn ranking_pool<'a>(
    candidates: &[&'a SubtitleStreamDescriptor],
    heuristics: &Heuristics,
) -> Vec<&'a SubtitleStreamDescriptor> {
    let non_forced = filter_non_forced(candidates, heuristics);
    if non_forced.is_empty() {
        log::debug!(
            "All {} candidates look forced; ranking them anyway",
            candidates.len()
        );
        candidates.to_vec()
    } else {
        non_forced
    }
}

/// Score a single candidate.
pub fn score(candidate: &SubtitleStreamDescriptor, heuristics: &Heuristics) -> CandidateScore {
    let forced = candidate.disposition.forced;

    let mut heuristic =
        heuristics.base_score + heuristics.title_bonus(&candidate.title_lowercase());
    if candidate.disposition.default {
        heuristic += heuristics.default_bonus;
    }
    if !forced {
        heuristic += heuristics.not_forced_bonus;
    }

    CandidateScore {
        heuristic,
        stream_order: Reverse(candidate.index),
        forced_order: Reverse(forced),
    }
}

/// Pick the best candidate.
///
/// Returns `None` only when `candidates` is empty.
///
/// # Example
///
/// ```
/// use subselect::{Heuristics, SubtitleStreamDescriptor, rank};
///
/// let full = SubtitleStreamDescriptor::new(3, "ass").with_language("jpn").with_title("Full");
/// let signs = SubtitleStreamDescriptor::new(2, "ass").with_language("jpn").with_title("Signs");
/// let winner = rank(&[&signs, &full], &Heuristics::default()).unwrap();
/// assert_eq!(winner.descriptor.index, 3);
/// ```
pub fn rank<'a>(
    candidates: &[&'a SubtitleStreamDescriptor],
    heuristics: &Heuristics,
) -> Option<RankedCandidate<'a>> {
    candidates
        .split_first()
        .map(|(first, rest)| rank_non_empty(first, rest, heuristics))
}

/// Pick the best of a candidate list given as its first element and the
/// rest, so there is always a winner.
///
/// Equal scores keep input order: a later candidate only wins with a
/// strictly higher score.
pub fn rank_non_empty<'a>(
    first: &'a SubtitleStreamDescriptor,
    rest: &[&'a SubtitleStreamDescriptor],
    heuristics: &Heuristics,
) -> RankedCandidate<'a> {
    let candidates: Vec<&'a SubtitleStreamDescriptor> =
        std::iter::once(first).chain(rest.iter().copied()).collect();
    let non_forced = filter_non_forced(&candidates, heuristics);

    let (seed, others) = match non_forced.split_first() {
        Some((head, tail)) => (*head, tail),
        None => {
            log::debug!(
                "All {} candidates look forced; ranking them anyway",
                candidates.len()
            );
            (first, rest)
        }
    };

    let scored = |descriptor: &'a SubtitleStreamDescriptor| {
        let candidate = RankedCandidate {
            descriptor,
            score: score(descriptor, heuristics),
        };
        log::debug!(
            "Candidate stream {} ({:?}): {:?}",
            descriptor.index,
            descriptor.title,
            candidate.score,
        );
        candidate
    };

    others.iter().fold(scored(seed), |best, descriptor| {
        let candidate = scored(*descriptor);
        if candidate.score > best.score {
            candidate
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpn(index: usize) -> SubtitleStreamDescriptor {
        SubtitleStreamDescriptor::new(index, "subrip").with_language("jpn")
    }

    #[test]
    fn pool_excludes_forced_flag_and_forced_titles() {
        let heuristics = Heuristics::default();
        let flagged = jpn(1).with_forced(true);
        let titled = jpn(2).with_title("Songs & Signs");
        let plain = jpn(3);
        let pool = ranking_pool(&[&flagged, &titled, &plain], &heuristics);
        assert_eq!(pool, vec![&plain]);
    }

    #[test]
    fn pool_falls_back_to_everything() {
        let heuristics = Heuristics::default();
        let first = jpn(1).with_forced(true);
        let second = jpn(2).with_title("Forced");
        let pool = ranking_pool(&[&first, &second], &heuristics);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(rank(&[], &Heuristics::default()).is_none());
    }

    #[test]
    fn score_components() {
        let heuristics = Heuristics::default();
        let candidate = jpn(7).with_title("Full SDH").with_default(true);
        assert_eq!(
            score(&candidate, &heuristics),
            CandidateScore {
                heuristic: 100 + 3 + 1 + 5 + 10,
                stream_order: Reverse(7),
                forced_order: Reverse(false),
            }
        );

        let forced = jpn(1).with_forced(true);
        assert_eq!(score(&forced, &heuristics).heuristic, 100);
        assert_eq!(score(&forced, &heuristics).forced_order, Reverse(true));
    }

    #[test]
    fn heuristic_outweighs_stream_order() {
        let heuristics = Heuristics::default();
        let early = jpn(1);
        let late_default = jpn(9).with_default(true);
        let winner = rank(&[&early, &late_default], &heuristics).unwrap();
        assert_eq!(winner.descriptor.index, 9);
    }

    #[test]
    fn stream_order_breaks_heuristic_ties() {
        let heuristics = Heuristics::default();
        let late = jpn(8);
        let early = jpn(4);
        let winner = rank(&[&late, &early], &heuristics).unwrap();
        assert_eq!(winner.descriptor.index, 4);
    }

    #[test]
    fn forced_flag_breaks_remaining_ties() {
        // Zero weights isolate the last tuple component.
        let heuristics = Heuristics {
            not_forced_bonus: 0,
            ..Heuristics::default()
        };
        let forced = jpn(3).with_forced(true);
        let plain = jpn(3);
        let forced_score = score(&forced, &heuristics);
        let plain_score = score(&plain, &heuristics);
        assert_eq!(forced_score.heuristic, plain_score.heuristic);
        assert_eq!(forced_score.stream_order, plain_score.stream_order);
        assert!(plain_score > forced_score);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let heuristics = Heuristics::default();
        let first = jpn(3).with_title("a");
        let second = jpn(3).with_title("b");
        let winner = rank(&[&first, &second], &heuristics).unwrap();
        assert_eq!(winner.descriptor.title.as_deref(), Some("a"));
    }

    #[test]
    fn huge_indices_do_not_wrap() {
        let heuristics = Heuristics::default();
        let last = jpn(usize::MAX);
        let first = jpn(0);
        let winner = rank(&[&last, &first], &heuristics).unwrap();
        assert_eq!(winner.descriptor.index, 0);
        assert!(score(&first, &heuristics) > score(&last, &heuristics));
    }

    #[test]
    fn non_empty_ranking_falls_back_to_forced_candidates() {
        let heuristics = Heuristics::default();
        let signs = jpn(2).with_title("Signs").with_forced(true);
        let forced = jpn(5).with_forced(true);
        let winner = rank_non_empty(&signs, &[&forced], &heuristics);
        // "Signs" costs the signs penalty; the untitled forced track wins.
        assert_eq!(winner.descriptor.index, 5);
    }
}
