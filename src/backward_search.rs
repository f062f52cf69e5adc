//! Backward-search driver: walks a pattern right-to-left over the RLBWT,
//! maintaining a BWT interval and the minimal per-step metadata the
//! toehold resolver needs to anchor one suffix-array value inside the
//! final interval.

use core::ops::Range;

use crate::alphabet::Alphabet;
use crate::lf::lf;
use crate::rlbwt::Rlbwt;

/// Step metadata carried by the driver between non-trivial LF steps.
///
/// This is the plain r-index's `{ c, last_run_rank }` pair (`r_index.h`'s
/// `RunData`). The subsampled toehold resolver (`toehold.rs`) derives its
/// own LF-walk state from this starting point rather than the driver
/// precomputing it, since that walk only runs for the subsampled variants
/// and only once per query, not once per pattern character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepData {
    pub c: u8,
    pub last_run_rank: usize,
}

/// Outcome of a full backward search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub interval: Range<usize>,
    /// `None` if no non-trivial LF step ever occurred (empty pattern, or
    /// the pattern was rejected on its very first character).
    pub step_data: Option<StepData>,
}

/// Run the backward-search loop over `pattern`, right to left.
///
/// At each step, if the new interval is empty or its upper endpoint
/// "covers" an existing run of `c` (landed strictly inside a run rather
/// than at its boundary), no new run-boundary information was learned —
/// `step_data` is left unchanged ("trivial" LF step). Otherwise the step
/// is recorded as the new anchor candidate.
pub fn backward_search(rlbwt: &Rlbwt, alphabet: &Alphabet, pattern: &[u8]) -> SearchResult {
    let n = rlbwt.len();
    let mut interval: Range<usize> = 0..n;
    let mut step_data: Option<StepData> = None;

    for &raw in pattern.iter().rev() {
        if interval.is_empty() {
            break;
        }
        let c = match alphabet.char2comp(raw) {
            Some(c) => c,
            None => {
                interval = 0..0;
                break;
            }
        };

        let result = lf(rlbwt, alphabet, &interval, c);
        let is_lf_trivial = result.interval.is_empty() || result.hi.run.is_cover;

        if !is_lf_trivial {
            step_data = Some(StepData {
                c,
                last_run_rank: result.hi.run.rank,
            });
        }
        interval = result.interval;
    }

    SearchResult { interval, step_data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{build_bwt, build_suffix_array};

    fn build(text: &[u8]) -> (Alphabet, Rlbwt) {
        let sa = build_suffix_array(text);
        let raw_bwt = build_bwt(text, &sa);
        let alpha = Alphabet::build(&raw_bwt);
        let compact = alpha.compress(&raw_bwt);
        let rl = Rlbwt::build(&compact, alpha.sigma(), 4);
        (alpha, rl)
    }

    #[test]
    fn finds_known_substring() {
        let text = b"mississippi\0";
        let (alpha, rl) = build(text);
        let result = backward_search(&rl, &alpha, b"issi");
        assert_eq!(result.interval.end - result.interval.start, 2);
    }

    #[test]
    fn empty_pattern_is_full_interval() {
        let text = b"banana\0";
        let (alpha, rl) = build(text);
        let result = backward_search(&rl, &alpha, b"");
        assert_eq!(result.interval, 0..rl.len());
    }

    #[test]
    fn missing_pattern_is_empty() {
        let text = b"banana\0";
        let (alpha, rl) = build(text);
        let result = backward_search(&rl, &alpha, b"xyz");
        assert!(result.interval.is_empty());
    }

    #[test]
    fn step_data_present_for_nonempty_hits() {
        let text = b"mississippi\0";
        let (alpha, rl) = build(text);
        let result = backward_search(&rl, &alpha, b"ssi");
        assert!(!result.interval.is_empty());
        assert!(result.step_data.is_some());
    }
}
