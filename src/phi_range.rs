//! Φ-for-range: enumerate all suffix-array values of a BWT interval from
//! one toehold value, by repeated application of Φ.
//!
//! Reporting order matches BWT position order (ascending); the façade
//! treats the result as a set, per spec.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::alphabet::Alphabet;
use crate::phi::Sampling;
use crate::rlbwt::Rlbwt;
use crate::toehold::resolve_at_position;

/// Resolve the SA value for every BWT position in `interval`, given one
/// toehold value already anchored at `interval`'s last position.
///
/// Primary path: step Φ backward one BWT position at a time. When Φ
/// reports an invalid anchor for some position (a subsampled gap it
/// cannot bridge), re-anchor that position directly via
/// `toehold::resolve_at_position` — a walk that always terminates and
/// never depends on Φ succeeding, so the fallback is unconditionally
/// correct, not merely a retry.
pub fn locate_range(
    rlbwt: &Rlbwt,
    alphabet: &Alphabet,
    sampling: &Sampling,
    interval: Range<usize>,
    toehold: usize,
) -> Vec<usize> {
    let len = match interval.end.checked_sub(interval.start) {
        Some(l) if l > 0 => l,
        _ => return Vec::new(),
    };
    let n = rlbwt.len();

    let mut result = vec![0usize; len];
    result[len - 1] = toehold;

    let mut i = len - 1;
    while i > 0 {
        let current = result[i];
        result[i - 1] = match sampling.phi(n, current) {
            Some(prev) => prev,
            None => {
                let bwt_pos = interval.start + i - 1;
                resolve_at_position(rlbwt, alphabet, sampling, bwt_pos)
            }
        };
        i -= 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backward_search::backward_search;
    use crate::bitvec::BitVector;
    use crate::build::{build_bwt, build_suffix_array};
    use crate::phi::{SampleTables, Validity};
    use crate::toehold;

    fn build_plain(text: &[u8]) -> (Alphabet, Rlbwt, Sampling, Vec<usize>) {
        let sa = build_suffix_array(text);
        let raw_bwt = build_bwt(text, &sa);
        let alpha = Alphabet::build(&raw_bwt);
        let compact = alpha.compress(&raw_bwt);
        let rl = Rlbwt::build(&compact, alpha.sigma(), 4);
        let n = rl.len();
        let r = rl.num_runs();

        let mut samples = vec![0usize; r];
        let mut marks_bits = vec![false; n];
        for run in 0..r {
            let run_start = rl.run_start(run);
            let run_end = rl.run_end(run) - 1;
            samples[run] = sa[run_end];
            marks_bits[sa[run_start]] = true;
        }
        let marks = BitVector::from_bits(&marks_bits);

        let mut mark_positions: Vec<usize> = (0..n).filter(|&p| marks.get(p)).collect();
        mark_positions.sort_unstable();
        let sample_pos_to_run: alloc::collections::BTreeMap<usize, usize> =
            samples.iter().enumerate().map(|(run, &pos)| (pos, run)).collect();
        let mark_to_sample: Vec<usize> = mark_positions
            .iter()
            .map(|&mp| {
                let pred_pos = if mp == 0 { n - 1 } else { mp - 1 };
                *sample_pos_to_run.get(&pred_pos).unwrap_or(&0)
            })
            .collect();

        let subsample_idx = BitVector::from_bits(&vec![true; r]);
        let sampling = Sampling {
            tables: SampleTables {
                rate: 1,
                subsample_idx,
                samples,
                marks,
                mark_to_sample,
            },
            validity: Validity::Plain,
        };
        (alpha, rl, sampling, sa)
    }

    #[test]
    fn locate_range_matches_naive_suffix_array_scan() {
        let text = b"mississippi\0";
        let (alpha, rl, sampling, sa) = build_plain(text);

        let result = backward_search(&rl, &alpha, b"issi");
        let interval = result.interval.clone();
        assert!(!interval.is_empty());
        let step = result.step_data.unwrap();
        let anchor = toehold::resolve(&rl, &alpha, &sampling, step);

        let mut got = locate_range(&rl, &alpha, &sampling, interval.clone(), anchor);
        got.sort_unstable();

        let mut expected: Vec<usize> = sa[interval.clone()].to_vec();
        expected.sort_unstable();

        assert_eq!(got, expected);
    }

    #[test]
    fn locate_range_full_text_recovers_suffix_array() {
        let text = b"banana\0";
        let (alpha, rl, sampling, sa) = build_plain(text);

        let result = backward_search(&rl, &alpha, b"");
        let interval = result.interval.clone();
        // empty pattern: no toehold step was taken, anchor the last position directly.
        let bwt_pos = interval.end - 1;
        let anchor = toehold::resolve_at_position(&rl, &alpha, &sampling, bwt_pos);

        let mut got = locate_range(&rl, &alpha, &sampling, interval, anchor);
        got.sort_unstable();
        let mut expected = sa.clone();
        expected.sort_unstable();
        assert_eq!(got, expected);
    }
}
