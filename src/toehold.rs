//! Toehold resolver: recovers one suffix-array value anchored inside the
//! final backward-search interval.
//!
//! Plain r-index: the anchor is read directly off the recorded run's
//! sample. Subsampled variants may land on a run whose sample was not
//! kept, and must walk LF run-by-run until reaching one that was —
//! termination is guaranteed because the subsample set always keeps
//! both "extreme" runs, bounding the walk by the longest gap between
//! subsampled run-ends.

extern crate alloc;

use crate::alphabet::Alphabet;
use crate::backward_search::StepData;
use crate::phi::Sampling;
use crate::rlbwt::Rlbwt;

/// Resolve the anchor SA value for a backward-search result whose
/// sampling is the plain (fully-subsampled, `rate == 1`) table.
///
/// `step.last_run_rank` is already the 1-indexed rank of the run covering
/// the interval's last position — recorded only when that run's head is
/// `step.c` (`is_lf_trivial` is false otherwise) — so it is passed to
/// `select_on_runs` unchanged, with no further `+ 1`.
pub fn resolve(rlbwt: &Rlbwt, alphabet: &Alphabet, sampling: &Sampling, step: StepData) -> usize {
    let global_run = rlbwt.select_on_runs(step.last_run_rank, step.c);
    let run_end_pos = rlbwt.run_end(global_run) - 1;
    resolve_at_position(rlbwt, alphabet, sampling, run_end_pos)
}

/// Resolve the SA value of an arbitrary BWT position by walking LF,
/// run-end to run-end, until a subsampled run is reached.
///
/// Generalizes the plain case (where the position's own run is already
/// subsampled, so the loop exits immediately) and is reused by
/// `phi_range.rs` to re-anchor positions Φ could not resolve directly.
pub fn resolve_at_position(rlbwt: &Rlbwt, alphabet: &Alphabet, sampling: &Sampling, bwt_pos: usize) -> usize {
    let n = rlbwt.len();
    let mut global_run = rlbwt.run_of_position(bwt_pos);
    let mut distance = (rlbwt.run_end(global_run) - 1) - bwt_pos;

    loop {
        if let Some(sample) = sampling.get_sample(global_run) {
            return (sample + distance + 1) % n;
        }
        let run_end_pos = rlbwt.run_end(global_run) - 1;
        let c = rlbwt.run_head(global_run);
        let rank_before = rlbwt.rank(run_end_pos, c);
        let new_pos = alphabet.c(c) + rank_before;
        global_run = rlbwt.run_of_position(new_pos);
        distance += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backward_search::backward_search;
    use crate::bitvec::BitVector;
    use crate::build::{build_bwt, build_suffix_array};
    use crate::phi::{SampleTables, Validity};

    fn build_plain(text: &[u8]) -> (Alphabet, Rlbwt, Sampling) {
        let sa = build_suffix_array(text);
        let raw_bwt = build_bwt(text, &sa);
        let alpha = Alphabet::build(&raw_bwt);
        let compact = alpha.compress(&raw_bwt);
        let rl = Rlbwt::build(&compact, alpha.sigma(), 4);
        let n = rl.len();

        // Plain (s=1): every run is a subsampled run.
        let r = rl.num_runs();
        let mut samples = alloc::vec![0usize; r];
        let mut marks_bits = alloc::vec![false; n];
        for run in 0..r {
            let run_start = rl.run_start(run);
            let run_end = rl.run_end(run) - 1;
            samples[run] = sa[run_end];
            marks_bits[sa[run_start]] = true;
        }
        let marks = BitVector::from_bits(&marks_bits);

        // mark_to_sample: for the i-th mark (by text position), the run
        // whose sample immediately precedes it in T.
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

        let subsample_idx = BitVector::from_bits(&alloc::vec![true; r]);
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
        (alpha, rl, sampling)
    }

    #[test]
    fn resolves_a_known_occurrence() {
        let text = b"mississippi\0";
        let (alpha, rl, sampling) = build_plain(text);

        let result = backward_search(&rl, &alpha, b"ssi");
        let step = result.step_data.expect("non-trivial step expected");
        let anchor = resolve(&rl, &alpha, &sampling, step);

        // anchor must be a valid occurrence position of "ssi" in text (ignoring sentinel).
        let occ = &text[anchor..(anchor + 3).min(text.len())];
        assert_eq!(occ, b"ssi");
    }
}
