//! Offline construction: derives BWT, suffix array, run boundaries,
//! samples, marks, mark→sample links and (for subsampled variants)
//! submarks/valid-mark/valid-area arrays from a text.
//!
//! Out of the query core, but kept in this crate so it is buildable and
//! testable end-to-end. Construction stays intentionally naive —
//! `O(n log^2 n)` suffix sorting, no SA-IS — production use wants a
//! linear-time construction this crate does not provide.

extern crate alloc;
use alloc::vec::Vec;

use crate::alphabet::Alphabet;
use crate::bitvec::{BitVector, BitVectorOps};
use crate::error::{Result, SriError};
use crate::phi::{SampleTables, Validity};
use crate::rlbwt::Rlbwt;

/// `O(n log^2 n)` naive suffix array, via comparison sort of suffixes.
/// `text` must already end with the sentinel byte.
pub fn build_suffix_array(text: &[u8]) -> Vec<usize> {
    let n = text.len();
    let mut sa: Vec<usize> = (0..n).collect();
    sa.sort_unstable_by(|&a, &b| text[a..].cmp(&text[b..]));
    sa
}

/// `BWT[i] = T[SA[i] - 1]`, circularly (`SA[i] == 0 -> T[n-1]`, the sentinel).
pub fn build_bwt(text: &[u8], sa: &[usize]) -> Vec<u8> {
    let n = text.len();
    sa.iter()
        .map(|&pos| if pos == 0 { text[n - 1] } else { text[pos - 1] })
        .collect()
}

/// Append the sentinel to `text`, checking it does not already contain one.
pub fn with_sentinel(text: &[u8]) -> Result<Vec<u8>> {
    if let Some(pos) = text.iter().position(|&b| b == 0) {
        return Err(SriError::SentinelInText(pos));
    }
    let mut owned = Vec::with_capacity(text.len() + 1);
    owned.extend_from_slice(text);
    owned.push(0);
    Ok(owned)
}

/// Full-size (non-subsampled) Samples / Marks / Mark→Sample triple,
/// derived from `(text, sa, bwt)`. Grounded in `r_index.h`'s
/// `constructRIndex` — the data-derivation parts, not its sdsl-cache
/// plumbing.
pub struct FullSampling {
    /// Text position of the last character of each BWT run, indexed by run rank.
    pub samples: Vec<usize>,
    /// Length n; set bit at the first character's text position of each run.
    pub marks: BitVector,
    /// For the i-th mark (sorted by text position), index into `samples`.
    pub mark_to_sample: Vec<usize>,
}

pub fn build_full_sampling(sa: &[usize], rlbwt: &Rlbwt) -> FullSampling {
    let n = sa.len();
    let r = rlbwt.num_runs();

    let mut samples = alloc::vec![0usize; r];
    let mut marks_bits = alloc::vec![false; n];
    let mut sample_of_text_pos = alloc::vec![usize::MAX; n];

    for run in 0..r {
        let run_start = rlbwt.run_start(run);
        let run_end_incl = rlbwt.run_end(run) - 1;
        let sample_pos = sa[run_end_incl];
        samples[run] = sample_pos;
        marks_bits[sa[run_start]] = true;
        sample_of_text_pos[sample_pos] = run;
    }

    let marks = BitVector::from_bits(&marks_bits);
    let mark_positions: Vec<usize> = (0..n).filter(|&p| marks.get(p)).collect();

    let mark_to_sample: Vec<usize> = mark_positions
        .iter()
        .map(|&mp| {
            let pred = if mp == 0 { n - 1 } else { mp - 1 };
            // The sample immediately preceding this mark in text order.
            // Every mark's predecessor text position is, by construction,
            // exactly one run's sample (the samples partition [0,n) with
            // the marks as their successors).
            debug_assert_ne!(
                sample_of_text_pos[pred],
                usize::MAX,
                "internal invariant: mark's predecessor is not a sample"
            );
            sample_of_text_pos[pred]
        })
        .collect();

    FullSampling {
        samples,
        marks,
        mark_to_sample,
    }
}

/// Subsampling variant requested at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Plain,
    ValidMark,
    ValidArea,
}

/// Submark-indexed validity data computed alongside [`build_subsampling`]'s
/// `SampleTables`: `valid_mark[i]` / `valid_area[i]` describe the i-th
/// submark (same indexing as `SampleTables::mark_to_sample`).
pub struct SubsamplingValidity {
    pub valid_mark: Vec<bool>,
    pub valid_area: Vec<usize>,
}

/// Port of `sr_index.h`'s `constructSubsamplingForwardSamplesForPhiBackward`
/// / `constructSubsamplingForwardMarksForPhiBackward` /
/// `constructSubsamplingForwardMarksValidity`: picks a subsample index
/// set every `rate`-th run (always including both "extreme" runs —
/// those tied to the very first and very last marks in text order),
/// then derives submarks and their validity data against the *next*
/// original mark in text order.
pub fn build_subsampling(rate: usize, full: &FullSampling, rlbwt: &Rlbwt) -> (SampleTables, SubsamplingValidity) {
    let rate = rate.max(1);
    let r = rlbwt.num_runs();
    let n = full.marks.len();

    // `rate == 1` keeps every run, which reduces every step below to a
    // straight copy of `full` — no special case needed.
    let mark_positions: Vec<usize> = (0..n).filter(|&p| full.marks.get(p)).collect();
    let num_marks = mark_positions.len();

    // Choose the subsample index set over RUN ranks (0..r), every
    // `rate`-th one, always keeping run 0 and run r-1 ("extreme" runs).
    let mut keep = alloc::vec![false; r];
    let mut run = 0usize;
    while run < r {
        keep[run] = true;
        run += rate;
    }
    if r > 0 {
        keep[0] = true;
        keep[r - 1] = true;
    }
    let subsample_idx = BitVector::from_bits(&keep);

    let kept_samples: Vec<usize> = (0..r).filter(|&run| keep[run]).map(|run| full.samples[run]).collect();

    // A submark is a mark whose preceding sample's run survived subsampling.
    let sample_pos_to_run: alloc::collections::BTreeMap<usize, usize> =
        full.samples.iter().enumerate().map(|(run, &pos)| (pos, run)).collect();

    let mut submark_positions: Vec<usize> = Vec::new();
    let mut submark_mark_idx: Vec<usize> = Vec::new();
    for (mi, &mp) in mark_positions.iter().enumerate() {
        let pred = if mp == 0 { n - 1 } else { mp - 1 };
        if let Some(&run) = sample_pos_to_run.get(&pred) {
            if keep[run] {
                submark_positions.push(mp);
                submark_mark_idx.push(mi);
            }
        }
    }

    let submarks = {
        let mut bits = alloc::vec![false; n];
        for &p in &submark_positions {
            bits[p] = true;
        }
        BitVector::from_bits(&bits)
    };

    let run_rank_among_kept: alloc::collections::BTreeMap<usize, usize> =
        (0..r).filter(|&run| keep[run]).enumerate().map(|(idx, run)| (run, idx)).collect();

    let submark_to_sample: Vec<usize> = submark_mark_idx
        .iter()
        .map(|&mi| {
            let mp = mark_positions[mi];
            let pred = if mp == 0 { n - 1 } else { mp - 1 };
            let run = *sample_pos_to_run.get(&pred).expect("submark predecessor must be a sample");
            *run_rank_among_kept.get(&run).expect("submark's run must be kept")
        })
        .collect();

    let r_prime = submark_positions.len();
    let mut valid_mark_bits = alloc::vec![false; r_prime];
    let mut valid_area: Vec<usize> = alloc::vec![0usize; r_prime];

    for (si, &mi) in submark_mark_idx.iter().enumerate() {
        let next_mark_idx = (mi + 1) % num_marks;
        let next_mark_pos = mark_positions[next_mark_idx];
        let this_mark_pos = mark_positions[mi];
        let gap = if next_mark_pos >= this_mark_pos {
            next_mark_pos - this_mark_pos
        } else {
            next_mark_pos + n - this_mark_pos
        };
        valid_mark_bits[si] = gap == 0;
        valid_area[si] = gap;
    }

    let tables = SampleTables {
        rate,
        subsample_idx,
        samples: kept_samples,
        marks: submarks,
        mark_to_sample: submark_to_sample,
    };

    (
        tables,
        SubsamplingValidity {
            valid_mark: valid_mark_bits,
            valid_area,
        },
    )
}

/// Full construction result for one subsampling variant: the RLBWT plus
/// the sampling tables and validity data this variant needs.
pub struct BuiltIndex {
    pub alphabet: Alphabet,
    pub rlbwt: Rlbwt,
    pub tables: SampleTables,
    pub validity: Validity,
    pub text_len: usize,
}

/// Build a complete index (RLBWT + sampling + validity) from raw text
/// (without sentinel) at subsampling `rate` for `variant`.
pub fn build_index(text: &[u8], rate: usize, variant: Variant, block_size: usize) -> Result<BuiltIndex> {
    let with_sentinel = with_sentinel(text)?;
    let sa = build_suffix_array(&with_sentinel);
    let raw_bwt = build_bwt(&with_sentinel, &sa);
    let alphabet = Alphabet::build(&raw_bwt);
    let compact_bwt = alphabet.compress(&raw_bwt);
    let rlbwt = Rlbwt::build(&compact_bwt, alphabet.sigma(), block_size);

    let full = build_full_sampling(&sa, &rlbwt);

    let rate = if variant == Variant::Plain { 1 } else { rate.max(1) };
    let (tables, subsampling_validity) = build_subsampling(rate, &full, &rlbwt);

    let validity = match variant {
        Variant::Plain => Validity::Plain,
        Variant::ValidMark => Validity::ValidMark(BitVector::from_bits(&subsampling_validity.valid_mark)),
        Variant::ValidArea => Validity::ValidArea(subsampling_validity.valid_area),
    };

    Ok(BuiltIndex {
        alphabet,
        rlbwt,
        tables,
        validity,
        text_len: text.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_array_matches_lexicographic_order() {
        let text = b"banana\0";
        let sa = build_suffix_array(text);
        let suffixes: Vec<&[u8]> = sa.iter().map(|&i| &text[i..]).collect();
        for w in suffixes.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn rejects_embedded_sentinel() {
        let text = b"ba\0nana".to_vec();
        let err = with_sentinel(&text).unwrap_err();
        match err {
            SriError::SentinelInText(pos) => assert_eq!(pos, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plain_build_round_trips_occurrences() {
        let built = build_index(b"mississippi", 1, Variant::Plain, 4).unwrap();
        assert_eq!(built.rlbwt.len(), 12);
        assert_eq!(built.tables.samples.len(), built.rlbwt.num_runs());
    }

    #[test]
    fn subsampled_build_keeps_extreme_runs() {
        let built = build_index(b"the quick brown fox jumps over the lazy dog", 4, Variant::ValidArea, 4).unwrap();
        let r = built.rlbwt.num_runs();
        assert!(built.tables.subsample_idx.get(0));
        assert!(built.tables.subsample_idx.get(r - 1));
        assert!(built.tables.samples.len() <= r);
    }
}
