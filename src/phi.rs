//! Φ (phi) backward operator and the sampling tables it reads.
//!
//! Three variants share one skeleton (`sr_index.h`'s `SrIndex` /
//! `SrIndexValidMark` / `SrIndexValidArea`, modeled here as composition
//! — a `Validity` tag — rather than the original's class hierarchy,
//! since the plain r-index is just the degenerate `rate == 1` case
//! where every run is subsampled and `Validity::Plain` applies no
//! extra check).

extern crate alloc;
use alloc::vec::Vec;

use crate::bitvec::{BitVector, BitVectorOps};
use crate::predecessor::{circular_diff, predecessor};

/// The sample/mark tables shared by all three Φ variants.
///
/// For the plain r-index (`rate == 1`) these are simply the full-size
/// `Samples`/`Marks`/`Mark→Sample` arrays (`subsample_idx` is all-ones).
/// For a subsampled variant they hold only the `r'`-sized subsampled
/// projection.
pub struct SampleTables {
    pub rate: usize,
    /// Length r (total run count); bit set at run ranks whose sample survived subsampling.
    pub subsample_idx: BitVector,
    /// Text position of the last character of each subsampled run. Length r'.
    pub samples: Vec<usize>,
    /// Length n; bit set at each submark's text position. Size r'.
    pub marks: BitVector,
    /// For the i-th submark (sorted by text position), index into `samples`. Length r'.
    pub mark_to_sample: Vec<usize>,
}

/// Per-variant extra validity data.
pub enum Validity {
    Plain,
    /// Length r'; bit set when the submark's link is trustworthy.
    ValidMark(BitVector),
    /// Length r'; maximum offset from the submark for which its link is trustworthy.
    ValidArea(Vec<usize>),
}

pub struct Sampling {
    pub tables: SampleTables,
    pub validity: Validity,
}

impl Sampling {
    /// `get_sample(run)`: the subsampled sample for run index `run`, if present.
    pub fn get_sample(&self, global_run: usize) -> Option<usize> {
        if self.tables.subsample_idx.get(global_run) {
            let idx = self.tables.subsample_idx.rank1(global_run);
            Some(self.tables.samples[idx])
        } else {
            None
        }
    }

    /// `Φ(v) -> v'`: the text position of the SA cell immediately before `v`'s.
    ///
    /// Returns `None` ("internal, never surfaces" per the crate's error
    /// policy) when the nearest submark's link is not trustworthy for
    /// this particular `v` — callers (`phi_range.rs`) fall back to
    /// direct re-anchoring rather than treating this as a query error.
    pub fn phi(&self, n: usize, v: usize) -> Option<usize> {
        let (idx, mark_pos) = predecessor(&self.tables.marks, v);

        if let Validity::ValidMark(valid) = &self.validity {
            if !valid.get(idx) {
                return None;
            }
        }

        let offset = circular_diff(v, mark_pos, n);

        if let Validity::ValidArea(areas) = &self.validity {
            if offset > areas[idx] {
                return None;
            }
        }

        let sample_idx = self.tables.mark_to_sample[idx];
        Some((self.tables.samples[sample_idx] + offset) % n)
    }
}
