//! The index façade: ties the alphabet, RLBWT, and sampling tables
//! together behind `count`/`locate`, and owns `load`/`serialize`.

extern crate alloc;
use alloc::vec::Vec;
use core::ops::Range;

use crate::alphabet::Alphabet;
use crate::backward_search::backward_search;
use crate::build::{self, Variant};
use crate::error::Result;
use crate::phi::Sampling;
use crate::phi_range::locate_range;
use crate::rlbwt::Rlbwt;
use crate::toehold;

/// A built subsampled r-index: `count`/`locate` queries in space
/// proportional to BWT runs, reduced further by the subsampling rate.
pub struct Index {
    alphabet: Alphabet,
    rlbwt: Rlbwt,
    sampling: Sampling,
    text_len: usize,
}

impl Index {
    /// Build from raw text (no trailing sentinel — `build.rs` appends
    /// one). `rate == 1` (or `variant == Variant::Plain`) produces the
    /// plain, non-subsampled r-index.
    #[cfg_attr(feature = "std", tracing::instrument(skip(text), fields(text_len = text.len(), rate, ?variant)))]
    pub fn build(text: &[u8], rate: usize, variant: Variant, block_size: usize) -> Result<Self> {
        let built = build::build_index(text, rate, variant, block_size)?;
        #[cfg(feature = "std")]
        tracing::info!(
            n = built.rlbwt.len(),
            runs = built.rlbwt.num_runs(),
            "index built"
        );
        Ok(Self {
            alphabet: built.alphabet,
            rlbwt: built.rlbwt,
            sampling: Sampling {
                tables: built.tables,
                validity: built.validity,
            },
            text_len: built.text_len,
        })
    }

    /// Load a previously serialized artifact. The text length (sentinel
    /// excluded) is not stored in the artifact — it is recovered as
    /// `rlbwt.len() - 1`, since the RLBWT always includes the sentinel.
    #[cfg(feature = "std")]
    pub fn load<R: std::io::Read>(r: &mut R) -> Result<Self> {
        let (alphabet, rlbwt, sampling) = crate::serialize::read_index(r)?;
        tracing::info!(n = rlbwt.len(), runs = rlbwt.num_runs(), "index loaded");
        let text_len = rlbwt.len().saturating_sub(1);
        Ok(Self {
            alphabet,
            rlbwt,
            sampling,
            text_len,
        })
    }

    /// Persist this index (spec.md §6.1 layout).
    #[cfg(feature = "std")]
    pub fn serialize<W: std::io::Write>(&self, w: &mut W) -> Result<()> {
        crate::serialize::write_index(w, &self.alphabet, &self.rlbwt, &self.sampling)
    }

    /// The suffix-array interval `[start, end)` of occurrences whose
    /// suffix starts with `pattern`. `end - start` is the occurrence
    /// count; an empty pattern returns the full interval (the
    /// documented `PatternEmpty` policy, §7).
    pub fn count(&self, pattern: &[u8]) -> Range<usize> {
        backward_search(&self.rlbwt, &self.alphabet, pattern).interval
    }

    /// Text positions where `pattern` occurs, as an unordered set
    /// (ascending by BWT position, not by text position).
    ///
    /// Φ-for-range resolves every SA value in the hit interval from a
    /// single toehold by walking backward through the interval at
    /// once, so this returns a `Vec` built eagerly rather than a lazy
    /// iterator.
    pub fn locate(&self, pattern: &[u8]) -> Vec<usize> {
        let result = backward_search(&self.rlbwt, &self.alphabet, pattern);
        let interval = result.interval;
        if interval.is_empty() {
            return Vec::new();
        }

        let anchor_pos = interval.end - 1;
        let toehold_value = match result.step_data {
            Some(step) => toehold::resolve(&self.rlbwt, &self.alphabet, &self.sampling, step),
            None => toehold::resolve_at_position(&self.rlbwt, &self.alphabet, &self.sampling, anchor_pos),
        };

        locate_range(&self.rlbwt, &self.alphabet, &self.sampling, interval, toehold_value)
    }

    /// Number of occurrences of `pattern` (`count(P).end - count(P).start`).
    pub fn occurrences(&self, pattern: &[u8]) -> usize {
        let r = self.count(pattern);
        r.end - r.start
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    pub fn num_runs(&self) -> usize {
        self.rlbwt.num_runs()
    }

    pub fn subsample_rate(&self) -> usize {
        self.sampling.tables.rate
    }

    /// Rough space breakdown, in bytes, for the CLI `breakdown` subcommand.
    pub fn breakdown(&self) -> SpaceBreakdown {
        let run_heads_bytes = self.rlbwt.num_runs(); // 1 byte/run, approx (wavelet matrix ~ n*log(sigma)/8 in practice)
        let samples_bytes = self.sampling.tables.samples.len() * core::mem::size_of::<usize>();
        let mark_to_sample_bytes = self.sampling.tables.mark_to_sample.len() * core::mem::size_of::<usize>();
        SpaceBreakdown {
            rlbwt_bytes: run_heads_bytes,
            samples_bytes,
            mark_to_sample_bytes,
            num_runs: self.rlbwt.num_runs(),
            text_len: self.text_len,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpaceBreakdown {
    pub rlbwt_bytes: usize,
    pub samples_bytes: usize,
    pub mark_to_sample_bytes: usize,
    pub num_runs: usize,
    pub text_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(text: &[u8], rate: usize, variant: Variant) -> Index {
        Index::build(text, rate, variant, 4).unwrap()
    }

    #[test]
    fn abracadabra_count_and_locate() {
        let index = idx(b"abracadabra", 1, Variant::Plain);
        let r = index.count(b"abra");
        assert_eq!(r.end - r.start, 2);
        let mut got = index.locate(b"abra");
        got.sort_unstable();
        assert_eq!(got, vec![0, 7]);
    }

    #[test]
    fn abracadabra_locate_single_char() {
        let index = idx(b"abracadabra", 1, Variant::Plain);
        let mut got = index.locate(b"a");
        got.sort_unstable();
        assert_eq!(got, vec![0, 3, 5, 7, 10]);
    }

    #[test]
    fn mississippi_issi_and_ss() {
        let index = idx(b"mississippi", 1, Variant::Plain);
        assert_eq!(index.occurrences(b"issi"), 2);
        let mut issi = index.locate(b"issi");
        issi.sort_unstable();
        assert_eq!(issi, vec![1, 4]);

        let mut ss = index.locate(b"ss");
        ss.sort_unstable();
        assert_eq!(ss, vec![2, 5]);
    }

    #[test]
    fn repetitive_text_plain_and_valid_area_agree() {
        let text = b"aaaaaa";
        let plain = idx(text, 1, Variant::Plain);
        let valid_area = idx(text, 4, Variant::ValidArea);

        let mut a = plain.locate(b"aa");
        let mut b = valid_area.locate(b"aa");
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
        assert_eq!(a, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn pattern_not_found_is_empty() {
        let index = idx(b"hello world", 1, Variant::Plain);
        assert!(index.locate(b"xyz").is_empty());
        let r = index.count(b"xyz");
        assert_eq!(r.start, r.end);
    }

    #[test]
    fn pattern_longer_than_text_is_empty() {
        let index = idx(b"hi", 1, Variant::Plain);
        assert!(index.locate(b"hello there").is_empty());
    }

    #[test]
    fn pattern_equal_to_text_locates_zero() {
        let index = idx(b"banana", 1, Variant::Plain);
        assert_eq!(index.locate(b"banana"), vec![0]);
    }

    #[test]
    fn empty_pattern_returns_full_interval_and_all_positions() {
        let index = idx(b"banana", 1, Variant::Plain);
        let n = index.text_len() + 1; // + sentinel
        let r = index.count(b"");
        assert_eq!(r, 0..n);
        assert_eq!(r.end - r.start, index.locate(b"").len());
    }

    #[test]
    fn pattern_with_sentinel_byte_is_empty() {
        let index = idx(b"banana", 1, Variant::Plain);
        assert!(index.locate(b"ba\0na").is_empty());
    }

    #[test]
    fn subsampling_rate_does_not_change_locate_set() {
        let text = b"the quick brown fox jumps over the lazy dog";
        let s1 = idx(text, 1, Variant::Plain);
        let s4 = idx(text, 4, Variant::ValidArea);
        let s8 = idx(text, 8, Variant::ValidMark);

        for pattern in [&b"the"[..], b"fox", b"o", b"quick brown"] {
            let mut a = s1.locate(pattern);
            let mut b = s4.locate(pattern);
            let mut c = s8.locate(pattern);
            a.sort_unstable();
            b.sort_unstable();
            c.sort_unstable();
            assert_eq!(a, b, "mismatch at rate 4 for {:?}", pattern);
            assert_eq!(a, c, "mismatch at rate 8 for {:?}", pattern);
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn serialize_round_trip_preserves_query_results() {
        let index = idx(b"mississippi", 4, Variant::ValidArea);
        let mut buf = Vec::new();
        index.serialize(&mut buf).unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let loaded = Index::load(&mut cursor).unwrap();

        for pattern in [&b"issi"[..], b"ss", b"p", b"mississippi"] {
            let mut a = index.locate(pattern);
            let mut b = loaded.locate(pattern);
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }
}
