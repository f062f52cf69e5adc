//! Alphabet map: bijection between raw bytes and a compact alphabet
//! `[0, sigma)`, plus the cumulative symbol-count table `C`.
//!
//! A *compact*, observed-only alphabet rather than a fixed 256-entry
//! table over the full byte range — the RLBWT's wavelet matrix and
//! run-length bitvectors are sized by `sigma`, not by 256, so an
//! unobserved byte must never allocate a symbol slot.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

/// Sentinel byte. Required by callers to be absent from the input text;
/// always maps to compact symbol `0` (lexicographically smallest, per
/// the data model's sentinel invariant).
pub const SENTINEL_BYTE: u8 = 0;
/// Sentinel's compact symbol. Always zero.
pub const SENTINEL_COMP: u8 = 0;

/// Maps raw bytes to a dense `[0, sigma)` range and back, and carries
/// the cumulative-count table `C[0..=sigma]` used by LF-mapping.
#[derive(Clone)]
pub struct Alphabet {
    /// raw byte -> compact symbol, or `None` if the byte never occurs.
    char2comp: [Option<u8>; 256],
    /// compact symbol -> raw byte.
    comp2char: Vec<u8>,
    /// `c_table[c]` = count of symbols strictly smaller than `c` in the BWT.
    /// Length `sigma + 1`; `c_table[0] = 0`, `c_table[sigma] = n`.
    c_table: Vec<usize>,
    sigma: usize,
}

impl Alphabet {
    /// Build the compact alphabet from a BWT (or equivalently from the
    /// source text — the multiset of bytes is identical). `bwt` must
    /// already contain exactly one `SENTINEL_BYTE`.
    pub fn build(bwt: &[u8]) -> Self {
        let mut seen = [false; 256];
        let mut counts = [0usize; 256];
        for &b in bwt {
            seen[b as usize] = true;
            counts[b as usize] += 1;
        }
        seen[SENTINEL_BYTE as usize] = true;

        let mut comp2char = Vec::new();
        let mut char2comp = [None; 256];

        // Sentinel is always compact symbol 0.
        char2comp[SENTINEL_BYTE as usize] = Some(0u8);
        comp2char.push(SENTINEL_BYTE);

        for b in 0..256usize {
            if b == SENTINEL_BYTE as usize {
                continue;
            }
            if seen[b] {
                let comp = comp2char.len() as u8;
                char2comp[b] = Some(comp);
                comp2char.push(b as u8);
            }
        }

        let sigma = comp2char.len();
        let mut c_table = vec![0usize; sigma + 1];
        let mut sum = 0usize;
        for (comp, &raw) in comp2char.iter().enumerate() {
            c_table[comp] = sum;
            sum += counts[raw as usize];
        }
        c_table[sigma] = sum;

        Self {
            char2comp,
            comp2char,
            c_table,
            sigma,
        }
    }

    /// Map a raw byte to its compact symbol, if present in the alphabet.
    /// A pattern byte absent from the alphabet is `AlphabetMismatch`
    /// per spec: the caller terminates backward search with an empty
    /// interval, no error is raised.
    #[inline]
    pub fn char2comp(&self, b: u8) -> Option<u8> {
        self.char2comp[b as usize]
    }

    #[inline]
    pub fn comp2char(&self, c: u8) -> u8 {
        self.comp2char[c as usize]
    }

    #[inline]
    pub fn sigma(&self) -> usize {
        self.sigma
    }

    /// `C[c]`: count of symbols strictly smaller than compact symbol `c`.
    #[inline]
    pub fn c(&self, c: u8) -> usize {
        self.c_table[c as usize]
    }

    /// Full cumulative-count table, length `sigma + 1`.
    #[inline]
    pub fn c_table(&self) -> &[usize] {
        &self.c_table
    }

    /// Remap an entire BWT (or text) from raw bytes to compact symbols.
    pub fn compress(&self, bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .map(|&b| self.char2comp(b).expect("byte outside built alphabet"))
            .collect()
    }

    /// Rebuild from a persisted `comp2char`/`c_table` pair (spec.md §6.1
    /// item 2). `char2comp` is not itself persisted — it is fully
    /// determined by `comp2char`, so `serialize.rs` reconstructs it here
    /// rather than writing a redundant 256-entry table to the artifact.
    pub(crate) fn from_parts(comp2char: Vec<u8>, c_table: Vec<usize>) -> Self {
        let sigma = comp2char.len();
        let mut char2comp = [None; 256];
        for (comp, &raw) in comp2char.iter().enumerate() {
            char2comp[raw as usize] = Some(comp as u8);
        }
        Self {
            char2comp,
            comp2char,
            c_table,
            sigma,
        }
    }

    pub(crate) fn comp2char_table(&self) -> &[u8] {
        &self.comp2char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_compact_zero() {
        let bwt = b"\0annb\0aa".to_vec();
        // duplicate sentinel illustrative only; real BWTs have exactly one
        let alpha = Alphabet::build(&bwt[1..]); // drop duplicate for this unit test
        assert_eq!(alpha.char2comp(SENTINEL_BYTE), Some(0));
        assert_eq!(alpha.comp2char(0), SENTINEL_BYTE);
    }

    #[test]
    fn c_table_monotone_and_bounds() {
        let bwt = vec![0u8, b'a', b'a', b'b', b'a', b'n', b'n'];
        let alpha = Alphabet::build(&bwt);

        assert_eq!(alpha.c(0), 0);
        assert_eq!(alpha.c_table()[alpha.sigma()], bwt.len());
        for w in alpha.c_table().windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn unobserved_byte_is_none() {
        let bwt = vec![0u8, b'a', b'b'];
        let alpha = Alphabet::build(&bwt);
        assert_eq!(alpha.char2comp(b'z'), None);
    }

    #[test]
    fn compress_round_trips_through_comp2char() {
        let bwt = vec![0u8, b'b', b'a', b'n', b'a', b'n', b'a'];
        let alpha = Alphabet::build(&bwt);
        let compressed = alpha.compress(&bwt);
        let restored: Vec<u8> = compressed.iter().map(|&c| alpha.comp2char(c)).collect();
        assert_eq!(restored, bwt);
    }
}
