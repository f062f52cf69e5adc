//! Circular predecessor search over a sparse, sorted set of text
//! positions (marks or submarks).

extern crate alloc;

use crate::bitvec::{BitVector, BitVectorOps};

/// Largest mark position `<= p`, and its 0-indexed rank among marks.
///
/// If `p` is smaller than every mark, the search wraps around: the last
/// mark (in text order) is returned, treated as `-infinity` in circular
/// order. Cost is one `rank1` plus one `select1`.
pub fn predecessor(marks: &BitVector, p: usize) -> (usize, usize) {
    let total = marks.rank1(marks.len());
    debug_assert!(total > 0, "predecessor: no marks present");

    let r = marks.rank1(p + 1);
    if r == 0 {
        let idx = total - 1;
        let pos = marks.select1(total);
        (idx, pos)
    } else {
        let idx = r - 1;
        let pos = marks.select1(r);
        (idx, pos)
    }
}

/// `v - mark_pos`, wrapping modulo `n` when the predecessor search
/// wrapped around (`mark_pos > v`).
#[inline]
pub fn circular_diff(v: usize, mark_pos: usize, n: usize) -> usize {
    if v >= mark_pos {
        v - mark_pos
    } else {
        v + n - mark_pos
    }
}
