//! # sri — subsampled r-index
//!
//! A compressed full-text self-index over a run-length encoded BWT.
//! Space scales with the number of BWT runs `r`, not with text length
//! `n`; a subsampling rate `s` trades locate-query time for a further
//! `1/s` reduction of the sampled-position tables. `s = 1` is the plain
//! (non-subsampled) r-index.
//!
//! ## Architecture
//!
//! - [`bitvec`] / [`wavelet`]: the rank/select/access abstraction layer
//!   (`BitVectorOps`, `SymbolSeqOps`).
//! - [`alphabet`]: dense `[0, sigma)` symbol map plus the cumulative
//!   count table `C`.
//! - [`rlbwt`]: the run-length encoded BWT — `access`/`rank`/`select`
//!   over runs instead of characters.
//! - [`lf`] / [`backward_search`]: LF-mapping and the right-to-left
//!   pattern-matching driver.
//! - [`predecessor`] / [`phi`] / [`phi_range`]: the Φ backward operator
//!   and its range form, which recovers suffix-array values from a
//!   single toehold without a full suffix array.
//! - [`toehold`]: anchors one suffix-array value inside a
//!   backward-search hit.
//! - [`index`]: the query façade (`Index::count`/`Index::locate`).
//! - [`build`]: offline construction from raw text (suffix array, BWT,
//!   runs, samples, marks, subsampling).
//! - [`serialize`]: the persisted artifact codec.
//! - [`error`]: the crate's error type.
//!
//! ## Example
//!
//! ```
//! use sri::index::Index;
//! use sri::build::Variant;
//!
//! let index = Index::build(b"mississippi", 1, Variant::Plain, 16).unwrap();
//! assert_eq!(index.occurrences(b"issi"), 2);
//!
//! let mut hits = index.locate(b"issi");
//! hits.sort_unstable();
//! assert_eq!(hits, vec![1, 4]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod alphabet;
pub mod backward_search;
pub mod bitvec;
pub mod lf;
pub mod phi;
pub mod phi_range;
pub mod predecessor;
pub mod rlbwt;
pub mod toehold;
pub mod wavelet;

#[cfg(feature = "std")]
pub mod build;
#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
pub mod index;
#[cfg(feature = "std")]
pub mod serialize;

#[cfg(feature = "std")]
pub use error::SriError;
#[cfg(feature = "std")]
pub use index::Index;

/// Crate version, surfaced by the CLI's `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
