//! Crate error type.
//!
//! `PatternEmpty` and `AlphabetMismatch` are not error variants: both are
//! query-path outcomes resolved as an interval (full, or empty), never a
//! `Result::Err` — the policy table calls for "return full interval" and
//! "immediately terminate with empty interval", respectively.
//! `InvalidAnchor` is internal control flow inside `phi.rs`
//! (`Option<usize>`), never constructed here. `InternalInvariant`
//! conditions panic via `debug_assert!`/`unreachable!` at the specific
//! call sites rather than returning a `Result` — a corrupted artifact is
//! not something calling code can recover from.

extern crate alloc;
use alloc::string::String;

#[derive(thiserror::Error, Debug)]
pub enum SriError {
    #[error("artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("input text contains the reserved sentinel byte 0x00 at position {0}")]
    SentinelInText(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, SriError>;
