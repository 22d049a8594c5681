// Error type shared by every module of the theory crate.
//
// All constructors and parsers fail fast with a `TheoryError`. These are
// data or programmer errors (a malformed chord typed by the user, a broken
// registry entry), so they always propagate to the caller. The one place that
// swallows them is `finder.rs`, which logs and skips combinations that fail
// to construct while sweeping the full tonic space.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TheoryError>;

#[derive(Error, Debug)]
pub enum TheoryError {
    /// A note spelling that is not one of the twelve catalog forms.
    #[error("unsupported note format: {0:?}")]
    InvalidNoteFormat(String),

    /// A tonic that does not name a pitch class.
    #[error("invalid or missing tonic: {0:?}")]
    InvalidTonic(String),

    /// A scale was given an empty name.
    #[error("scale name must be a non-empty string")]
    InvalidName,

    /// Interval list of the wrong length, or containing a zero step.
    #[error("intervals of scale {scale:?} must be 7 positive semitone steps, got {intervals:?}")]
    InvalidIntervals { scale: String, intervals: Vec<u8> },

    /// Reference chord list that is neither empty nor one chord per degree.
    #[error("scale {scale:?} has {len} reference chords; expected 0 or 7")]
    InvalidChordsLength { scale: String, len: usize },

    /// A chord symbol not of the form `<root><#?>(+|-|dim)`.
    #[error("invalid chord format: {0:?}")]
    InvalidChordFormat(String),

    /// A well-formed chord whose root is not in the catalog (`E#`, `B#`).
    #[error("invalid chord root: {0:?}")]
    InvalidChordRoot(String),

    /// A chord quality token other than `+`, `-` or `dim`.
    #[error("unknown chord quality: {0:?}")]
    UnknownQuality(String),

    /// Malformed scale registry JSON.
    #[error("scale registry error: {0}")]
    Registry(#[from] serde_json::Error),
}
