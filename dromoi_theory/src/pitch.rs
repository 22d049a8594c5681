// The twelve-entry pitch-class catalog and its semitone arithmetic.
//
// Pitch classes are spelled with sharps only, in catalog order
// `C C# D D# E F F# G G# A A# B` (E and B have no sharp). The position in that
// order (C = 0) is the number all scale and chord arithmetic is done on, and
// `add_semitones` is the single primitive the rest of the crate builds on:
// scale note derivation, chord transposition and chord expansion all reduce
// to it.
//
// Each pitch class also has a Greek solfège display name (Ντο, Ρε, Μι, ...)
// used by the "display with names" view; sharps append `#`.
//
// Both directions of the spelling/position mapping are fixed `match` tables,
// so there is no runtime cache to build or share.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};

/// Number of pitch classes in an octave.
pub const PITCH_CLASS_COUNT: usize = 12;

/// One of the twelve semitone positions in an octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// The full catalog in canonical (ascending semitone) order.
    pub const ALL: [PitchClass; PITCH_CLASS_COUNT] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Parse a spelling such as `"D"`, `"f#"` or `" C# "`.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. Only
    /// the twelve catalog spellings are accepted: flats, `E#` and `B#` are
    /// rejected with `InvalidNoteFormat`.
    pub fn parse(spelling: &str) -> Result<PitchClass> {
        let pc = match spelling.trim().to_ascii_uppercase().as_str() {
            "C" => PitchClass::C,
            "C#" => PitchClass::CSharp,
            "D" => PitchClass::D,
            "D#" => PitchClass::DSharp,
            "E" => PitchClass::E,
            "F" => PitchClass::F,
            "F#" => PitchClass::FSharp,
            "G" => PitchClass::G,
            "G#" => PitchClass::GSharp,
            "A" => PitchClass::A,
            "A#" => PitchClass::ASharp,
            "B" => PitchClass::B,
            _ => return Err(TheoryError::InvalidNoteFormat(spelling.to_string())),
        };
        Ok(pc)
    }

    /// Position in the catalog, 0 (C) through 11 (B).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The catalog entry at `index mod 12`.
    pub fn from_index(index: usize) -> PitchClass {
        Self::ALL[index % PITCH_CLASS_COUNT]
    }

    /// Move up (or down, for negative `n`) by `n` semitones, wrapping at the
    /// octave.
    pub fn add_semitones(self, n: i32) -> PitchClass {
        let index = (i32::from(self.index()) + n).rem_euclid(PITCH_CLASS_COUNT as i32);
        Self::from_index(index as usize)
    }

    /// Upward distance in semitones from `self` to `other`, in 0..12.
    pub fn semitones_to(self, other: PitchClass) -> u8 {
        (other.index() + PITCH_CLASS_COUNT as u8 - self.index()) % PITCH_CLASS_COUNT as u8
    }

    /// Canonical letter spelling (`"C"`, `"C#"`, ...).
    pub fn spelling(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Greek solfège name (`"Ντο"`, `"Ντο#"`, `"Ρε"`, ...).
    pub fn display_name(self) -> &'static str {
        match self {
            PitchClass::C => "Ντο",
            PitchClass::CSharp => "Ντο#",
            PitchClass::D => "Ρε",
            PitchClass::DSharp => "Ρε#",
            PitchClass::E => "Μι",
            PitchClass::F => "Φα",
            PitchClass::FSharp => "Φα#",
            PitchClass::G => "Σολ",
            PitchClass::GSharp => "Σολ#",
            PitchClass::A => "Λα",
            PitchClass::ASharp => "Λα#",
            PitchClass::B => "Σι",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        PitchClass::parse(s)
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> String {
        pc.spelling().to_string()
    }
}

impl TryFrom<String> for PitchClass {
    type Error = TheoryError;

    fn try_from(s: String) -> Result<Self> {
        PitchClass::parse(&s)
    }
}

/// Parse a list of spellings, failing on the first invalid one.
pub fn parse_all<S: AsRef<str>>(spellings: &[S]) -> Result<Vec<PitchClass>> {
    spellings.iter().map(|s| PitchClass::parse(s.as_ref())).collect()
}

/// Parse spellings into a note selection: each pitch class once, in the
/// order first given. `D d D#` selects `[D, D#]`.
pub fn parse_selection<S: AsRef<str>>(spellings: &[S]) -> Result<Vec<PitchClass>> {
    let mut selection = Vec::with_capacity(spellings.len());
    for pc in parse_all(spellings)? {
        if !selection.contains(&pc) {
            selection.push(pc);
        }
    }
    Ok(selection)
}
