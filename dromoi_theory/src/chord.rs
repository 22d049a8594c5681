// Chord symbols: parsing, transposition between tonics, expansion to notes.
//
// The wire format is exactly `<root><#?>(+|-|dim)` with an uppercase root
// letter: `D-` (D minor), `A#+` (A# major), `G#dim` (G# diminished). Parsing
// distinguishes three failures: a string that does not have that shape
// (`InvalidChordFormat`), a well-formed string whose root is not in the
// catalog such as `E#+` (`InvalidChordRoot`), and, when a quality token is
// parsed on its own, an unrecognized token (`UnknownQuality`).
//
// Reference chords in the scale registry are written relative to the tonic
// `D` (`REFERENCE_TONIC`); `Scale::degree_chords` transposes them to the
// scale's actual tonic with `ChordSymbol::transpose`.
//
// The string-level functions `transpose` and `get_notes` are what a front end
// calls with user input; the typed methods are what the rest of the crate
// uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::pitch::PitchClass;

/// The tonic every registry `chords_from_d` entry is written against.
pub const REFERENCE_TONIC: PitchClass = PitchClass::D;

/// Triad/tetrad quality of a chord symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    /// `+`
    Major,
    /// `-`
    Minor,
    /// `dim`: expanded as a four-note chord.
    Diminished,
}

impl ChordQuality {
    /// The suffix used in chord symbols.
    pub fn token(self) -> &'static str {
        match self {
            ChordQuality::Major => "+",
            ChordQuality::Minor => "-",
            ChordQuality::Diminished => "dim",
        }
    }

    /// Semitone offsets from the root.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 4, 7, 10],
        }
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "+" => Ok(ChordQuality::Major),
            "-" => Ok(ChordQuality::Minor),
            "dim" => Ok(ChordQuality::Diminished),
            other => Err(TheoryError::UnknownQuality(other.to_string())),
        }
    }
}

/// A parsed chord symbol: root pitch class plus quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ChordSymbol {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl ChordSymbol {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        ChordSymbol { root, quality }
    }

    /// Parse `<root><#?>(+|-|dim)`.
    pub fn parse(symbol: &str) -> Result<ChordSymbol> {
        let format_error = || TheoryError::InvalidChordFormat(symbol.to_string());

        if !matches!(symbol.chars().next(), Some('A'..='G')) {
            return Err(format_error());
        }
        let root_len = if symbol[1..].starts_with('#') { 2 } else { 1 };
        let (root, suffix) = symbol.split_at(root_len);

        // The whole symbol must be well-formed before the root is judged.
        let quality: ChordQuality = suffix.parse().map_err(|_| format_error())?;
        let root = PitchClass::parse(root)
            .map_err(|_| TheoryError::InvalidChordRoot(root.to_string()))?;

        Ok(ChordSymbol { root, quality })
    }

    /// Move the chord by the interval between two tonics.
    pub fn transpose(self, from_tonic: PitchClass, to_tonic: PitchClass) -> ChordSymbol {
        let shift = from_tonic.semitones_to(to_tonic);
        ChordSymbol {
            root: self.root.add_semitones(i32::from(shift)),
            quality: self.quality,
        }
    }

    /// Constituent notes, root first: 3 for major/minor, 4 for diminished.
    pub fn notes(self) -> Vec<PitchClass> {
        self.quality
            .intervals()
            .iter()
            .map(|&i| self.root.add_semitones(i))
            .collect()
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.token())
    }
}

impl FromStr for ChordSymbol {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        ChordSymbol::parse(s)
    }
}

impl From<ChordSymbol> for String {
    fn from(chord: ChordSymbol) -> String {
        chord.to_string()
    }
}

impl TryFrom<String> for ChordSymbol {
    type Error = TheoryError;

    fn try_from(s: String) -> Result<Self> {
        ChordSymbol::parse(&s)
    }
}

/// Transpose a chord symbol string from one tonic to another.
///
/// Tonics are validated before the chord, so a bad tonic is reported as
/// `InvalidTonic` even when the chord is also malformed.
///
/// ```
/// use dromoi_theory::chord::transpose;
/// assert_eq!(transpose("D-", "D", "A").unwrap(), "A-");
/// ```
pub fn transpose(chord: &str, from_tonic: &str, to_tonic: &str) -> Result<String> {
    let from = PitchClass::parse(from_tonic)
        .map_err(|_| TheoryError::InvalidTonic(from_tonic.to_string()))?;
    let to =
        PitchClass::parse(to_tonic).map_err(|_| TheoryError::InvalidTonic(to_tonic.to_string()))?;
    let symbol = ChordSymbol::parse(chord)?;
    Ok(symbol.transpose(from, to).to_string())
}

/// Expand a chord symbol string into its notes.
pub fn get_notes(chord: &str) -> Result<Vec<PitchClass>> {
    Ok(ChordSymbol::parse(chord)?.notes())
}
