// Dromoi music-theory core.
//
// Computation layer for exploring traditional Greek modal scales (dromoi)
// and their chords at any of the twelve tonics, and for recognizing which
// named scales a set of seven notes could belong to. No I/O, no global
// mutable state: every operation is a pure function or an error. Front ends
// (`dromoi_cli`) only call into this crate.
//
// Architecture:
// - `pitch.rs`: The twelve-entry pitch-class catalog, spelling/display names,
//   `add_semitones` arithmetic
// - `scale.rs`: `Scale` value type, note derivation, containment matching,
//   chord table, name collation
// - `registry.rs`: `ScaleTemplate` / `ScaleRegistry`, JSON-loaded catalog of
//   templates with the default set embedded from `data/scale_templates.json`
// - `chord.rs`: `ChordSymbol` parsing, transposition between tonics, expansion
//   into notes
// - `finder.rs`: `ScaleFinder`, the template × tonic × variant recognition
//   sweep
// - `error.rs`: `TheoryError`, shared by all of the above
//
// Chord symbols in the registry are written relative to D and transposed to a
// scale's tonic on demand (`chord::REFERENCE_TONIC`).

pub mod chord;
pub mod error;
pub mod finder;
pub mod pitch;
pub mod registry;
pub mod scale;

// Re-export key types at crate root for convenience.
pub use chord::{ChordQuality, ChordSymbol};
pub use error::{Result, TheoryError};
pub use finder::{ScaleFinder, find_scales};
pub use pitch::PitchClass;
pub use registry::{ScaleRegistry, ScaleTemplate, default_registry};
pub use scale::{DegreeChord, Scale, ScaleParts};
