// The `Scale` value type: one named mode rooted at a tonic.
//
// A scale is built from a name, a tonic and seven semitone steps. The eight
// notes (tonic through octave) are derived once at construction by adding
// each step to the previous note with `PitchClass::add_semitones`. For step
// lists that sum to 12 the eighth note is the tonic again; the registry's
// Σαμπάχ variant deliberately sums to 11 and closes on the diminished octave,
// so octave closure is reported by `closes_on_tonic()` rather than enforced.
//
// Optional data carried along for display:
// - `other_names`: alternate names of the same dromos
// - `chords_from_d`: one reference chord per degree, written for tonic D and
//   transposed on demand by `degree_chords()`
// - `variants`: nested scales of the same family
//
// Scales are immutable. The only post-construction change is the scale
// finder attaching matched variants, which it does on its own clones through
// the crate-private `with_variants`. `Clone` is a full deep copy (variants
// are owned, never shared).
//
// Listing order (`get_all`) is by name using a Greek-aware collation key:
// lowercase, accents and diaeresis stripped, final sigma folded.

use serde::Serialize;

use crate::chord::{ChordSymbol, REFERENCE_TONIC};
use crate::error::{Result, TheoryError};
use crate::pitch::PitchClass;
use crate::registry::{ScaleRegistry, default_registry};

/// Number of interval steps in every scale.
pub const STEPS_PER_SCALE: usize = 7;

/// Number of derived notes (seven degrees plus the octave).
pub const NOTES_PER_SCALE: usize = STEPS_PER_SCALE + 1;

/// Tonic used for the full listing when the caller has no preference.
pub const DEFAULT_TONIC: PitchClass = PitchClass::C;

/// Loosely-typed constructor input, mirroring what a front end or data file
/// provides. `Scale::from_parts` validates every field.
#[derive(Debug, Clone, Default)]
pub struct ScaleParts {
    pub name: String,
    pub tonic: String,
    pub intervals: Vec<u8>,
    pub other_names: Vec<String>,
    pub chords_from_d: Vec<String>,
    pub variants: Vec<Scale>,
}

/// One row of a scale's chord table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeChord {
    /// The scale degree the chord is built for.
    pub degree: PitchClass,
    /// Reference chord transposed to the scale's tonic.
    pub chord: ChordSymbol,
    /// The chord's notes.
    pub notes: Vec<PitchClass>,
}

/// A named mode at a specific tonic, with its derived notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scale {
    name: String,
    tonic: PitchClass,
    intervals: [u8; STEPS_PER_SCALE],
    notes: [PitchClass; NOTES_PER_SCALE],
    other_names: Vec<String>,
    chords_from_d: Vec<ChordSymbol>,
    variants: Vec<Scale>,
}

impl Scale {
    /// Build a scale with no alternate names, chords or variants.
    pub fn new(name: impl Into<String>, tonic: PitchClass, intervals: &[u8]) -> Result<Scale> {
        Scale::build(name.into(), tonic, intervals, Vec::new(), &[], Vec::new())
    }

    /// Validate loosely-typed parts and build a scale.
    ///
    /// Checks, in order: non-empty name, tonic spelling, seven positive
    /// steps, zero or seven reference chords, each chord well-formed.
    pub fn from_parts(parts: ScaleParts) -> Result<Scale> {
        if parts.name.trim().is_empty() {
            return Err(TheoryError::InvalidName);
        }
        let tonic = PitchClass::parse(&parts.tonic)
            .map_err(|_| TheoryError::InvalidTonic(parts.tonic.clone()))?;
        Scale::build(
            parts.name,
            tonic,
            &parts.intervals,
            parts.other_names,
            &parts.chords_from_d,
            parts.variants,
        )
    }

    pub(crate) fn build(
        name: String,
        tonic: PitchClass,
        intervals: &[u8],
        other_names: Vec<String>,
        chords_from_d: &[String],
        variants: Vec<Scale>,
    ) -> Result<Scale> {
        if name.trim().is_empty() {
            return Err(TheoryError::InvalidName);
        }

        let intervals: [u8; STEPS_PER_SCALE] = match intervals.try_into() {
            Ok(steps) if intervals.iter().all(|&s| s > 0) => steps,
            _ => {
                return Err(TheoryError::InvalidIntervals {
                    scale: name,
                    intervals: intervals.to_vec(),
                });
            }
        };

        if !chords_from_d.is_empty() && chords_from_d.len() != STEPS_PER_SCALE {
            return Err(TheoryError::InvalidChordsLength {
                scale: name,
                len: chords_from_d.len(),
            });
        }
        let chords_from_d = chords_from_d
            .iter()
            .map(|c| ChordSymbol::parse(c))
            .collect::<Result<Vec<_>>>()?;

        Ok(Scale {
            notes: derive_notes(tonic, &intervals),
            name,
            tonic,
            intervals,
            other_names,
            chords_from_d,
            variants,
        })
    }

    /// Every registry template at `tonic`, variants included, sorted by name.
    ///
    /// Fails on the first template that does not construct; use the finder
    /// for a sweep that tolerates broken entries.
    pub fn get_all(registry: &ScaleRegistry, tonic: PitchClass) -> Result<Vec<Scale>> {
        registry
            .sorted_templates()
            .into_iter()
            .map(|template| template.instantiate(tonic))
            .collect()
    }

    /// The built-in catalog at `DEFAULT_TONIC`.
    pub fn get_all_default() -> Result<Vec<Scale>> {
        Scale::get_all(default_registry(), DEFAULT_TONIC)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    pub fn intervals(&self) -> &[u8; STEPS_PER_SCALE] {
        &self.intervals
    }

    /// The eight derived notes, tonic first.
    pub fn notes(&self) -> &[PitchClass; NOTES_PER_SCALE] {
        &self.notes
    }

    pub fn other_names(&self) -> &[String] {
        &self.other_names
    }

    /// Reference chords relative to D, empty or one per degree.
    pub fn chords_from_d(&self) -> &[ChordSymbol] {
        &self.chords_from_d
    }

    pub fn variants(&self) -> &[Scale] {
        &self.variants
    }

    /// Greek display names of the eight notes.
    pub fn note_names(&self) -> Vec<&'static str> {
        self.notes.iter().map(|n| n.display_name()).collect()
    }

    /// Whether the last derived note is the tonic.
    pub fn closes_on_tonic(&self) -> bool {
        self.notes[NOTES_PER_SCALE - 1] == self.tonic
    }

    /// True if every input note appears among this scale's own notes.
    /// Variants are not consulted.
    pub fn contains_all(&self, input: &[PitchClass]) -> bool {
        input.iter().all(|n| self.notes.contains(n))
    }

    /// True if this scale or any attached variant contains every input note.
    pub fn matches(&self, input: &[PitchClass]) -> bool {
        self.contains_all(input) || self.variants.iter().any(|v| v.contains_all(input))
    }

    /// The chord table: each degree with its reference chord moved from D to
    /// this scale's tonic. Empty when the scale has no reference chords.
    pub fn degree_chords(&self) -> Vec<DegreeChord> {
        self.notes
            .iter()
            .zip(&self.chords_from_d)
            .map(|(&degree, &reference)| {
                let chord = reference.transpose(REFERENCE_TONIC, self.tonic);
                DegreeChord {
                    degree,
                    chord,
                    notes: chord.notes(),
                }
            })
            .collect()
    }

    pub(crate) fn renamed(mut self, name: String) -> Scale {
        self.name = name;
        self
    }

    pub(crate) fn with_variants(mut self, variants: Vec<Scale>) -> Scale {
        self.variants = variants;
        self
    }
}

fn derive_notes(
    tonic: PitchClass,
    intervals: &[u8; STEPS_PER_SCALE],
) -> [PitchClass; NOTES_PER_SCALE] {
    let mut notes = [tonic; NOTES_PER_SCALE];
    for (i, &step) in intervals.iter().enumerate() {
        notes[i + 1] = notes[i].add_semitones(i32::from(step));
    }
    notes
}

/// Sort key for scale names: lowercase with Greek accents removed.
pub fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'ά' => 'α',
            'έ' => 'ε',
            'ή' => 'η',
            'ί' | 'ϊ' | 'ΐ' => 'ι',
            'ό' => 'ο',
            'ύ' | 'ϋ' | 'ΰ' => 'υ',
            'ώ' => 'ω',
            'ς' => 'σ',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    const RAST: [u8; 7] = [2, 2, 1, 2, 2, 2, 1];

    fn parts(name: &str, tonic: &str, intervals: &[u8]) -> ScaleParts {
        ScaleParts {
            name: name.to_string(),
            tonic: tonic.to_string(),
            intervals: intervals.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rast_on_d() {
        let scale = Scale::new("Ραστ", D, &RAST).unwrap();
        assert_eq!(scale.notes(), &[D, E, FSharp, G, A, B, CSharp, D]);
        assert!(scale.closes_on_tonic());
        assert_eq!(
            scale.note_names(),
            vec!["Ρε", "Μι", "Φα#", "Σολ", "Λα", "Σι", "Ντο#", "Ρε"]
        );
    }

    #[test]
    fn test_octave_closure_for_every_tonic_and_rotation() {
        for tonic in PitchClass::ALL {
            for rotation in 0..7 {
                let mut steps = RAST;
                steps.rotate_left(rotation);
                let scale = Scale::new("mode", tonic, &steps).unwrap();
                assert_eq!(scale.notes().len(), NOTES_PER_SCALE);
                assert_eq!(scale.notes()[0], tonic);
                assert_eq!(scale.notes()[7], tonic);
            }
        }
    }

    #[test]
    fn test_eleven_semitone_variant_does_not_close() {
        let scale = Scale::new("Παραλλαγή", D, &[2, 1, 1, 3, 1, 2, 1]).unwrap();
        assert_eq!(scale.notes()[7], CSharp);
        assert!(!scale.closes_on_tonic());
    }

    #[test]
    fn test_from_parts_validation_order() {
        assert!(matches!(
            Scale::from_parts(parts("", "X", &[1])),
            Err(TheoryError::InvalidName)
        ));
        assert!(matches!(
            Scale::from_parts(parts("  ", "D", &RAST)),
            Err(TheoryError::InvalidName)
        ));
        assert!(matches!(
            Scale::from_parts(parts("Ραστ", "X", &[1])),
            Err(TheoryError::InvalidTonic(t)) if t == "X"
        ));
        assert!(matches!(
            Scale::from_parts(parts("Ραστ", "D", &[2, 2, 1, 2, 2, 2])),
            Err(TheoryError::InvalidIntervals { intervals, .. }) if intervals.len() == 6
        ));
        assert!(matches!(
            Scale::from_parts(parts("Ραστ", "D", &[2, 2, 1, 2, 2, 2, 1, 0])),
            Err(TheoryError::InvalidIntervals { .. })
        ));
        assert!(matches!(
            Scale::from_parts(parts("Ραστ", "D", &[2, 2, 0, 2, 2, 2, 1])),
            Err(TheoryError::InvalidIntervals { .. })
        ));
    }

    #[test]
    fn test_from_parts_accepts_lowercase_tonic() {
        let scale = Scale::from_parts(parts("Ραστ", " f# ", &RAST)).unwrap();
        assert_eq!(scale.tonic(), FSharp);
    }

    #[test]
    fn test_chords_length_must_be_zero_or_seven() {
        let mut p = parts("Νιαβέντ", "D", &[2, 1, 3, 1, 1, 3, 1]);
        p.chords_from_d = vec!["D-".into(), "A+".into()];
        assert!(matches!(
            Scale::from_parts(p.clone()),
            Err(TheoryError::InvalidChordsLength { len: 2, .. })
        ));

        p.chords_from_d = Vec::new();
        assert!(Scale::from_parts(p).unwrap().chords_from_d().is_empty());
    }

    #[test]
    fn test_malformed_reference_chord_is_rejected() {
        let mut p = parts("Νιαβέντ", "D", &[2, 1, 3, 1, 1, 3, 1]);
        p.chords_from_d = ["D-", "A+", "D-", "G#dim", "D-", "A#+", "Amaj"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(matches!(
            Scale::from_parts(p),
            Err(TheoryError::InvalidChordFormat(c)) if c == "Amaj"
        ));
    }

    #[test]
    fn test_contains_all_is_containment_not_equality() {
        let scale = Scale::new("Ραστ", D, &RAST).unwrap();
        assert!(scale.contains_all(&[D, E, FSharp, G, A, B, CSharp]));
        assert!(scale.contains_all(&[D, A]));
        assert!(scale.contains_all(&[]));
        assert!(!scale.contains_all(&[D, E, F]));
    }

    #[test]
    fn test_matches_consults_attached_variants() {
        let variant = Scale::new("Κατιούσα", D, &[2, 2, 1, 2, 2, 1, 2]).unwrap();
        let scale = Scale::new("Ραστ", D, &RAST).unwrap();
        let input = [D, E, FSharp, G, A, B, C];

        assert!(!scale.matches(&input));
        let scale = scale.with_variants(vec![variant]);
        assert!(scale.matches(&input));
        assert!(!scale.contains_all(&input));
    }

    #[test]
    fn test_degree_chords_nihavent_on_d() {
        let scale = default_registry()
            .template("Νιαβέντ")
            .unwrap()
            .instantiate(D)
            .unwrap();
        let table = scale.degree_chords();
        assert_eq!(table.len(), 7);
        assert_eq!(table[0].degree, D);
        assert_eq!(table[0].chord.to_string(), "D-");
        assert_eq!(table[3].degree, GSharp);
        assert_eq!(table[3].chord.to_string(), "G#dim");
        assert_eq!(table[3].notes.len(), 4);
    }

    #[test]
    fn test_degree_chords_are_transposed_to_tonic() {
        let scale = default_registry()
            .template("Διατονικό μινόρε")
            .unwrap()
            .instantiate(A)
            .unwrap();
        let chords: Vec<String> = scale
            .degree_chords()
            .iter()
            .map(|row| row.chord.to_string())
            .collect();
        assert_eq!(chords, vec!["A-", "G+", "C+", "D-", "A-", "F+", "G+"]);
        assert_eq!(scale.degree_chords()[0].notes, vec![A, C, E]);
    }

    #[test]
    fn test_no_reference_chords_gives_empty_table() {
        let scale = Scale::new("Ραστ", D, &RAST).unwrap();
        assert!(scale.degree_chords().is_empty());
    }

    #[test]
    fn test_get_all_is_sorted_and_complete() {
        let registry = default_registry();
        let scales = Scale::get_all(registry, DEFAULT_TONIC).unwrap();
        assert_eq!(scales.len(), registry.templates().len());
        assert_eq!(scales[0].name(), "Αρμονικό μινόρε");
        assert_eq!(scales.last().unwrap().name(), "Χουσεΐνι");

        let keys: Vec<String> = scales.iter().map(|s| collation_key(s.name())).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        // Registry order lists Μιξολυδικός after Ραστ; the listing does not.
        let pos = |name: &str| scales.iter().position(|s| s.name() == name).unwrap();
        assert!(pos("Μελωδικό μινόρε") < pos("Μιξολυδικός"));
        assert!(pos("Μιξολυδικός") < pos("Ραστ"));
    }

    #[test]
    fn test_get_all_default_lists_builtin_catalog_at_c() {
        let scales = Scale::get_all_default().unwrap();
        assert_eq!(scales, Scale::get_all(default_registry(), C).unwrap());
        assert_eq!(scales.len(), 23);
        assert!(scales.iter().all(|s| s.tonic() == C));
    }

    #[test]
    fn test_get_all_instantiates_variants_at_same_tonic() {
        let scales = Scale::get_all(default_registry(), G).unwrap();
        let rast = scales.iter().find(|s| s.name() == "Ραστ").unwrap();
        assert_eq!(rast.tonic(), G);
        assert_eq!(rast.variants().len(), 1);
        assert_eq!(rast.variants()[0].name(), "Κατιούσα");
        assert_eq!(rast.variants()[0].tonic(), G);
        assert_eq!(rast.variants()[0].notes()[6], F);
    }

    #[test]
    fn test_clone_is_deep() {
        let scales = Scale::get_all(default_registry(), D).unwrap();
        let rast = scales.iter().find(|s| s.name() == "Ραστ").unwrap();
        let copy = rast.clone().with_variants(Vec::new());
        assert!(copy.variants().is_empty());
        assert_eq!(rast.variants().len(), 1);
        assert_eq!(copy.notes(), rast.notes());
    }

    #[test]
    fn test_serialized_record_shape() {
        let scale = default_registry()
            .template("Ραστ")
            .unwrap()
            .instantiate(D)
            .unwrap();
        let value = serde_json::to_value(&scale).unwrap();
        assert_eq!(value["name"], "Ραστ");
        assert_eq!(value["tonic"], "D");
        assert_eq!(value["intervals"], serde_json::json!([2, 2, 1, 2, 2, 2, 1]));
        assert_eq!(value["notes"][2], "F#");
        assert_eq!(value["other_names"], serde_json::json!(["Ματζόρε", "Ιωνικός"]));
        assert_eq!(value["chords_from_d"], serde_json::json!([]));
        assert_eq!(value["variants"][0]["name"], "Κατιούσα");
    }

    #[test]
    fn test_collation_key_folds_case_and_accents() {
        assert_eq!(collation_key("Χουσεΐνι"), "χουσεινι");
        assert_eq!(collation_key("ΡΑΣΤ"), "ραστ");
        assert!(collation_key("Χιτζάζ") < collation_key("Χιτζαζκιάρ"));
        assert!(collation_key("Ουζάλ") < collation_key("Ουσάκ"));
    }
}
