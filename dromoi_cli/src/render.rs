// Plain-text rendering of catalog, scales, chord tables and search results.
//
// Each function returns a `String` so output can be tested without capturing
// stdout. Labels are in Greek, matching the scale names. When `names` is set,
// notes are printed with their solfège names (Ντο, Ρε, ...) instead of
// letter spellings; chord symbols always keep their letter form since that is
// their wire format.
//
// Detail view layout: a scale with no variants prints one block; a scale with
// variants prints a `Βάση` (base) block followed by one block per variant.

use dromoi_theory::{ChordSymbol, PitchClass, Scale};

const NO_RESULTS: &str = "Δεν βρέθηκαν δρόμοι";
const RULE: &str = "────────────────────────────";

fn note_label(note: PitchClass, names: bool) -> &'static str {
    if names {
        note.display_name()
    } else {
        note.spelling()
    }
}

fn note_list(notes: &[PitchClass], names: bool) -> String {
    notes
        .iter()
        .map(|&n| note_label(n, names))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `[2, 2, 1, ...]` as `2-2-1-...`.
pub fn intervals_label(intervals: &[u8]) -> String {
    intervals
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

/// The pitch-class catalog, one `C (Ντο)` entry per line.
pub fn catalog() -> String {
    PitchClass::ALL
        .iter()
        .map(|pc| format!("{} ({})", pc.spelling(), pc.display_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One card per scale: name with tonic, intervals, notes.
pub fn scale_list(scales: &[Scale], names: bool) -> String {
    scales
        .iter()
        .map(|s| {
            format!(
                "{} [{}]\n  Διαστήματα: {}\n  Νότες: {}",
                s.name(),
                s.tonic(),
                intervals_label(s.intervals()),
                note_list(s.notes(), names)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn scale_block(scale: &Scale, names: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if !scale.other_names().is_empty() {
        lines.push(format!("Άλλες ονομασίες: {}", scale.other_names().join(", ")));
    }
    lines.push(format!("Τονική: {}", note_label(scale.tonic(), names)));
    lines.push(format!("Διαστήματα: {}", intervals_label(scale.intervals())));
    lines.push(format!("Νότες: {}", note_list(scale.notes(), names)));

    let table = scale.degree_chords();
    if !table.is_empty() {
        lines.push("Συγχορδίες:".to_string());
        lines.push("  Νότα  Συγχορδία".to_string());
        for row in table {
            lines.push(format!(
                "  {:<6}{:<7}{}",
                note_label(row.degree, names),
                row.chord.to_string(),
                note_list(&row.notes, names)
            ));
        }
    }
    lines
}

/// Full detail view of one scale, including its variants.
pub fn scale_detail(scale: &Scale, names: bool) -> String {
    let mut lines = vec![scale.name().to_string(), RULE.to_string()];
    if scale.variants().is_empty() {
        lines.extend(scale_block(scale, names));
    } else {
        lines.push("Βάση".to_string());
        lines.extend(scale_block(scale, names));
        for variant in scale.variants() {
            lines.push(String::new());
            lines.push(variant.name().to_string());
            lines.extend(scale_block(variant, names));
        }
    }
    lines.join("\n")
}

/// Search results with the `n/7` selection counter.
pub fn find_results(selected: usize, results: &[Scale], names: bool) -> String {
    let mut lines = vec![format!("{selected}/7"), String::new()];
    if results.is_empty() {
        lines.push(NO_RESULTS.to_string());
        return lines.join("\n");
    }

    for (i, scale) in results.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(scale.name().to_string());
        lines.push(format!("  Τονική: {}", scale.tonic().display_name()));
        lines.push(format!("  Διαστήματα: {}", intervals_label(scale.intervals())));
        lines.push(format!("  Νότες: {}", note_list(scale.notes(), names)));
        if !scale.variants().is_empty() {
            let variants = scale
                .variants()
                .iter()
                .map(|v| format!("{} ({})", v.name(), v.tonic()))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("  Παραλλαγές: {variants}"));
        }
    }
    lines.join("\n")
}

/// A chord symbol and its notes.
pub fn chord(chord: &ChordSymbol, names: bool) -> String {
    format!("{chord}: {}", note_list(&chord.notes(), names))
}
