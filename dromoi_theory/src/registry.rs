// Scale template registry: the tonic-independent catalog of dromoi.
//
// Templates are data, not code. The default set lives in
// `data/scale_templates.json` and is embedded at compile time with
// `include_str!`; `ScaleRegistry::from_json()` parses any file of the same
// shape (JSON string in, typed struct out), so a front end can load an
// alternate catalog.
//
// File shape:
//   { "templates": [ { "name", "intervals", "other_names"?,
//                      "chords_from_d"?, "variants"? }, ... ] }
// Variants are nested templates with the same fields.
//
// Templates are not validated on load. A template with the wrong number of
// steps or chords fails when it is instantiated, which `Scale::get_all`
// reports and the scale finder logs and skips.
//
// The parsed default registry is built once on first use and shared
// read-only; nothing mutates a registry after parsing.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pitch::PitchClass;
use crate::scale::{Scale, collation_key};

/// Tonic-independent shape of a scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleTemplate {
    pub name: String,
    /// Seven semitone steps from the tonic up to the octave.
    pub intervals: Vec<u8>,
    #[serde(default)]
    pub other_names: Vec<String>,
    /// Reference chords written for tonic D, one per degree (or none).
    #[serde(default)]
    pub chords_from_d: Vec<String>,
    #[serde(default)]
    pub variants: Vec<ScaleTemplate>,
}

impl ScaleTemplate {
    /// Build this template at `tonic`, with every variant built at the same
    /// tonic.
    pub fn instantiate(&self, tonic: PitchClass) -> Result<Scale> {
        let variants = self
            .variants
            .iter()
            .map(|v| v.instantiate(tonic))
            .collect::<Result<Vec<_>>>()?;
        self.build(tonic, variants)
    }

    /// Build this template at `tonic` without its variants.
    pub fn instantiate_alone(&self, tonic: PitchClass) -> Result<Scale> {
        self.build(tonic, Vec::new())
    }

    /// Whether `name` is this template's name or one of its other names,
    /// ignoring case and accents.
    pub fn is_named(&self, name: &str) -> bool {
        let key = collation_key(name.trim());
        std::iter::once(&self.name)
            .chain(&self.other_names)
            .any(|n| collation_key(n) == key)
    }

    fn build(&self, tonic: PitchClass, variants: Vec<Scale>) -> Result<Scale> {
        Scale::build(
            self.name.clone(),
            tonic,
            &self.intervals,
            self.other_names.clone(),
            &self.chords_from_d,
            variants,
        )
    }
}

/// The top-level JSON structure of a registry file.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    templates: Vec<ScaleTemplate>,
}

/// A loaded set of scale templates, in file order.
#[derive(Debug, Clone)]
pub struct ScaleRegistry {
    templates: Vec<ScaleTemplate>,
}

impl ScaleRegistry {
    /// Parse a registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(json)?;
        log::debug!("loaded {} scale templates", file.templates.len());
        Ok(ScaleRegistry {
            templates: file.templates,
        })
    }

    /// All templates, in file order.
    pub fn templates(&self) -> &[ScaleTemplate] {
        &self.templates
    }

    /// All templates ordered by collated name (the listing order).
    pub fn sorted_templates(&self) -> Vec<&ScaleTemplate> {
        let mut sorted: Vec<&ScaleTemplate> = self.templates.iter().collect();
        sorted.sort_by_cached_key(|t| (collation_key(&t.name), t.name.clone()));
        sorted
    }

    /// Look up a template by its name or any of its other names.
    pub fn template(&self, name: &str) -> Option<&ScaleTemplate> {
        self.templates
            .iter()
            .find(|t| collation_key(&t.name) == collation_key(name.trim()))
            .or_else(|| self.templates.iter().find(|t| t.is_named(name)))
    }
}

static DEFAULT_REGISTRY: Lazy<ScaleRegistry> = Lazy::new(|| {
    let json = include_str!("../../data/scale_templates.json");
    ScaleRegistry::from_json(json).expect("embedded scale_templates.json is malformed")
});

/// The built-in catalog of traditional dromoi.
pub fn default_registry() -> &'static ScaleRegistry {
    &DEFAULT_REGISTRY
}
