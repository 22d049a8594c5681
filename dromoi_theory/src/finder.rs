// Scale recognition: which dromoi could seven given notes belong to?
//
// `ScaleFinder::find_scales` sweeps every registry template at every one of
// the twelve tonics, plus every variant of every template at every tonic, and
// keeps the scales whose notes contain all seven input notes. The sweep is
// small (templates × 12 × (1 + variants)) and fully recomputed per call; no
// result is cached between calls.
//
// Pipeline:
// 1. Parent candidates: each template (in listing order, see
//    `ScaleRegistry::sorted_templates`) at each tonic, tested on its own.
// 2. Variant candidates: each variant at each tonic, tested on its own and
//    tagged with its owning template's name.
// 3. Each variant candidate is attached to the first parent candidate of the
//    same template (deduplicated by name + tonic; the variant keeps its own
//    tonic).
// 4. One result per parent name, first tonic wins, carrying its attached
//    variants.
// 5. Variants whose template never matched become standalone results named
//    `"<template> (<variant>)"`, one per distinct name.
//
// A template or variant that fails to construct is logged and skipped; this
// is the only place in the crate where a `TheoryError` does not propagate.

use std::collections::BTreeSet;

use log::{debug, trace, warn};

use crate::pitch::PitchClass;
use crate::registry::{ScaleRegistry, ScaleTemplate, default_registry};
use crate::scale::{STEPS_PER_SCALE, Scale};

/// A matched top-level scale and the variants collected for it.
struct ParentCandidate {
    scale: Scale,
    variants: Vec<Scale>,
}

/// A matched variant and the template it belongs to.
struct VariantCandidate {
    scale: Scale,
    parent_name: String,
}

/// Searches a registry for scales compatible with a set of notes.
#[derive(Debug, Clone, Copy)]
pub struct ScaleFinder<'r> {
    registry: &'r ScaleRegistry,
}

impl Default for ScaleFinder<'static> {
    fn default() -> Self {
        ScaleFinder::new(default_registry())
    }
}

impl<'r> ScaleFinder<'r> {
    pub fn new(registry: &'r ScaleRegistry) -> Self {
        ScaleFinder { registry }
    }

    /// Every scale whose notes contain all of `input`.
    ///
    /// Returns an empty list unless exactly seven notes are given. Parent
    /// scales come first in discovery order, then orphan variants.
    pub fn find_scales(&self, input: &[PitchClass]) -> Vec<Scale> {
        if input.len() != STEPS_PER_SCALE {
            debug!(
                "scale search needs {STEPS_PER_SCALE} notes, got {}",
                input.len()
            );
            return Vec::new();
        }

        let templates = self.registry.sorted_templates();
        let mut parents = collect_parents(&templates, input);
        let variants = collect_variants(&templates, input);

        for candidate in &variants {
            let Some(parent) = parents
                .iter_mut()
                .find(|p| p.scale.name() == candidate.parent_name)
            else {
                continue;
            };
            let already_attached = parent.variants.iter().any(|v| {
                v.name() == candidate.scale.name() && v.tonic() == candidate.scale.tonic()
            });
            if !already_attached {
                parent.variants.push(candidate.scale.clone());
            }
        }

        let parent_names: BTreeSet<String> =
            parents.iter().map(|p| p.scale.name().to_string()).collect();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut results = Vec::new();

        for parent in parents {
            if seen.insert(parent.scale.name().to_string()) {
                results.push(parent.scale.with_variants(parent.variants));
            }
        }

        for candidate in variants {
            if parent_names.contains(&candidate.parent_name) {
                continue;
            }
            let name = format!("{} ({})", candidate.parent_name, candidate.scale.name());
            if seen.insert(name.clone()) {
                results.push(candidate.scale.renamed(name));
            }
        }

        debug!(
            "scale search over {} templates found {} results",
            templates.len(),
            results.len()
        );
        results
    }
}

fn collect_parents(templates: &[&ScaleTemplate], input: &[PitchClass]) -> Vec<ParentCandidate> {
    let mut parents = Vec::new();
    for template in templates {
        for tonic in PitchClass::ALL {
            match template.instantiate_alone(tonic) {
                Ok(scale) if scale.contains_all(input) => {
                    trace!("parent match: {} at {tonic}", template.name);
                    parents.push(ParentCandidate {
                        scale,
                        variants: Vec::new(),
                    });
                }
                Ok(_) => {}
                Err(e) => warn!("skipping scale {:?} at {tonic}: {e}", template.name),
            }
        }
    }
    parents
}

fn collect_variants(templates: &[&ScaleTemplate], input: &[PitchClass]) -> Vec<VariantCandidate> {
    let mut variants = Vec::new();
    for template in templates {
        for tonic in PitchClass::ALL {
            for variant in &template.variants {
                match variant.instantiate_alone(tonic) {
                    Ok(scale) if scale.contains_all(input) => {
                        trace!(
                            "variant match: {} ({}) at {tonic}",
                            template.name, variant.name
                        );
                        variants.push(VariantCandidate {
                            scale,
                            parent_name: template.name.clone(),
                        });
                    }
                    Ok(_) => {}
                    Err(e) => warn!(
                        "skipping variant {:?} of {:?} at {tonic}: {e}",
                        variant.name, template.name
                    ),
                }
            }
        }
    }
    variants
}

/// Search the built-in registry.
pub fn find_scales(input: &[PitchClass]) -> Vec<Scale> {
    ScaleFinder::default().find_scales(input)
}
