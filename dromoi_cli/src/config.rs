// Explorer configuration.
//
// Optional JSON file selected with `--config <PATH>` (or `DROMOI_CONFIG`).
// Every field has a default, so an empty object `{}` is a valid config and no
// file at all gives the same result. Command line flags override the file:
// `--tonic` beats `default_tonic`, `--names` forces `show_note_names` on.
//
// `registry_path` points at an alternate scale template file with the same
// shape as the embedded `data/scale_templates.json`. A relative path is
// resolved against the directory of the config file that names it.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dromoi_theory::{PitchClass, ScaleRegistry, default_registry};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Tonic used by `scales` and `show` when `--tonic` is not given.
    pub default_tonic: PitchClass,
    /// Print Greek note names (Ντο, Ρε, ...) instead of letter spellings.
    pub show_note_names: bool,
    /// Alternate scale template registry to load instead of the built-in one.
    pub registry_path: Option<PathBuf>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            default_tonic: PitchClass::D,
            show_note_names: false,
            registry_path: None,
        }
    }
}

impl ExplorerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a config file, resolving a relative `registry_path` against the
    /// file's directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config = ExplorerConfig::from_json(&json)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.registry_path = config.registry_path.map(|p| {
            if p.is_relative() { base.join(p) } else { p }
        });

        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// The configured registry, or the built-in one.
    pub fn registry(&self) -> anyhow::Result<Cow<'static, ScaleRegistry>> {
        let Some(path) = &self.registry_path else {
            return Ok(Cow::Borrowed(default_registry()));
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading scale registry {}", path.display()))?;
        let registry = ScaleRegistry::from_json(&json)
            .with_context(|| format!("parsing scale registry {}", path.display()))?;
        log::info!(
            "using {} scale templates from {}",
            registry.templates().len(),
            path.display()
        );
        Ok(Cow::Owned(registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = ExplorerConfig::from_json("{}").unwrap();
        assert_eq!(config, ExplorerConfig::default());
        assert_eq!(config.default_tonic, PitchClass::D);
    }

    #[test]
    fn test_config_fields_parse() {
        let config = ExplorerConfig::from_json(
            r#"{"default_tonic": "a#", "show_note_names": true, "registry_path": "extra.json"}"#,
        )
        .unwrap();
        assert_eq!(config.default_tonic, PitchClass::ASharp);
        assert!(config.show_note_names);
        assert_eq!(config.registry_path, Some(PathBuf::from("extra.json")));
    }

    #[test]
    fn test_invalid_tonic_is_rejected() {
        assert!(ExplorerConfig::from_json(r#"{"default_tonic": "Bb"}"#).is_err());
    }

    #[test]
    fn test_default_registry_when_unset() {
        let registry = ExplorerConfig::default().registry().unwrap();
        assert!(matches!(registry, Cow::Borrowed(_)));
        assert_eq!(registry.templates().len(), 23);
    }

    #[test]
    fn test_load_resolves_registry_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mini.json"),
            r#"{"templates": [{"name": "Ραστ", "intervals": [2, 2, 1, 2, 2, 2, 1]}]}"#,
        )
        .unwrap();
        let config_path = dir.path().join("dromoi.json");
        std::fs::write(&config_path, r#"{"registry_path": "mini.json"}"#).unwrap();

        let config = ExplorerConfig::load(&config_path).unwrap();
        assert_eq!(config.registry_path, Some(dir.path().join("mini.json")));
        let registry = config.registry().unwrap();
        assert_eq!(registry.templates().len(), 1);
    }

    #[test]
    fn test_missing_files_report_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExplorerConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));

        let config = ExplorerConfig {
            registry_path: Some(dir.path().join("absent.json")),
            ..Default::default()
        };
        let err = config.registry().unwrap_err();
        assert!(format!("{err:#}").contains("reading scale registry"));
    }
}
