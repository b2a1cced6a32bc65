use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use veles_questionnaires::QuestionnaireOptions;
use veles_survey::Options;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VelesConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Per-questionnaire defaults, keyed by lowercase questionnaire ID.
    #[serde(default)]
    pub questionnaires: BTreeMap<String, QuestionnaireDefaults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireDefaults {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub question_options: Options,
    #[serde(default)]
    pub page_options: Options,
}

impl VelesConfig {
    pub fn defaults_for(&self, id: &str) -> Option<&QuestionnaireDefaults> {
        self.questionnaires.get(&id.to_ascii_lowercase())
    }
}

impl QuestionnaireDefaults {
    /// Layer command-line overrides on top of these defaults. Option maps
    /// merge per key, the override winning.
    pub fn apply(&self, overrides: QuestionnaireOptions) -> QuestionnaireOptions {
        let mut question_options = self.question_options.clone();
        question_options.merge(overrides.question_options);
        let mut page_options = self.page_options.clone();
        page_options.merge(overrides.page_options);

        QuestionnaireOptions {
            name: overrides.name.or_else(|| self.name.clone()),
            instruction: overrides.instruction.or_else(|| self.instruction.clone()),
            question_options,
            page_options,
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("veles").join("config.json"))
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> eyre::Result<VelesConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(VelesConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    // Versions past u32::MAX are treated as newer than anything we support.
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(0);

    let migrated = migrate(json, on_disk_version)?;
    let config: VelesConfig = serde_json::from_value(migrated)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Version 1 is the first shape, so there is nothing to transform yet;
/// unversioned files are read as-is and stamped on the next save.
fn migrate(json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update veles."
        ));
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(path: &Path, config: &VelesConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, VelesConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = VelesConfig::default();
        config.questionnaires.insert(
            "tipi".to_string(),
            QuestionnaireDefaults {
                name: Some("T".to_string()),
                question_options: Options::new().with("isRequired", true),
                ..Default::default()
            },
        );
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.config_version, CURRENT_VERSION);
        assert_eq!(loaded.questionnaires, config.questionnaires);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn unversioned_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"questionnaires": {"tipi": {"instruction": "Rate yourself"}}}"#)
            .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.config_version, 0);
        assert_eq!(
            config.defaults_for("TIPI").unwrap().instruction.as_deref(),
            Some("Rate yourself")
        );
    }

    #[test]
    fn oversized_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"config_version": 4294967297}"#).unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("newer than this build supports"));
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = migrate(json!({"config_version": 99}), 99).unwrap_err();
        assert!(err.to_string().contains("newer than this build supports"));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let defaults = QuestionnaireDefaults {
            name: Some("CFG".to_string()),
            instruction: Some("from config".to_string()),
            question_options: Options::new().with("isRequired", true).with("colCount", 7),
            page_options: Options::new().with("title", "Personality"),
        };
        let merged = defaults.apply(
            QuestionnaireOptions::new()
                .name("CLI")
                .question_options(Options::new().with("colCount", 1)),
        );

        assert_eq!(merged.name.as_deref(), Some("CLI"));
        assert_eq!(merged.instruction.as_deref(), Some("from config"));
        assert_eq!(merged.question_options.get("isRequired"), Some(&json!(true)));
        assert_eq!(merged.question_options.get("colCount"), Some(&json!(1)));
        assert_eq!(merged.page_options.get("title"), Some(&json!("Personality")));
    }
}
