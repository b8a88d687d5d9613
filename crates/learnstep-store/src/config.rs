//! Configuration loading and engine wiring.
//!
//! Policy constants (score bands, completion thresholds, missing-tier
//! behavior) and the validator endpoint live in a TOML file rather than
//! in code, searched in the usual places with `${ENV_VAR}` resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use learnstep_core::assessment::MissingTierPolicy;
use learnstep_core::engine::{AssessmentEngine, EngineConfig};
use learnstep_core::scoring::ScoreBands;
use learnstep_core::traits::{CompletionStore, ContentSource, RemoteValidator};

use crate::http::HttpValidator;

/// Remote validator endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub base_url: String,
    #[serde(default = "default_validator_timeout")]
    pub timeout_secs: u64,
}

fn default_validator_timeout() -> u64 {
    10
}

/// Top-level learnstep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnstepConfig {
    /// Server-side validator; omit to score locally only.
    #[serde(default)]
    pub validator: Option<ValidatorConfig>,
    /// Score-band thresholds for level assignment.
    #[serde(default)]
    pub bands: ScoreBands,
    /// What to do when an assessment tier has no registered generator.
    #[serde(default)]
    pub missing_tier_policy: MissingTierPolicy,
    /// Capacity of the assessment-record cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_cache_capacity() -> usize {
    256
}

impl Default for LearnstepConfig {
    fn default() -> Self {
        Self {
            validator: None,
            bands: ScoreBands::default(),
            missing_tier_policy: MissingTierPolicy::default(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `learnstep.toml` in the current directory
/// 2. `~/.config/learnstep/config.toml`
///
/// Environment variable override: `LEARNSTEP_VALIDATOR_URL`.
pub fn load_config() -> Result<LearnstepConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LearnstepConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("learnstep.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LearnstepConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LearnstepConfig::default(),
    };

    if let Ok(url) = std::env::var("LEARNSTEP_VALIDATOR_URL") {
        match &mut config.validator {
            Some(validator) => validator.base_url = url,
            None => {
                config.validator = Some(ValidatorConfig {
                    base_url: url,
                    timeout_secs: default_validator_timeout(),
                })
            }
        }
    }

    if let Some(validator) = &mut config.validator {
        validator.base_url = resolve_env_vars(&validator.base_url);
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("learnstep"))
}

/// Build the validator client from config, if one is configured.
pub fn create_validator(config: &LearnstepConfig) -> Option<Arc<dyn RemoteValidator>> {
    config.validator.as_ref().map(|v| {
        Arc::new(HttpValidator::with_timeout(
            &v.base_url,
            Duration::from_secs(v.timeout_secs),
        )) as Arc<dyn RemoteValidator>
    })
}

/// Wire an assessment engine from config, content source, and store.
pub fn build_engine(
    config: &LearnstepConfig,
    source: Arc<dyn ContentSource>,
    store: Arc<dyn CompletionStore>,
) -> AssessmentEngine {
    let engine_config = EngineConfig {
        bands: config.bands,
        missing_tier_policy: config.missing_tier_policy,
        validator_timeout: Duration::from_secs(
            config
                .validator
                .as_ref()
                .map(|v| v.timeout_secs)
                .unwrap_or_else(default_validator_timeout),
        ),
    };

    let engine = AssessmentEngine::new(source, store, engine_config);
    match create_validator(config) {
        Some(validator) => engine.with_validator(validator),
        None => engine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LearnstepConfig::default();
        assert!(config.validator.is_none());
        assert_eq!(config.bands.remediate_below, 30);
        assert_eq!(config.bands.stretch_above, 75);
        assert_eq!(config.missing_tier_policy, MissingTierPolicy::Skip);
        assert_eq!(config.cache_capacity, 256);
    }

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LEARNSTEP_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_LEARNSTEP_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_LEARNSTEP_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_LEARNSTEP_TEST_VAR");
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
cache_capacity = 64
missing_tier_policy = "fail"

[validator]
base_url = "https://validator.example.com"
timeout_secs = 5

[bands]
remediate_below = 40
stretch_above = 80
"#;
        let config: LearnstepConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cache_capacity, 64);
        assert_eq!(config.missing_tier_policy, MissingTierPolicy::Fail);
        assert_eq!(config.bands.remediate_below, 40);
        let validator = config.validator.unwrap();
        assert_eq!(validator.base_url, "https://validator.example.com");
        assert_eq!(validator.timeout_secs, 5);
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learnstep.toml");
        std::fs::write(&path, "[validator]\nbase_url = \"http://localhost:8080\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        let validator = config.validator.unwrap();
        assert_eq!(validator.base_url, "http://localhost:8080");
        assert_eq!(validator.timeout_secs, 10);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(load_config_from(Some(Path::new("/nonexistent/learnstep.toml"))).is_err());
    }
}
