//! Chooser configuration.
//!
//! Loaded from `<config_dir>/resultpick/config.json` unless a path is given.
//! `RPICK_CHOOSER` overrides the chooser command line.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const CHOOSER_ENV: &str = "RPICK_CHOOSER";
const CONFIG_DIR_NAME: &str = "resultpick";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PickConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub chooser: ChooserConfig,
    #[serde(default)]
    pub fallback: FallbackMode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChooserConfig {
    pub program: String,
    /// Extra arguments appended after the built-in ones.
    pub args: Vec<String>,
    pub preview_window: String,
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self {
            program: "fzf".to_string(),
            args: Vec::new(),
            preview_window: "right:40%:wrap".to_string(),
        }
    }
}

/// What to do when the chooser program is not installed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Fail with an environment error.
    #[default]
    None,
    /// Print the table and read a row number from the terminal.
    Prompt,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            chooser: ChooserConfig::default(),
            fallback: FallbackMode::None,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load config from `explicit`, or from the default location when present.
///
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<PickConfig> {
    let config = match explicit {
        Some(path) => read_config(path)?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => read_config(&path)?,
            None => PickConfig::default(),
        },
    };
    validate_config(&config)?;
    let overridden = std::env::var(CHOOSER_ENV).ok();
    apply_chooser_override(config, overridden.as_deref())
}

fn read_config(path: &Path) -> Result<PickConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: PickConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn validate_config(config: &PickConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.chooser.program.trim().is_empty() {
        return Err(anyhow!("chooser.program must not be empty"));
    }
    Ok(())
}

/// Replace chooser program and args with a shell-style command line.
pub fn apply_chooser_override(mut config: PickConfig, value: Option<&str>) -> Result<PickConfig> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        return Ok(config);
    };
    let mut parts =
        shell_words::split(value).with_context(|| format!("parse {CHOOSER_ENV}: {value}"))?;
    if parts.is_empty() {
        return Ok(config);
    }
    config.chooser.program = parts.remove(0);
    config.chooser.args = parts;
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
