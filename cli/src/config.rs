//! Tool configuration with TOML file support.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the fanout tool.
///
/// Can be loaded from a TOML file via [`ToolConfig::from_toml_file`] or
/// built programmatically; flag and env values override file values in
/// `main`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Where derivation state is persisted between runs.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Directory export files are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Base derivation path used when no flag is given.
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_state_file() -> PathBuf {
    PathBuf::from("./fanout_state.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_base_path() -> String {
    "0".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ToolConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("parsing TOML config")
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            output_dir: default_output_dir(),
            base_path: default_base_path(),
        }
    }
}
