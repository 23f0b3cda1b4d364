use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{DEFAULT_ITERATIONS, MIN_ITERATIONS};
use crate::errors::{Result, SurelockError};

/// Project-level configuration, loaded from `.surelock.toml`.
///
/// Every field has a sensible default so SureLock works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file used when `--file` is not given.
    #[serde(default = "default_file")]
    pub default_file: String,

    /// Category used when a command does not name one.
    #[serde(default = "default_category")]
    pub default_category: String,

    /// PBKDF2 iteration count for newly initialized vaults.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_file() -> String {
    "surelock.db".to_string()
}

fn default_category() -> String {
    "root".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            default_category: default_category(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".surelock.toml";

    /// Load settings from `<project_dir>/.surelock.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SurelockError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.kdf_iterations < MIN_ITERATIONS {
            return Err(SurelockError::ConfigError(format!(
                "kdf_iterations must be at least {MIN_ITERATIONS} (got {})",
                settings.kdf_iterations
            )));
        }

        Ok(settings)
    }

    /// Resolve the vault file path: an explicit `--file` wins, otherwise
    /// `default_file` relative to the project directory.
    pub fn vault_path(&self, project_dir: &Path, file: Option<&str>) -> PathBuf {
        project_dir.join(file.unwrap_or(&self.default_file))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
