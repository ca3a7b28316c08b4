//! @ai:module:intent Configuration structs for toolchain validation and analysis
//! @ai:module:layer infrastructure
//! @ai:module:public_api TestgradeConfig, ToolchainConfig, AnalysisConfig
//! @ai:module:stateless true

use crate::error::Result;
use crate::infrastructure::DEFAULT_SKIP_DIRS;
use crate::language::Language;
use crate::toolchain::VERSION_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// @ai:intent Main configuration for testgrade
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestgradeConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// @ai:intent Toolchain validation settings
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_version_timeout_secs")]
    pub version_timeout_secs: u64,
}

/// @ai:intent Repository analysis settings
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            version_timeout_secs: default_version_timeout_secs(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

fn default_version_timeout_secs() -> u64 {
    VERSION_TIMEOUT.as_secs()
}

fn default_languages() -> Vec<Language> {
    vec![Language::Python]
}

fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect()
}

impl ToolchainConfig {
    /// @ai:intent Version query timeout as a Duration
    /// @ai:effects pure
    pub fn version_timeout(&self) -> Duration {
        Duration::from_secs(self.version_timeout_secs)
    }
}

impl TestgradeConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Load configuration, falling back to defaults when the file is absent
    /// @ai:effects fs:read
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
