//! @ai:module:intent Declarative description of a required CLI tool
//! @ai:module:layer domain
//! @ai:module:public_api ToolRequirement, ToolCategory
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::Language;
use serde::Serialize;

/// Default argument used to query a tool's version.
pub const DEFAULT_VERSION_COMMAND: &str = "--version";

/// @ai:intent Purpose a tool serves in the evaluation pipeline
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Lint,
    Test,
    Security,
    Build,
}

impl ToolCategory {
    /// @ai:intent Convert category to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Lint => "lint",
            ToolCategory::Test => "test",
            ToolCategory::Security => "security",
            ToolCategory::Build => "build",
        }
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Immutable requirement record for one CLI tool
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolRequirement {
    pub name: &'static str,
    pub language: Language,
    pub category: ToolCategory,
    pub doc_url: &'static str,
    pub min_version: Option<&'static str>,
    pub version_command: &'static str,
}

impl ToolRequirement {
    /// @ai:intent Build a requirement, enforcing the catalog invariants
    /// @ai:pre name non-empty, doc_url starts with http:// or https://
    /// @ai:post returned requirement passes validate()
    /// @ai:effects pure
    pub fn new(
        name: &'static str,
        language: Language,
        category: ToolCategory,
        doc_url: &'static str,
        min_version: Option<&'static str>,
    ) -> Result<Self> {
        let requirement = Self::declare(name, language, category, doc_url, min_version);
        requirement.validate()?;
        Ok(requirement)
    }

    /// @ai:intent Override the version query argument(s)
    /// @ai:effects pure
    pub fn with_version_command(mut self, version_command: &'static str) -> Self {
        self.version_command = version_command;
        self
    }

    /// Unchecked constructor for the static catalog; the registry tests validate every entry.
    pub(crate) const fn declare(
        name: &'static str,
        language: Language,
        category: ToolCategory,
        doc_url: &'static str,
        min_version: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            language,
            category,
            doc_url,
            min_version,
            version_command: DEFAULT_VERSION_COMMAND,
        }
    }

    pub(crate) const fn declare_with_command(
        name: &'static str,
        language: Language,
        category: ToolCategory,
        doc_url: &'static str,
        min_version: Option<&'static str>,
        version_command: &'static str,
    ) -> Self {
        Self {
            name,
            language,
            category,
            doc_url,
            min_version,
            version_command,
        }
    }

    /// @ai:intent Check the requirement invariants
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRequirement(
                "tool name must not be empty".to_string(),
            ));
        }

        if !(self.doc_url.starts_with("http://") || self.doc_url.starts_with("https://")) {
            return Err(Error::InvalidRequirement(format!(
                "doc_url for {} must be an HTTP(S) URL, got '{}'",
                self.name, self.doc_url
            )));
        }

        if let Some(min) = self.min_version {
            let well_formed = !min.is_empty()
                && min
                    .split('.')
                    .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

            if !well_formed {
                return Err(Error::InvalidRequirement(format!(
                    "min_version for {} must be dot-separated integers, got '{}'",
                    self.name, min
                )));
            }
        }

        if self.version_command.trim().is_empty() {
            return Err(Error::InvalidRequirement(format!(
                "version_command for {} must not be empty",
                self.name
            )));
        }

        Ok(())
    }
}
