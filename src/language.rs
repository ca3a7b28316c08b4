//! @ai:module:intent Language identifiers shared by the toolchain and analysis subsystems
//! @ai:module:layer domain
//! @ai:module:public_api Language
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// @ai:intent Programming language (or the global pseudo-language) a check applies to
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Global,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
}

impl Language {
    /// Every accepted language, in registry order.
    pub const ALL: [Language; 6] = [
        Language::Global,
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Go,
        Language::Java,
    ];

    /// @ai:intent Convert language to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Global => "global",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Java => "java",
        }
    }

    /// @ai:intent Comma-separated list of supported names, for diagnostics
    /// @ai:effects pure
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// @ai:intent Parse a language name case-insensitively
    /// @ai:post unknown names fail with the supported set in the message
    /// @ai:effects pure
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();

        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == normalized)
            .ok_or_else(|| Error::UnsupportedLanguage {
                language: s.to_string(),
                supported: Self::supported_list(),
            })
    }
}
