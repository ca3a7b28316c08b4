//! @ai:module:intent Define error types for toolchain validation and test analysis
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use crate::toolchain::ToolchainValidationError;
use thiserror::Error;

/// @ai:intent Unified error type for all testgrade operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported language '{language}'. Supported languages: {supported}")]
    UnsupportedLanguage { language: String, supported: String },

    #[error("Invalid tool requirement: {0}")]
    InvalidRequirement(String),

    #[error("Invalid test infrastructure result: {0}")]
    InvalidResult(String),

    #[error(transparent)]
    Toolchain(#[from] ToolchainValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
