//! @ai:module:intent Fail-soft predicates over test and coverage configuration files
//! @ai:module:layer infrastructure
//! @ai:module:public_api Verification, toml_config, json_config, xml_config, makefile
//! @ai:module:stateless true
//!
//! Every predicate takes a file path and returns a [`Verification`]. Missing
//! files, unreadable files and malformed content all come back as
//! `verified == false` with a message; nothing here returns an error.

pub mod json_config;
pub mod makefile;
pub mod toml_config;
pub mod xml_config;

use std::path::Path;

/// @ai:intent Outcome of a configuration predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub verified: bool,
    pub message: String,
}

impl Verification {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            verified: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            verified: false,
            message: message.into(),
        }
    }

    /// @ai:intent Verification for a file that does not exist
    /// @ai:effects pure
    pub fn not_found(path: &Path) -> Self {
        Self::fail(format!("File not found: {}", path.display()))
    }

    /// @ai:intent Verification for an I/O failure while reading
    /// @ai:effects pure
    pub fn read_error(error: impl std::fmt::Display) -> Self {
        Self::fail(format!("Error reading file: {error}"))
    }
}

/// @ai:intent Read a config file, mapping absence and I/O errors to failed verifications
/// @ai:effects fs:read
pub(crate) fn read_config(path: &Path) -> Result<String, Verification> {
    if !path.is_file() {
        return Err(Verification::not_found(path));
    }

    std::fs::read_to_string(path).map_err(Verification::read_error)
}

/// @ai:intent Verified when the file exists, with no content inspection
/// @ai:effects fs:read
pub fn verify_exists(path: &Path) -> Verification {
    if path.is_file() {
        Verification::pass(format!("Found {}", path.display()))
    } else {
        Verification::not_found(path)
    }
}
