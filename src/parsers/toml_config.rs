//! @ai:module:intent Check pyproject.toml for pytest and coverage sections
//! @ai:module:layer infrastructure
//! @ai:module:public_api verify_pytest_section, verify_coverage_section
//! @ai:module:stateless true

use super::{read_config, Verification};
use std::path::Path;

/// @ai:intent Verified when `[tool.pytest]` (or a sub-table of it) is present
/// @ai:effects fs:read
pub fn verify_pytest_section(path: &Path) -> Verification {
    verify_tool_section(path, "pytest")
}

/// @ai:intent Verified when `[tool.coverage]` (or a sub-table of it) is present
/// @ai:effects fs:read
pub fn verify_coverage_section(path: &Path) -> Verification {
    verify_tool_section(path, "coverage")
}

fn verify_tool_section(path: &Path, section: &str) -> Verification {
    let content = match read_config(path) {
        Ok(content) => content,
        Err(verification) => return verification,
    };

    let document: toml::Table = match toml::from_str(&content) {
        Ok(document) => document,
        Err(e) => return Verification::fail(format!("TOML parse error in {}: {}", path.display(), e)),
    };

    let present = document
        .get("tool")
        .and_then(|tool| tool.get(section))
        .is_some();

    if present {
        Verification::pass(format!("[tool.{section}] found in {}", path.display()))
    } else {
        Verification::fail(format!("[tool.{section}] not found in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("pyproject.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_pytest_ini_options_counts_as_pytest_section() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "[project]\nname = \"demo\"\n\n[tool.pytest.ini_options]\ntestpaths = [\"tests\"]\n",
        );

        assert!(verify_pytest_section(&path).verified);
        assert!(!verify_coverage_section(&path).verified);
    }

    #[test]
    fn test_coverage_section() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "[tool.coverage.run]\nbranch = true\n");

        assert!(verify_coverage_section(&path).verified);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "[tool.pytest\nbroken = ");

        let result = verify_pytest_section(&path);
        assert!(!result.verified);
        assert!(result.message.contains("parse error"));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = verify_pytest_section(&temp.path().join("pyproject.toml"));

        assert!(!result.verified);
        assert!(result.message.starts_with("File not found: "));
    }
}
