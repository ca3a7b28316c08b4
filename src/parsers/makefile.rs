//! @ai:module:intent Check a Makefile for Go coverage flags
//! @ai:module:layer infrastructure
//! @ai:module:public_api verify_coverage_flags
//! @ai:module:stateless true

use super::{read_config, Verification};
use std::path::Path;

const COVERAGE_MARKERS: [&str; 3] = ["-cover", "-coverprofile", "coverage"];

/// @ai:intent Verified when any coverage marker appears in the Makefile text
/// @ai:effects fs:read
pub fn verify_coverage_flags(path: &Path) -> Verification {
    let content = match read_config(path) {
        Ok(content) => content,
        Err(verification) => return verification,
    };

    match COVERAGE_MARKERS.iter().find(|marker| content.contains(**marker)) {
        Some(marker) => Verification::pass(format!("'{marker}' found in {}", path.display())),
        None => Verification::fail(format!("No coverage flags found in {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cover_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Makefile");
        std::fs::write(&path, "test:\n\tgo test -cover ./...\n").unwrap();

        assert!(verify_coverage_flags(&path).verified);
    }

    #[test]
    fn test_coverage_target_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Makefile");
        std::fs::write(&path, "coverage:\n\t./scripts/cov.sh\n").unwrap();

        assert!(verify_coverage_flags(&path).verified);
    }

    #[test]
    fn test_no_flags() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Makefile");
        std::fs::write(&path, "build:\n\tgo build ./...\n").unwrap();

        let result = verify_coverage_flags(&path);
        assert!(!result.verified);
        assert!(result.message.starts_with("No coverage flags"));
    }

    #[test]
    fn test_missing_makefile() {
        let temp = TempDir::new().unwrap();
        let result = verify_coverage_flags(&temp.path().join("Makefile"));
        assert!(result.message.starts_with("File not found: "));
    }
}
