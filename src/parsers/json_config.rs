//! @ai:module:intent Check package.json and jest.config.json for test settings
//! @ai:module:layer infrastructure
//! @ai:module:public_api verify_test_script, verify_coverage_threshold
//! @ai:module:stateless true
//!
//! Only JSON is read. JavaScript config files are never evaluated.

use super::{read_config, Verification};
use serde_json::Value;
use std::path::Path;

/// @ai:intent Verified when package.json declares `scripts.test`
/// @ai:effects fs:read
pub fn verify_test_script(path: &Path) -> Verification {
    let document = match parse_json(path) {
        Ok(document) => document,
        Err(verification) => return verification,
    };

    if document.get("scripts").and_then(|s| s.get("test")).is_some() {
        Verification::pass(format!("scripts.test found in {}", path.display()))
    } else {
        Verification::fail(format!("scripts.test not found in {}", path.display()))
    }
}

/// @ai:intent Verified when the jest JSON config has a top-level `coverageThreshold`
/// @ai:effects fs:read
pub fn verify_coverage_threshold(path: &Path) -> Verification {
    let document = match parse_json(path) {
        Ok(document) => document,
        Err(verification) => return verification,
    };

    if document.get("coverageThreshold").is_some() {
        Verification::pass(format!("coverageThreshold found in {}", path.display()))
    } else {
        Verification::fail(format!("coverageThreshold not found in {}", path.display()))
    }
}

fn parse_json(path: &Path) -> Result<Value, Verification> {
    let content = read_config(path)?;

    serde_json::from_str(&content).map_err(|e| {
        Verification::fail(format!("JSON parse error in {}: {}", path.display(), e))
    })
}
