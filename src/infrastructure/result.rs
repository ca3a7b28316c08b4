//! @ai:module:intent Bounded outcome of a test-infrastructure analysis
//! @ai:module:layer domain
//! @ai:module:public_api TestInfrastructureResult
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::infrastructure::scoring::MAX_SCORE;
use serde::Serialize;

/// Framework name reported when no test configuration was detected.
pub const NO_FRAMEWORK: &str = "none";

/// @ai:intent Static evidence of a repository's test setup and its score
/// @ai:post 0 <= calculated_score <= 25 and 0.0 <= test_file_ratio <= 1.0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestInfrastructureResult {
    test_files_detected: usize,
    test_config_detected: bool,
    coverage_config_detected: bool,
    test_file_ratio: f64,
    calculated_score: u32,
    inferred_framework: String,
}

impl TestInfrastructureResult {
    /// @ai:intent Build a result, rejecting out-of-range score or ratio
    /// @ai:effects pure
    pub fn new(
        test_files_detected: usize,
        test_config_detected: bool,
        coverage_config_detected: bool,
        test_file_ratio: f64,
        calculated_score: u32,
        inferred_framework: impl Into<String>,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&test_file_ratio) {
            return Err(Error::InvalidResult(format!(
                "test_file_ratio must be within [0.0, 1.0], got {test_file_ratio}"
            )));
        }

        if calculated_score > MAX_SCORE {
            return Err(Error::InvalidResult(format!(
                "calculated_score must be within [0, {MAX_SCORE}], got {calculated_score}"
            )));
        }

        Ok(Self {
            test_files_detected,
            test_config_detected,
            coverage_config_detected,
            test_file_ratio,
            calculated_score,
            inferred_framework: inferred_framework.into(),
        })
    }

    /// @ai:intent Result for a repository with no test infrastructure at all
    /// @ai:effects pure
    pub fn empty() -> Self {
        Self {
            test_files_detected: 0,
            test_config_detected: false,
            coverage_config_detected: false,
            test_file_ratio: 0.0,
            calculated_score: 0,
            inferred_framework: NO_FRAMEWORK.to_string(),
        }
    }

    pub fn test_files_detected(&self) -> usize {
        self.test_files_detected
    }

    pub fn test_config_detected(&self) -> bool {
        self.test_config_detected
    }

    pub fn coverage_config_detected(&self) -> bool {
        self.coverage_config_detected
    }

    pub fn test_file_ratio(&self) -> f64 {
        self.test_file_ratio
    }

    pub fn calculated_score(&self) -> u32 {
        self.calculated_score
    }

    pub fn inferred_framework(&self) -> &str {
        &self.inferred_framework
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_construction() {
        let result = TestInfrastructureResult::new(12, true, false, 0.25, 15, "pytest").unwrap();
        assert_eq!(result.test_files_detected(), 12);
        assert_eq!(result.calculated_score(), 15);
        assert_eq!(result.inferred_framework(), "pytest");
    }

    #[test]
    fn test_rejects_score_above_maximum() {
        let result = TestInfrastructureResult::new(1, true, true, 0.5, 26, "jest");
        assert!(matches!(result, Err(Error::InvalidResult(_))));
    }

    #[test]
    fn test_rejects_ratio_out_of_range() {
        assert!(TestInfrastructureResult::new(1, false, false, 1.01, 5, "none").is_err());
        assert!(TestInfrastructureResult::new(1, false, false, -0.1, 5, "none").is_err());
        assert!(TestInfrastructureResult::new(1, false, false, f64::NAN, 5, "none").is_err());
    }

    #[test]
    fn test_empty_result() {
        let result = TestInfrastructureResult::empty();
        assert_eq!(result.calculated_score(), 0);
        assert_eq!(result.test_files_detected(), 0);
        assert_eq!(result.inferred_framework(), NO_FRAMEWORK);
    }
}
