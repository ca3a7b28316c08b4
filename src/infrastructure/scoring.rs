//! @ai:module:intent Deterministic scoring of detected test infrastructure
//! @ai:module:layer domain
//! @ai:module:public_api calculate_score, calculate_ratio, MAX_SCORE
//! @ai:module:stateless true

/// Upper bound of the testing score.
pub const MAX_SCORE: u32 = 25;

const TEST_FILES_POINTS: u32 = 5;
const TEST_CONFIG_POINTS: u32 = 5;
const COVERAGE_CONFIG_POINTS: u32 = 5;
const HIGH_RATIO_POINTS: u32 = 10;
const MODERATE_RATIO_POINTS: u32 = 5;

const HIGH_RATIO_THRESHOLD: f64 = 0.30;
const MODERATE_RATIO_THRESHOLD: f64 = 0.10;

/// @ai:intent Additive score, capped at MAX_SCORE
/// @ai:effects pure
/// @ai:example (15, true, false, 0.15) -> 15
pub fn calculate_score(
    test_files_detected: usize,
    test_config_detected: bool,
    coverage_config_detected: bool,
    test_file_ratio: f64,
) -> u32 {
    let mut score = 0;

    if test_files_detected > 0 {
        score += TEST_FILES_POINTS;
    }

    if test_config_detected {
        score += TEST_CONFIG_POINTS;
    }

    if coverage_config_detected {
        score += COVERAGE_CONFIG_POINTS;
    }

    score += ratio_points(test_file_ratio);

    score.min(MAX_SCORE)
}

fn ratio_points(ratio: f64) -> u32 {
    if ratio > HIGH_RATIO_THRESHOLD {
        HIGH_RATIO_POINTS
    } else if ratio >= MODERATE_RATIO_THRESHOLD {
        MODERATE_RATIO_POINTS
    } else {
        0
    }
}

/// @ai:intent Test files relative to non-test source files, within [0, 1]
/// @ai:post 0.0 when there are no non-test source files
/// @ai:effects pure
/// @ai:example (15, 115) -> 0.15
pub fn calculate_ratio(test_count: usize, source_count: usize) -> f64 {
    let denominator = source_count as i64 - test_count as i64;

    if denominator < 0 {
        tracing::warn!(
            test_count,
            source_count,
            "More test files than source files matched; ratio clamped to 0"
        );
    }

    if denominator <= 0 {
        return 0.0;
    }

    (test_count as f64 / denominator as f64).min(1.0)
}
