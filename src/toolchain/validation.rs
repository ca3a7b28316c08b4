//! @ai:module:intent Per-tool validation results and the aggregated run report
//! @ai:module:layer domain
//! @ai:module:public_api ErrorCategory, ValidationResult, ValidationReport

use crate::toolchain::messages;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// @ai:intent Reason a tool failed validation
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Missing,
    Outdated,
    Permission,
    Other,
}

impl ErrorCategory {
    /// Report section order.
    pub const ALL: [ErrorCategory; 4] = [
        ErrorCategory::Missing,
        ErrorCategory::Outdated,
        ErrorCategory::Permission,
        ErrorCategory::Other,
    ];

    /// @ai:intent Convert category to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Missing => "missing",
            ErrorCategory::Outdated => "outdated",
            ErrorCategory::Permission => "permission",
            ErrorCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Outcome of checking one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub tool_name: String,
    pub found: bool,
    pub path: Option<String>,
    pub version: Option<String>,
    /// True when no minimum is required.
    pub version_ok: bool,
    pub permissions: Option<String>,
    pub error_category: Option<ErrorCategory>,
    pub error_details: Option<String>,
}

impl ValidationResult {
    /// @ai:intent Fresh result for a tool, before any stage has run
    /// @ai:effects pure
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            found: false,
            path: None,
            version: None,
            version_ok: true,
            permissions: None,
            error_category: None,
            error_details: None,
        }
    }

    /// @ai:intent Record a failure category and its localized message
    /// @ai:effects state:write
    pub fn fail(&mut self, category: ErrorCategory, details: String) {
        self.error_category = Some(category);
        self.error_details = Some(details);
    }

    /// @ai:intent Whether the tool cleared every applicable stage
    /// @ai:effects pure
    pub fn is_valid(&self) -> bool {
        self.found && self.version_ok && self.error_category.is_none()
    }
}

/// @ai:intent Aggregated outcome of one validation run
/// @ai:post passed() == errors_by_category().is_empty()
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    passed: bool,
    language: String,
    checked_tools: Vec<String>,
    errors_by_category: BTreeMap<ErrorCategory, Vec<ValidationResult>>,
    timestamp: DateTime<Utc>,
}

impl ValidationReport {
    /// @ai:intent Build a report from tool results, in check order
    /// @ai:post valid results are dropped, invalid ones grouped by category (default other)
    /// @ai:effects time
    pub fn from_results(language: impl Into<String>, results: Vec<ValidationResult>) -> Self {
        let checked_tools = results.iter().map(|r| r.tool_name.clone()).collect();
        let mut errors_by_category: BTreeMap<ErrorCategory, Vec<ValidationResult>> =
            BTreeMap::new();

        for result in results.into_iter().filter(|r| !r.is_valid()) {
            let category = result.error_category.unwrap_or(ErrorCategory::Other);
            errors_by_category.entry(category).or_default().push(result);
        }

        Self {
            passed: errors_by_category.is_empty(),
            language: language.into(),
            checked_tools,
            errors_by_category,
            timestamp: Utc::now(),
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn checked_tools(&self) -> &[String] {
        &self.checked_tools
    }

    pub fn errors_by_category(&self) -> &BTreeMap<ErrorCategory, Vec<ValidationResult>> {
        &self.errors_by_category
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// @ai:intent Failed results of one category, empty if none
    /// @ai:effects pure
    pub fn errors_in(&self, category: ErrorCategory) -> &[ValidationResult] {
        self.errors_by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// @ai:intent Total number of failing tools
    /// @ai:effects pure
    pub fn error_count(&self) -> usize {
        self.errors_by_category.values().map(Vec::len).sum()
    }

    /// @ai:intent Render the localized report
    /// @ai:post sections appear only when populated, in missing/outdated/permission/other order
    /// @ai:effects pure
    pub fn format_error_message(&self) -> String {
        if self.passed {
            return messages::passed(&self.language);
        }

        let mut lines = vec![messages::failed_header(&self.language)];

        for category in ErrorCategory::ALL {
            let errors = self.errors_in(category);
            if errors.is_empty() {
                continue;
            }

            lines.push(String::new());
            lines.push(messages::section_header(category).to_string());

            for result in errors {
                let details = result
                    .error_details
                    .clone()
                    .unwrap_or_else(|| result.tool_name.clone());
                lines.push(format!("  - {details}"));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failing(tool: &str, category: ErrorCategory) -> ValidationResult {
        let mut result = ValidationResult::new(tool);
        result.found = category != ErrorCategory::Missing;
        result.fail(category, format!("{} problem with {}", category, tool));
        result
    }

    fn passing(tool: &str) -> ValidationResult {
        let mut result = ValidationResult::new(tool);
        result.found = true;
        result
    }

    #[test]
    fn test_is_valid_requires_all_conditions() {
        assert!(passing("git").is_valid());
        assert!(!ValidationResult::new("git").is_valid());

        let mut old = passing("git");
        old.version_ok = false;
        assert!(!old.is_valid());

        assert!(!failing("git", ErrorCategory::Other).is_valid());
    }

    #[test]
    fn test_report_passes_only_without_errors() {
        let report = ValidationReport::from_results("global", vec![passing("git"), passing("uv")]);
        assert!(report.passed());
        assert!(report.errors_by_category().is_empty());
        assert_eq!(report.checked_tools(), &["git".to_string(), "uv".to_string()]);

        let report = ValidationReport::from_results(
            "python",
            vec![passing("git"), failing("ruff", ErrorCategory::Missing)],
        );
        assert!(!report.passed());
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_invalid_result_without_category_lands_in_other() {
        let mut result = passing("pytest");
        result.version_ok = false;

        let report = ValidationReport::from_results("python", vec![result]);
        assert_eq!(report.errors_in(ErrorCategory::Other).len(), 1);
    }

    #[test]
    fn test_category_buckets_preserve_check_order() {
        let report = ValidationReport::from_results(
            "python",
            vec![
                failing("ruff", ErrorCategory::Missing),
                failing("pytest", ErrorCategory::Outdated),
                failing("bandit", ErrorCategory::Missing),
            ],
        );

        let missing: Vec<_> = report
            .errors_in(ErrorCategory::Missing)
            .iter()
            .map(|r| r.tool_name.as_str())
            .collect();
        assert_eq!(missing, vec!["ruff", "bandit"]);
    }

    #[test]
    fn test_format_success_message() {
        let report = ValidationReport::from_results("go", vec![passing("go")]);
        let message = report.format_error_message();
        assert!(message.contains("通过"));
        assert!(message.contains("go"));
    }

    #[test]
    fn test_format_sections_in_fixed_order() {
        let report = ValidationReport::from_results(
            "java",
            vec![
                failing("mvn", ErrorCategory::Other),
                failing("java", ErrorCategory::Permission),
                failing("git", ErrorCategory::Missing),
            ],
        );
        let message = report.format_error_message();

        let missing = message.find(messages::section_header(ErrorCategory::Missing)).unwrap();
        let permission = message
            .find(messages::section_header(ErrorCategory::Permission))
            .unwrap();
        let other = message.find(messages::section_header(ErrorCategory::Other)).unwrap();

        assert!(missing < permission);
        assert!(permission < other);
        assert!(!message.contains(messages::section_header(ErrorCategory::Outdated)));
    }

    #[test]
    fn test_format_lists_every_failure_once() {
        let results = vec![
            failing("ruff", ErrorCategory::Missing),
            failing("pytest", ErrorCategory::Outdated),
            failing("bandit", ErrorCategory::Permission),
            failing("uv", ErrorCategory::Other),
        ];
        let report = ValidationReport::from_results("python", results.clone());
        let message = report.format_error_message();

        for result in &results {
            let line = format!("  - {}", result.error_details.as_ref().unwrap());
            assert_eq!(message.matches(&line).count(), 1, "{line}");
            assert_eq!(message.matches(result.tool_name.as_str()).count(), 1);
        }
        for category in ErrorCategory::ALL {
            assert_eq!(message.matches(messages::section_header(category)).count(), 1);
        }
    }
}
