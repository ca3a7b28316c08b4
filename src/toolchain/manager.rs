//! @ai:module:intent Orchestrate toolchain validation for a target language
//! @ai:module:layer application
//! @ai:module:public_api ToolchainManager, ToolchainValidationError
//! @ai:module:stateless true

use crate::error::Result;
use crate::language::Language;
use crate::toolchain::detector::{ToolDetector, ToolDetectorTrait};
use crate::toolchain::messages;
use crate::toolchain::registry::ToolRegistry;
use crate::toolchain::requirement::ToolRequirement;
use crate::toolchain::validation::{ErrorCategory, ValidationReport, ValidationResult};
use thiserror::Error;

/// @ai:intent Raised once per run when any required tool is invalid
#[derive(Error, Debug)]
#[error("{}", .report.format_error_message())]
pub struct ToolchainValidationError {
    report: Box<ValidationReport>,
}

impl ToolchainValidationError {
    /// @ai:intent Wrap a failing report
    /// @ai:effects pure
    pub fn new(report: ValidationReport) -> Self {
        Self {
            report: Box::new(report),
        }
    }

    /// @ai:intent The full categorized report behind this failure
    /// @ai:effects pure
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn into_report(self) -> ValidationReport {
        *self.report
    }
}

/// @ai:intent Validates every tool a language needs before analysis may run
pub struct ToolchainManager<D: ToolDetectorTrait = ToolDetector> {
    detector: D,
}

impl ToolchainManager<ToolDetector> {
    /// @ai:intent Create a manager backed by the real host detector
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_detector(ToolDetector::new())
    }
}

impl Default for ToolchainManager<ToolDetector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ToolDetectorTrait> ToolchainManager<D> {
    /// @ai:intent Create a manager with a custom detector
    /// @ai:effects pure
    pub fn with_detector(detector: D) -> Self {
        Self { detector }
    }

    /// @ai:intent Validate global and language tools by language name
    /// @ai:post Ok only for a passing report; failures surface as Error::Toolchain
    /// @ai:effects io, fs:read
    pub fn validate_for_language(&self, language: &str) -> Result<ValidationReport> {
        let language: Language = language.parse()?;
        self.validate(language)
    }

    /// @ai:intent Validate global and language tools
    /// @ai:effects io, fs:read
    pub fn validate(&self, language: Language) -> Result<ValidationReport> {
        let requirements = ToolRegistry::tools_for(language);

        tracing::info!(
            language = %language,
            tools = requirements.len(),
            "Validating toolchain"
        );

        let results: Vec<ValidationResult> = requirements
            .into_iter()
            .map(|requirement| self.check_tool(requirement))
            .collect();

        let report = ValidationReport::from_results(language.as_str(), results);

        if report.passed() {
            tracing::info!(language = %language, "Toolchain validation passed");
            return Ok(report);
        }

        tracing::warn!(
            language = %language,
            failures = report.error_count(),
            "Toolchain validation failed"
        );
        Err(ToolchainValidationError::new(report).into())
    }

    /// @ai:intent Run the availability, permission and version stages for one tool
    /// @ai:post the first failing stage decides the category; later stages are skipped
    /// @ai:effects io, fs:read
    pub fn check_tool(&self, requirement: &ToolRequirement) -> ValidationResult {
        let mut result = ValidationResult::new(requirement.name);

        let Some(path) = self.detector.check_availability(requirement.name) else {
            tracing::warn!(tool = requirement.name, "Tool not found on PATH");
            result.fail(
                ErrorCategory::Missing,
                messages::missing(requirement.name, requirement.doc_url),
            );
            return result;
        };

        result.found = true;
        let path_display = path.display().to_string();
        result.path = Some(path_display.clone());

        let (executable, permissions) = self.detector.check_permissions(&path);
        result.permissions = Some(permissions.clone());

        if !executable {
            tracing::warn!(
                tool = requirement.name,
                path = %path_display,
                permissions = %permissions,
                "Tool is not executable"
            );
            result.fail(
                ErrorCategory::Permission,
                messages::permission(requirement.name, &path_display, &permissions),
            );
            return result;
        }

        let Some(min_version) = requirement.min_version else {
            tracing::debug!(tool = requirement.name, "No minimum version, skipping version check");
            return result;
        };

        let Some(version) = self.detector.get_version(&path, requirement.version_command) else {
            tracing::warn!(tool = requirement.name, "Could not determine tool version");
            result.version_ok = false;
            result.fail(
                ErrorCategory::Other,
                messages::version_unknown(requirement.name, requirement.doc_url),
            );
            return result;
        };

        result.version = Some(version.clone());

        if !self.detector.compare_versions(&version, min_version) {
            tracing::warn!(
                tool = requirement.name,
                current = %version,
                minimum = min_version,
                "Tool version below minimum"
            );
            result.version_ok = false;
            result.fail(
                ErrorCategory::Outdated,
                messages::outdated(requirement.name, &version, min_version, requirement.doc_url),
            );
            return result;
        }

        tracing::debug!(tool = requirement.name, version = %version, "Tool passed all checks");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    #[derive(Clone)]
    struct FakeTool {
        executable: bool,
        version: Option<&'static str>,
    }

    /// Detector backed by an in-memory tool table.
    #[derive(Default)]
    struct MockDetector {
        tools: HashMap<&'static str, FakeTool>,
    }

    impl MockDetector {
        fn with_tool(mut self, name: &'static str, version: Option<&'static str>) -> Self {
            self.tools.insert(
                name,
                FakeTool {
                    executable: true,
                    version,
                },
            );
            self
        }

        fn with_locked_tool(mut self, name: &'static str) -> Self {
            self.tools.insert(
                name,
                FakeTool {
                    executable: false,
                    version: None,
                },
            );
            self
        }

        fn lookup(&self, path: &Path) -> Option<&FakeTool> {
            let name = path.file_name()?.to_str()?;
            self.tools.get(name)
        }
    }

    impl ToolDetectorTrait for MockDetector {
        fn check_availability(&self, tool_name: &str) -> Option<PathBuf> {
            self.tools
                .contains_key(tool_name)
                .then(|| PathBuf::from("/usr/bin").join(tool_name))
        }

        fn get_version(&self, tool_path: &Path, _version_command: &str) -> Option<String> {
            self.lookup(tool_path)?.version.map(str::to_string)
        }

        fn check_permissions(&self, tool_path: &Path) -> (bool, String) {
            match self.lookup(tool_path) {
                Some(tool) if tool.executable => (true, "-rwxr-xr-x".to_string()),
                Some(_) => (false, "-rw-r--r--".to_string()),
                None => (false, "file not found".to_string()),
            }
        }
    }

    fn healthy_python() -> MockDetector {
        MockDetector::default()
            .with_tool("git", Some("2.43.0"))
            .with_tool("uv", None)
            .with_tool("ruff", Some("0.4.1"))
            .with_tool("pytest", Some("8.1.1"))
            .with_tool("bandit", None)
    }

    fn expect_failure(result: Result<ValidationReport>) -> ValidationReport {
        match result {
            Err(Error::Toolchain(err)) => err.into_report(),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("validation unexpectedly passed"),
        }
    }

    #[test]
    fn test_all_tools_present_passes() {
        let manager = ToolchainManager::with_detector(healthy_python());
        let report = manager.validate_for_language("python").unwrap();

        assert!(report.passed());
        assert!(report.errors_by_category().is_empty());
        assert_eq!(
            report.checked_tools(),
            &["git", "uv", "ruff", "pytest", "bandit"].map(String::from)
        );
    }

    #[test]
    fn test_global_validation_passes_with_git_and_uv() {
        let detector = MockDetector::default()
            .with_tool("git", Some("2.39.2"))
            .with_tool("uv", None);
        let report = ToolchainManager::with_detector(detector)
            .validate_for_language("global")
            .unwrap();

        assert!(report.passed());
        assert_eq!(report.language(), "global");
    }

    #[test]
    fn test_missing_tool_is_reported_with_doc_url() {
        let detector = MockDetector::default()
            .with_tool("git", Some("2.43.0"))
            .with_tool("uv", None);
        let manager = ToolchainManager::with_detector(detector);

        let result = manager.validate_for_language("go");
        let Err(Error::Toolchain(err)) = result else {
            panic!("expected a toolchain failure");
        };

        let message = err.to_string();
        assert!(message.contains("golangci-lint"));
        assert!(message.contains("https://golangci-lint.run/welcome/install/"));

        let report = err.report();
        assert!(!report.passed());
        assert_eq!(report.errors_in(ErrorCategory::Missing).len(), 3);
        assert!(!report.errors_in(ErrorCategory::Missing)[0].found);
    }

    #[test]
    fn test_outdated_tool_is_categorized() {
        let detector = healthy_python().with_tool("pytest", Some("6.2.5"));
        let manager = ToolchainManager::with_detector(detector);
        let report = expect_failure(manager.validate(Language::Python));

        let outdated = report.errors_in(ErrorCategory::Outdated);
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].tool_name, "pytest");
        assert_eq!(outdated[0].version.as_deref(), Some("6.2.5"));
        assert!(!outdated[0].version_ok);

        let details = outdated[0].error_details.as_deref().unwrap();
        assert!(details.contains("6.2.5"));
        assert!(details.contains("7.0.0"));
    }

    #[test]
    fn test_unreadable_version_is_other_not_outdated() {
        let detector = healthy_python().with_tool("ruff", None);
        let manager = ToolchainManager::with_detector(detector);
        let report = expect_failure(manager.validate(Language::Python));

        assert!(report.errors_in(ErrorCategory::Outdated).is_empty());
        let other = report.errors_in(ErrorCategory::Other);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].tool_name, "ruff");
    }

    #[test]
    fn test_permission_failure_skips_version_stage() {
        let detector = healthy_python().with_locked_tool("pytest");
        let manager = ToolchainManager::with_detector(detector);

        let report = expect_failure(manager.validate(Language::Python));
        let locked = &report.errors_in(ErrorCategory::Permission)[0];

        assert_eq!(locked.tool_name, "pytest");
        assert!(locked.found);
        assert_eq!(locked.version, None);
        assert_eq!(locked.permissions.as_deref(), Some("-rw-r--r--"));
        assert!(locked
            .error_details
            .as_deref()
            .unwrap()
            .contains("/usr/bin/pytest"));
    }

    #[test]
    fn test_tool_without_minimum_never_queries_version() {
        // uv has no min_version; a missing version must not fail it.
        let detector = MockDetector::default()
            .with_tool("git", Some("2.43.0"))
            .with_tool("uv", None);
        let manager = ToolchainManager::with_detector(detector);

        let uv = ToolRegistry::global_tools()
            .iter()
            .find(|t| t.name == "uv")
            .unwrap();
        let result = manager.check_tool(uv);

        assert!(result.is_valid());
        assert_eq!(result.version, None);
        assert!(result.version_ok);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let detector = healthy_python().with_tool("ruff", Some("0.0.9"));
        let manager = ToolchainManager::with_detector(detector);

        let first = expect_failure(manager.validate(Language::Python));
        let second = expect_failure(manager.validate(Language::Python));

        assert_eq!(first.passed(), second.passed());
        assert_eq!(first.checked_tools(), second.checked_tools());
        assert_eq!(first.errors_by_category(), second.errors_by_category());
    }

    #[test]
    fn test_unsupported_language_is_domain_error() {
        let manager = ToolchainManager::with_detector(MockDetector::default());
        assert!(matches!(
            manager.validate_for_language("haskell"),
            Err(Error::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_report_invariant_holds_for_every_language() {
        let manager = ToolchainManager::with_detector(healthy_python());

        for language in Language::ALL {
            let report = match manager.validate(language) {
                Ok(report) => report,
                Err(Error::Toolchain(err)) => err.into_report(),
                Err(other) => panic!("unexpected error: {other}"),
            };
            assert_eq!(report.passed(), report.errors_by_category().is_empty());
        }
    }
}
