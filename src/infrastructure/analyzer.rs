//! @ai:module:intent Static analysis of a repository's test infrastructure
//! @ai:module:layer application
//! @ai:module:public_api TestInfrastructureAnalyzer
//! @ai:module:stateless true

use crate::error::Result;
use crate::infrastructure::result::{TestInfrastructureResult, NO_FRAMEWORK};
use crate::infrastructure::rules::Ecosystem;
use crate::infrastructure::scoring::{calculate_ratio, calculate_score};
use crate::language::Language;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names pruned from repository walks by default.
/// A leading `/` anchors the name to the repository root.
pub const DEFAULT_SKIP_DIRS: [&str; 6] = [
    ".git",
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    "/target",
];

/// @ai:intent Detects test files and configuration and scores them
pub struct TestInfrastructureAnalyzer {
    skip_dirs: Vec<String>,
}

impl TestInfrastructureAnalyzer {
    /// @ai:intent Create an analyzer that prunes the default directories
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_skip_dirs(DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect())
    }

    /// @ai:intent Create an analyzer with a custom set of pruned directory names
    /// @ai:effects pure
    pub fn with_skip_dirs(skip_dirs: Vec<String>) -> Self {
        Self { skip_dirs }
    }

    /// @ai:intent Analyze one language's test setup
    /// @ai:post a repository without tests yields a zero-score result, not an error
    /// @ai:effects fs:read
    pub fn analyze(&self, repo_path: &Path, language: Language) -> Result<TestInfrastructureResult> {
        let ecosystem = Ecosystem::for_language(language)?;
        let files = self.collect_files(repo_path);

        let test_files: BTreeSet<&PathBuf> = files
            .iter()
            .filter(|path| ecosystem.is_test_file(path))
            .collect();
        let source_count = files
            .iter()
            .filter(|path| ecosystem.is_source_file(path))
            .count();

        let test_files_detected = test_files.len();
        let test_config_detected = ecosystem.detect_test_config(repo_path);
        let coverage_config_detected = ecosystem.detect_coverage_config(repo_path);
        let test_file_ratio = calculate_ratio(test_files_detected, source_count);

        let calculated_score = calculate_score(
            test_files_detected,
            test_config_detected,
            coverage_config_detected,
            test_file_ratio,
        );

        let inferred_framework = if test_config_detected {
            ecosystem.framework()
        } else {
            NO_FRAMEWORK
        };

        tracing::info!(
            language = %language,
            test_files = test_files_detected,
            source_files = source_count,
            test_config = test_config_detected,
            coverage_config = coverage_config_detected,
            ratio = test_file_ratio,
            score = calculated_score,
            "Test infrastructure analyzed"
        );

        TestInfrastructureResult::new(
            test_files_detected,
            test_config_detected,
            coverage_config_detected,
            test_file_ratio,
            calculated_score,
            inferred_framework,
        )
    }

    /// @ai:intent Analyze several languages and keep the best-scoring result
    /// @ai:post ties keep the earliest language; global is skipped since it has no test
    /// ecosystem; a list with nothing left yields the empty result
    /// @ai:effects fs:read
    pub fn analyze_languages(
        &self,
        repo_path: &Path,
        languages: &[Language],
    ) -> Result<TestInfrastructureResult> {
        let mut best: Option<TestInfrastructureResult> = None;

        for &language in languages {
            if language == Language::Global {
                tracing::debug!("Skipping global in multi-language analysis");
                continue;
            }

            let result = self.analyze(repo_path, language)?;

            let is_better = best
                .as_ref()
                .map_or(true, |current| result.calculated_score() > current.calculated_score());

            if is_better {
                best = Some(result);
            }
        }

        Ok(best.unwrap_or_else(TestInfrastructureResult::empty))
    }

    /// @ai:intent List every file under the repository, relative to its root
    /// @ai:post unreadable entries are skipped
    /// @ai:effects fs:read
    fn collect_files(&self, repo_path: &Path) -> Vec<PathBuf> {
        WalkDir::new(repo_path)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self.is_skipped(&entry.file_name().to_string_lossy(), entry.depth())
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(repo_path)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect()
    }

    fn is_skipped(&self, dir_name: &str, depth: usize) -> bool {
        self.skip_dirs
            .iter()
            .any(|skip| match skip.strip_prefix('/') {
                Some(anchored) => depth == 1 && anchored == dir_name,
                None => skip == dir_name,
            })
    }
}

impl Default for TestInfrastructureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
