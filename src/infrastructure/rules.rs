//! @ai:module:intent Per-ecosystem test file patterns and configuration checks
//! @ai:module:layer domain
//! @ai:module:public_api Ecosystem
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::Language;
use crate::parsers::{json_config, makefile, toml_config, verify_exists, xml_config, Verification};
use std::path::{Component, Path};

/// Extensions never counted as source files.
const NON_SOURCE_EXTENSIONS: [&str; 9] = [
    ".md", ".txt", ".json", ".yaml", ".yml", ".toml", ".xml", ".ini", ".cfg",
];

/// @ai:intent Test ecosystem whose conventions drive detection
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Python,
    JavaScript,
    Go,
    Java,
}

impl Ecosystem {
    /// @ai:intent Map a language to its ecosystem (typescript uses javascript rules)
    /// @ai:post the global pseudo-language is rejected
    /// @ai:effects pure
    pub fn for_language(language: Language) -> Result<Self> {
        match language {
            Language::Python => Ok(Ecosystem::Python),
            Language::JavaScript | Language::TypeScript => Ok(Ecosystem::JavaScript),
            Language::Go => Ok(Ecosystem::Go),
            Language::Java => Ok(Ecosystem::Java),
            Language::Global => Err(Error::UnsupportedLanguage {
                language: language.as_str().to_string(),
                supported: "python, javascript, typescript, go, java".to_string(),
            }),
        }
    }

    /// @ai:intent Framework credited when test configuration is found
    /// @ai:effects pure
    pub fn framework(&self) -> &'static str {
        match self {
            Ecosystem::Python => "pytest",
            Ecosystem::JavaScript => "jest",
            Ecosystem::Go => "go test",
            Ecosystem::Java => "junit",
        }
    }

    fn source_extensions(&self) -> &'static [&'static str] {
        match self {
            Ecosystem::Python => &["py"],
            Ecosystem::JavaScript => &["js", "ts"],
            Ecosystem::Go => &["go"],
            Ecosystem::Java => &["java"],
        }
    }

    /// @ai:intent Whether a repo-relative path counts as a source file for this ecosystem
    /// @ai:effects pure
    pub fn is_source_file(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if NON_SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            return false;
        }

        relative
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.source_extensions().iter().any(|known| *known == ext))
    }

    /// @ai:intent Whether a repo-relative path matches this ecosystem's test patterns
    /// @ai:effects pure
    pub fn is_test_file(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let dirs: Vec<&str> = parent_dirs(relative);

        match self {
            // tests/**/*.py, test_*.py, *_test.py
            Ecosystem::Python => {
                name.ends_with(".py")
                    && (dirs.first() == Some(&"tests")
                        || name.starts_with("test_")
                        || name.ends_with("_test.py"))
            }
            // __tests__/**/*.{js,ts}, *.test.{js,ts}, *.spec.{js,ts}
            Ecosystem::JavaScript => {
                let in_tests_dir = dirs.iter().any(|d| *d == "__tests__")
                    && (name.ends_with(".js") || name.ends_with(".ts"));
                let suffixed = [".test.js", ".spec.js", ".test.ts", ".spec.ts"]
                    .iter()
                    .any(|suffix| name.ends_with(suffix));
                in_tests_dir || suffixed
            }
            Ecosystem::Go => name.ends_with("_test.go"),
            // src/test/java/**/*.java
            Ecosystem::Java => name.ends_with(".java") && dirs.starts_with(&["src", "test", "java"]),
        }
    }

    /// @ai:intent Detect test-runner configuration at the repository root
    /// @ai:effects fs:read
    pub fn detect_test_config(&self, repo: &Path) -> bool {
        let checks: Vec<Verification> = match self {
            Ecosystem::Python => vec![
                verify_exists(&repo.join("pytest.ini")),
                toml_config::verify_pytest_section(&repo.join("pyproject.toml")),
                verify_exists(&repo.join("tox.ini")),
            ],
            Ecosystem::JavaScript => vec![
                json_config::verify_test_script(&repo.join("package.json")),
                verify_exists(&repo.join("jest.config.js")),
            ],
            Ecosystem::Go => vec![verify_exists(&repo.join("go.mod"))],
            Ecosystem::Java => vec![
                xml_config::verify_surefire_plugin(&repo.join("pom.xml")),
                xml_config::verify_gradle_test_task(&repo.join("build.gradle")),
                xml_config::verify_gradle_test_task(&repo.join("build.gradle.kts")),
            ],
        };

        any_verified(*self, "test config", checks)
    }

    /// @ai:intent Detect coverage configuration at the repository root
    /// @ai:effects fs:read
    pub fn detect_coverage_config(&self, repo: &Path) -> bool {
        let checks: Vec<Verification> = match self {
            Ecosystem::Python => vec![
                verify_exists(&repo.join(".coveragerc")),
                toml_config::verify_coverage_section(&repo.join("pyproject.toml")),
            ],
            // jest.config.js would need evaluating; only the JSON form is read.
            Ecosystem::JavaScript => vec![json_config::verify_coverage_threshold(
                &repo.join("jest.config.json"),
            )],
            Ecosystem::Go => vec![makefile::verify_coverage_flags(&repo.join("Makefile"))],
            Ecosystem::Java => vec![
                xml_config::verify_jacoco_plugin(&repo.join("pom.xml")),
                xml_config::verify_gradle_jacoco(&repo.join("build.gradle")),
                xml_config::verify_gradle_jacoco(&repo.join("build.gradle.kts")),
            ],
        };

        any_verified(*self, "coverage config", checks)
    }
}

fn any_verified(ecosystem: Ecosystem, what: &str, checks: Vec<Verification>) -> bool {
    for check in &checks {
        tracing::debug!(
            ecosystem = ?ecosystem,
            verified = check.verified,
            "{}: {}",
            what,
            check.message
        );
    }

    checks.iter().any(|check| check.verified)
}

fn parent_dirs(relative: &Path) -> Vec<&str> {
    relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => part.to_str(),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
