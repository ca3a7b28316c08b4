//! @ai:module:intent Static catalog of required tools per language
//! @ai:module:layer domain
//! @ai:module:public_api ToolRegistry
//! @ai:module:stateless true

use crate::error::Result;
use crate::language::Language;
use crate::toolchain::requirement::{ToolCategory, ToolRequirement};

static GLOBAL_TOOLS: &[ToolRequirement] = &[
    ToolRequirement::declare(
        "git",
        Language::Global,
        ToolCategory::Build,
        "https://git-scm.com/downloads",
        Some("2.20.0"),
    ),
    ToolRequirement::declare(
        "uv",
        Language::Global,
        ToolCategory::Build,
        "https://docs.astral.sh/uv/getting-started/installation/",
        None,
    ),
];

static PYTHON_TOOLS: &[ToolRequirement] = &[
    ToolRequirement::declare(
        "ruff",
        Language::Python,
        ToolCategory::Lint,
        "https://docs.astral.sh/ruff/installation/",
        Some("0.1.0"),
    ),
    ToolRequirement::declare(
        "pytest",
        Language::Python,
        ToolCategory::Test,
        "https://docs.pytest.org/en/stable/getting-started.html",
        Some("7.0.0"),
    ),
    ToolRequirement::declare(
        "bandit",
        Language::Python,
        ToolCategory::Security,
        "https://bandit.readthedocs.io/en/latest/start.html",
        None,
    ),
];

static JAVASCRIPT_TOOLS: &[ToolRequirement] = &[
    ToolRequirement::declare(
        "node",
        Language::JavaScript,
        ToolCategory::Build,
        "https://nodejs.org/en/download",
        Some("18.0.0"),
    ),
    ToolRequirement::declare(
        "npm",
        Language::JavaScript,
        ToolCategory::Build,
        "https://docs.npmjs.com/downloading-and-installing-node-js-and-npm",
        None,
    ),
    ToolRequirement::declare(
        "eslint",
        Language::JavaScript,
        ToolCategory::Lint,
        "https://eslint.org/docs/latest/use/getting-started",
        None,
    ),
];

static GO_TOOLS: &[ToolRequirement] = &[
    ToolRequirement::declare_with_command(
        "go",
        Language::Go,
        ToolCategory::Build,
        "https://go.dev/doc/install",
        Some("1.20"),
        "version",
    ),
    ToolRequirement::declare(
        "golangci-lint",
        Language::Go,
        ToolCategory::Lint,
        "https://golangci-lint.run/welcome/install/",
        None,
    ),
    ToolRequirement::declare_with_command(
        "gosec",
        Language::Go,
        ToolCategory::Security,
        "https://github.com/securego/gosec#install",
        None,
        "-version",
    ),
];

static JAVA_TOOLS: &[ToolRequirement] = &[
    // `java -version` reports on stderr; the detector reads both streams.
    ToolRequirement::declare_with_command(
        "java",
        Language::Java,
        ToolCategory::Build,
        "https://adoptium.net/installation/",
        Some("11.0"),
        "-version",
    ),
    ToolRequirement::declare_with_command(
        "mvn",
        Language::Java,
        ToolCategory::Build,
        "https://maven.apache.org/install.html",
        Some("3.6.0"),
        "-version",
    ),
];

/// @ai:intent Read-only catalog of tool requirements, fixed at compile time
pub struct ToolRegistry;

impl ToolRegistry {
    /// @ai:intent Tools required for every language
    /// @ai:effects pure
    pub fn global_tools() -> &'static [ToolRequirement] {
        GLOBAL_TOOLS
    }

    /// @ai:intent Tools owned by a language group (typescript shares javascript)
    /// @ai:effects pure
    pub fn language_tools(language: Language) -> &'static [ToolRequirement] {
        match language {
            Language::Global => &[],
            Language::Python => PYTHON_TOOLS,
            Language::JavaScript | Language::TypeScript => JAVASCRIPT_TOOLS,
            Language::Go => GO_TOOLS,
            Language::Java => JAVA_TOOLS,
        }
    }

    /// @ai:intent Global tools followed by the language's own tools, in table order
    /// @ai:effects pure
    pub fn tools_for(language: Language) -> Vec<&'static ToolRequirement> {
        Self::global_tools()
            .iter()
            .chain(Self::language_tools(language))
            .collect()
    }

    /// @ai:intent Resolve a language name and return its full requirement list
    /// @ai:post unrecognized names fail with Error::UnsupportedLanguage
    /// @ai:effects pure
    pub fn get_tools_for_language(language: &str) -> Result<Vec<&'static ToolRequirement>> {
        let language: Language = language.parse()?;
        Ok(Self::tools_for(language))
    }

    /// @ai:intent Every requirement in the catalog, global first
    /// @ai:effects pure
    pub fn all_tools() -> impl Iterator<Item = &'static ToolRequirement> {
        GLOBAL_TOOLS
            .iter()
            .chain(PYTHON_TOOLS)
            .chain(JAVASCRIPT_TOOLS)
            .chain(GO_TOOLS)
            .chain(JAVA_TOOLS)
    }
}
