//! @ai:module:intent Toolchain gate and static test-infrastructure scoring
//! @ai:module:layer application
//! @ai:module:public_api config, error, infrastructure, language, parsers, toolchain
//!
//! # testgrade
//!
//! Checks that a scoring host has the CLI tools an evaluation needs, then
//! scores a repository's testing maturity from its files alone.
//!
//! ```rust,no_run
//! use testgrade::{Language, TestInfrastructureAnalyzer, ToolchainManager};
//! use std::path::Path;
//!
//! let report = ToolchainManager::new().validate_for_language("python")?;
//! assert!(report.passed());
//!
//! let result = TestInfrastructureAnalyzer::new().analyze(Path::new("."), Language::Python)?;
//! println!("testing score: {}/25", result.calculated_score());
//! # Ok::<(), testgrade::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod language;
pub mod parsers;
pub mod toolchain;

pub use config::TestgradeConfig;
pub use error::{Error, Result};
pub use infrastructure::{TestInfrastructureAnalyzer, TestInfrastructureResult};
pub use language::Language;
pub use parsers::Verification;
pub use toolchain::{
    ErrorCategory, ToolDetector, ToolRegistry, ToolRequirement, ToolchainManager,
    ToolchainValidationError, ValidationReport, ValidationResult,
};
