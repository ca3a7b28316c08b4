//! @ai:module:intent Validate that the host has every CLI tool an analysis needs
//! @ai:module:layer application
//! @ai:module:public_api ToolchainManager, ToolRegistry, ToolDetector, ValidationReport

pub mod detector;
pub mod manager;
pub mod messages;
pub mod registry;
pub mod requirement;
pub mod validation;

pub use detector::{compare_versions, ToolDetector, ToolDetectorTrait, VERSION_TIMEOUT};
pub use manager::{ToolchainManager, ToolchainValidationError};
pub use registry::ToolRegistry;
pub use requirement::{ToolCategory, ToolRequirement};
pub use validation::{ErrorCategory, ValidationReport, ValidationResult};
