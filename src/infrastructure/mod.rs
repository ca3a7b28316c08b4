//! @ai:module:intent Static detection and scoring of test infrastructure
//! @ai:module:layer application
//! @ai:module:public_api TestInfrastructureAnalyzer, TestInfrastructureResult, Ecosystem

pub mod analyzer;
pub mod result;
pub mod rules;
pub mod scoring;

pub use analyzer::{TestInfrastructureAnalyzer, DEFAULT_SKIP_DIRS};
pub use result::TestInfrastructureResult;
pub use rules::Ecosystem;
pub use scoring::{calculate_ratio, calculate_score, MAX_SCORE};
