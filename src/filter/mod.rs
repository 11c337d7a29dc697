//! Contact information filtering
//!
//! Pattern-based detection and redaction of out-of-platform contact
//! channels. Includes:
//! - Pattern registry (ordered, immutable, checked at load)
//! - Detector (which rules match a text)
//! - Redactor (ordered substitution of a rule-safe placeholder)

pub mod detector;
pub mod redactor;
pub mod registry;

pub use detector::MatchResult;
pub use redactor::RedactionResult;
pub use registry::{Registry, Rule};
