//! Contact guard error types
//!
//! Every variant is a startup error. Detection, redaction and heuristic
//! assessment never fail once a [`crate::ContactGuard`] has been built.

use thiserror::Error;

/// Contact guard error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rule pattern failed to compile
    #[error("Invalid regex pattern for rule '{rule_id}': {source}")]
    Pattern {
        rule_id: String,
        #[source]
        source: regex::Error,
    },

    /// Two rules were registered under the same id
    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    /// A rule matches the empty string and would flag every input
    #[error("Rule '{0}' matches the empty string")]
    EmptyMatch(String),

    /// The redaction placeholder is itself matched by a rule
    #[error("Placeholder is matched by rule '{0}'")]
    UnsafePlaceholder(String),

    /// The process-wide guard was installed twice
    #[error("Contact guard already initialized")]
    AlreadyInitialized,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for contact guard operations
pub type Result<T> = std::result::Result<T, Error>;
