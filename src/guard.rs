//! Contact guard facade
//!
//! Bundles one [`Registry`] and one [`EvasionHeuristics`] behind the three
//! call-level operations. The host decides how to combine their results.

use crate::config::GuardConfig;
use crate::error::{Error, Result};
use crate::evasion::{EvasionHeuristics, SuspicionResult};
use crate::filter::{MatchResult, RedactionResult, Registry};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static GLOBAL: OnceLock<ContactGuard> = OnceLock::new();

/// Build the process-wide guard from `config` and install it.
///
/// Call once during startup. A second call fails with
/// [`Error::AlreadyInitialized`] and leaves the installed guard untouched.
pub fn init(config: &GuardConfig) -> Result<&'static ContactGuard> {
    if GLOBAL.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }

    let guard = ContactGuard::new(config)?;
    let mut installed = false;
    let global = GLOBAL.get_or_init(|| {
        installed = true;
        guard
    });

    if installed {
        Ok(global)
    } else {
        Err(Error::AlreadyInitialized)
    }
}

/// The process-wide guard, if [`init`] has run.
pub fn global() -> Option<&'static ContactGuard> {
    GLOBAL.get()
}

/// All three results for one text, side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screening {
    pub matches: MatchResult,
    pub redaction: RedactionResult,
    pub suspicion: SuspicionResult,
}

/// Contact leak detection, redaction and evasion scoring
#[derive(Debug, Clone)]
pub struct ContactGuard {
    registry: Registry,
    heuristics: EvasionHeuristics,
}

impl ContactGuard {
    /// Create a guard from configuration
    pub fn new(config: &GuardConfig) -> Result<Self> {
        Ok(Self {
            registry: Registry::load(&config.registry)?,
            heuristics: EvasionHeuristics::new(&config.heuristics)?,
        })
    }

    /// Create a guard with the built-in rules and default thresholds
    pub fn with_defaults() -> Result<Self> {
        Self::new(&GuardConfig::default())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn heuristics(&self) -> &EvasionHeuristics {
        &self.heuristics
    }

    pub fn detect(&self, text: &str) -> MatchResult {
        self.registry.detect(text)
    }

    pub fn redact(&self, text: &str) -> RedactionResult {
        self.registry.redact(text)
    }

    pub fn assess(&self, text: &str) -> SuspicionResult {
        self.heuristics.assess(text)
    }

    /// Run detection, redaction and assessment on the same text.
    pub fn screen(&self, text: &str) -> Screening {
        Screening {
            matches: self.detect(text),
            redaction: self.redact(text),
            suspicion: self.assess(text),
        }
    }
}
