//! Evasion heuristics
//!
//! Flags behavioral signals that the pattern registry cannot see: terse
//! acknowledgements that tend to follow a blocked contact-sharing attempt,
//! and canned solicitation phrasing that carries no literal contact data.
//! Signals are checked in a fixed priority order and the first hit wins.

use crate::config::HeuristicsConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A behavioral signal raised by the heuristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "phrase", rename_all = "snake_case")]
pub enum EvasionSignal {
    /// Trimmed text shorter than the configured minimum
    ShortMessage,
    /// Text contains a canned solicitation phrase
    SuspiciousPhrase(String),
}

impl fmt::Display for EvasionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortMessage => f.write_str("Very short message"),
            Self::SuspiciousPhrase(phrase) => write!(f, "Suspicious phrase: {}", phrase),
        }
    }
}

/// Result of assessing a piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionResult {
    /// Whether any signal fired
    pub suspicious: bool,
    /// Human-readable reason, empty when not suspicious
    pub reason: String,
    /// The signal that fired
    pub signal: Option<EvasionSignal>,
}

impl SuspicionResult {
    fn clean() -> Self {
        Self::default()
    }

    fn flagged(signal: EvasionSignal) -> Self {
        Self {
            suspicious: true,
            reason: signal.to_string(),
            signal: Some(signal),
        }
    }
}

/// Heuristic scorer for moderation evasion.
#[derive(Debug, Clone)]
pub struct EvasionHeuristics {
    /// Minimum trimmed length in characters; 0 disables the check
    min_length: usize,
    /// Lowercased phrases in priority order
    phrases: Vec<String>,
}

impl Default for EvasionHeuristics {
    fn default() -> Self {
        Self {
            min_length: crate::config::DEFAULT_MIN_LENGTH,
            phrases: crate::config::default_suspicious_phrases(),
        }
    }
}

impl EvasionHeuristics {
    /// Create heuristics from configuration.
    pub fn new(config: &HeuristicsConfig) -> Result<Self> {
        let mut heuristics = Self {
            min_length: config.min_length,
            phrases: Vec::with_capacity(config.phrases.len()),
        };
        for phrase in &config.phrases {
            heuristics.add_phrase(phrase)?;
        }
        Ok(heuristics)
    }

    /// Append a phrase after the existing ones.
    pub fn add_phrase(&mut self, phrase: &str) -> Result<()> {
        let normalized = phrase.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(Error::Config("Suspicious phrases must not be blank".to_string()));
        }
        self.phrases.push(normalized);
        Ok(())
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Assess `text` for evasion signals.
    pub fn assess(&self, text: &str) -> SuspicionResult {
        if text.is_empty() {
            return SuspicionResult::clean();
        }

        if text.trim().chars().count() < self.min_length {
            tracing::debug!(min_length = self.min_length, "Very short message flagged");
            return SuspicionResult::flagged(EvasionSignal::ShortMessage);
        }

        let text_lower = text.to_lowercase();
        if let Some(phrase) = self.phrases.iter().find(|p| text_lower.contains(p.as_str())) {
            tracing::debug!(phrase = %phrase, "Suspicious phrase flagged");
            return SuspicionResult::flagged(EvasionSignal::SuspiciousPhrase(phrase.clone()));
        }

        SuspicionResult::clean()
    }
}
