//! Contact leak redaction
//!
//! Rules are applied as global substitutions in registration order, each one
//! running against the output of the previous. A substitution can expose a
//! word boundary that an earlier rule would match (`cell 5hotmail` becomes
//! `<placeholder>hotmail`), so the ordered pass is repeated until it changes
//! nothing. The registry refuses placeholders that a rule could match inside
//! a run of placeholders, so every pass that changes the text consumes input
//! and the input's length bounds the number of passes.

use super::registry::Registry;
use regex::NoExpand;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Redaction result for a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionResult {
    /// Text with every matched span replaced by the placeholder
    pub sanitized_text: String,
    /// Whether the sanitized text differs from the input
    pub was_modified: bool,
}

impl Registry {
    /// Replace every matched span in `text` with the placeholder.
    pub fn redact(&self, text: &str) -> RedactionResult {
        if text.is_empty() {
            return RedactionResult {
                sanitized_text: String::new(),
                was_modified: false,
            };
        }

        let max_passes = text.chars().count() + 1;
        let mut current = text.to_string();
        let mut passes = 0;
        while passes < max_passes {
            passes += 1;
            match self.redact_pass(&current) {
                Some(next) => current = next,
                None => break,
            }
        }

        let was_modified = current != text;
        if was_modified {
            tracing::debug!(
                passes,
                original_len = text.len(),
                sanitized_len = current.len(),
                "Contact information redacted"
            );
        }

        RedactionResult {
            sanitized_text: current,
            was_modified,
        }
    }

    /// One ordered substitution pass over every rule. Returns `None` when
    /// no rule matched.
    fn redact_pass(&self, text: &str) -> Option<String> {
        let mut working: Option<String> = None;
        for rule in self.all() {
            let haystack = working.as_deref().unwrap_or(text);
            let replaced = match rule
                .regex()
                .replace_all(haystack, NoExpand(self.placeholder()))
            {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if replaced.is_some() {
                working = replaced;
            }
        }
        working.filter(|w| w != text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RegistryConfig, RuleCategory, RuleDef, DEFAULT_PLACEHOLDER};

    fn registry() -> Registry {
        Registry::with_defaults().unwrap()
    }

    #[test]
    fn test_redact_email() {
        let result = registry().redact("Email me at john@test.com");
        assert!(result.was_modified);
        assert!(result.sanitized_text.contains(DEFAULT_PLACEHOLDER));
        assert!(!result.sanitized_text.contains("john@test.com"));
    }

    #[test]
    fn test_redact_phone() {
        let result = registry().redact("call 0821234567 tonight");
        assert!(result.was_modified);
        assert!(!result.sanitized_text.contains("0821234567"));
        assert!(result.sanitized_text.ends_with(" tonight"));
    }

    #[test]
    fn test_redact_preserves_surrounding_text() {
        let result = registry().redact("Thanks! Ping me on Skype later.");
        assert_eq!(
            result.sanitized_text,
            format!("Thanks! Ping me on {} later.", DEFAULT_PLACEHOLDER)
        );
    }

    #[test]
    fn test_redact_all_occurrences() {
        let result = registry().redact("telegram, TELEGRAM, Telegram");
        assert_eq!(result.sanitized_text.matches(DEFAULT_PLACEHOLDER).count(), 3);
        assert!(!result.sanitized_text.to_lowercase().contains("telegram"));
    }

    #[test]
    fn test_redact_clean_text() {
        let text = "Great, sounds good, looking forward to the project kickoff";
        let result = registry().redact(text);
        assert!(!result.was_modified);
        assert_eq!(result.sanitized_text, text);
    }

    #[test]
    fn test_redact_empty() {
        let result = registry().redact("");
        assert!(!result.was_modified);
        assert_eq!(result.sanitized_text, "");
    }

    #[test]
    fn test_redact_is_idempotent() {
        let registry = registry();
        let first = registry.redact("mail john@test.com or whatsapp +27 82 123 4567");
        assert!(first.was_modified);
        let second = registry.redact(&first.sanitized_text);
        assert!(!second.was_modified);
        assert_eq!(second.sanitized_text, first.sanitized_text);
    }

    #[test]
    fn test_redact_settles_exposed_boundary() {
        // the cell rule exposes a word boundary in front of "hotmail"
        let registry = registry();
        let first = registry.redact("cell 5hotmail");
        assert!(!first.sanitized_text.to_lowercase().contains("hotmail"));
        assert!(!registry.redact(&first.sanitized_text).was_modified);
    }

    #[test]
    fn test_redact_settles_long_label_chain() {
        // only the first "cell 5" starts on a word boundary in each pass
        let registry = registry();
        let result = registry.redact(&"cell 5".repeat(20));
        assert_eq!(result.sanitized_text, DEFAULT_PLACEHOLDER.repeat(20));
        assert!(!registry.redact(&result.sanitized_text).was_modified);
        assert!(!registry.detect(&result.sanitized_text).matched);
    }

    #[test]
    fn test_redact_settles_chain_before_trailing_text() {
        let registry = registry();
        let text = format!("{} reach", "phone 1".repeat(5));
        let result = registry.redact(&text);
        assert_eq!(
            result.sanitized_text,
            format!("{} reach", DEFAULT_PLACEHOLDER.repeat(5))
        );
        assert!(registry.detect(&result.sanitized_text).rule_ids.is_empty());
    }

    #[test]
    fn test_redact_custom_placeholder_is_literal() {
        let config = RegistryConfig {
            placeholder: "$1 [hidden]".to_string(),
            ..Default::default()
        };
        let registry = Registry::load(&config).unwrap();
        let result = registry.redact("add me on viber");
        assert_eq!(result.sanitized_text, "add me on $1 [hidden]");
    }

    #[test]
    fn test_redact_uses_extra_rules() {
        let config = RegistryConfig {
            extra_rules: vec![RuleDef::new(
                "discord",
                RuleCategory::MessagingApp,
                r"\bdiscord\b",
            )],
            ..Default::default()
        };
        let registry = Registry::load(&config).unwrap();
        let result = registry.redact("Discord works for me");
        assert_eq!(
            result.sanitized_text,
            format!("{} works for me", DEFAULT_PLACEHOLDER)
        );
    }

    #[test]
    fn test_redact_agrees_with_detect() {
        let registry = registry();
        for text in [
            "ok",
            "reach me at home",
            "my gmail is best",
            "meet offline tomorrow",
            "See you at the kickoff meeting on Monday",
            "cell: 5",
        ] {
            assert_eq!(
                registry.detect(text).matched,
                registry.redact(text).was_modified,
                "{text}"
            );
        }
    }
}
