//! Contact leak detection

use super::registry::Registry;
use crate::config::RuleCategory;
use serde::{Deserialize, Serialize};

/// Detection result for a piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether any rule matched
    pub matched: bool,
    /// Ids of every matching rule, in registry order
    pub rule_ids: Vec<String>,
    /// Distinct categories of the matching rules, in first-seen order
    pub categories: Vec<RuleCategory>,
}

impl MatchResult {
    pub fn has_category(&self, category: RuleCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.rule_ids.iter().any(|id| id == rule_id)
    }
}

impl Registry {
    /// Classify `text` against every rule.
    ///
    /// Each rule contributes at most once regardless of how many spans it
    /// matches. Case-insensitive rules fold case while matching; the text
    /// itself is never altered.
    pub fn detect(&self, text: &str) -> MatchResult {
        if text.is_empty() {
            return MatchResult::default();
        }

        let mut result = MatchResult::default();
        for rule in self.all().iter().filter(|r| r.is_match(text)) {
            result.rule_ids.push(rule.id().to_string());
            if !result.categories.contains(&rule.category()) {
                result.categories.push(rule.category());
            }
        }
        result.matched = !result.rule_ids.is_empty();

        if result.matched {
            tracing::debug!(
                rule_count = result.rule_ids.len(),
                rules = %result.rule_ids.join(","),
                "Contact information detected"
            );
        }

        result
    }

    /// Check if text contains any blocked contact information
    pub fn contains_contact_info(&self, text: &str) -> bool {
        self.all().iter().any(|r| r.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::with_defaults().unwrap()
    }

    #[test]
    fn test_detect_email() {
        let result = registry().detect("Email me at john@test.com");
        assert!(result.matched);
        assert!(result.has_rule("email_address"));
        assert!(result.has_rule("email_me_at"));
        assert!(result.has_category(RuleCategory::Email));
    }

    #[test]
    fn test_detect_messaging_app() {
        let result = registry().detect("Let's talk on WhatsApp");
        assert!(result.matched);
        assert!(result.has_rule("messaging_app"));
        assert!(result.has_rule("whats_app_spaced"));
        assert_eq!(result.categories, vec![RuleCategory::MessagingApp]);
    }

    #[test]
    fn test_detect_phone_and_call() {
        let result = registry().detect("call 0821234567");
        assert!(result.matched);
        assert!(result.has_category(RuleCategory::Phone));
        assert!(result.has_rule("phone_digit_run"));
        assert!(result.has_rule("call_with_number"));
    }

    #[test]
    fn test_detect_order_follows_registry() {
        let registry = registry();
        let result = registry.detect("whatsapp or gmail, 555-123-4567");
        let positions: Vec<usize> = result
            .rule_ids
            .iter()
            .map(|id| registry.all().iter().position(|r| r.id() == id.as_str()).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert_eq!(result.rule_ids[0], "email_provider");
    }

    #[test]
    fn test_detect_counts_each_rule_once() {
        let result = registry().detect("a@b.com and c@d.org");
        assert_eq!(
            result.rule_ids.iter().filter(|id| *id == "email_address").count(),
            1
        );
    }

    #[test]
    fn test_detect_clean_text() {
        let result =
            registry().detect("Great, sounds good, looking forward to the project kickoff");
        assert!(!result.matched);
        assert!(result.rule_ids.is_empty());
        assert!(result.categories.is_empty());
    }

    #[test]
    fn test_detect_empty() {
        let result = registry().detect("");
        assert!(!result.matched);
        assert!(result.rule_ids.is_empty());
    }

    #[test]
    fn test_detect_short_text_not_matched() {
        assert!(!registry().detect("ok").matched);
    }

    #[test]
    fn test_detect_case_insensitive() {
        let registry = registry();
        for text in ["my telegram", "MY TELEGRAM", "My TeLeGrAm"] {
            assert!(registry.detect(text).matched, "{text}");
        }
    }

    #[test]
    fn test_detect_obfuscated() {
        let registry = registry();
        assert!(registry.detect("ping me at g.mail").has_rule("provider_obfuscated"));
        assert!(registry.detect("john 12 @ 34").has_rule("digits_at_digits"));
        assert!(registry.detect("lets talk outside the app").has_rule("lets_talk_outside"));
        assert!(registry.detect("my personal number").has_rule("my_personal_contact"));
    }

    #[test]
    fn test_detect_social() {
        let result = registry().detect("see linkedin.com/in/someone");
        assert!(result.has_rule("social_platform"));
        assert!(result.has_rule("linkedin_domain"));
        assert_eq!(result.categories, vec![RuleCategory::SocialHandle]);
    }

    #[test]
    fn test_contains_contact_info() {
        let registry = registry();
        assert!(registry.contains_contact_info("find me on instagram"));
        assert!(!registry.contains_contact_info("Happy to help with the logo"));
    }

    #[test]
    fn test_match_result_serialize() {
        let result = registry().detect("skype");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["matched"], true);
        assert_eq!(json["rule_ids"][0], "messaging_app");
        assert_eq!(json["categories"][0], "messaging_app");
    }
}
