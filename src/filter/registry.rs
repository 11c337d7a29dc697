//! Pattern registry
//!
//! The ordered, immutable set of compiled contact leak rules. Built once at
//! startup; every check that could make the registry unsafe to use (bad
//! patterns, duplicate ids, a placeholder that re-triggers a rule) runs here
//! so that detection and redaction never fail afterwards.

use crate::config::{default_contact_rules, RegistryConfig, RuleCategory, RuleDef};
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashSet;

/// A compiled detection rule
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    category: RuleCategory,
    source: String,
    pattern: Regex,
    case_sensitive: bool,
}

impl Rule {
    /// Compile a rule definition
    pub fn compile(def: &RuleDef) -> Result<Self> {
        let compiled = if def.case_sensitive {
            Regex::new(&def.pattern)
        } else {
            Regex::new(&format!("(?i){}", def.pattern))
        };
        let pattern = compiled.map_err(|source| Error::Pattern {
            rule_id: def.id.clone(),
            source,
        })?;

        Ok(Self {
            id: def.id.clone(),
            category: def.category,
            source: def.pattern.clone(),
            pattern,
            case_sensitive: def.case_sensitive,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// Regular expression source as registered, without case flags
    pub fn pattern(&self) -> &str {
        &self.source
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether the rule matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.pattern
    }
}

/// Ordered, immutable collection of compiled rules
#[derive(Debug, Clone)]
pub struct Registry {
    rules: Vec<Rule>,
    placeholder: String,
}

impl Registry {
    /// Build the registry from the built-in rules followed by the
    /// configured extra rules.
    pub fn load(config: &RegistryConfig) -> Result<Self> {
        if config.placeholder.is_empty() {
            return Err(Error::Config("Placeholder must not be empty".to_string()));
        }

        let defs = default_contact_rules()
            .into_iter()
            .chain(config.extra_rules.iter().cloned());

        let mut seen = HashSet::new();
        let mut rules = Vec::new();
        for def in defs {
            if !seen.insert(def.id.clone()) {
                return Err(Error::DuplicateRule(def.id));
            }

            let rule = Rule::compile(&def)?;
            if rule.is_match("") {
                return Err(Error::EmptyMatch(def.id));
            }
            if matches_within_placeholders(&rule, &config.placeholder) {
                return Err(Error::UnsafePlaceholder(def.id));
            }
            rules.push(rule);
        }

        tracing::info!(
            rules = rules.len(),
            extra_rules = config.extra_rules.len(),
            "Contact pattern registry loaded"
        );

        Ok(Self {
            rules,
            placeholder: config.placeholder.clone(),
        })
    }

    /// Build the registry with the built-in rules and default placeholder
    pub fn with_defaults() -> Result<Self> {
        Self::load(&RegistryConfig::default())
    }

    /// All rules in registration order
    pub fn all(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules of one category in registration order
    pub fn by_category(&self, category: RuleCategory) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().filter(move |r| r.category == category)
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Text substituted for every redacted span
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

/// Text a placeholder can sit next to once substitutions have run
const PLACEHOLDER_NEIGHBOURS: &[&str] = &["", " ", "a", "1"];

/// Whether `rule` can match text made only of adjacent placeholders.
///
/// If it cannot, every redaction pass that changes a text replaces at least
/// one character of the input, so repeated passes always settle.
fn matches_within_placeholders(rule: &Rule, placeholder: &str) -> bool {
    (1..=3).any(|run| {
        let body = placeholder.repeat(run);
        PLACEHOLDER_NEIGHBOURS.iter().any(|before| {
            PLACEHOLDER_NEIGHBOURS.iter().any(|after| {
                let haystack = format!("{}{}{}", before, body, after);
                let (start, end) = (before.len(), before.len() + body.len());
                rule.regex()
                    .find_iter(&haystack)
                    .any(|m| m.start() >= start && m.end() <= end)
            })
        })
    })
}
