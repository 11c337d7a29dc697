//! Contact guard configuration management

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default text substituted for every redacted span
pub const DEFAULT_PLACEHOLDER: &str = "[CONTACT INFO BLOCKED - Please use platform messaging]";

/// Default minimum trimmed length below which a message is suspicious
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// Main contact guard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Pattern registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Evasion heuristics configuration
    #[serde(default)]
    pub heuristics: HeuristicsConfig,
}

impl GuardConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Pattern registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Replacement text for redacted spans. No rule may match it, alone,
    /// repeated, or next to word characters.
    pub placeholder: String,

    /// Rules appended after the built-in set, in order
    pub extra_rules: Vec<RuleDef>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            extra_rules: Vec::new(),
        }
    }
}

/// Evasion heuristics configuration
///
/// - `min_length = 0` disables the short-message signal
/// - an empty `phrases` list disables the phrase signal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Trimmed messages with fewer characters than this are suspicious
    pub min_length: usize,

    /// Canned solicitation phrases, checked in order
    pub phrases: Vec<String>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            phrases: default_suspicious_phrases(),
        }
    }
}

/// Default canned bypass phrases
pub fn default_suspicious_phrases() -> Vec<String> {
    [
        "contact me directly",
        "reach me at",
        "my number is",
        "email is",
        "add me on",
        "find me on",
        "connect outside",
        "talk offline",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Leak type a rule belongs to. Used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Email addresses and provider names
    Email,
    /// Phone number shapes
    Phone,
    /// Messaging applications
    MessagingApp,
    /// Social platform names and domains
    SocialHandle,
    /// Explicit requests to take contact elsewhere
    DirectContactRequest,
    /// Obfuscated provider names and "at" tokens
    BypassObfuscation,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::MessagingApp => "messaging_app",
            Self::SocialHandle => "social_handle",
            Self::DirectContactRequest => "direct_contact_request",
            Self::BypassObfuscation => "bypass_obfuscation",
        };
        f.write_str(name)
    }
}

/// Uncompiled rule definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Stable rule identifier
    pub id: String,

    /// Leak category
    pub category: RuleCategory,

    /// Regular expression source
    pub pattern: String,

    /// Match case exactly instead of folding
    #[serde(default)]
    pub case_sensitive: bool,
}

impl RuleDef {
    /// Create a case-insensitive rule definition
    pub fn new(id: impl Into<String>, category: RuleCategory, pattern: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category,
            pattern: pattern.into(),
            case_sensitive: false,
        }
    }
}

/// Built-in contact leak rules in registration order.
///
/// Redaction applies rules in this order, so narrower rules come before
/// broader ones within each group.
pub fn default_contact_rules() -> Vec<RuleDef> {
    use RuleCategory::*;

    let raw: &[(&str, RuleCategory, &str)] = &[
        // Email
        (
            "email_address",
            Email,
            r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
        ),
        (
            "email_provider",
            Email,
            r"\b(gmail|yahoo|outlook|hotmail|icloud|proton)\b",
        ),
        ("at_gmail", Email, r"\bat\s*gmail\b"),
        ("at_yahoo", Email, r"\bat\s*yahoo\b"),
        // Phone
        ("phone_international", Phone, r"\+?\d[\d\s\-\(\)]{7,}\d"),
        ("phone_grouped", Phone, r"\b\d{3}[\s\-]?\d{3}[\s\-]?\d{4}\b"),
        ("phone_digit_run", Phone, r"\b\d{10,}\b"),
        ("cell_label", Phone, r"\bcell\s*:?\s*\d"),
        ("phone_label", Phone, r"\bphone\s*:?\s*\d"),
        ("call_me_at", DirectContactRequest, r"\bcall\s+me\s+at\b"),
        ("text_me_at", DirectContactRequest, r"\btext\s+me\s+at\b"),
        ("call_with_number", DirectContactRequest, r"\bcall\s*:?\s*\+?\d"),
        // Messaging apps
        (
            "messaging_app",
            MessagingApp,
            r"\b(whatsapp|telegram|signal|viber|wechat|skype)\b",
        ),
        ("wa_me", MessagingApp, r"\bwa\s+me\b"),
        ("whats_app_spaced", MessagingApp, r"\bwhats\s*app\b"),
        // Social media
        (
            "social_platform",
            SocialHandle,
            r"\b(linkedin|facebook|twitter|instagram|tiktok)\b",
        ),
        ("linkedin_domain", SocialHandle, r"linkedin\.com"),
        ("facebook_domain", SocialHandle, r"facebook\.com"),
        // Direct contact requests
        (
            "contact_me_outside",
            DirectContactRequest,
            r"\bcontact\s+me\s+outside\b",
        ),
        ("meet_offline", DirectContactRequest, r"\bmeet\s+offline\b"),
        (
            "lets_talk_outside",
            DirectContactRequest,
            r"\blet'?s\s+talk\s+outside\b",
        ),
        (
            "my_personal_contact",
            DirectContactRequest,
            r"\bmy\s+personal\s+(email|number|phone)\b",
        ),
        // Bypass attempts
        (
            "provider_obfuscated",
            BypassObfuscation,
            r"\b(g\.?mail|y\.?ahoo|out\.?look)\b",
        ),
        ("digits_at_digits", BypassObfuscation, r"\d+\s*@\s*\d+"),
        ("email_me_at", DirectContactRequest, r"\bemail\s+me\s+at\b"),
    ];

    raw.iter()
        .map(|(id, category, pattern)| RuleDef::new(*id, *category, *pattern))
        .collect()
}
