//! Contact Guard - Contact Information Leak Detection and Redaction
//!
//! Contact Guard inspects user-submitted free text (messages, cover letters,
//! bios) for attempts to move a conversation off the platform, and produces
//! a sanitized copy that is safe to display.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ContactGuard                          │
//! │                                                               │
//! │  ┌─────────────────────────────┐   ┌───────────────────────┐ │
//! │  │       Pattern Registry      │   │   Evasion Heuristics  │ │
//! │  │  - ordered compiled rules   │   │  - short replies      │ │
//! │  │  - placeholder safety check │   │  - canned phrases     │ │
//! │  └──────┬───────────────┬──────┘   └───────────┬───────────┘ │
//! │         │               │                      │             │
//! │    detect(text)    redact(text)          assess(text)        │
//! │         │               │                      │             │
//! │   MatchResult    RedactionResult        SuspicionResult      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The three operations are independent and never fail; all errors surface
//! once, when the guard is built. Deciding whether to block, warn or store
//! the redacted form is left to the caller.
//!
//! ## Modules
//!
//! - [`filter`]: Pattern registry, detection and redaction
//! - [`evasion`]: Behavioral evasion heuristics
//! - [`guard`]: Facade and process-wide instance
//! - [`config`]: Configuration management

pub mod config;
pub mod error;
pub mod evasion;
pub mod filter;
pub mod guard;

pub use config::{GuardConfig, RuleCategory, RuleDef};
pub use error::{Error, Result};
pub use evasion::{EvasionHeuristics, EvasionSignal, SuspicionResult};
pub use filter::{MatchResult, RedactionResult, Registry, Rule};
pub use guard::{ContactGuard, Screening};
