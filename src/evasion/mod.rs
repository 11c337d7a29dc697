//! Moderation evasion heuristics
//!
//! Behavioral signals independent of the pattern registry.

pub mod heuristics;

pub use heuristics::{EvasionHeuristics, EvasionSignal, SuspicionResult};
