//! Core types and structures for passforge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Token selection policy used when sampling from a pool.
///
/// `LowEntropy` is the Fibonacci-recurrence policy carried over from the
/// original dictionary generator. It is deterministic, has a tiny effective
/// index space, and must never be the default for anything labeled secure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Uniform selection backed by a cryptographically secure RNG.
    Secure,
    /// Deterministic Fibonacci-based index derivation. Weak by construction.
    /// `seed = None` derives the seed from the current time in milliseconds
    /// on every call.
    LowEntropy { seed: Option<u64> },
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::Secure => write!(f, "secure"),
            SelectionPolicy::LowEntropy { .. } => write!(f, "low-entropy"),
        }
    }
}

/// Discrete strength tier derived from the crack-time display text.
///
/// Distinct from the engine's native 0-4 score: tiers classify the textual
/// crack-time estimate for the offline slow-hashing scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    VeryWeak = 1,
    Weak = 2,
    Strong = 3,
    VeryStrong = 4,
    ExtremelyStrong = 5,
}

impl Tier {
    /// Numeric value, 1 (weakest) through 5 (strongest)
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// One-line verdict shown to the user
    pub fn verdict(self) -> &'static str {
        match self {
            Tier::VeryWeak => "Your password is very weak. Change it immediately!",
            Tier::Weak => "Your password is relatively weak. Consider strengthening.",
            Tier::Strong => "Your password is strong. You're good for at least a month.",
            Tier::VeryStrong => "Your password is VERY strong. It won't be cracked for several years.",
            Tier::ExtremelyStrong => "Your password is EXTREMELY strong! It won't be cracked in your lifetime!",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::VeryWeak => write!(f, "very weak"),
            Tier::Weak => write!(f, "weak"),
            Tier::Strong => write!(f, "strong"),
            Tier::VeryStrong => write!(f, "very strong"),
            Tier::ExtremelyStrong => write!(f, "extremely strong"),
        }
    }
}

/// Character class appended to the end of an assembled password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixClass {
    Digit,
    Punctuation,
}

impl std::fmt::Display for SuffixClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuffixClass::Digit => write!(f, "digit"),
            SuffixClass::Punctuation => write!(f, "punctuation"),
        }
    }
}

/// Result of one classification call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthResult {
    /// Five-tier classification of the crack-time text
    pub tier: Tier,
    /// Raw 0-4 score reported by the engine
    pub score: u8,
    /// Human-readable crack time for the offline slow-hashing scenario
    pub duration_text: String,
    /// Crack time in seconds for the same scenario
    pub crack_seconds: f64,
    /// Quantum-adjusted crack time, when requested
    pub quantum_crack_seconds: Option<f64>,
}

/// Configuration for password assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationPolicy {
    /// Number of words sampled before length shaping
    pub word_count: usize,
    /// Minimum length of the word body, before suffixes
    pub min_length: usize,
    /// Maximum length of the word body, before suffixes
    pub max_length: usize,
    /// Character classes appended after shaping, in order
    pub required_suffixes: Vec<SuffixClass>,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            word_count: 3,
            min_length: 16,
            max_length: 24,
            required_suffixes: vec![SuffixClass::Digit, SuffixClass::Punctuation],
        }
    }
}

/// Acceptance gate for the generate-and-validate loop.
///
/// Two distinct policies exist on purpose: display classification uses the
/// crack-time tier, while the lyrics flow gates on the raw engine score.
/// They are not interchangeable and are kept as separate named variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptancePolicy {
    /// Accept the first candidate unconditionally
    Any,
    /// Accept when the crack-time tier meets the bar
    MinimumTier(Tier),
    /// Accept when the raw engine score meets the bar
    MinimumScore(u8),
}

impl AcceptancePolicy {
    /// Whether a classified candidate clears this gate
    pub fn accepts(&self, result: &StrengthResult) -> bool {
        match self {
            AcceptancePolicy::Any => true,
            AcceptancePolicy::MinimumTier(tier) => result.tier >= *tier,
            AcceptancePolicy::MinimumScore(score) => result.score >= *score,
        }
    }
}

/// A finished password together with its classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPassword {
    pub password: String,
    pub strength: StrengthResult,
    /// Number of assemble/classify cycles spent
    pub attempts: usize,
    pub generated_at: DateTime<Utc>,
}

/// Where candidate words come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Newline-delimited word list
    pub dictionary_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dictionary_path: "/usr/share/dict/words".to_string(),
        }
    }
}

/// Configuration for the lyrics scraper
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub timeout: Duration,
    pub retry_attempts: usize,
    /// CSS class marking song-title elements
    pub title_class: String,
    /// CSS class marking lyrics-body elements
    pub lyrics_class: String,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            title_class: "header_with_cover_art-primary_info-title".to_string(),
            lyrics_class: "lyrics".to_string(),
            user_agent: format!("passforge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::ExtremelyStrong > Tier::VeryStrong);
        assert!(Tier::Weak > Tier::VeryWeak);
        assert_eq!(Tier::Strong.as_u8(), 3);
    }

    #[test]
    fn test_acceptance_policies() {
        let result = StrengthResult {
            tier: Tier::VeryStrong,
            score: 3,
            duration_text: "3 years".to_string(),
            crack_seconds: 1e8,
            quantum_crack_seconds: None,
        };

        assert!(AcceptancePolicy::Any.accepts(&result));
        assert!(AcceptancePolicy::MinimumTier(Tier::VeryStrong).accepts(&result));
        assert!(!AcceptancePolicy::MinimumTier(Tier::ExtremelyStrong).accepts(&result));
        assert!(AcceptancePolicy::MinimumScore(3).accepts(&result));
        assert!(!AcceptancePolicy::MinimumScore(4).accepts(&result));
    }

    #[test]
    fn test_generation_policy_default() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.word_count, 3);
        assert_eq!(policy.min_length, 16);
        assert_eq!(policy.max_length, 24);
        assert_eq!(
            policy.required_suffixes,
            vec![SuffixClass::Digit, SuffixClass::Punctuation]
        );
    }

    #[test]
    fn test_selection_policy_display() {
        assert_eq!(SelectionPolicy::Secure.to_string(), "secure");
        assert_eq!(
            SelectionPolicy::LowEntropy { seed: Some(7) }.to_string(),
            "low-entropy"
        );
    }
}
