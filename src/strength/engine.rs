//! Strength estimation engine interface
//!
//! The engine is an external collaborator: it receives a password and returns
//! a 0-4 score plus crack-time data for one fixed attack scenario. Everything
//! downstream (tiers, quantum adjustment, acceptance gates) is ours.

use crate::error::{PassForgeError, Result};

/// The one attack scenario this crate reads from the engine.
///
/// Other scenarios in the engine output (online throttled, offline fast
/// hashing) are deliberately unused.
pub const SCENARIO: &str = "offline slow hashing, 1e4 guesses per second";

/// What the engine reports for the fixed scenario
#[derive(Debug, Clone)]
pub struct StrengthEstimate {
    /// Canonical engine score, 0-4
    pub score: u8,
    /// Crack time in seconds
    pub crack_seconds: f64,
    /// Human-readable crack time (e.g. "3 years", "centuries")
    pub display_text: String,
}

/// A password strength estimation engine
pub trait StrengthEngine: Send + Sync {
    fn estimate(&self, password: &str) -> Result<StrengthEstimate>;
}

/// Production engine backed by the zxcvbn crate
#[derive(Debug, Default)]
pub struct ZxcvbnEngine;

impl ZxcvbnEngine {
    pub fn new() -> Self {
        Self
    }
}

impl StrengthEngine for ZxcvbnEngine {
    fn estimate(&self, password: &str) -> Result<StrengthEstimate> {
        let entropy = zxcvbn::zxcvbn(password, &[])
            .map_err(|e| PassForgeError::classification(e.to_string()))?;

        let crack_time = entropy.crack_times().offline_slow_hashing_1e4_per_second();
        let display_text = crack_time.to_string();
        let estimate = StrengthEstimate {
            score: entropy.score(),
            crack_seconds: match crack_time {
                zxcvbn::time_estimates::CrackTimeSeconds::Float(f) => f,
                zxcvbn::time_estimates::CrackTimeSeconds::Integer(i) => i as f64,
            },
            display_text,
        };

        tracing::debug!(
            score = estimate.score,
            crack_seconds = estimate.crack_seconds,
            scenario = SCENARIO,
            "Engine estimate"
        );
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_password_scores_low() {
        let engine = ZxcvbnEngine::new();
        let estimate = engine.estimate("password").unwrap();
        assert!(estimate.score <= 1);
        assert!(!estimate.display_text.is_empty());
    }

    #[test]
    fn test_strong_password_scores_high() {
        let engine = ZxcvbnEngine::new();
        let estimate = engine.estimate("FlumoxedGiraffePedals42!").unwrap();
        assert_eq!(estimate.score, 4);
        assert!(estimate.crack_seconds > 0.0);
    }

    #[test]
    fn test_blank_password_is_engine_error() {
        let engine = ZxcvbnEngine::new();
        let err = engine.estimate("").unwrap_err();
        assert!(matches!(err, PassForgeError::Classification { .. }));
    }

    #[test]
    fn test_crack_time_grows_with_complexity() {
        let engine = ZxcvbnEngine::new();
        let weak = engine.estimate("abc").unwrap();
        let strong = engine.estimate("CorrectHorseBatteryStaple9#").unwrap();
        assert!(strong.crack_seconds > weak.crack_seconds);
    }
}
