//! Five-tier strength classification over engine output

use crate::error::{PassForgeError, Result};
use crate::strength::engine::{StrengthEngine, ZxcvbnEngine};
use crate::strength::quantum;
use crate::types::{StrengthResult, Tier};

/// Classifies passwords into five tiers from the engine's crack-time text.
///
/// Tiering matches substrings of the display text, most severe first, rather
/// than reusing the engine's numeric score. The numeric score still rides
/// along in [`StrengthResult`] because the lyrics acceptance gate reads it;
/// the two schemes serve different call sites and stay separate.
pub struct StrengthClassifier {
    engine: Box<dyn StrengthEngine>,
}

impl StrengthClassifier {
    /// Classifier backed by the default zxcvbn engine
    pub fn new() -> Self {
        Self {
            engine: Box::new(ZxcvbnEngine::new()),
        }
    }

    /// Classifier with a custom engine (tests use scripted stubs)
    pub fn with_engine(engine: Box<dyn StrengthEngine>) -> Self {
        Self { engine }
    }

    /// Classify a finalized candidate.
    ///
    /// Empty input is a caller error, rejected before the engine runs.
    pub fn classify(&self, password: &str) -> Result<StrengthResult> {
        if password.is_empty() {
            return Err(PassForgeError::validation(
                "password must not be empty",
            ));
        }

        let estimate = self.engine.estimate(password)?;
        let tier = tier_from_duration(&estimate.display_text);

        Ok(StrengthResult {
            tier,
            score: estimate.score,
            duration_text: estimate.display_text,
            crack_seconds: estimate.crack_seconds,
            quantum_crack_seconds: None,
        })
    }

    /// Classify and attach the quantum-adjusted crack time
    pub fn classify_with_quantum(&self, password: &str, exponent: u32) -> Result<StrengthResult> {
        let mut result = self.classify(password)?;
        result.quantum_crack_seconds = Some(quantum::adjust(result.crack_seconds, exponent));
        Ok(result)
    }
}

impl Default for StrengthClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a crack-time display text onto a tier.
///
/// Order-sensitive: "centuries" wins over "years" and so on down the list.
/// Anything that names no interval of a week or more (days, hours, minutes,
/// seconds, "less than a second") is tier 1.
pub fn tier_from_duration(text: &str) -> Tier {
    if text.contains("centuries") {
        Tier::ExtremelyStrong
    } else if text.contains("years") {
        Tier::VeryStrong
    } else if text.contains("months") {
        Tier::Strong
    } else if text.contains("weeks") {
        Tier::Weak
    } else {
        Tier::VeryWeak
    }
}
