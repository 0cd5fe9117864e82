//! Generate-and-validate loop - regenerate candidates until one clears the bar

use crate::assemble::PasswordAssembler;
use crate::error::{PassForgeError, Result};
use crate::pool::TokenPool;
use crate::strength::StrengthClassifier;
use crate::types::{AcceptancePolicy, GeneratedPassword, SelectionPolicy};
use chrono::Utc;

/// Default cap on assemble/classify cycles before giving up
pub const DEFAULT_MAX_RETRIES: usize = 1000;

/// Orchestrates assembly and classification into accepted passwords.
///
/// The loop is bounded: an unreachable acceptance bar terminates with
/// [`PassForgeError::RetryExhausted`] instead of spinning forever.
pub struct PasswordGenerator {
    assembler: PasswordAssembler,
    classifier: StrengthClassifier,
    acceptance: AcceptancePolicy,
    max_retries: usize,
}

impl PasswordGenerator {
    pub fn new(
        assembler: PasswordAssembler,
        classifier: StrengthClassifier,
        acceptance: AcceptancePolicy,
    ) -> Self {
        Self {
            assembler,
            classifier,
            acceptance,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the retry cap
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn acceptance(&self) -> &AcceptancePolicy {
        &self.acceptance
    }

    /// Assemble and classify until a candidate clears the acceptance gate.
    ///
    /// Returns the first accepted candidate together with its classification
    /// and the number of cycles spent.
    pub fn generate(
        &self,
        words: &TokenPool,
        selection: &SelectionPolicy,
    ) -> Result<GeneratedPassword> {
        for attempt in 1..=self.max_retries {
            let candidate = self.assembler.assemble(words, selection)?;
            let strength = self.classifier.classify(&candidate)?;

            if self.acceptance.accepts(&strength) {
                tracing::info!(
                    attempts = attempt,
                    tier = strength.tier.as_u8(),
                    score = strength.score,
                    "Candidate accepted"
                );
                return Ok(GeneratedPassword {
                    password: candidate,
                    strength,
                    attempts: attempt,
                    generated_at: Utc::now(),
                });
            }

            tracing::debug!(
                attempt,
                tier = strength.tier.as_u8(),
                score = strength.score,
                "Candidate rejected"
            );
        }

        tracing::warn!(max_retries = self.max_retries, "Retry budget exhausted");
        Err(PassForgeError::retry_exhausted(self.max_retries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::engine::{StrengthEngine, StrengthEstimate};
    use crate::types::{GenerationPolicy, Tier};
    use std::sync::Mutex;

    struct ScriptedEngine {
        script: Mutex<Vec<StrengthEstimate>>,
    }

    impl ScriptedEngine {
        fn new(mut estimates: Vec<StrengthEstimate>) -> Self {
            estimates.reverse();
            Self {
                script: Mutex::new(estimates),
            }
        }
    }

    impl StrengthEngine for ScriptedEngine {
        fn estimate(&self, _password: &str) -> Result<StrengthEstimate> {
            self.script
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| PassForgeError::classification("script exhausted"))
        }
    }

    fn estimate(score: u8, text: &str) -> StrengthEstimate {
        StrengthEstimate {
            score,
            crack_seconds: 1.0,
            display_text: text.to_string(),
        }
    }

    fn generator_with_script(
        estimates: Vec<StrengthEstimate>,
        acceptance: AcceptancePolicy,
    ) -> PasswordGenerator {
        let classifier = StrengthClassifier::with_engine(Box::new(ScriptedEngine::new(estimates)));
        PasswordGenerator::new(
            PasswordAssembler::new(GenerationPolicy::default()),
            classifier,
            acceptance,
        )
    }

    fn word_pool() -> TokenPool {
        TokenPool::from_words("words", ["apple", "banana", "cherry", "damson"])
    }

    #[test]
    fn test_accepts_on_third_cycle() {
        // Tiers 2, 2, 4 against a minimum of 4: exactly three cycles.
        let generator = generator_with_script(
            vec![
                estimate(1, "2 weeks"),
                estimate(1, "2 weeks"),
                estimate(3, "3 years"),
            ],
            AcceptancePolicy::MinimumTier(Tier::VeryStrong),
        );

        let result = generator
            .generate(&word_pool(), &SelectionPolicy::Secure)
            .unwrap();
        assert_eq!(result.attempts, 3);
        assert_eq!(result.strength.tier, Tier::VeryStrong);
    }

    #[test]
    fn test_score_gate_is_independent_of_tier() {
        // Raw score 4 clears the score gate even though the tier is low.
        let generator = generator_with_script(
            vec![estimate(4, "5 days")],
            AcceptancePolicy::MinimumScore(4),
        );

        let result = generator
            .generate(&word_pool(), &SelectionPolicy::Secure)
            .unwrap();
        assert_eq!(result.attempts, 1);
        assert_eq!(result.strength.tier, Tier::VeryWeak);
        assert_eq!(result.strength.score, 4);
    }

    #[test]
    fn test_retry_exhausted() {
        let rejections: Vec<_> = (0..5).map(|_| estimate(1, "5 days")).collect();
        let generator = generator_with_script(
            rejections,
            AcceptancePolicy::MinimumTier(Tier::ExtremelyStrong),
        )
        .with_max_retries(5);

        let err = generator
            .generate(&word_pool(), &SelectionPolicy::Secure)
            .unwrap_err();
        assert!(matches!(err, PassForgeError::RetryExhausted { attempts: 5 }));
    }

    #[test]
    fn test_any_policy_accepts_first() {
        let generator =
            generator_with_script(vec![estimate(0, "5 days")], AcceptancePolicy::Any);

        let result = generator
            .generate(&word_pool(), &SelectionPolicy::Secure)
            .unwrap();
        assert_eq!(result.attempts, 1);
    }

    #[test]
    fn test_assembly_errors_abort_the_loop() {
        let empty = TokenPool::from_words("empty", Vec::<String>::new());
        let generator = generator_with_script(vec![], AcceptancePolicy::Any);

        let err = generator
            .generate(&empty, &SelectionPolicy::Secure)
            .unwrap_err();
        assert!(matches!(err, PassForgeError::EmptyPool { .. }));
    }
}
