//! Token pools - deduplicated word and character supplies for assembly

pub mod recurrence;

use crate::error::{PassForgeError, Result};
use crate::types::{SelectionPolicy, SuffixClass};
use rand::Rng;
use std::collections::BTreeSet;
use std::path::Path;

/// Digits appended as a required suffix class
pub const DIGITS: &str = "0123456789";

/// Punctuation appended as a required suffix class
pub const PUNCTUATION: &str = "!#$%&()*+,-./:;<=>?@[\\]^_`{|}~";

/// ASCII letters, both cases, for the character-soup generator
pub const ASCII_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An immutable, deduplicated set of candidate tokens.
///
/// Tokens are held in one stable lexicographic order, fixed at construction.
/// The low-entropy recurrence policy indexes into this order, so the same
/// pool contents always map the same seed to the same token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPool {
    name: String,
    tokens: Vec<String>,
}

impl TokenPool {
    /// Build a pool from any word iterator. Empty entries are dropped,
    /// duplicates collapse, and the result is sorted.
    pub fn from_words<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = words
            .into_iter()
            .map(Into::into)
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            name: name.into(),
            tokens: set.into_iter().collect(),
        }
    }

    /// Build a pool with one token per character of `alphabet`
    pub fn from_chars(name: impl Into<String>, alphabet: &str) -> Self {
        Self::from_words(name, alphabet.chars().map(|c| c.to_string()))
    }

    /// Load a newline-delimited word list (UTF-8). A missing or unreadable
    /// file is a configuration error carrying the path.
    pub fn from_file(name: impl Into<String>, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PassForgeError::config(format!(
                "cannot read word list {}: {}",
                path.display(),
                e
            ))
        })?;

        let pool = Self::from_words(name, content.lines());
        tracing::debug!(
            path = %path.display(),
            words = pool.len(),
            "Loaded dictionary pool"
        );
        Ok(pool)
    }

    /// Built-in digit pool
    pub fn digits() -> Self {
        Self::from_chars("digits", DIGITS)
    }

    /// Built-in punctuation pool
    pub fn punctuation() -> Self {
        Self::from_chars("punctuation", PUNCTUATION)
    }

    /// Built-in pool for a given suffix class
    pub fn for_suffix(class: SuffixClass) -> Self {
        match class {
            SuffixClass::Digit => Self::digits(),
            SuffixClass::Punctuation => Self::punctuation(),
        }
    }

    /// Pool name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.binary_search_by(|t| t.as_str().cmp(token)).is_ok()
    }

    /// Tokens in their stable order
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Sample one token under the given selection policy.
    ///
    /// An empty pool is a precondition violation and always errors; `sample`
    /// never invents a default token.
    pub fn sample(&self, policy: &SelectionPolicy) -> Result<&str> {
        if self.tokens.is_empty() {
            return Err(PassForgeError::empty_pool(self.name.clone()));
        }

        let index = match policy {
            SelectionPolicy::Secure => rand::thread_rng().gen_range(0..self.tokens.len()),
            SelectionPolicy::LowEntropy { seed } => {
                // Seed is re-derived per call; the recurrence keeps no state.
                recurrence::pseudo_random_index(*seed, self.tokens.len())
            }
        };

        Ok(&self.tokens[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_dedup_and_stable_order() {
        let pool = TokenPool::from_words("test", ["cherry", "apple", "banana", "apple"]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.as_slice(), &["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sample_stays_in_pool() {
        let pool = TokenPool::from_words("test", ["apple", "banana", "cherry"]);

        for _ in 0..100 {
            let token = pool.sample(&SelectionPolicy::Secure).unwrap();
            assert!(pool.contains(token));
        }
        for seed in 0..100 {
            let token = pool
                .sample(&SelectionPolicy::LowEntropy { seed: Some(seed) })
                .unwrap();
            assert!(pool.contains(token));
        }
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let pool = TokenPool::from_words("test", ["apple", "banana", "cherry", "damson"]);
        let policy = SelectionPolicy::LowEntropy { seed: Some(12345) };

        let first = pool.sample(&policy).unwrap().to_string();
        for _ in 0..10 {
            assert_eq!(pool.sample(&policy).unwrap(), first);
        }
    }

    #[test]
    fn test_empty_pool_errors() {
        let pool = TokenPool::from_words("empty", Vec::<String>::new());

        let err = pool.sample(&SelectionPolicy::Secure).unwrap_err();
        assert!(matches!(err, PassForgeError::EmptyPool { .. }));

        let err = pool
            .sample(&SelectionPolicy::LowEntropy { seed: Some(1) })
            .unwrap_err();
        assert!(matches!(err, PassForgeError::EmptyPool { .. }));
    }

    #[test]
    fn test_from_chars() {
        let pool = TokenPool::digits();
        assert_eq!(pool.len(), 10);
        assert!(pool.contains("0"));
        assert!(pool.contains("9"));

        let punct = TokenPool::punctuation();
        assert!(punct.contains("!"));
        assert!(punct.contains("~"));
        assert!(!punct.contains("a"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple\nbanana\n\napple\ncherry").unwrap();

        let pool = TokenPool::from_file("dict", file.path()).unwrap();
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_from_missing_file() {
        let err = TokenPool::from_file("dict", Path::new("/no/such/wordlist")).unwrap_err();
        assert!(matches!(err, PassForgeError::Config { .. }));
        assert!(err.to_string().contains("/no/such/wordlist"));
    }
}
