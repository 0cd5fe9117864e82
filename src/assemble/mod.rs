//! Password assembly - turns sampled tokens into a shaped candidate string

use crate::error::{PassForgeError, Result};
use crate::pool::TokenPool;
use crate::types::{GenerationPolicy, SelectionPolicy};

/// Cap on padding samples when the body is below the minimum length
const MAX_PAD_ATTEMPTS: usize = 50;

/// How tokens from a source are treated during assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Capitalized before concatenation
    Word,
    /// Appended verbatim (digits, punctuation)
    Character,
}

/// One entry in an ordered list of sampling sources
#[derive(Debug, Clone, Copy)]
pub struct TokenSource<'a> {
    pub pool: &'a TokenPool,
    pub selection: SelectionPolicy,
    pub count: usize,
    pub kind: TokenKind,
}

/// Assembles candidate passwords according to a [`GenerationPolicy`].
///
/// Shaping order matters: the body is padded up to the minimum length first,
/// truncated to the maximum second, and only then are the required suffix
/// characters appended. Truncating before the minimum check could defeat it,
/// and truncating after the suffixes could remove them; both are disallowed.
pub struct PasswordAssembler {
    policy: GenerationPolicy,
}

impl PasswordAssembler {
    pub fn new(policy: GenerationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    /// Assemble a candidate from a single word pool.
    ///
    /// Final length is `min(max_length, natural length)` plus one character
    /// per required suffix class, and never below `min_length`.
    pub fn assemble(&self, words: &TokenPool, selection: &SelectionPolicy) -> Result<String> {
        let source = TokenSource {
            pool: words,
            selection: *selection,
            count: self.policy.word_count,
            kind: TokenKind::Word,
        };
        self.assemble_from_sources(&[source])
    }

    /// Assemble a candidate from an ordered list of sources.
    ///
    /// Tokens are sampled with replacement, word tokens capitalized, and all
    /// tokens concatenated in source order with no separator. Padding draws
    /// from the last word source.
    pub fn assemble_from_sources(&self, sources: &[TokenSource<'_>]) -> Result<String> {
        if sources.is_empty() {
            return Err(PassForgeError::validation(
                "at least one token source is required",
            ));
        }

        let mut body = String::new();
        for source in sources {
            for _ in 0..source.count {
                let token = source.pool.sample(&source.selection)?;
                match source.kind {
                    TokenKind::Word => body.push_str(&capitalize(token)),
                    TokenKind::Character => body.push_str(token),
                }
            }
        }

        let pad_source = sources
            .iter()
            .rev()
            .find(|s| s.kind == TokenKind::Word)
            .copied()
            .unwrap_or(sources[sources.len() - 1]);

        // Pad up to the minimum before any truncation.
        let mut attempts = 0;
        while char_len(&body) < self.policy.min_length {
            if attempts >= MAX_PAD_ATTEMPTS {
                return Err(PassForgeError::insufficient_entropy(
                    self.policy.min_length,
                    char_len(&body),
                    attempts,
                ));
            }
            attempts += 1;
            let token = pad_source.pool.sample(&pad_source.selection)?;
            body.push_str(&capitalize(token));
        }

        if char_len(&body) > self.policy.max_length {
            body = body.chars().take(self.policy.max_length).collect();
        }

        // Suffixes go last so truncation can never touch them.
        let mut candidate = body;
        for class in &self.policy.required_suffixes {
            let pool = TokenPool::for_suffix(*class);
            let token = pool.sample(&pad_source.selection)?;
            candidate.push_str(token);
        }

        tracing::debug!(
            length = char_len(&candidate),
            sources = sources.len(),
            "Assembled candidate"
        );
        Ok(candidate)
    }
}

impl Default for PasswordAssembler {
    fn default() -> Self {
        Self::new(GenerationPolicy::default())
    }
}

/// First letter uppercased, remainder lowercased
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
