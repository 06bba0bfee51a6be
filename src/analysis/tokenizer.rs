//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, VeritasError};

/// Trait for tokenizers that convert raw text into token sequences.
///
/// Requires `Send + Sync` so a single tokenizer instance can be shared by
/// concurrent prediction calls.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into an ordered sequence of tokens.
    ///
    /// # Errors
    ///
    /// Returns an `InputValidation` error when the input is empty or
    /// contains no tokenizable content.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// A regex-based tokenizer that lower-cases its input and extracts
/// alphanumeric runs.
///
/// This is the default tokenizer. Punctuation and other non-alphanumeric
/// characters act as separators and never appear in tokens.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens.
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern.
    ///
    /// The default pattern `[a-z0-9]+` matches alphanumeric runs in the
    /// lower-cased input.
    pub fn new() -> Result<Self> {
        Self::with_pattern("[a-z0-9]+")
    }

    /// Create a new regex tokenizer with a custom pattern.
    ///
    /// The pattern is applied to the lower-cased input.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            VeritasError::input_validation(format!("Invalid regex pattern: {e}"))
        })?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new().expect("Default regex pattern should be valid")
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Err(VeritasError::input_validation(
                "text must be a non-empty string",
            ));
        }

        let lowered = text.to_lowercase();
        let tokens: Vec<String> = self
            .pattern
            .find_iter(&lowered)
            .map(|mat| mat.as_str().to_owned())
            .collect();

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
