//! Text analysis for the classification pipeline.
//!
//! Analysis turns raw statement text into the token sequence consumed by the
//! TF-IDF vectorizer:
//!
//! ```text
//! Raw Text → Tokenizer → Token Sequence → Vectorizer
//! ```
//!
//! The pipeline is deliberately small: lower-casing and alphanumeric token
//! extraction, no stopword removal, no stemming. Tokenization is pure and
//! deterministic, so a trained model scores identical text identically.

pub mod tokenizer;

pub use tokenizer::{RegexTokenizer, Tokenizer};
