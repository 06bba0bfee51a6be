//! Error types for the Veritas library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`VeritasError`] enum. Variants follow the error taxonomy of the
//! classification engine: validation problems are always recoverable and
//! never mutate detector state, data problems abort training before any
//! state replacement, and persistence problems are surfaced synchronously
//! to the caller.
//!
//! # Examples
//!
//! ```
//! use veritas::error::{Result, VeritasError};
//!
//! fn check_text(text: &str) -> Result<()> {
//!     if text.trim().is_empty() {
//!         return Err(VeritasError::input_validation("text must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_text("").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Veritas operations.
#[derive(Error, Debug)]
pub enum VeritasError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or missing input: absent schema columns, empty text,
    /// out-of-range labels.
    #[error("Input validation error: {0}")]
    InputValidation(String),

    /// Degenerate training data: empty corpus, fewer than two examples,
    /// or a single label class.
    #[error("Data error: {0}")]
    Data(String),

    /// An operation that requires a trained model was invoked on an
    /// untrained detector.
    #[error("Model not trained: {0}")]
    ModelNotTrained(String),

    /// The persisted model artifact does not exist at the configured path.
    #[error("Model file not found: {0}")]
    ModelFileNotFound(String),

    /// The persisted model artifact is unreadable or carries an
    /// unsupported format version.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for operations that may fail with [`VeritasError`].
pub type Result<T> = std::result::Result<T, VeritasError>;

impl VeritasError {
    /// Create a new input validation error.
    pub fn input_validation<S: Into<String>>(msg: S) -> Self {
        VeritasError::InputValidation(msg.into())
    }

    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        VeritasError::Data(msg.into())
    }

    /// Create a new model-not-trained error.
    pub fn not_trained<S: Into<String>>(msg: S) -> Self {
        VeritasError::ModelNotTrained(msg.into())
    }

    /// Create a new model-file-not-found error.
    pub fn model_file_not_found<S: Into<String>>(msg: S) -> Self {
        VeritasError::ModelFileNotFound(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        VeritasError::Serialization(msg.into())
    }
}
