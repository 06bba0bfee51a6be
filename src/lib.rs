//! # Veritas
//!
//! A fake news detection library for Rust: TF-IDF feature extraction over a
//! learned vocabulary, logistic regression scoring, and durable model
//! persistence behind a single facade.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Deterministic tokenization and vectorization
//! - Seeded train/test split with held-out accuracy reporting
//! - Atomic model persistence (temp file + rename)
//! - Immutable trained snapshots, swapped atomically on retrain
//! - Parallel batch prediction
//!
//! ## Quick start
//!
//! ```no_run
//! use veritas::detector::{DetectorConfig, FakeNewsDetector};
//!
//! let detector = FakeNewsDetector::new(DetectorConfig::default());
//! let accuracy = detector.train("data/fake_news_data.csv").unwrap();
//! println!("held-out accuracy: {accuracy:.4}");
//!
//! let prediction = detector.predict("miracle cure doctors hate").unwrap();
//! println!("{} ({:.2})", prediction.label, prediction.probability);
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod dataset;
pub mod detector;
pub mod error;
pub mod model;
pub mod vectorizer;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
