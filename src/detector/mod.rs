//! The fake news detection facade.
//!
//! [`FakeNewsDetector`] orchestrates the whole pipeline: corpus loading,
//! tokenization, TF-IDF vectorization, logistic regression training, model
//! persistence, and single/batch inference. It is the only entry point the
//! surrounding service layer consumes.
//!
//! # Lifecycle
//!
//! A detector is constructed untrained, becomes trained through a
//! successful [`train`](FakeNewsDetector::train) or
//! [`load_model`](FakeNewsDetector::load_model) call, and stays trained
//! from then on; later training runs replace the snapshot in place.
//!
//! # Concurrency
//!
//! Trained state is an immutable snapshot behind a read-write lock.
//! Readers clone the `Arc` and release the lock before scoring, writers
//! build a complete replacement off to the side and install it with a
//! single assignment. A concurrent reader observes either the prior
//! snapshot or the new one, never a partial mix; a failed training run
//! leaves the prior snapshot untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{RegexTokenizer, Tokenizer};
use crate::classifier::{LogisticRegression, TrainConfig};
use crate::dataset::load_corpus;
use crate::error::{Result, VeritasError};
use crate::model::{ModelArtifact, ModelStore, FORMAT_VERSION};
use crate::vectorizer::{TfIdfVectorizer, VectorizerConfig};

/// Configuration for a [`FakeNewsDetector`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Vocabulary construction settings.
    pub vectorizer: VectorizerConfig,
    /// Classifier training hyperparameters.
    pub training: TrainConfig,
    /// Probability threshold above which a statement is labeled fake.
    pub threshold: f64,
    /// Distance from 0.5 at which confidence becomes high.
    pub high_margin: f64,
    /// Distance from 0.5 at which confidence becomes medium.
    pub medium_margin: f64,
    /// Location of the persisted model artifact.
    pub model_path: PathBuf,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            vectorizer: VectorizerConfig::default(),
            training: TrainConfig::default(),
            threshold: 0.5,
            high_margin: 0.35,
            medium_margin: 0.15,
            model_path: PathBuf::from("model.json"),
        }
    }
}

/// Predicted class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// The statement looks legitimate.
    #[serde(rename = "REAL")]
    Real,
    /// The statement looks fabricated.
    #[serde(rename = "FAKE")]
    Fake,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Real => write!(f, "REAL"),
            Label::Fake => write!(f, "FAKE"),
        }
    }
}

/// Coarse confidence bucket derived from the probability's distance
/// from 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    fn from_probability(probability: f64, high_margin: f64, medium_margin: f64) -> Self {
        let distance = (probability - 0.5).abs();
        if distance >= high_margin {
            Confidence::High
        } else if distance >= medium_margin {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// The result of scoring one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class.
    pub label: Label,
    /// Probability of the fake class, in [0, 1].
    pub probability: f64,
    /// Confidence bucket.
    pub confidence: Confidence,
}

/// Summary of the detector's current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorStats {
    /// Whether a trained snapshot is installed.
    pub trained: bool,
    /// Vocabulary size of the current snapshot, 0 when untrained.
    pub vocabulary_size: usize,
    /// Held-out accuracy of the last training run; absent for loaded
    /// models.
    pub accuracy: Option<f64>,
}

/// A complete, internally consistent trained snapshot.
///
/// Built fully before installation; never mutated afterwards.
#[derive(Debug)]
struct TrainedModel {
    vectorizer: TfIdfVectorizer,
    classifier: LogisticRegression,
    threshold: f64,
    accuracy: Option<f64>,
}

/// The fake news detection engine.
pub struct FakeNewsDetector {
    tokenizer: Arc<dyn Tokenizer>,
    store: ModelStore,
    config: DetectorConfig,
    state: RwLock<Option<Arc<TrainedModel>>>,
}

impl std::fmt::Debug for FakeNewsDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeNewsDetector")
            .field("tokenizer", &self.tokenizer.name())
            .field("model_path", &self.store.path())
            .field("trained", &self.is_trained())
            .finish()
    }
}

impl Default for FakeNewsDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl FakeNewsDetector {
    /// Create an untrained detector with the given configuration and the
    /// default tokenizer.
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_tokenizer(config, Arc::new(RegexTokenizer::default()))
    }

    /// Create an untrained detector with a custom tokenizer.
    pub fn with_tokenizer(config: DetectorConfig, tokenizer: Arc<dyn Tokenizer>) -> Self {
        let store = ModelStore::new(&config.model_path);
        FakeNewsDetector {
            tokenizer,
            store,
            config,
            state: RwLock::new(None),
        }
    }

    /// Train on a labeled CSV corpus and return held-out accuracy.
    ///
    /// The corpus needs `text` and `label` columns (label 0 = real,
    /// 1 = fake). The new snapshot is built entirely off to the side and
    /// installed only on full success; any failure leaves prior trained
    /// state untouched.
    pub fn train<P: AsRef<Path>>(&self, corpus_path: P) -> Result<f64> {
        let documents = load_corpus(corpus_path.as_ref())?;
        if documents.is_empty() {
            return Err(VeritasError::data("training corpus is empty"));
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenizer.tokenize(&doc.text))
            .collect::<Result<_>>()?;

        let mut vectorizer = TfIdfVectorizer::new(self.config.vectorizer.clone());
        vectorizer.fit(&tokenized)?;

        let features: Vec<_> = tokenized
            .iter()
            .map(|tokens| vectorizer.transform(tokens))
            .collect();
        let labels: Vec<u8> = documents.iter().map(|doc| doc.label).collect();

        let mut classifier = LogisticRegression::new(vectorizer.vocabulary_size());
        let accuracy = classifier.fit(&features, &labels, &self.config.training)?;

        let snapshot = TrainedModel {
            vectorizer,
            classifier,
            threshold: self.config.threshold,
            accuracy: Some(accuracy),
        };
        *self.state.write() = Some(Arc::new(snapshot));

        info!(
            "trained on {} documents, held-out accuracy {:.4}",
            documents.len(),
            accuracy
        );
        Ok(accuracy)
    }

    /// Persist the current trained state through the model store.
    ///
    /// # Errors
    ///
    /// Returns `ModelNotTrained` when no trained snapshot exists.
    pub fn save_model(&self) -> Result<()> {
        let snapshot = self.snapshot().ok_or_else(|| {
            VeritasError::not_trained("cannot save a model before training")
        })?;

        let artifact = ModelArtifact {
            vocabulary: snapshot.vectorizer.vocabulary().clone(),
            idf: snapshot.vectorizer.idf().to_vec(),
            weights: snapshot.classifier.weights().to_vec(),
            bias: snapshot.classifier.bias(),
            threshold: snapshot.threshold,
            format_version: FORMAT_VERSION,
        };
        self.store.save(&artifact)
    }

    /// Load a persisted model and install it as the current snapshot.
    pub fn load_model(&self) -> Result<()> {
        let artifact = self.store.load()?;

        let vocab_len = artifact.vocabulary.len();
        if artifact.idf.len() != vocab_len || artifact.weights.len() != vocab_len {
            return Err(VeritasError::serialization(format!(
                "inconsistent model artifact: vocabulary {}, idf {}, weights {}",
                vocab_len,
                artifact.idf.len(),
                artifact.weights.len()
            )));
        }

        // Vocabulary indices must form a permutation of 0..len; anything
        // else would index out of bounds at transform time.
        let mut seen = vec![false; vocab_len];
        for (term, &index) in &artifact.vocabulary {
            if index >= vocab_len {
                return Err(VeritasError::serialization(format!(
                    "vocabulary index {index} for term {term:?} is out of range 0..{vocab_len}"
                )));
            }
            if seen[index] {
                return Err(VeritasError::serialization(format!(
                    "duplicate vocabulary index {index} for term {term:?}"
                )));
            }
            seen[index] = true;
        }

        let snapshot = TrainedModel {
            vectorizer: TfIdfVectorizer::from_parts(artifact.vocabulary, artifact.idf),
            classifier: LogisticRegression::from_parts(artifact.weights, artifact.bias),
            threshold: artifact.threshold,
            accuracy: None,
        };
        *self.state.write() = Some(Arc::new(snapshot));
        Ok(())
    }

    /// Score one statement.
    ///
    /// # Errors
    ///
    /// Returns `InputValidation` on empty text regardless of trained
    /// state, `ModelNotTrained` when no snapshot is installed.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Err(VeritasError::input_validation(
                "text must be a non-empty string",
            ));
        }

        let snapshot = self.snapshot().ok_or_else(|| {
            VeritasError::not_trained("train or load a model before predicting")
        })?;

        let tokens = self.tokenizer.tokenize(text)?;
        let features = snapshot.vectorizer.transform(&tokens);
        let probability = snapshot.classifier.predict_proba(&features);

        let label = if probability >= snapshot.threshold {
            Label::Fake
        } else {
            Label::Real
        };
        let confidence = Confidence::from_probability(
            probability,
            self.config.high_margin,
            self.config.medium_margin,
        );

        Ok(Prediction {
            label,
            probability,
            confidence,
        })
    }

    /// Score many statements independently, preserving input order.
    ///
    /// One failing item does not abort the batch; each item carries its
    /// own outcome. Items are scored in parallel against the same
    /// snapshot.
    pub fn batch_predict<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Result<Prediction>> {
        texts
            .par_iter()
            .map(|text| self.predict(text.as_ref()))
            .collect()
    }

    /// Whether the detector currently holds a complete trained snapshot.
    pub fn is_trained(&self) -> bool {
        self.state.read().is_some()
    }

    /// Summarize the detector's current state.
    pub fn stats(&self) -> DetectorStats {
        match self.snapshot() {
            Some(snapshot) => DetectorStats {
                trained: true,
                vocabulary_size: snapshot.vectorizer.vocabulary_size(),
                accuracy: snapshot.accuracy,
            },
            None => DetectorStats {
                trained: false,
                vocabulary_size: 0,
                accuracy: None,
            },
        }
    }

    /// Clone the current snapshot handle, releasing the lock immediately.
    fn snapshot(&self) -> Option<Arc<TrainedModel>> {
        self.state.read().clone()
    }
}
