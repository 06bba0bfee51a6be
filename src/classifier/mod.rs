//! Logistic regression over sparse TF-IDF features.
//!
//! Binary classifier trained with full-batch gradient descent on
//! L2-regularized cross-entropy loss. Weights are zero-initialized, so a
//! fit is reproducible given the seeded train/test split; the only
//! randomness in training is the split itself.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritasError};
use crate::vectorizer::SparseVector;

/// Training hyperparameters for [`LogisticRegression`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Number of full passes over the training portion.
    pub epochs: usize,
    /// L2 regularization strength applied to the weight gradient.
    pub l2: f64,
    /// Fraction of the corpus held out for evaluation.
    pub test_split: f64,
    /// Seed for the train/test shuffle.
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 0.1,
            epochs: 300,
            l2: 1e-3,
            test_split: 0.2,
            seed: 42,
        }
    }
}

/// Logistic regression classifier: a weight vector and a bias scalar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Model weights, index-aligned with the vocabulary.
    weights: Vec<f64>,
    /// Intercept term.
    bias: f64,
}

impl LogisticRegression {
    /// Create an untrained classifier for the given feature dimension.
    ///
    /// Weights start at zero for reproducibility.
    pub fn new(dim: usize) -> Self {
        LogisticRegression {
            weights: vec![0.0; dim],
            bias: 0.0,
        }
    }

    /// Reconstruct a trained classifier from persisted parts.
    pub fn from_parts(weights: Vec<f64>, bias: f64) -> Self {
        LogisticRegression { weights, bias }
    }

    /// Sigmoid activation: σ(z) = 1 / (1 + e^(-z)).
    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Probability of the positive (fake) class for one feature vector.
    pub fn predict_proba(&self, features: &SparseVector) -> f64 {
        Self::sigmoid(features.dot(&self.weights) + self.bias)
    }

    /// Fit the model and return accuracy on a seeded held-out split.
    ///
    /// The corpus is shuffled with `config.seed` and partitioned into
    /// train/held-out portions (`config.test_split`, at least one held-out
    /// example). Per epoch, one full-batch gradient step:
    /// `grad_w = avg((p_i − y_i)·x_i) + λ·w`, `grad_b = avg(p_i − y_i)`.
    /// Accuracy is the fraction of held-out examples classified correctly
    /// at threshold 0.5, a probability of exactly 0.5 counting as label 1.
    ///
    /// # Errors
    ///
    /// Returns a `Data` error when the corpus is empty, has fewer than two
    /// examples, carries a label other than 0/1, or contains a single
    /// distinct label.
    pub fn fit(
        &mut self,
        features: &[SparseVector],
        labels: &[u8],
        config: &TrainConfig,
    ) -> Result<f64> {
        let n = features.len();
        if n != labels.len() {
            return Err(VeritasError::data(format!(
                "feature/label length mismatch: {} vs {}",
                n,
                labels.len()
            )));
        }
        if n < 2 {
            return Err(VeritasError::data(
                "training corpus must contain at least two examples",
            ));
        }
        if let Some(bad) = labels.iter().find(|&&y| y > 1) {
            return Err(VeritasError::data(format!(
                "labels must be 0 or 1, found {bad}"
            )));
        }
        if labels.iter().all(|&y| y == labels[0]) {
            return Err(VeritasError::data(
                "training corpus contains a single label class",
            ));
        }

        // Seeded shuffle, then hold out the tail for evaluation.
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(config.seed);
        indices.shuffle(&mut rng);

        let test_len = ((n as f64 * config.test_split).round() as usize)
            .clamp(1, n - 1);
        let (train_idx, test_idx) = indices.split_at(n - test_len);

        debug!(
            "training on {} examples, evaluating on {}",
            train_idx.len(),
            test_idx.len()
        );

        let train_n = train_idx.len() as f64;
        for _ in 0..config.epochs {
            let mut grad_w = vec![0.0; self.weights.len()];
            let mut grad_b = 0.0;

            for &i in train_idx {
                let error = self.predict_proba(&features[i]) - f64::from(labels[i]);
                for &(j, v) in features[i].entries() {
                    grad_w[j] += error * v;
                }
                grad_b += error;
            }

            for (w, g) in self.weights.iter_mut().zip(&grad_w) {
                *w -= config.learning_rate * (g / train_n + config.l2 * *w);
            }
            self.bias -= config.learning_rate * (grad_b / train_n);
        }

        let correct = test_idx
            .iter()
            .filter(|&&i| self.predict_label(&features[i]) == labels[i])
            .count();
        let accuracy = correct as f64 / test_idx.len() as f64;

        info!(
            "fit complete: {} weights, held-out accuracy {:.4}",
            self.weights.len(),
            accuracy
        );

        Ok(accuracy)
    }

    /// Hard label at the 0.5 threshold; a tie counts as label 1.
    fn predict_label(&self, features: &SparseVector) -> u8 {
        u8::from(self.predict_proba(features) >= 0.5)
    }

    /// The fitted weight vector.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The fitted bias term.
    pub fn bias(&self) -> f64 {
        self.bias
    }
}
