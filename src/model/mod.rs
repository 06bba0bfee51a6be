//! Persistence of trained classifier state.
//!
//! A trained model is saved as a single JSON artifact holding the
//! vocabulary, idf weights, classifier weights, bias, decision threshold,
//! and a format version tag. Saves go through a temporary file followed by
//! an atomic rename, so a crashed or concurrent write never leaves a
//! partially written artifact on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritasError};

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// The serialized form of a trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Term → vocabulary index mapping.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency, index-aligned with the vocabulary.
    pub idf: Vec<f64>,
    /// Classifier weights, index-aligned with the vocabulary.
    pub weights: Vec<f64>,
    /// Classifier bias term.
    pub bias: f64,
    /// Decision threshold used to map probability to label.
    pub threshold: f64,
    /// Artifact format version.
    pub format_version: u32,
}

/// File-backed store for a single model artifact.
#[derive(Debug, Clone)]
pub struct ModelStore {
    /// Location of the artifact on disk.
    path: PathBuf,
}

impl ModelStore {
    /// Create a store rooted at the given artifact path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ModelStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The artifact path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the artifact atomically: serialize to a sibling temp file,
    /// then rename into place.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        let json = serde_json::to_string(artifact)
            .map_err(|e| VeritasError::serialization(format!("Failed to encode model: {e}")))?;

        let mut tmp_path = self.path.clone();
        tmp_path.set_extension("tmp");

        fs::write(&tmp_path, json)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        info!("saved model artifact to {}", self.path.display());
        Ok(())
    }

    /// Read and validate the artifact.
    ///
    /// # Errors
    ///
    /// Returns `ModelFileNotFound` when the path does not exist,
    /// `Serialization` when the content cannot be decoded or carries an
    /// unsupported format version.
    pub fn load(&self) -> Result<ModelArtifact> {
        if !self.path.exists() {
            return Err(VeritasError::model_file_not_found(
                self.path.display().to_string(),
            ));
        }

        let json = fs::read_to_string(&self.path)?;
        let artifact: ModelArtifact = serde_json::from_str(&json)
            .map_err(|e| VeritasError::serialization(format!("Failed to decode model: {e}")))?;

        if artifact.format_version != FORMAT_VERSION {
            return Err(VeritasError::serialization(format!(
                "unsupported model format version {} (expected {})",
                artifact.format_version, FORMAT_VERSION
            )));
        }

        info!("loaded model artifact from {}", self.path.display());
        Ok(artifact)
    }
}
