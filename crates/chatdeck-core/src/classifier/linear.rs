use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Classifier;
use crate::constants::classifier::{NUM_CLASSES, NUM_FEATURES};
use crate::error::{DeckError, Result};

/// Multinomial linear classifier: the predicted class is
/// `argmax(coef[k] · x + intercept[k])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
}

impl LinearModel {
    pub fn new(coef: Vec<Vec<f32>>, intercept: Vec<f32>) -> Result<Self> {
        let model = Self { coef, intercept };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), "loaded classifier");
        Ok(model)
    }

    /// Per-class scores for `features`.
    pub fn scores(&self, features: &[f32; NUM_FEATURES]) -> Vec<f32> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.coef.len() != NUM_CLASSES || self.intercept.len() != NUM_CLASSES {
            return Err(DeckError::Classifier(format!(
                "expected {NUM_CLASSES} classes, got {} coefficient rows and {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != NUM_FEATURES) {
            return Err(DeckError::Classifier(format!(
                "expected {NUM_FEATURES} coefficients per class, got {}",
                row.len()
            )));
        }
        if self.coef.iter().flatten().chain(&self.intercept).any(|v| !v.is_finite()) {
            return Err(DeckError::Classifier("model contains non-finite weights".into()));
        }
        Ok(())
    }
}

impl Classifier for LinearModel {
    fn predict(&self, features: &[f32; NUM_FEATURES]) -> Result<usize> {
        self.scores(features)
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .ok_or_else(|| DeckError::Classifier("model has no classes".into()))
    }
}
