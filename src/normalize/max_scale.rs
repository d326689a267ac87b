use crate::error::{NnError, Result};
use crate::normalize::Normalizer;

/// Scales each feature into [0, 1] by dividing by a fixed per-feature maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxScaleNormalizer {
    max_values: Vec<f64>,
}

impl MaxScaleNormalizer {
    pub fn new(max_values: Vec<f64>) -> Result<MaxScaleNormalizer> {
        if let Some(bad) = max_values.iter().find(|m| !m.is_finite() || **m <= 0.0) {
            return Err(NnError::InvalidArgument(format!(
                "feature maxima must be positive and finite, got {bad}"
            )));
        }
        Ok(MaxScaleNormalizer { max_values })
    }

    pub fn feature_count(&self) -> usize {
        self.max_values.len()
    }
}

impl Normalizer for MaxScaleNormalizer {
    fn normalize(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.max_values.len() {
            return Err(NnError::SizeMismatch {
                what: "feature vector",
                got: features.len(),
                expected: self.max_values.len(),
            });
        }
        Ok(features
            .iter()
            .zip(&self.max_values)
            .map(|(x, max)| (x / max).clamp(0.0, 1.0))
            .collect())
    }
}
