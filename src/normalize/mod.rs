//! Feature normalization collaborators.
//!
//! The network only ever consumes finished vectors of normalized floats; how
//! they are produced is up to the [`Normalizer`] in use.

pub mod max_scale;
pub mod script;

pub use max_scale::MaxScaleNormalizer;
pub use script::ScriptNormalizer;

use crate::error::Result;

/// Maps raw feature values to the [0, 1] range the network is trained on.
pub trait Normalizer {
    fn normalize(&self, features: &[f64]) -> Result<Vec<f64>>;
}
