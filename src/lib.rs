pub mod error;
pub mod activation;
pub mod graph;
pub mod layers;
pub mod network;
pub mod loss;
pub mod diagnostics;
pub mod normalize;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result};
pub use activation::activation::ActivationFunction;
pub use graph::{Edge, Node};
pub use layers::layer::{Layer, LayerKind};
pub use network::{Network, NetworkSpec};
pub use loss::bce::BceLoss;
pub use diagnostics::{DeltaLog, DeltaSnapshot};
pub use normalize::{Normalizer, MaxScaleNormalizer, ScriptNormalizer};
pub use train::{train_loop, evaluate, Evaluation, EpochStats, TrainConfig};
