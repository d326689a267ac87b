use serde::{Serialize, Deserialize};

/// One per-sample observation recorded while delta tracking is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaSnapshot {
    pub epoch: usize,
    /// Position of the sample within its epoch.
    pub sample: usize,
    pub loss: f64,
    pub input_deltas: Vec<f64>,
    /// One entry per hidden layer, nearest the input first.
    pub hidden_deltas: Vec<Vec<f64>>,
    pub output_deltas: Vec<f64>,
    /// Weight of the first edge leaving the input layer.
    pub input_weight: f64,
    /// Weight of the first edge leaving the first hidden layer, if there is one.
    pub hidden_weight: Option<f64>,
}
