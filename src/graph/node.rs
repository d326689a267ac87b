use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;

/// Scalar computational unit.
///
/// - `value` — accumulated pre-activation during propagation, replaced in
///             place by the activated value once the owning layer fires
/// - `bias`  — trainable offset; always 0 for input nodes
/// - `delta` — backward-pass error signal, overwritten on every backward pass
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub value: f64,
    pub bias: f64,
    pub delta: f64,
}

impl Node {
    pub fn new(bias: f64) -> Node {
        Node { value: 0.0, bias, delta: 0.0 }
    }

    pub fn add_bias(&mut self) {
        self.value += self.bias;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    pub fn activate(&mut self, activation: ActivationFunction) {
        self.value = activation.function(self.value);
    }

    /// Derivative of `activation` at the node's current (activated) value.
    pub fn derivative(&self, activation: ActivationFunction) -> f64 {
        activation.derivative(self.value)
    }
}
