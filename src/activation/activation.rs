use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Slope of the hidden-layer leaky ReLU for non-positive inputs.
pub const LEAKY_SLOPE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    /// Pass-through used by input nodes.
    Identity,
    LeakyReLU { alpha: f64 },
    Sigmoid,
}

impl ActivationFunction {
    /// Element-wise activation of a pre-activation value.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::LeakyReLU { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
        }
    }

    /// Derivative expressed in terms of the **post-activation** value `y`.
    ///
    /// Nodes overwrite their value in place when activated, so the backward
    /// pass only ever sees `y = f(x)`. For leaky ReLU the sign of `y` equals
    /// the sign of `x`; for the sigmoid `f'(x) = y·(1 − y)`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::LeakyReLU { alpha } => {
                if y > 0.0 {
                    1.0
                } else {
                    *alpha
                }
            }
            ActivationFunction::Sigmoid => y * (1.0 - y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn leaky_relu_keeps_positive_and_scales_negative() {
        let f = ActivationFunction::LeakyReLU { alpha: LEAKY_SLOPE };
        assert_eq!(f.function(2.5), 2.5);
        assert_abs_diff_eq!(f.function(-3.0), -0.03, epsilon = 1e-12);
        assert_eq!(f.function(0.0), 0.0);
        assert_eq!(f.derivative(f.function(2.5)), 1.0);
        assert_eq!(f.derivative(f.function(-3.0)), LEAKY_SLOPE);
        assert_eq!(f.derivative(0.0), LEAKY_SLOPE);
    }

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        let f = ActivationFunction::Sigmoid;
        assert_abs_diff_eq!(f.function(0.0), 0.5, epsilon = 1e-12);
        assert!(f.function(40.0) <= 1.0);
        assert!(f.function(-40.0) >= 0.0);
        assert_abs_diff_eq!(f.derivative(0.5), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn identity_passes_through() {
        let f = ActivationFunction::Identity;
        assert_eq!(f.function(-7.25), -7.25);
        assert_eq!(f.derivative(123.0), 1.0);
    }
}
