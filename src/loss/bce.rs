/// Binary cross-entropy for sigmoid outputs.
pub struct BceLoss;

/// Predictions are clamped to [EPS, 1 - EPS] so a saturated sigmoid never
/// reaches log(0).
pub const EPS: f64 = 1e-15;

impl BceLoss {
    /// Scalar BCE: mean(-y·ln(p) - (1-y)·ln(1-p)) with p clamped.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| {
                let p = p.clamp(EPS, 1.0 - EPS);
                -y * p.ln() - (1.0 - y) * (1.0 - p).ln()
            })
            .sum::<f64>() / n
    }

    /// Gradient of BCE composed with the sigmoid w.r.t. the pre-activation:
    ///   ∂L/∂z_i = predicted[i] - expected[i]
    ///
    /// This is the output-layer delta; the sigmoid derivative is already folded
    /// in and must not be applied again.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| p - y)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn symmetric_under_complement() {
        for p in [0.25, 0.5, 0.875] {
            assert_relative_eq!(
                BceLoss::loss(&[p], &[1.0]),
                BceLoss::loss(&[1.0 - p], &[0.0]),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn saturated_predictions_stay_finite() {
        let wrong = BceLoss::loss(&[0.0, 1.0], &[1.0, 0.0]);
        assert!(wrong.is_finite());
        assert!(wrong > 30.0);

        let right = BceLoss::loss(&[1.0, 0.0], &[1.0, 0.0]);
        assert!(right.is_finite());
        assert!(right >= 0.0 && right < 1e-12);
    }

    #[test]
    fn loss_is_averaged_over_outputs() {
        let single = BceLoss::loss(&[0.5], &[1.0]);
        let double = BceLoss::loss(&[0.5, 0.5], &[1.0, 0.0]);
        assert_relative_eq!(single, std::f64::consts::LN_2, max_relative = 1e-12);
        assert_relative_eq!(double, std::f64::consts::LN_2, max_relative = 1e-12);
    }

    #[test]
    fn derivative_is_prediction_error() {
        assert_eq!(BceLoss::derivative(&[0.75, 0.25], &[1.0, 0.0]), vec![-0.25, 0.25]);
    }
}
