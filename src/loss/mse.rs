/// Squared-error measurements used to monitor training. The update rule
/// itself works on the raw error `target - output`.
pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let n = predicted.len() as f64;
        MseLoss::sum_squared(predicted, expected) / n
    }

    /// Σ (predicted - expected)²
    pub fn sum_squared(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_of_identical_vectors_is_zero() {
        assert_eq!(MseLoss::loss(&[0.2, 0.8], &[0.2, 0.8]), 0.0);
    }

    #[test]
    fn mse_averages_over_outputs() {
        assert_eq!(MseLoss::sum_squared(&[1.0, 0.0], &[0.0, 0.0]), 1.0);
        assert_eq!(MseLoss::loss(&[1.0, 0.0], &[0.0, 0.0]), 0.5);
        assert_eq!(MseLoss::loss(&[], &[]), 0.0);
    }
}
