/// Logistic function `1 / (1 + e^-x)`.
///
/// Branches on the sign of `x` so the exponent is never positive, which keeps
/// both tails finite: large negative inputs go to 0 instead of `inf / inf`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Sigmoid derivative expressed through the sigmoid's own output `a`:
/// `a * (1 - a)`.
pub fn sigmoid_prime_from_output(a: f64) -> f64 {
    a * (1.0 - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_of_zero_is_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for x in [0.1, 1.0, 3.5, 12.0] {
            assert_relative_eq!(sigmoid(-x), 1.0 - sigmoid(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn sigmoid_stays_finite_in_the_tails() {
        for x in [-1000.0, -745.0, -50.0, 50.0, 745.0, 1000.0] {
            let y = sigmoid(x);
            assert!(y.is_finite(), "sigmoid({x}) = {y}");
            assert!((0.0..=1.0).contains(&y));
        }
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }

    #[test]
    fn derivative_peaks_at_half() {
        assert_eq!(sigmoid_prime_from_output(0.5), 0.25);
        assert!(sigmoid_prime_from_output(0.9) < 0.25);
        assert_eq!(sigmoid_prime_from_output(1.0), 0.0);
    }
}
