pub struct SquaredError;

impl SquaredError {
    /// Cost vector driving backpropagation: expected - actual.
    pub fn cost(actual: &[f64], expected: &[f64]) -> Vec<f64> {
        actual.iter().zip(expected.iter())
            .map(|(a, e)| e - a)
            .collect()
    }

    /// Σ(expected - actual)²
    pub fn total(actual: &[f64], expected: &[f64]) -> f64 {
        actual.iter().zip(expected.iter())
            .map(|(a, e)| (e - a).powi(2))
            .sum()
    }

    /// Mean over outputs; 0.0 for empty vectors.
    pub fn mean(actual: &[f64], expected: &[f64]) -> f64 {
        if actual.is_empty() {
            return 0.0;
        }
        Self::total(actual, expected) / actual.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_points_from_actual_to_expected() {
        assert_eq!(SquaredError::cost(&[0.25, 1.0], &[1.0, 0.5]), vec![0.75, -0.5]);
    }

    #[test]
    fn total_and_mean() {
        assert_eq!(SquaredError::total(&[0.0, 1.0], &[1.0, 3.0]), 5.0);
        assert_eq!(SquaredError::mean(&[0.0, 1.0], &[1.0, 3.0]), 2.5);
        assert_eq!(SquaredError::mean(&[], &[]), 0.0);
    }
}
