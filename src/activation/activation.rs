use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Activation kinds an engine can be configured with.
///
/// The forward pass and the training step currently evaluate `Sigmoid`
/// whatever kind is configured (see `engine::FORWARD_ACTIVATION`); the
/// configured kind is kept for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    Identity,
}

impl Activation {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            Activation::Tanh => x.tanh(),
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::Identity => x,
        }
    }

    /// Derivative with respect to the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activation::Identity => 1.0,
        }
    }

    /// Derivative expressed through an already activated value `y = f(x)`.
    ///
    /// Neurons only cache their activated output, so backpropagation uses
    /// this form: for `Sigmoid`, `σ'(x) = y (1 - y)`.
    pub fn derivative_from_output(&self, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Tanh => 1.0 - y * y,
            Activation::ReLU => if y > 0.0 { 1.0 } else { 0.0 },
            Activation::Identity => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::ReLU => "relu",
            Activation::Identity => "identity",
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Activation; 4] = [
        Activation::Sigmoid,
        Activation::Tanh,
        Activation::ReLU,
        Activation::Identity,
    ];

    #[test]
    fn sigmoid_known_values() {
        let s = Activation::Sigmoid;
        assert!((s.function(0.0) - 0.5).abs() < 1e-12);
        assert!((s.function(2.0) - 0.880_797_077_977_882_3).abs() < 1e-12);
        assert!((s.derivative(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn output_form_matches_input_form() {
        for act in ALL {
            for &x in &[-2.0, -0.3, 0.7, 1.5] {
                let y = act.function(x);
                let lhs = act.derivative(x);
                let rhs = act.derivative_from_output(y);
                assert!((lhs - rhs).abs() < 1e-12, "{act} at {x}: {lhs} vs {rhs}");
            }
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for act in [Activation::Sigmoid, Activation::Tanh, Activation::Identity] {
            for &x in &[-1.2, 0.1, 0.9] {
                let numeric = (act.function(x + h) - act.function(x - h)) / (2.0 * h);
                assert!((numeric - act.derivative(x)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&Activation::ReLU).unwrap();
        assert_eq!(json, "\"relu\"");
        let back: Activation = serde_json::from_str("\"sigmoid\"").unwrap();
        assert_eq!(back, Activation::Sigmoid);
        assert_eq!(Activation::default(), Activation::Sigmoid);
    }
}
