use rand::Rng;

/// A single unit: bias, cached output and one outbound weight per neuron of
/// the following layer (none for the output layer).
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    /// Output of the last forward pass; the raw input for layer 0.
    pub out_value: f64,
    pub bias: f64,
    pub weights_out: Vec<f64>,
}

impl Neuron {
    pub fn new(out_degree: usize) -> Neuron {
        Neuron {
            out_value: 0.0,
            bias: 0.0,
            weights_out: vec![0.0; out_degree],
        }
    }

    /// Draws every weight, then the bias, uniformly from `[-1, 1)`.
    pub fn with_rng<R: Rng + ?Sized>(out_degree: usize, rng: &mut R) -> Neuron {
        let weights_out = (0..out_degree)
            .map(|_| rng.gen::<f64>() * 2.0 - 1.0)
            .collect();
        let bias = rng.gen::<f64>() * 2.0 - 1.0;
        Neuron {
            out_value: 0.0,
            bias,
            weights_out,
        }
    }

    pub fn out_degree(&self) -> usize {
        self.weights_out.len()
    }
}
