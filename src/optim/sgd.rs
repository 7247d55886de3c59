use crate::{layers::layer::Layer, math::matrix::Matrix};

/// Plain single-sample gradient descent with one learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Scales the per-neuron error signal of `layer` into gradients:
    /// `f'(out) * cost * learning_rate`, one row per neuron.
    pub fn gradients<F>(&self, layer: &Layer, cost: &Matrix, derivative: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::column(
            layer.neurons.iter().enumerate()
                .map(|(i, n)| derivative(n.out_value) * cost.get(i, 0) * self.learning_rate)
                .collect(),
        )
    }

    /// Adds `gradients` to the biases of `layer` and the outer product of
    /// `gradients` with the outputs of `prev` to the weights linking them.
    pub fn step(&self, prev: &mut Layer, layer: &mut Layer, gradients: &Matrix) {
        for (i, neuron) in layer.neurons.iter_mut().enumerate() {
            neuron.bias += gradients.get(i, 0);
        }

        let deltas = gradients.clone() * Matrix::row(prev.outputs());
        for (i, row) in deltas.data.iter().enumerate() {
            for (j, delta) in row.iter().enumerate() {
                prev.neurons[j].weights_out[i] += delta;
            }
        }
    }
}
