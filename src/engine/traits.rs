use crate::error::Result;

/// Anything that maps an input vector to an output vector.
pub trait Predictable {
    fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>>;

    fn number_of_inputs(&self) -> usize;

    fn number_of_outputs(&self) -> usize;
}

/// A `Predictable` that can take one supervised training step.
pub trait Trainable: Predictable {
    /// Returns the squared error observed before the update.
    fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64>;

    fn learning_rate(&self) -> f64;
}
