use rand::Rng;

use crate::layers::neuron::Neuron;

/// Where new weights and biases come from.
///
/// An engine built without a generator zero-initialises everything, including
/// neurons and weight slots created later by structural edits. There is no
/// implicit fallback to `thread_rng`.
#[derive(Debug, Clone)]
pub struct WeightInit<R> {
    rng: Option<R>,
}

impl<R: Rng> WeightInit<R> {
    pub fn zeros() -> Self {
        WeightInit { rng: None }
    }

    pub fn random(rng: R) -> Self {
        WeightInit { rng: Some(rng) }
    }

    pub fn from_option(rng: Option<R>) -> Self {
        WeightInit { rng }
    }

    pub fn is_random(&self) -> bool {
        self.rng.is_some()
    }

    /// One value: uniform on `[-1, 1)` when random, `0.0` otherwise.
    pub fn sample(&mut self) -> f64 {
        match self.rng.as_mut() {
            Some(rng) => rng.gen::<f64>() * 2.0 - 1.0,
            None => 0.0,
        }
    }

    pub fn samples(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample()).collect()
    }

    pub fn neuron(&mut self, out_degree: usize) -> Neuron {
        match self.rng.as_mut() {
            Some(rng) => Neuron::with_rng(out_degree, rng),
            None => Neuron::new(out_degree),
        }
    }
}
