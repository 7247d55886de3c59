use rand::Rng;

use crate::{layers::neuron::Neuron, math::{init::WeightInit, matrix::Matrix}};

/// Neurons at one depth. Position matters: neuron `j` of the next layer is
/// reached through slot `j` of every `weights_out` vector here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    pub fn build<R: Rng>(width: usize, out_degree: usize, init: &mut WeightInit<R>) -> Layer {
        Layer {
            neurons: (0..width).map(|_| init.neuron(out_degree)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Out-degree shared by the neurons of this layer, `None` when they disagree.
    pub fn out_degree(&self) -> Option<usize> {
        let first = self.neurons.first().map_or(0, Neuron::out_degree);
        self.neurons
            .iter()
            .all(|n| n.out_degree() == first)
            .then_some(first)
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.out_value).collect()
    }

    /// Weights into the next layer as a `next_width × width` matrix:
    /// entry `(j, i)` is `neurons[i].weights_out[j]`.
    pub fn weights(&self) -> Matrix {
        let next_width = self.out_degree().unwrap_or(0);
        let mut res = Matrix::zeros(next_width, self.len());
        for (i, neuron) in self.neurons.iter().enumerate() {
            for (j, &w) in neuron.weights_out.iter().enumerate() {
                res.data[j][i] = w;
            }
        }
        res
    }

    pub fn push(&mut self, neuron: Neuron) {
        self.neurons.push(neuron);
    }

    /// Removes the neuron at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Neuron {
        self.neurons.remove(index)
    }

    /// Replaces every weight vector with `width` fresh values.
    pub fn relink<R: Rng>(&mut self, width: usize, init: &mut WeightInit<R>) {
        for neuron in &mut self.neurons {
            neuron.weights_out = init.samples(width);
        }
    }

    /// Appends one slot to every weight vector, keeping existing weights.
    pub fn grow_links<R: Rng>(&mut self, init: &mut WeightInit<R>) {
        for neuron in &mut self.neurons {
            let w = init.sample();
            neuron.weights_out.push(w);
        }
    }

    /// Drops `slot` from every weight vector; later slots shift left.
    pub fn drop_link(&mut self, slot: usize) {
        for neuron in &mut self.neurons {
            neuron.weights_out.remove(slot);
        }
    }
}
