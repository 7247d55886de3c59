//! Structural edits on a live engine.
//!
//! Every operation validates its arguments before touching the network, so
//! a failed call leaves the topology and all weights exactly as they were.

use rand::Rng;
use tracing::debug;

use crate::{
    engine::engine::Engine,
    error::{NetError, Result},
    layers::layer::Layer,
};

impl<R: Rng> Engine<R> {
    /// Appends one neuron to `layer_index`.
    ///
    /// The new neuron links to every neuron of the next layer (none for the
    /// output layer). Below the input layer, each predecessor neuron gains a
    /// trailing weight slot for it.
    pub fn add_neuron(&mut self, layer_index: usize) -> Result<()> {
        let last = self.network.last_index();
        if layer_index > last {
            return Err(NetError::LayerOutOfRange { index: layer_index, last });
        }

        let out_degree = if layer_index == last {
            0
        } else {
            self.network.layer(layer_index + 1)?.len()
        };
        let neuron = self.init.neuron(out_degree);
        self.network.layer_mut(layer_index)?.push(neuron);

        if layer_index > 0 {
            self.network.layer_mut(layer_index - 1)?.grow_links(&mut self.init);
        }

        let width = self.network.layer(layer_index)?.len();
        debug!(layer = layer_index, width, "added neuron");
        debug_assert!(self.network.check_links().is_ok());
        Ok(())
    }

    /// Removes neuron `neuron_index` from `layer_index`, keeping the order of
    /// the others. The predecessor layer loses the matching weight slot.
    ///
    /// A layer never drops to zero neurons this way; use `remove_layer`.
    pub fn remove_neuron(&mut self, layer_index: usize, neuron_index: usize) -> Result<()> {
        let layer = self.network.layer(layer_index)?;
        let len = layer.len();
        if neuron_index >= len {
            return Err(NetError::NeuronOutOfRange { layer: layer_index, index: neuron_index, len });
        }
        if len == 1 {
            return Err(NetError::LastNeuron { layer: layer_index });
        }

        self.network.layer_mut(layer_index)?.remove(neuron_index);
        if layer_index > 0 {
            self.network.layer_mut(layer_index - 1)?.drop_link(neuron_index);
        }

        debug!(layer = layer_index, neuron = neuron_index, "removed neuron");
        debug_assert!(self.network.check_links().is_ok());
        Ok(())
    }

    /// Inserts a layer of `neuron_count` neurons at `layer_index`, which must
    /// lie in `1..=last` (the current output layer moves up by one).
    ///
    /// The new layer links to the layer previously at `layer_index`. With
    /// `back_adjust` the predecessor's weights are redrawn for the new width;
    /// without it the predecessor must already match `neuron_count`.
    pub fn add_layer(&mut self, layer_index: usize, neuron_count: usize, back_adjust: bool) -> Result<()> {
        let last = self.network.last_index();
        if layer_index < 1 || layer_index > last {
            return Err(NetError::FixedLayer { index: layer_index, min: 1, max: last });
        }
        if neuron_count == 0 {
            return Err(NetError::EmptyLayer);
        }

        let out_degree = self.network.layer(layer_index)?.len();
        self.network.check_insert(layer_index, neuron_count, out_degree, back_adjust)?;

        let layer = Layer::build(neuron_count, out_degree, &mut self.init);
        self.network.insert(layer, layer_index, back_adjust, &mut self.init)
    }

    /// Removes the hidden layer at `layer_index`, which must lie strictly
    /// between the input and output layers.
    pub fn remove_layer(&mut self, layer_index: usize, back_adjust: bool) -> Result<()> {
        self.network
            .remove_layer(layer_index, back_adjust, &mut self.init)
            .map(|_| ())
    }
}
