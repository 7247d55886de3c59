use rand::Rng;
use tracing::debug;

use crate::{
    error::{NetError, Result},
    layers::layer::Layer,
    math::init::WeightInit,
};

/// Ordered layers, input first and output last.
///
/// Every layer except the last links each of its neurons to every neuron of
/// the following layer; `check_links` verifies that after each edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    pub fn new() -> Network {
        Network { layers: Vec::new() }
    }

    pub fn append(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the output layer.
    pub fn last_index(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Result<&Layer> {
        let last = self.last_index();
        self.layers
            .get(index)
            .ok_or(NetError::LayerOutOfRange { index, last })
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer> {
        let last = self.last_index();
        self.layers
            .get_mut(index)
            .ok_or(NetError::LayerOutOfRange { index, last })
    }

    /// Layer `index` together with its predecessor, both mutable.
    pub(crate) fn link_mut(&mut self, index: usize) -> (&mut Layer, &mut Layer) {
        let (before, after) = self.layers.split_at_mut(index);
        (&mut before[index - 1], &mut after[0])
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    /// Weights plus biases of every non-input neuron.
    pub fn parameter_count(&self) -> usize {
        let weights: usize = self
            .layers
            .iter()
            .flat_map(|l| l.neurons.iter())
            .map(|n| n.out_degree())
            .sum();
        let biases: usize = self.layers.iter().skip(1).map(Layer::len).sum();
        weights + biases
    }

    /// Checks the dimension invariant over the whole network.
    pub fn check_links(&self) -> Result<()> {
        for (index, pair) in self.layers.windows(2).enumerate() {
            let expected = pair[1].len();
            for neuron in &pair[0].neurons {
                if neuron.out_degree() != expected {
                    return Err(NetError::LinkMismatch {
                        layer: index,
                        expected,
                        actual: neuron.out_degree(),
                    });
                }
            }
        }
        if let Some(output) = self.layers.last() {
            if let Some(neuron) = output.neurons.iter().find(|n| n.out_degree() != 0) {
                return Err(NetError::LinkMismatch {
                    layer: self.last_index(),
                    expected: 0,
                    actual: neuron.out_degree(),
                });
            }
        }
        Ok(())
    }

    /// Validates an `insert` of a `width`-neuron layer whose neurons carry
    /// `out_degree` weights, without touching the network.
    pub fn check_insert(&self, at: usize, width: usize, out_degree: usize, back_adjust: bool) -> Result<()> {
        let last = self.last_index();
        if at < 1 || at > last {
            return Err(NetError::FixedLayer { index: at, min: 1, max: last });
        }
        if width == 0 {
            return Err(NetError::EmptyLayer);
        }
        let successor = self.layers[at].len();
        if out_degree != successor {
            return Err(NetError::LinkMismatch { layer: at, expected: successor, actual: out_degree });
        }
        if !back_adjust {
            let links = self.layers[at - 1].out_degree().unwrap_or(0);
            if links != width {
                return Err(NetError::BackAdjustRequired { layer: at - 1, links, width });
            }
        }
        Ok(())
    }

    /// Inserts `layer` at position `at`, shifting later layers up by one.
    ///
    /// With `back_adjust` the predecessor's weight vectors are replaced by
    /// fresh ones drawn from `init`, sized to the new layer (resized, not
    /// preserved). Without it the predecessor must already be sized for the
    /// new layer and keeps its weights.
    pub fn insert<R: Rng>(
        &mut self,
        layer: Layer,
        at: usize,
        back_adjust: bool,
        init: &mut WeightInit<R>,
    ) -> Result<()> {
        let out_degree = match layer.out_degree() {
            Some(d) => d,
            None => return Err(NetError::LinkMismatch {
                layer: at,
                expected: self.layers.get(at).map_or(0, Layer::len),
                actual: layer.neurons.iter().map(|n| n.out_degree()).max().unwrap_or(0),
            }),
        };
        self.check_insert(at, layer.len(), out_degree, back_adjust)?;

        let width = layer.len();
        self.layers.insert(at, layer);
        if back_adjust {
            self.layers[at - 1].relink(width, init);
        }
        debug!(at, width, back_adjust, "inserted layer");
        debug_assert!(self.check_links().is_ok());
        Ok(())
    }

    /// Validates a `remove_layer` without touching the network.
    pub fn check_remove(&self, at: usize, back_adjust: bool) -> Result<()> {
        let last = self.last_index();
        if at < 1 || at >= last {
            return Err(NetError::FixedLayer {
                index: at,
                min: 1,
                max: last.saturating_sub(1),
            });
        }
        if !back_adjust {
            let links = self.layers[at].len();
            let width = self.layers[at + 1].len();
            if links != width {
                return Err(NetError::BackAdjustRequired { layer: at - 1, links, width });
            }
        }
        Ok(())
    }

    /// Removes the hidden layer at `at`.
    ///
    /// With `back_adjust` the predecessor is relinked with fresh weights to
    /// the new successor. Without it the removed layer must be as wide as its
    /// successor, and the predecessor's weights are kept as they are.
    pub fn remove_layer<R: Rng>(
        &mut self,
        at: usize,
        back_adjust: bool,
        init: &mut WeightInit<R>,
    ) -> Result<Layer> {
        self.check_remove(at, back_adjust)?;

        let removed = self.layers.remove(at);
        if back_adjust {
            let width = self.layers[at].len();
            self.layers[at - 1].relink(width, init);
        }
        debug!(at, width = removed.len(), back_adjust, "removed layer");
        debug_assert!(self.check_links().is_ok());
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn zeros() -> WeightInit<StdRng> {
        WeightInit::zeros()
    }

    /// 2 -> 3 -> 1 with every weight set to 1.0.
    fn small() -> Network {
        let mut init = zeros();
        let mut net = Network::new();
        net.append(Layer::build(2, 3, &mut init));
        net.append(Layer::build(3, 1, &mut init));
        net.append(Layer::build(1, 0, &mut init));
        for layer in &mut net.layers {
            for n in &mut layer.neurons {
                n.weights_out.iter_mut().for_each(|w| *w = 1.0);
            }
        }
        net
    }

    #[test]
    fn sizes_and_parameters() {
        let net = small();
        assert_eq!(net.layer_sizes(), vec![2, 3, 1]);
        assert_eq!(net.last_index(), 2);
        // 6 + 3 weights, 3 + 1 biases
        assert_eq!(net.parameter_count(), 13);
        assert!(net.check_links().is_ok());
    }

    #[test]
    fn insert_with_back_adjust_relinks_predecessor() {
        let mut net = small();
        let layer = Layer::build(4, 3, &mut zeros());
        net.insert(layer, 1, true, &mut zeros()).unwrap();
        assert_eq!(net.layer_sizes(), vec![2, 4, 3, 1]);
        assert_eq!(net.layers[0].out_degree(), Some(4));
        assert!(net.layers[0].neurons[0].weights_out.iter().all(|&w| w == 0.0));
        assert!(net.check_links().is_ok());
    }

    #[test]
    fn insert_without_back_adjust_needs_matching_width() {
        let mut net = small();
        let err = net
            .insert(Layer::build(4, 3, &mut zeros()), 1, false, &mut zeros())
            .unwrap_err();
        assert!(matches!(err, NetError::BackAdjustRequired { layer: 0, links: 3, width: 4 }));
        assert_eq!(net, small());

        net.insert(Layer::build(3, 3, &mut zeros()), 1, false, &mut zeros()).unwrap();
        assert_eq!(net.layers[0].neurons[1].weights_out, vec![1.0; 3]);
        assert!(net.check_links().is_ok());
    }

    #[test]
    fn insert_bounds() {
        let mut net = small();
        for at in [0, 3, 7] {
            let err = net
                .insert(Layer::build(2, 3, &mut zeros()), at, true, &mut zeros())
                .unwrap_err();
            assert!(matches!(err, NetError::FixedLayer { .. }), "at {at}: {err}");
        }
        let err = net
            .insert(Layer::build(2, 5, &mut zeros()), 1, true, &mut zeros())
            .unwrap_err();
        assert!(matches!(err, NetError::LinkMismatch { .. }));
        assert_eq!(net, small());
    }

    #[test]
    fn insert_before_output() {
        let mut net = small();
        net.insert(Layer::build(2, 1, &mut zeros()), 2, true, &mut zeros()).unwrap();
        assert_eq!(net.layer_sizes(), vec![2, 3, 2, 1]);
        assert_eq!(net.layers[1].out_degree(), Some(2));
    }

    #[test]
    fn remove_layer_relinks_to_successor() {
        let mut net = small();
        let removed = net.remove_layer(1, true, &mut zeros()).unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(net.layer_sizes(), vec![2, 1]);
        assert_eq!(net.layers[0].out_degree(), Some(1));
        assert!(net.check_links().is_ok());
    }

    #[test]
    fn remove_layer_refuses_input_and_output() {
        let mut net = small();
        for at in [0, 2, 5] {
            assert!(matches!(
                net.remove_layer(at, true, &mut zeros()),
                Err(NetError::FixedLayer { .. })
            ));
        }
        assert!(matches!(
            net.remove_layer(1, false, &mut zeros()),
            Err(NetError::BackAdjustRequired { .. })
        ));
        assert_eq!(net, small());
    }

    #[test]
    fn check_links_reports_first_broken_layer() {
        let mut net = small();
        net.layers[1].neurons[2].weights_out.push(0.5);
        assert!(matches!(
            net.check_links(),
            Err(NetError::LinkMismatch { layer: 1, expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn layer_lookup_out_of_range() {
        let net = small();
        assert!(matches!(net.layer(3), Err(NetError::LayerOutOfRange { index: 3, last: 2 })));
    }
}
