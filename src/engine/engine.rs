use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::{
    activation::activation::Activation,
    engine::{config::EngineConfig, traits::{Predictable, Trainable}},
    error::{NetError, Result},
    layers::{layer::Layer, neuron::Neuron},
    loss::squared_error::SquaredError,
    math::{init::WeightInit, matrix::Matrix},
    network::{network::Network, stats::NetworkStats},
    optim::sgd::Sgd,
};

/// Activation evaluated by `predict` and differentiated by `train`.
///
/// It does not follow the kind the engine was configured with; the
/// configured kind is only reported back through `activation()` and `stats()`.
pub const FORWARD_ACTIVATION: Activation = Activation::Sigmoid;

/// A feed-forward network whose topology can be edited while it is live.
///
/// The engine exclusively owns its `Network`. Neurons and weight slots created
/// after construction follow the same initialisation policy as the original
/// topology: random draws from the supplied generator, or zeros when none
/// was supplied.
#[derive(Debug)]
pub struct Engine<R = StdRng> {
    pub(crate) network: Network,
    pub(crate) activation: Activation,
    pub(crate) optimizer: Sgd,
    pub(crate) init: WeightInit<R>,
}

impl Engine<StdRng> {
    /// Every weight and bias starts at zero.
    pub fn zeroed(config: &EngineConfig) -> Result<Self> {
        Engine::new(config, None)
    }

    /// Weights and biases drawn from a `StdRng` seeded with `seed`.
    pub fn seeded(config: &EngineConfig, seed: u64) -> Result<Self> {
        Engine::new(config, Some(StdRng::seed_from_u64(seed)))
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(config: &EngineConfig, rng: Option<R>) -> Result<Self> {
        config.validate()?;

        let mut init = WeightInit::from_option(rng);
        let mut network = Network::new();

        match config.hidden_widths.as_slice() {
            [] => {
                // Input links straight to the output layer.
                network.append(Layer::build(config.inputs, config.outputs, &mut init));
            }
            widths => {
                network.append(Layer::build(config.inputs, widths[0], &mut init));
                for pair in widths.windows(2) {
                    network.append(Layer::build(pair[0], pair[1], &mut init));
                }
                network.append(Layer::build(widths[widths.len() - 1], config.outputs, &mut init));
            }
        }
        network.append(Layer::build(config.outputs, 0, &mut init));
        network.check_links()?;

        debug!(
            sizes = ?network.layer_sizes(),
            random = init.is_random(),
            activation = %config.activation,
            "built network"
        );

        Ok(Engine {
            network,
            activation: config.activation,
            optimizer: Sgd::new(config.learning_rate),
            init,
        })
    }

    /// Forward pass. Loads `inputs` into layer 0 unchanged, then computes
    /// every later neuron as `σ(bias + Σ prev.out_value * prev.weights_out[j])`.
    ///
    /// Each neuron caches its output in `out_value`, so this takes `&mut self`.
    pub fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let expected = self.number_of_inputs();
        if inputs.len() != expected {
            return Err(NetError::InputMismatch { expected, actual: inputs.len() });
        }

        for (neuron, &x) in self.network.layer_mut(0)?.neurons.iter_mut().zip(inputs) {
            neuron.out_value = x;
        }

        for l in 1..self.network.len() {
            let (prev, layer) = self.network.link_mut(l);
            for (j, neuron) in layer.neurons.iter_mut().enumerate() {
                neuron.out_value = neuron.bias;
                for p in &prev.neurons {
                    neuron.out_value += p.out_value * p.weights_out[j];
                }
                neuron.out_value = FORWARD_ACTIVATION.function(neuron.out_value);
            }
        }

        let last = self.network.last_index();
        Ok(self.network.layer(last)?.outputs())
    }

    /// One step of single-sample gradient descent towards `expected`.
    ///
    /// Returns `Σ(expected - actual)²` of the forward pass taken before the
    /// update.
    pub fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64> {
        let outputs = self.number_of_outputs();
        if expected.len() != outputs {
            return Err(NetError::OutputMismatch { expected: outputs, actual: expected.len() });
        }
        let actual = self.predict(inputs)?;
        let error = SquaredError::total(&actual, expected);

        let mut cost = Matrix::column(SquaredError::cost(&actual, expected));
        for l in (1..self.network.len()).rev() {
            let (prev, layer) = self.network.link_mut(l);

            // Propagate through the weights as they were before this update.
            let next_cost = prev.weights().transpose() * cost.clone();
            let gradients = self.optimizer.gradients(layer, &cost, |y| {
                FORWARD_ACTIVATION.derivative_from_output(y)
            });
            self.optimizer.step(prev, layer, &gradients);

            cost = next_cost;
        }

        trace!(error, "training step");
        Ok(error)
    }

    pub fn number_of_inputs(&self) -> usize {
        self.network.layers().first().map_or(0, Layer::len)
    }

    pub fn number_of_outputs(&self) -> usize {
        self.network.layers().last().map_or(0, Layer::len)
    }

    pub fn number_of_hidden_layers(&self) -> usize {
        self.network.len().saturating_sub(2)
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.network.layer_sizes()
    }

    /// The configured kind; see `FORWARD_ACTIVATION` for what is evaluated.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn neuron(&self, layer: usize, index: usize) -> Option<&Neuron> {
        self.network.layers().get(layer)?.neurons.get(index)
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            inputs: self.number_of_inputs(),
            hidden_layers: self.number_of_hidden_layers(),
            outputs: self.number_of_outputs(),
            layer_sizes: self.layer_sizes(),
            parameters: self.network.parameter_count(),
            activation: self.activation,
            learning_rate: self.learning_rate(),
        }
    }

    /// Overwrites one outbound weight. Cannot change any vector's length.
    pub fn set_weight(&mut self, layer: usize, neuron: usize, slot: usize, value: f64) -> Result<()> {
        let target = self.neuron_mut(layer, neuron)?;
        let len = target.weights_out.len();
        match target.weights_out.get_mut(slot) {
            Some(w) => {
                *w = value;
                Ok(())
            }
            None => Err(NetError::SlotOutOfRange { layer, neuron, slot, len }),
        }
    }

    pub fn set_bias(&mut self, layer: usize, neuron: usize, value: f64) -> Result<()> {
        self.neuron_mut(layer, neuron)?.bias = value;
        Ok(())
    }

    pub(crate) fn neuron_mut(&mut self, layer: usize, index: usize) -> Result<&mut Neuron> {
        let target = self.network.layer_mut(layer)?;
        let len = target.len();
        target
            .neurons
            .get_mut(index)
            .ok_or(NetError::NeuronOutOfRange { layer, index, len })
    }
}

impl<R: Rng> Predictable for Engine<R> {
    fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        Engine::predict(self, inputs)
    }

    fn number_of_inputs(&self) -> usize {
        Engine::number_of_inputs(self)
    }

    fn number_of_outputs(&self) -> usize {
        Engine::number_of_outputs(self)
    }
}

impl<R: Rng> Trainable for Engine<R> {
    fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64> {
        Engine::train(self, inputs, expected)
    }

    fn learning_rate(&self) -> f64 {
        Engine::learning_rate(self)
    }
}
