use serde::{Deserialize, Serialize};
use std::fmt;

use crate::activation::activation::Activation;

/// Snapshot of an engine's shape, rendered by hosts as the "Net Stats" text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub inputs: usize,
    pub hidden_layers: usize,
    pub outputs: usize,
    /// Neuron count of every layer, input first.
    pub layer_sizes: Vec<usize>,
    pub parameters: usize,
    pub activation: Activation,
    pub learning_rate: f64,
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Net Stats:")?;
        writeln!(f, "  inputs:        {}", self.inputs)?;
        writeln!(f, "  hidden layers: {}", self.hidden_layers)?;
        writeln!(f, "  outputs:       {}", self.outputs)?;
        let sizes: Vec<String> = self.layer_sizes.iter().map(|s| s.to_string()).collect();
        writeln!(f, "  layer sizes:   {}", sizes.join(" -> "))?;
        writeln!(f, "  parameters:    {}", self.parameters)?;
        writeln!(f, "  activation:    {}", self.activation)?;
        write!(f, "  learning rate: {}", self.learning_rate)
    }
}
