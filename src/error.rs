//! Error types for network construction, inference, training and editing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetError>;

/// Broad class of a failure. None of them are transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A supplied vector or dataset has the wrong length.
    Dimension,
    /// The construction parameters are inconsistent.
    Configuration,
    /// A structural edit addressed something it may not touch.
    Structural,
}

#[derive(Error, Debug)]
pub enum NetError {
    #[error("network takes {expected} inputs, {actual} were supplied")]
    InputMismatch { expected: usize, actual: usize },

    #[error("network produces {expected} outputs, {actual} expected values were supplied")]
    OutputMismatch { expected: usize, actual: usize },

    #[error("{inputs} input samples but {labels} label samples")]
    DatasetMismatch { inputs: usize, labels: usize },

    #[error("training set is empty")]
    EmptyDataset,

    #[error("{hidden_layers} hidden layers declared but {widths} widths supplied")]
    HiddenLayerMismatch { hidden_layers: usize, widths: usize },

    #[error("{what} must hold at least one neuron")]
    ZeroWidth { what: &'static str },

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layer {index} does not exist, largest index of this network is {last}")]
    LayerOutOfRange { index: usize, last: usize },

    #[error("layer {layer} has {len} neurons, neuron {index} does not exist")]
    NeuronOutOfRange { layer: usize, index: usize, len: usize },

    #[error("neuron {neuron} of layer {layer} has {len} outbound weights, slot {slot} does not exist")]
    SlotOutOfRange { layer: usize, neuron: usize, slot: usize, len: usize },

    #[error("layer {layer} has a single neuron; remove the layer instead")]
    LastNeuron { layer: usize },

    #[error("layer index {index} is outside {min}..={max}; the input and output layers cannot be added or removed")]
    FixedLayer { index: usize, min: usize, max: usize },

    #[error("a new layer must hold at least one neuron")]
    EmptyLayer,

    #[error("layer {layer} links to {actual} neurons but the next layer holds {expected}")]
    LinkMismatch { layer: usize, expected: usize, actual: usize },

    #[error("layer {layer} links to {links} neurons but the edit leaves {width} after it; back-adjustment is required")]
    BackAdjustRequired { layer: usize, links: usize, width: usize },
}

impl NetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetError::InputMismatch { .. }
            | NetError::OutputMismatch { .. }
            | NetError::DatasetMismatch { .. }
            | NetError::EmptyDataset => ErrorKind::Dimension,
            NetError::HiddenLayerMismatch { .. }
            | NetError::ZeroWidth { .. }
            | NetError::InvalidLearningRate(_)
            | NetError::Io(_)
            | NetError::Json(_) => ErrorKind::Configuration,
            NetError::LayerOutOfRange { .. }
            | NetError::NeuronOutOfRange { .. }
            | NetError::SlotOutOfRange { .. }
            | NetError::LastNeuron { .. }
            | NetError::FixedLayer { .. }
            | NetError::EmptyLayer
            | NetError::LinkMismatch { .. }
            | NetError::BackAdjustRequired { .. } => ErrorKind::Structural,
        }
    }
}
