pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod engine;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::{init::WeightInit, matrix::Matrix};
pub use activation::activation::Activation;
pub use layers::{layer::Layer, neuron::Neuron};
pub use network::{network::Network, stats::NetworkStats};
pub use loss::squared_error::SquaredError;
pub use optim::sgd::Sgd;
pub use engine::{config::EngineConfig, engine::Engine, traits::{Predictable, Trainable}};
pub use train::{train_loop, train_network, EpochStats, TrainConfig};
pub use error::{ErrorKind, NetError, Result};
