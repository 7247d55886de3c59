pub mod config;
pub mod engine;
pub mod mutation;
pub mod traits;

pub use config::EngineConfig;
pub use engine::{Engine, FORWARD_ACTIVATION};
pub use traits::{Predictable, Trainable};
