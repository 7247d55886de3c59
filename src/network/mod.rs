pub mod network;
pub mod stats;

pub use network::Network;
pub use stats::NetworkStats;
