use serde::{Serialize, Deserialize};

/// Statistics for one completed pass of `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent at the end of every epoch so a host can refresh its display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean squared error over the samples of this epoch.
    pub train_loss: f64,
    pub elapsed_ms: u64,
}
