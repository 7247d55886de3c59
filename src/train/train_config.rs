use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — number of in-order passes over the training data
/// - `progress_tx` — optional channel; one `EpochStats` per completed epoch.
///                   A dropped receiver ends the loop.
/// - `stop_flag`   — optional flag a host sets (e.g. from a "Stop" button) to
///                   end the loop after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// A `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}
