use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::debug;

use crate::engine::traits::Trainable;
use crate::error::Result;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{check_dataset, train_network};

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the **last completed epoch** (`0.0` if none completed).
///
/// The loop runs on the caller's thread. It ends early when:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop<T: Trainable + ?Sized>(
    network: &mut T,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64> {
    check_dataset(&*network, train_inputs, train_labels)?;

    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            debug!(epoch, "stop requested");
            break;
        }

        let t_start = Instant::now();
        let train_loss = train_network(&mut *network, train_inputs, train_labels)?;
        last_train_loss = train_loss;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        debug!(epoch, total = config.epochs, train_loss, elapsed_ms, "epoch finished");

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                debug!(epoch, "progress receiver dropped");
                break;
            }
        }
    }

    Ok(last_train_loss)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}
