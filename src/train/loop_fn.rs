use std::sync::atomic::Ordering;
use std::time::Instant;

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{NetError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::{argmax, Network};
use crate::train::epoch_stats::EpochStats;
use crate::train::item::TrainingItem;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_in_order;

/// Accuracy and error of a network over a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    pub mean_squared_error: f64,
}

impl Evaluation {
    /// Fraction in [0, 1]; 0 for an empty dataset.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of online SGD and returns the
/// mean error of the **last completed epoch**.
///
/// The visiting order is reshuffled with `rng` before each epoch when
/// `config.shuffle` is set. Any item that does not fit the network aborts the
/// run with the error from `Network::train`.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    items: &[TrainingItem],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<f64> {
    let mut last_loss = 0.0;
    let mut order: Vec<usize> = (0..items.len()).collect();

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(rng);
        }
        let loss = train_in_order(network, items, order.iter().copied())?;
        last_loss = loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        let accuracy = evaluate(network, items)?.accuracy();
        info!(
            "epoch {epoch}/{}: mse {loss:.6}, accuracy {:.2}% ({elapsed_ms} ms)",
            config.epochs,
            accuracy * 100.0
        );

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            mean_squared_error: loss,
            accuracy,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_loss)
}

/// Scores `network` on `items` without touching its weights.
pub fn evaluate(network: &Network, items: &[TrainingItem]) -> Result<Evaluation> {
    let mut correct = 0;
    let mut total_loss = 0.0;

    for item in items {
        let output = network.predict(item.input())?;
        if item.expected().len() != output.len() {
            return Err(NetError::DimensionMismatch {
                what: "evaluation target",
                expected: output.len(),
                actual: item.expected().len(),
            });
        }
        total_loss += MseLoss::loss(&output, item.expected());
        if argmax(&output) == argmax(item.expected()) {
            correct += 1;
        }
    }

    let mean_squared_error = if items.is_empty() {
        0.0
    } else {
        total_loss / items.len() as f64
    };
    Ok(Evaluation { correct, total: items.len(), mean_squared_error })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}
