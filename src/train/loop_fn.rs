use std::time::Instant;

use log::info;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns one `EpochStats`
/// per epoch.
///
/// Each row of `samples` holds `input_size` features followed by the targets.
/// Delta tracking is switched on or off according to `config.track_deltas`
/// before the first epoch; the recorded log stays on the network.
///
/// # Errors
/// Fails on `batch_size == 0` or on a row that does not fit the network.
pub fn train_loop(
    network: &mut Network,
    samples: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    network.set_delta_tracking(config.track_deltas);
    let probe = &samples[..config.probe_samples.min(samples.len())];

    let mut history = Vec::with_capacity(config.epochs);
    for epoch in 0..config.epochs {
        let t_start = Instant::now();

        network.begin_epoch(epoch);
        let train_loss = network.train(samples, config.batch_size, config.learning_rate)?;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let probe_loss = if config.report_interval > 0 && epoch % config.report_interval == 0 {
            let loss = mean_probe_loss(network, probe)?;
            info!("epoch {epoch}/{}: mean loss = {loss:.4}", config.epochs);
            Some(loss)
        } else {
            None
        };

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            probe_loss,
            elapsed_ms,
        });
    }

    Ok(history)
}

/// Aggregate quality of a network over a labelled data set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub mean_loss: f64,
    /// Absolute error averaged over outputs, then over samples.
    pub mean_abs_error: f64,
    /// Samples whose mean absolute error is at most the requested margin.
    pub within_margin: usize,
    pub count: usize,
}

impl Evaluation {
    /// Fraction of samples within the margin, in [0, 1].
    pub fn within_margin_ratio(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.within_margin as f64 / self.count as f64
    }
}

/// Runs inference over `samples` without touching any parameter.
pub fn evaluate(network: &mut Network, samples: &[Vec<f64>], margin: f64) -> Result<Evaluation> {
    let mut total_loss = 0.0;
    let mut total_abs = 0.0;
    let mut within_margin = 0;

    for row in samples {
        let (features, targets) = network.split_sample(row)?;
        let output = network.forward(features)?;
        total_loss += network.calculate_loss(targets)?;

        let abs_error = output
            .iter()
            .zip(targets)
            .map(|(p, y)| (p - y).abs())
            .sum::<f64>()
            / output.len() as f64;
        total_abs += abs_error;
        if abs_error <= margin {
            within_margin += 1;
        }
    }

    let n = samples.len().max(1) as f64;
    Ok(Evaluation {
        mean_loss: total_loss / n,
        mean_abs_error: total_abs / n,
        within_margin,
        count: samples.len(),
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Mean loss over a slice of rows (eval mode, no updates).
fn mean_probe_loss(network: &mut Network, rows: &[Vec<f64>]) -> Result<f64> {
    if rows.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for row in rows {
        let (features, targets) = network.split_sample(row)?;
        network.forward(features)?;
        total += network.calculate_loss(targets)?;
    }
    Ok(total / rows.len() as f64)
}
