use std::path::Path;

use log::{debug, trace};
use rand::Rng;

use crate::diagnostics::{DeltaLog, DeltaTracker};
use crate::error::{NnError, Result};
use crate::layers::layer::{Layer, LayerKind};
use crate::loss::bce::BceLoss;
use crate::network::spec::NetworkSpec;

/// A strictly layered, fully connected feed-forward network.
///
/// `layers[0]` is the input layer, the last entry is the output layer and
/// everything in between is hidden; layer `i` feeds only layer `i + 1`.
/// A `Network::default()` has no layers and refuses to run.
#[derive(Debug, Default)]
pub struct Network {
    layers: Vec<Layer>,
    tracker: DeltaTracker,
}

impl Network {
    /// Builds a network whose hidden layers use the default width
    /// (see [`NetworkSpec::default_hidden_size`]).
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        hidden_layer_count: usize,
        rng: &mut R,
    ) -> Result<Network> {
        let hidden_size = NetworkSpec::default_hidden_size(input_size, output_size);
        Network::with_hidden_size(input_size, output_size, hidden_layer_count, hidden_size, rng)
    }

    pub fn with_hidden_size<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        hidden_layer_count: usize,
        hidden_layer_size: usize,
        rng: &mut R,
    ) -> Result<Network> {
        if hidden_layer_size == 0 {
            return Err(NnError::InvalidLayerSize { kind: LayerKind::Hidden, size: 0 });
        }

        let mut layers = Vec::with_capacity(hidden_layer_count + 2);
        layers.push(Layer::new(LayerKind::Input, input_size, rng)?);
        for _ in 0..hidden_layer_count {
            layers.push(Layer::new(LayerKind::Hidden, hidden_layer_size, rng)?);
        }
        layers.push(Layer::new(LayerKind::Output, output_size, rng)?);

        let mut network = Network { layers, tracker: DeltaTracker::default() };
        network.create_connections(rng)?;

        debug!("built network with layer sizes {:?}", network.layer_sizes());
        Ok(network)
    }

    pub fn from_spec<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Result<Network> {
        debug!("building network '{}' from spec", spec.name);
        Network::with_hidden_size(
            spec.input_size,
            spec.output_size,
            spec.hidden_layer_count,
            spec.hidden_size(),
            rng,
        )
    }

    /// Attaches every layer to its successor.
    fn create_connections<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_initialized()?;
        for i in 0..self.layers.len() - 1 {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            head[i].attach_layer(&tail[0], rng)?;
        }
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<()> {
        match (self.layers.first(), self.layers.last()) {
            (Some(first), Some(last))
                if self.layers.len() >= 2
                    && first.kind() == LayerKind::Input
                    && last.kind() == LayerKind::Output => Ok(()),
            _ => Err(NnError::NotInitialized),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.ensure_initialized().is_ok()
    }

    // -----------------------------------------------------------------------
    // Topology
    // -----------------------------------------------------------------------

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_layer(&self) -> Option<&Layer> {
        self.layers.first().filter(|l| l.kind() == LayerKind::Input)
    }

    pub fn output_layer(&self) -> Option<&Layer> {
        self.layers.last().filter(|l| l.kind() == LayerKind::Output)
    }

    pub fn hidden_layers(&self) -> &[Layer] {
        if self.layers.len() < 2 {
            return &[];
        }
        &self.layers[1..self.layers.len() - 1]
    }

    pub fn input_size(&self) -> usize {
        self.input_layer().map_or(0, Layer::node_count)
    }

    pub fn output_size(&self) -> usize {
        self.output_layer().map_or(0, Layer::node_count)
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.hidden_layers().len()
    }

    /// Node counts in chain order: `[input, hidden.., output]`.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::node_count).collect()
    }

    // -----------------------------------------------------------------------
    // Forward pass and loss
    // -----------------------------------------------------------------------

    /// Zeroes every node value. Biases, weights and deltas are left alone.
    pub fn reset_network(&mut self) {
        for layer in &mut self.layers {
            layer.reset_values();
        }
    }

    /// Runs one forward pass and returns the output activations.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.ensure_initialized()?;

        // Loading the inputs overwrites every input value, so validating
        // there first keeps the graph untouched on a shape error.
        self.layers[0].set_input_values(inputs)?;
        for layer in &mut self.layers[1..] {
            layer.reset_values();
        }

        let last = self.layers.len() - 1;
        for i in 0..last {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            head[i].forward(&mut tail[0])?;
        }

        Ok(self.layers[last].get_output())
    }

    /// Mean binary cross-entropy of the current output values.
    ///
    /// Reads the output layer as left by the last [`Network::forward`].
    pub fn calculate_loss(&self, expected: &[f64]) -> Result<f64> {
        let output = self.output_layer().ok_or(NnError::NotInitialized)?;
        check_targets(output, expected)?;
        Ok(BceLoss::loss(&output.values(), expected))
    }

    // -----------------------------------------------------------------------
    // Backward pass
    // -----------------------------------------------------------------------

    /// Computes every node's delta and applies one gradient-descent step.
    ///
    /// Must run after [`Network::forward`] on the same sample and before the
    /// next forward pass; deltas are overwritten, never accumulated.
    pub fn backpropagate(&mut self, expected: &[f64], learning_rate: f64) -> Result<()> {
        self.ensure_initialized()?;
        let last = self.layers.len() - 1;
        check_targets(&self.layers[last], expected)?;

        let output = &mut self.layers[last];
        let grads = BceLoss::derivative(&output.values(), expected);
        for (node, grad) in output.nodes_mut().iter_mut().zip(grads) {
            node.delta = grad;
        }

        // Hidden layers nearest the output first, then the input layer.
        for i in (0..last).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            head[i].compute_deltas(&tail[0])?;
        }

        self.apply_gradients(learning_rate)
    }

    /// Updates every weight and bias from the deltas of the last backward pass.
    pub fn apply_gradients(&mut self, learning_rate: f64) -> Result<()> {
        let count = self.layers.len();
        for i in 0..count {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            head[i].apply_gradients(tail.first(), learning_rate)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Training
    // -----------------------------------------------------------------------

    /// Splits a training row into `(features, targets)`.
    pub fn split_sample<'a>(&self, row: &'a [f64]) -> Result<(&'a [f64], &'a [f64])> {
        let input_size = self.input_size();
        if row.len() < input_size {
            return Err(NnError::SizeMismatch {
                what: "training row",
                got: row.len(),
                expected: input_size + self.output_size(),
            });
        }
        Ok(row.split_at(input_size))
    }

    /// One pass of per-sample gradient descent over `samples`.
    ///
    /// Samples are walked in contiguous chunks of `batch_size`, but every
    /// sample updates the parameters on its own; the chunking has no effect on
    /// the update rule. Returns the mean loss over the samples.
    ///
    /// Every row is checked against `input_size + output_size` before the
    /// first update, so a rejected call leaves the parameters untouched.
    pub fn train(&mut self, samples: &[Vec<f64>], batch_size: usize, learning_rate: f64) -> Result<f64> {
        if batch_size == 0 {
            return Err(NnError::InvalidArgument("batch size must be at least 1".into()));
        }
        self.ensure_initialized()?;
        if samples.is_empty() {
            return Ok(0.0);
        }
        let row_len = self.input_size() + self.output_size();
        if let Some(row) = samples.iter().find(|row| row.len() != row_len) {
            return Err(NnError::SizeMismatch {
                what: "training row",
                got: row.len(),
                expected: row_len,
            });
        }

        let mut total_loss = 0.0;
        for (chunk_idx, chunk) in samples.chunks(batch_size).enumerate() {
            for row in chunk {
                let (features, targets) = self.split_sample(row)?;
                self.forward(features)?;
                let loss = self.calculate_loss(targets)?;
                self.backpropagate(targets, learning_rate)?;

                self.tracker.observe(&self.layers, loss);
                total_loss += loss;
            }
            trace!("chunk {chunk_idx}: {} samples", chunk.len());
        }

        Ok(total_loss / samples.len() as f64)
    }

    // -----------------------------------------------------------------------
    // Delta diagnostics
    // -----------------------------------------------------------------------

    pub fn set_delta_tracking(&mut self, enabled: bool) {
        self.tracker.set_enabled(enabled);
    }

    pub fn is_tracking_deltas(&self) -> bool {
        self.tracker.is_enabled()
    }

    /// Labels subsequent snapshots with `epoch` and restarts sample numbering.
    pub fn begin_epoch(&mut self, epoch: usize) {
        self.tracker.begin_epoch(epoch);
    }

    pub fn delta_log(&self) -> &DeltaLog {
        self.tracker.log()
    }

    pub fn clear_delta_log(&mut self) {
        self.tracker.clear();
    }

    /// Writes the recorded snapshots to `path` as CSV.
    pub fn export_deltas<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.tracker.log().export(&self.layer_sizes(), path)
    }
}

fn check_targets(output: &Layer, expected: &[f64]) -> Result<()> {
    if expected.len() != output.node_count() {
        return Err(NnError::SizeMismatch {
            what: "expected output",
            got: expected.len(),
            expected: output.node_count(),
        });
    }
    Ok(())
}
