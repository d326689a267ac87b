use crate::diagnostics::delta_log::DeltaLog;
use crate::diagnostics::snapshot::DeltaSnapshot;
use crate::layers::layer::{Layer, LayerKind};

/// Records a snapshot after every trained sample while enabled.
///
/// The tracker only reads the graph; it has no effect on training.
#[derive(Debug, Clone, Default)]
pub struct DeltaTracker {
    enabled: bool,
    epoch: usize,
    sample: usize,
    log: DeltaLog,
}

impl DeltaTracker {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts a new epoch; sample numbering restarts at 0.
    pub fn begin_epoch(&mut self, epoch: usize) {
        self.epoch = epoch;
        self.sample = 0;
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn log(&self) -> &DeltaLog {
        &self.log
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Called once per trained sample with the layers in chain order.
    pub fn observe(&mut self, layers: &[Layer], loss: f64) {
        let sample = self.sample;
        self.sample += 1;
        if !self.enabled {
            return;
        }
        let (Some(input), Some(output)) = (layers.first(), layers.last()) else {
            return;
        };

        let hidden: Vec<&Layer> = layers
            .iter()
            .filter(|l| l.kind() == LayerKind::Hidden)
            .collect();

        self.log.push(DeltaSnapshot {
            epoch: self.epoch,
            sample,
            loss,
            input_deltas: input.deltas(),
            hidden_deltas: hidden.iter().map(|l| l.deltas()).collect(),
            output_deltas: output.deltas(),
            input_weight: input.edges().first().map_or(0.0, |e| e.weight),
            hidden_weight: hidden
                .first()
                .and_then(|l| l.edges().first())
                .map(|e| e.weight),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layers() -> Vec<Layer> {
        let mut rng = StdRng::seed_from_u64(5);
        let mut input = Layer::new(LayerKind::Input, 2, &mut rng).unwrap();
        let output = Layer::new(LayerKind::Output, 1, &mut rng).unwrap();
        input.attach_layer(&output, &mut rng).unwrap();
        vec![input, output]
    }

    #[test]
    fn begin_epoch_labels_later_snapshots() {
        let layers = layers();
        let mut tracker = DeltaTracker::default();
        tracker.set_enabled(true);
        assert_eq!(tracker.epoch(), 0);

        tracker.observe(&layers, 0.3);
        tracker.begin_epoch(7);
        assert_eq!(tracker.epoch(), 7);
        tracker.observe(&layers, 0.2);

        let ids: Vec<(usize, usize)> = tracker
            .log()
            .snapshots()
            .iter()
            .map(|s| (s.epoch, s.sample))
            .collect();
        assert_eq!(ids, vec![(0, 0), (7, 0)]);
        assert_eq!(tracker.log().snapshots()[1].hidden_weight, None);
    }

    #[test]
    fn disabled_tracker_still_counts_samples() {
        let layers = layers();
        let mut tracker = DeltaTracker::default();
        tracker.observe(&layers, 0.5);
        tracker.set_enabled(true);
        tracker.observe(&layers, 0.5);

        assert_eq!(tracker.log().len(), 1);
        assert_eq!(tracker.log().snapshots()[0].sample, 1);
        tracker.clear();
        assert!(tracker.log().is_empty());
    }
}
