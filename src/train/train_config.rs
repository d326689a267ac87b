use serde::{Serialize, Deserialize};

/// Hyper-parameters for a `train_loop` run.
///
/// # Fields
/// - `epochs`          — total number of full passes over the training data
/// - `batch_size`      — chunk length the samples are walked in; every sample
///                       still updates the weights on its own
/// - `learning_rate`   — gradient-descent step size
/// - `track_deltas`    — record a delta snapshot after every sample
/// - `report_interval` — probe the loss every this many epochs (0 disables)
/// - `probe_samples`   — how many leading samples the progress probe uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub track_deltas: bool,
    pub report_interval: usize,
    pub probe_samples: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1000,
            batch_size: 32,
            learning_rate: 0.01,
            track_deltas: false,
            report_interval: 100,
            probe_samples: 100,
        }
    }
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default reporting settings.
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a config from JSON; missing fields take their defaults.
    pub fn load_json(path: &str) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TrainConfig =
            serde_json::from_str(r#"{ "epochs": 5, "learning_rate": 0.001 }"#).unwrap();
        assert_eq!(config.epochs, 5);
        assert_eq!(config.learning_rate, 0.001);
        assert_eq!(config.batch_size, 32);
        assert!(!config.track_deltas);
    }
}
