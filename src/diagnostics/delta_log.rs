use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::diagnostics::snapshot::DeltaSnapshot;
use crate::error::Result;

/// Append-only, in-memory record of delta snapshots.
#[derive(Debug, Clone, Default)]
pub struct DeltaLog {
    snapshots: Vec<DeltaSnapshot>,
}

impl DeltaLog {
    pub fn new() -> DeltaLog {
        DeltaLog::default()
    }

    pub fn push(&mut self, snapshot: DeltaSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[DeltaSnapshot] {
        &self.snapshots
    }

    /// Column names for a network with the given layer sizes
    /// (`[input, hidden.., output]`).
    pub fn header(layer_sizes: &[usize]) -> Vec<String> {
        let mut columns = vec!["epoch".to_string(), "sample".to_string(), "loss".to_string()];
        let Some((&input, rest)) = layer_sizes.split_first() else {
            return columns;
        };
        let (hidden, output) = match rest.split_last() {
            Some((&output, hidden)) => (hidden, output),
            None => (rest, 0),
        };

        columns.extend((0..input).map(|i| format!("input_delta_{i}")));
        for (h, &size) in hidden.iter().enumerate() {
            columns.extend((0..size).map(|i| format!("hidden{h}_delta_{i}")));
        }
        columns.extend((0..output).map(|i| format!("output_delta_{i}")));
        columns.push("input_weight_0".to_string());
        columns.push("hidden0_weight_0".to_string());
        columns
    }

    /// Writes the header and one comma-separated row per snapshot.
    pub fn write_csv<W: Write>(&self, layer_sizes: &[usize], mut writer: W) -> Result<()> {
        writeln!(writer, "{}", Self::header(layer_sizes).join(","))?;

        for snap in &self.snapshots {
            let mut row: Vec<String> = vec![
                snap.epoch.to_string(),
                snap.sample.to_string(),
                snap.loss.to_string(),
            ];
            row.extend(snap.input_deltas.iter().map(f64::to_string));
            for layer in &snap.hidden_deltas {
                row.extend(layer.iter().map(f64::to_string));
            }
            row.extend(snap.output_deltas.iter().map(f64::to_string));
            row.push(snap.input_weight.to_string());
            row.push(snap.hidden_weight.map(|w| w.to_string()).unwrap_or_default());

            writeln!(writer, "{}", row.join(","))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the log as CSV.
    pub fn export<P: AsRef<Path>>(&self, layer_sizes: &[usize], path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_csv(layer_sizes, BufWriter::new(file))?;
        debug!("exported {} delta snapshots to {}", self.snapshots.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(sample: usize, hidden_weight: Option<f64>) -> DeltaSnapshot {
        DeltaSnapshot {
            epoch: 2,
            sample,
            loss: 0.5,
            input_deltas: vec![0.1, -0.2],
            hidden_deltas: vec![vec![0.01, 0.02, 0.03]],
            output_deltas: vec![-0.4],
            input_weight: 0.25,
            hidden_weight,
        }
    }

    #[test]
    fn header_names_every_layer() {
        let header = DeltaLog::header(&[2, 3, 1]);
        assert_eq!(
            header,
            vec![
                "epoch", "sample", "loss",
                "input_delta_0", "input_delta_1",
                "hidden0_delta_0", "hidden0_delta_1", "hidden0_delta_2",
                "output_delta_0",
                "input_weight_0", "hidden0_weight_0",
            ]
        );
    }

    #[test]
    fn header_without_hidden_layers() {
        let header = DeltaLog::header(&[1, 2]);
        assert_eq!(
            header,
            vec![
                "epoch", "sample", "loss", "input_delta_0",
                "output_delta_0", "output_delta_1",
                "input_weight_0", "hidden0_weight_0",
            ]
        );
    }

    #[test]
    fn rows_match_header_width() {
        let mut log = DeltaLog::new();
        log.push(snapshot(0, Some(-0.125)));
        log.push(snapshot(1, None));

        let mut out: Vec<u8> = Vec::new();
        log.write_csv(&[2, 3, 1], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        let commas = lines[0].matches(',').count();
        assert!(lines.iter().all(|l| l.matches(',').count() == commas));
        assert_eq!(lines[1], "2,0,0.5,0.1,-0.2,0.01,0.02,0.03,-0.4,0.25,-0.125");
        assert!(lines[2].ends_with(",0.25,"));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = DeltaLog::new();
        log.push(snapshot(0, None));
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
    }
}
