//! Delta tracking and CSV export as seen from outside the crate.

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use synapse_nn::{DeltaLog, Network, NetworkSpec, NnError, TrainConfig};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("synapse_nn_{}_{}.csv", name, std::process::id()))
}

fn samples() -> Vec<Vec<f64>> {
    vec![
        vec![0.2, 0.4, 0.6, 1.0],
        vec![0.9, 0.1, 0.3, 0.0],
        vec![0.5, 0.5, 0.5, 1.0],
    ]
}

#[test]
fn test_export_has_one_row_per_sample() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut net = Network::with_hidden_size(3, 1, 2, 4, &mut rng).unwrap();
    net.set_delta_tracking(true);
    net.begin_epoch(0);
    net.train(&samples(), 1, 0.01).unwrap();

    let path = temp_path("rows");
    net.export_deltas(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3 + 1);

    let header_commas = lines[0].matches(',').count();
    assert!(lines.iter().all(|l| l.matches(',').count() == header_commas));
    // epoch, sample, loss + 3 + 4 + 4 + 1 deltas + 2 weights
    assert_eq!(header_commas + 1, 3 + 12 + 2);
    assert!(lines[0].starts_with("epoch,sample,loss,input_delta_0"));
    assert!(lines[0].contains("hidden1_delta_3"));
    assert!(lines[0].ends_with("output_delta_0,input_weight_0,hidden0_weight_0"));
}

#[test]
fn test_header_is_fixed_by_topology() {
    let mut rng = StdRng::seed_from_u64(22);
    let net = Network::with_hidden_size(3, 1, 2, 4, &mut rng).unwrap();

    let path = temp_path("empty");
    net.export_deltas(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(text.lines().count(), 1);
    assert_eq!(text.trim_end(), DeltaLog::header(&net.layer_sizes()).join(","));
}

#[test]
fn test_snapshot_matches_graph_after_sample() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut net = Network::with_hidden_size(3, 1, 1, 2, &mut rng).unwrap();
    net.set_delta_tracking(true);
    net.train(&samples()[..1], 1, 0.05).unwrap();

    let snap = &net.delta_log().snapshots()[0];
    let layers = net.layers();
    assert_eq!(snap.input_deltas, layers[0].deltas());
    assert_eq!(snap.hidden_deltas, vec![layers[1].deltas()]);
    assert_eq!(snap.output_deltas, layers[2].deltas());
    assert_eq!(snap.input_weight, layers[0].edges()[0].weight);
    assert_eq!(snap.hidden_weight, Some(layers[1].edges()[0].weight));
    assert!(snap.loss.is_finite() && snap.loss > 0.0);
}

#[test]
fn test_tracking_does_not_change_training() {
    let config = TrainConfig { epochs: 3, batch_size: 2, ..TrainConfig::default() };
    let spec = NetworkSpec {
        name: "twin".into(),
        input_size: 3,
        output_size: 1,
        hidden_layer_count: 1,
        hidden_layer_size: Some(3),
    };

    let mut plain = Network::from_spec(&spec, &mut StdRng::seed_from_u64(24)).unwrap();
    let mut tracked = Network::from_spec(&spec, &mut StdRng::seed_from_u64(24)).unwrap();

    synapse_nn::train_loop(&mut plain, &samples(), &config).unwrap();
    synapse_nn::train_loop(&mut tracked, &samples(), &TrainConfig { track_deltas: true, ..config.clone() }).unwrap();

    let x = [0.3, 0.3, 0.3];
    assert_eq!(plain.forward(&x).unwrap(), tracked.forward(&x).unwrap());
    assert_eq!(tracked.delta_log().len(), 9);

    tracked.clear_delta_log();
    assert!(tracked.delta_log().is_empty());
}

#[test]
fn test_unwritable_destination_is_io_error() {
    let mut rng = StdRng::seed_from_u64(25);
    let net = Network::new(3, 1, 1, &mut rng).unwrap();
    let path = std::env::temp_dir()
        .join("synapse_nn_missing_dir_9c1e")
        .join("nested")
        .join("deltas.csv");

    assert!(matches!(net.export_deltas(&path), Err(NnError::Io(_))));
}
