//! Cardiovascular-risk style demo: three raw features (age in years, weight in
//! kg, height in cm) scaled into [0, 1], one sigmoid output.
//!
//! The data set is synthetic. Delta tracking is on, and the log is written to
//! the system temp directory.

use anyhow::Context;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use synapse_nn::{evaluate, train_loop, MaxScaleNormalizer, Network, NetworkSpec, Normalizer, TrainConfig};

fn synthetic_rows<R: Rng>(n: usize, normalizer: &MaxScaleNormalizer, rng: &mut R) -> anyhow::Result<Vec<Vec<f64>>> {
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let age: f64 = rng.gen_range(18.0..90.0);
        let weight: f64 = rng.gen_range(45.0..140.0);
        let height: f64 = rng.gen_range(150.0..200.0);
        let bmi = weight / (height / 100.0).powi(2);
        let risk = 1.0 / (1.0 + (-(0.06 * (age - 55.0) + 0.15 * (bmi - 27.0))).exp());

        let mut row = normalizer.normalize(&[age, weight, height])?;
        row.push(risk);
        rows.push(row);
    }
    Ok(rows)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2024);
    let normalizer = MaxScaleNormalizer::new(vec![100.0, 200.0, 250.0])?;

    let train = synthetic_rows(700, &normalizer, &mut rng)?;
    let test = synthetic_rows(200, &normalizer, &mut rng)?;

    let spec = NetworkSpec {
        name: "cardio".into(),
        input_size: 3,
        output_size: 1,
        hidden_layer_count: 2,
        hidden_layer_size: Some(4),
    };
    let mut network = Network::from_spec(&spec, &mut rng)?;
    info!("layer sizes: {:?}", network.layer_sizes());

    let config = TrainConfig {
        epochs: 200,
        batch_size: 32,
        learning_rate: 0.01,
        track_deltas: true,
        report_interval: 20,
        probe_samples: 100,
    };
    train_loop(&mut network, &train, &config)?;

    let eval = evaluate(&mut network, &test, 0.1)?;
    println!(
        "test: loss {:.4}, mean abs error {:.4}, within 10%: {:.1}% ({}/{})",
        eval.mean_loss,
        eval.mean_abs_error,
        eval.within_margin_ratio() * 100.0,
        eval.within_margin,
        eval.count
    );

    for (age, weight, height) in [(25.0, 70.0, 175.0), (60.0, 90.0, 170.0)] {
        let input = normalizer.normalize(&[age, weight, height])?;
        let risk = network.forward(&input)?[0];
        println!("({age}y, {weight}kg, {height}cm): risk = {:.2}%", risk * 100.0);
    }

    let path = std::env::temp_dir().join("synapse_nn_deltas.csv");
    network.export_deltas(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {} delta snapshots to {}", network.delta_log().len(), path.display());
    Ok(())
}
