use rand::rngs::StdRng;
use rand::SeedableRng;
use synapse_nn::{train_loop, Network, TrainConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let mut network = Network::with_hidden_size(2, 1, 1, 4, &mut rng)?;

    // features followed by the target
    let samples = vec![
        vec![1.0, 0.0, 1.0],
        vec![1.0, 1.0, 0.0],
        vec![0.0, 1.0, 1.0],
        vec![0.0, 0.0, 0.0],
    ];

    let config = TrainConfig {
        report_interval: 1000,
        ..TrainConfig::new(10000, 4, 0.1)
    };
    let history = train_loop(&mut network, &samples, &config)?;

    for stats in history.iter().filter(|s| s.probe_loss.is_some()) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }

    for row in &samples {
        let (input, _) = network.split_sample(row)?;
        println!("Input: {:?} -> Output: {:.4}", input, network.forward(input)?[0]);
    }
    Ok(())
}
