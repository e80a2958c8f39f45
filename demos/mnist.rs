/// MNIST digit classification example for ffnet.
///
/// Architecture: 784 → 200 (Sigmoid) → 10 (Sigmoid)
/// Training:     online SGD, lr = 0.1, targets 0.999 / 0.001
/// Epochs:       5
///
/// Run with:
///   cargo run --example mnist --release
///
/// Data files must be present at demos/mnist_data/ in CSV form
/// (`label,pixel_0,...,pixel_783`).

use std::sync::mpsc;
use std::thread;

use ffnet::data::mnist;
use ffnet::{evaluate, train_loop, Network, NetworkConfig, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> ffnet::Result<()> {
    let train_path = "demos/mnist_data/mnist_train.csv";
    let test_path = "demos/mnist_data/mnist_test.csv";

    let config = NetworkConfig::new(28 * 28, 10, 1, 200, 0.1);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::new(config, &mut rng)?;

    println!("Loading MNIST data...");
    let train = mnist::load_csv(train_path, network.input_count(), network.output_count())?;
    let test = mnist::load_csv(test_path, network.input_count(), network.output_count())?;
    println!("  Training set: {} samples", train.len());
    println!("  Test set:     {} samples", test.len());

    let baseline = evaluate(&network, &test)?;
    println!("Pre-training accuracy (random weights): {:.2}%", baseline.accuracy() * 100.0);

    // Progress arrives on a channel so the printing happens off the training thread.
    let (tx, rx) = mpsc::channel::<ffnet::train::EpochStats>();
    let printer = thread::spawn(move || {
        println!("{:>6}  {:>12}  {:>10}  {:>8}", "Epoch", "MSE", "Train Acc", "ms");
        for stats in rx {
            println!(
                "{:>6}  {:>12.6}  {:>9.2}%  {:>8}",
                stats.epoch,
                stats.mean_squared_error,
                stats.accuracy * 100.0,
                stats.elapsed_ms
            );
        }
    });

    let mut train_config = TrainConfig::new(5);
    train_config.progress_tx = Some(tx);
    train_loop(&mut network, &train, &train_config, &mut rng)?;
    drop(train_config);
    let _ = printer.join();

    std::fs::create_dir_all("demos/trained_models")?;
    network.save_weights("demos/trained_models/mnist_weights.csv")?;
    println!("\nWeights saved to demos/trained_models/mnist_weights.csv");

    let score = evaluate(&network, &test)?;
    println!(
        "score: {}, out of: {}, ratio: {:.4}",
        score.correct,
        score.total,
        score.accuracy()
    );
    Ok(())
}
