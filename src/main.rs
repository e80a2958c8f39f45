use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ffnet::data::{self, mnist};
use ffnet::{evaluate, train_loop, Network, NetworkConfig, Result, TrainConfig, TrainingItem};

/// Writes a starting network configuration (MNIST-sized by default).
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Init {
    #[clap(short, long)]
    config: String,
    #[clap(long, default_value_t = 784)]
    inputs: usize,
    #[clap(long, default_value_t = 10)]
    outputs: usize,
    #[clap(long, default_value_t = 1)]
    hidden_layers: usize,
    #[clap(long, default_value_t = 200)]
    hidden_size: usize,
    #[clap(long, default_value_t = 0.1)]
    learning_rate: f64,
}

impl Init {
    fn exec(self) -> Result<()> {
        let config = NetworkConfig::new(
            self.inputs,
            self.outputs,
            self.hidden_layers,
            self.hidden_size,
            self.learning_rate,
        );
        config.validate()?;
        config.save_json(&self.config)?;
        info!("wrote {}", self.config);
        Ok(())
    }
}

/// Trains on an MNIST-style CSV and saves the weights.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct TrainCsv {
    #[clap(short, long)]
    config: String,
    #[clap(short, long)]
    data: String,
    #[clap(short, long)]
    weights: String,
    #[clap(short, long, default_value_t = 1)]
    epochs: usize,
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
    /// Continue from the weights already stored at `--weights`.
    #[clap(long)]
    resume: bool,
}

impl TrainCsv {
    fn exec(self) -> Result<()> {
        let config = NetworkConfig::load_json(&self.config)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut network = Network::new(config, &mut rng)?;
        if self.resume {
            network.load_weights(&self.weights)?;
        }

        let items = mnist::load_csv(&self.data, network.input_count(), network.output_count())?;
        let loss = train_loop(&mut network, &items, &TrainConfig::new(self.epochs), &mut rng)?;
        info!("final epoch mse {loss:.6}");

        network.save_weights(&self.weights)
    }
}

/// Scores saved weights on an MNIST-style CSV.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct EvalCsv {
    #[clap(short, long)]
    config: String,
    #[clap(short, long)]
    data: String,
    #[clap(short, long)]
    weights: String,
}

impl EvalCsv {
    fn exec(self) -> Result<()> {
        let config = NetworkConfig::load_json(&self.config)?;
        let mut network = Network::with_seed(config, 0)?;
        network.load_weights(&self.weights)?;

        let items = mnist::load_csv(&self.data, network.input_count(), network.output_count())?;
        let score = evaluate(&network, &items)?;
        println!(
            "score: {}, out of: {}, ratio: {:.4}, mse: {:.6}",
            score.correct,
            score.total,
            score.accuracy(),
            score.mean_squared_error
        );
        Ok(())
    }
}

/// Trains on a list of labelled handwriting images and reports test accuracy.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct TrainImages {
    #[clap(short, long)]
    config: String,
    /// Text file with one image path per line.
    #[clap(short, long)]
    index: String,
    /// Prepended to every path in the index.
    #[clap(short, long, default_value = "")]
    prefix: String,
    #[clap(long)]
    width: u32,
    #[clap(long)]
    height: u32,
    #[clap(short, long)]
    weights: String,
    #[clap(long, default_value_t = 0.1)]
    test_ratio: f64,
    #[clap(short, long, default_value_t = 1)]
    epochs: usize,
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
    #[clap(long, default_value_t = data::MAX_OPEN_FILES)]
    max_open_files: usize,
}

impl TrainImages {
    fn exec(self) -> Result<()> {
        let config = NetworkConfig::load_json(&self.config)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut network = Network::new(config, &mut rng)?;

        let mut paths = data::prefix_paths(&data::list_files(&self.index)?, &self.prefix);
        data::shuffle(&mut paths, &mut rng);
        let (labels, paths) = data::filter_and_label(&paths, network.output_count())?;
        let labelled: Vec<(usize, String)> = labels.into_iter().zip(paths).collect();
        let (testing, training) = data::segment_dataset(&labelled, self.test_ratio, &mut rng)?;
        info!("training set size: {}, testing set size: {}", training.len(), testing.len());

        let training = self.load_items(&training, network.output_count())?;
        let testing = self.load_items(&testing, network.output_count())?;

        train_loop(&mut network, &training, &TrainConfig::new(self.epochs), &mut rng)?;
        network.save_weights(&self.weights)?;

        let score = evaluate(&network, &testing)?;
        println!(
            "got right: {}, out of: {}, ratio: {:.4}",
            score.correct,
            score.total,
            score.accuracy()
        );
        Ok(())
    }

    fn load_items(&self, labelled: &[(usize, String)], output_count: usize) -> Result<Vec<TrainingItem>> {
        let paths: Vec<String> = labelled.iter().map(|(_, p)| p.clone()).collect();
        let images = data::load_images(&paths, self.width, self.height, self.max_open_files)?;
        labelled
            .iter()
            .zip(images)
            .map(|((label, _), input)| TrainingItem::labelled(input, *label, output_count))
            .collect()
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
enum SubCommand {
    Init(Init),
    TrainCsv(TrainCsv),
    EvalCsv(EvalCsv),
    TrainImages(TrainImages),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match SubCommand::parse() {
        SubCommand::Init(init) => init.exec(),
        SubCommand::TrainCsv(train) => train.exec(),
        SubCommand::EvalCsv(eval) => eval.exec(),
        SubCommand::TrainImages(train) => train.exec(),
    }
}
