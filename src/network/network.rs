use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::forward::forward;
use crate::network::persist;
use crate::network::weights::WeightStore;
use crate::train::backprop::{check_item, train_item};
use crate::train::item::TrainingItem;

/// A fully connected sigmoid network trained by online backpropagation.
///
/// The network exclusively owns its weights. `train` needs `&mut self`, so
/// concurrent training has to go through a single owner.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    weights: WeightStore,
}

impl Network {
    /// Validates `config` and draws random weights from `rng`.
    pub fn new<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;
        let weights = WeightStore::initialize(&config, rng);
        Ok(Network { config, weights })
    }

    /// Same as [`Network::new`] with a `StdRng` seeded from `seed`.
    pub fn with_seed(config: NetworkConfig, seed: u64) -> Result<Network> {
        Network::new(config, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a network around existing matrices, checking every shape.
    pub fn from_weights(config: NetworkConfig, matrices: Vec<Matrix>) -> Result<Network> {
        config.validate()?;
        let weights = WeightStore::from_matrices(&config, matrices)?;
        Ok(Network { config, weights })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn input_count(&self) -> usize {
        self.config.input_count
    }

    pub fn output_count(&self) -> usize {
        self.config.output_count
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.config.hidden_layer_count
    }

    pub fn hidden_layer_size(&self) -> usize {
        self.config.hidden_layer_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    pub fn weights(&self) -> &[Matrix] {
        self.weights.layers()
    }

    /// Output vector for `input`, every value in (0, 1).
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        forward(&self.weights, input)
    }

    /// Index of the largest output; the first index wins ties.
    pub fn classify(&self, input: &[f64]) -> Result<usize> {
        let output = self.predict(input)?;
        Ok(argmax(&output).unwrap_or(0))
    }

    /// Mean squared error of the prediction for `item`, without training.
    pub fn squared_error(&self, item: &TrainingItem) -> Result<f64> {
        check_item(&self.weights, item)?;
        let output = self.predict(item.input())?;
        Ok(MseLoss::loss(&output, item.expected()))
    }

    /// One backpropagation step on `item`.
    pub fn train(&mut self, item: &TrainingItem) -> Result<()> {
        self.train_measured(item).map(|_| ())
    }

    /// Like [`Network::train`], returning the sample's error before the update.
    pub fn train_measured(&mut self, item: &TrainingItem) -> Result<f64> {
        train_item(&mut self.weights, self.config.learning_rate, item)
    }

    /// Trains on each item in order and stops at the first failure.
    ///
    /// Items before the failing one have already been applied.
    pub fn train_multiple(&mut self, items: &[TrainingItem]) -> Result<()> {
        for item in items {
            self.train(item)?;
        }
        Ok(())
    }

    /// Writes the weights to `path`, replacing any existing file.
    pub fn save_weights<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        persist::save_to_writer(writer, &self.config, &self.weights)?;
        info!("saved {} weight matrices to {}", self.weights.len(), path.display());
        Ok(())
    }

    /// Replaces the weights with those stored at `path`.
    ///
    /// The file's shape fingerprint must match this network exactly. On any
    /// error the current weights are kept.
    pub fn load_weights<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        self.weights = persist::load_from_reader(reader, &self.config)?;
        info!("loaded {} weight matrices from {}", self.weights.len(), path.display());
        Ok(())
    }
}

/// Index of the first maximum in `values`, or `None` when empty.
///
/// Uses a strict `>` so earlier indices win ties; NaN never becomes the max.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let (first, rest) = values.split_first()?;
    let mut best = 0;
    let mut highest = *first;
    for (i, &v) in rest.iter().enumerate() {
        if v > highest || highest.is_nan() {
            best = i + 1;
            highest = v;
        }
    }
    Some(best)
}
