use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// How freshly created weight matrices are filled.
///
/// Both policies give every entry an independent sample, so no two units in a
/// layer start out identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initializer {
    /// Uniform in `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`.
    #[default]
    UniformFanIn,
    /// Standard normal N(0, 1).
    StandardNormal,
}

/// Shape and learning rate of a network. Fixed once the network exists.
///
/// Fields:
/// - `input_count`        — length of every input vector
/// - `output_count`       — length of every output / target vector
/// - `hidden_layer_count` — number of hidden layers, may be 0
/// - `hidden_layer_size`  — uniform width of every hidden layer
/// - `learning_rate`      — step size of each online update, must be > 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_count: usize,
    pub output_count: usize,
    pub hidden_layer_count: usize,
    pub hidden_layer_size: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub initializer: Initializer,
}

/// The four integers that uniquely determine every weight matrix shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeFingerprint {
    pub input_count: usize,
    pub output_count: usize,
    pub hidden_layer_count: usize,
    pub hidden_layer_size: usize,
}

impl NetworkConfig {
    pub fn new(
        input_count: usize,
        output_count: usize,
        hidden_layer_count: usize,
        hidden_layer_size: usize,
        learning_rate: f64,
    ) -> NetworkConfig {
        NetworkConfig {
            input_count,
            output_count,
            hidden_layer_count,
            hidden_layer_size,
            learning_rate,
            initializer: Initializer::default(),
        }
    }

    pub fn with_initializer(mut self, initializer: Initializer) -> NetworkConfig {
        self.initializer = initializer;
        self
    }

    /// Rejects shapes that cannot form a network and learning rates that
    /// would not descend.
    pub fn validate(&self) -> Result<()> {
        if self.input_count == 0 {
            return Err(NetError::InvalidConfig("input_count must be positive".into()));
        }
        if self.output_count == 0 {
            return Err(NetError::InvalidConfig("output_count must be positive".into()));
        }
        if self.hidden_layer_count > 0 && self.hidden_layer_size == 0 {
            return Err(NetError::InvalidConfig(
                "hidden_layer_size must be positive when hidden layers are present".into(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetError::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    pub fn fingerprint(&self) -> ShapeFingerprint {
        ShapeFingerprint {
            input_count: self.input_count,
            output_count: self.output_count,
            hidden_layer_count: self.hidden_layer_count,
            hidden_layer_size: self.hidden_layer_size,
        }
    }

    /// Number of weight matrices, always `hidden_layer_count + 1`.
    pub fn layer_count(&self) -> usize {
        self.hidden_layer_count + 1
    }

    /// `(rows, cols)` of every weight matrix, input side first.
    ///
    /// Rows are the layer's output width, cols its fan-in.
    pub fn weight_shapes(&self) -> Vec<(usize, usize)> {
        let last = self.hidden_layer_count;
        (0..=last)
            .map(|i| {
                let rows = if i == last { self.output_count } else { self.hidden_layer_size };
                let cols = if i == 0 { self.input_count } else { self.hidden_layer_size };
                (rows, cols)
            })
            .collect()
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

impl ShapeFingerprint {
    pub fn as_array(&self) -> [usize; 4] {
        [
            self.input_count,
            self.output_count,
            self.hidden_layer_count,
            self.hidden_layer_size,
        ]
    }

    pub const FIELD_NAMES: [&'static str; 4] = [
        "input_count",
        "output_count",
        "hidden_layer_count",
        "hidden_layer_size",
    ];
}
