use log::debug;
use rand::Rng;

use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::{Initializer, NetworkConfig};

/// One weight matrix per layer transition, input side first.
///
/// Matrix `i` has shape `(width of layer i, width of layer i - 1)`, so a
/// forward step is a plain `W · a`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightStore {
    layers: Vec<Matrix>,
}

impl WeightStore {
    /// Draws fresh random matrices for every layer of `config`.
    pub fn initialize<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> WeightStore {
        let layers: Vec<Matrix> = config
            .weight_shapes()
            .into_iter()
            .map(|(rows, cols)| match config.initializer {
                Initializer::UniformFanIn => Matrix::uniform_fan_in(rows, cols, rng),
                Initializer::StandardNormal => Matrix::standard_normal(rows, cols, rng),
            })
            .collect();
        debug!(
            "initialised {} weight matrices ({:?}) with {:?}",
            layers.len(),
            config.weight_shapes(),
            config.initializer
        );
        WeightStore { layers }
    }

    /// Wraps existing matrices after checking them against `config`.
    pub fn from_matrices(config: &NetworkConfig, layers: Vec<Matrix>) -> Result<WeightStore> {
        let shapes = config.weight_shapes();
        if layers.len() != shapes.len() {
            return Err(NetError::dimension("weight matrix count", shapes.len(), layers.len()));
        }
        for (i, (matrix, &(rows, cols))) in layers.iter().zip(&shapes).enumerate() {
            if matrix.shape() != (rows, cols) {
                return Err(NetError::CorruptWeights(format!(
                    "layer {i} is {}x{}, expected {rows}x{cols}",
                    matrix.rows, matrix.cols
                )));
            }
        }
        Ok(WeightStore { layers })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Matrix] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Matrix] {
        &mut self.layers
    }
}
