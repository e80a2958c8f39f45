use crate::activation::sigmoid;
use crate::error::{NetError, Result};
use crate::network::weights::WeightStore;

/// Post-activation outputs of every layer for one forward pass.
///
/// `layers[i]` is the activation after weight matrix `i`; the last entry is
/// the network output. The input itself is not copied in.
#[derive(Debug, Clone, Default)]
pub struct Activations {
    pub layers: Vec<Vec<f64>>,
}

impl Activations {
    pub fn output(&self) -> &[f64] {
        self.layers.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Input to layer `i`: the previous activation, or `input` for layer 0.
    pub fn layer_input<'a>(&'a self, input: &'a [f64], i: usize) -> &'a [f64] {
        if i == 0 {
            input
        } else {
            &self.layers[i - 1]
        }
    }
}

/// Runs `input` through every layer and returns the output vector.
pub fn forward(weights: &WeightStore, input: &[f64]) -> Result<Vec<f64>> {
    let mut snapshot = Activations::default();
    forward_into(weights, input, &mut snapshot)?;
    Ok(snapshot.layers.pop().unwrap_or_default())
}

/// Forward pass that keeps every intermediate activation in `snapshot`.
///
/// Buffers already in `snapshot` are reused when their sizes fit.
pub fn forward_into(weights: &WeightStore, input: &[f64], snapshot: &mut Activations) -> Result<()> {
    let layers = weights.layers();
    let expected = layers.first().map(|m| m.cols).unwrap_or(0);
    if input.len() != expected {
        return Err(NetError::dimension("input", expected, input.len()));
    }

    snapshot.layers.resize_with(layers.len(), Vec::new);
    for (i, matrix) in layers.iter().enumerate() {
        let (before, rest) = snapshot.layers.split_at_mut(i);
        let current: &[f64] = if i == 0 { input } else { &before[i - 1] };
        let next = &mut rest[0];

        matrix.mul_vec_into(current, next);
        next.iter_mut().for_each(|z| *z = sigmoid(*z));
    }
    Ok(())
}
