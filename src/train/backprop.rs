use crate::activation::sigmoid_prime_from_output;
use crate::error::{NetError, Result};
use crate::loss::mse::MseLoss;
use crate::network::forward::{forward_into, Activations};
use crate::network::weights::WeightStore;
use crate::train::item::TrainingItem;

/// Working buffers for one forward + backward pass.
///
/// Allocated once per training call, sized from the weight store, and reused
/// layer by layer. Nothing in here aliases the weights being updated.
#[derive(Debug, Default)]
pub struct TrainScratch {
    activations: Activations,
    /// `errors[i]` is the error signal at the output of layer `i`.
    errors: Vec<Vec<f64>>,
    /// Error times sigmoid derivative for the layer being updated.
    gradient: Vec<f64>,
}

impl TrainScratch {
    pub fn for_weights(weights: &WeightStore) -> TrainScratch {
        let widths: Vec<usize> = weights.layers().iter().map(|m| m.rows).collect();
        let widest = widths.iter().copied().max().unwrap_or(0);
        TrainScratch {
            activations: Activations {
                layers: widths.iter().map(|&w| Vec::with_capacity(w)).collect(),
            },
            errors: widths.iter().map(|&w| Vec::with_capacity(w)).collect(),
            gradient: Vec::with_capacity(widest),
        }
    }
}

/// Checks `item` against the weight store's input and output widths.
pub fn check_item(weights: &WeightStore, item: &TrainingItem) -> Result<()> {
    let layers = weights.layers();
    let input_count = layers.first().map(|m| m.cols).unwrap_or(0);
    let output_count = layers.last().map(|m| m.rows).unwrap_or(0);
    if item.input().len() != input_count {
        return Err(NetError::dimension("training input", input_count, item.input().len()));
    }
    if item.expected().len() != output_count {
        return Err(NetError::dimension("training target", output_count, item.expected().len()));
    }
    Ok(())
}

/// One online gradient-descent step on a single sample.
///
/// Returns the mean squared error of the output measured before the update.
/// On a dimension mismatch the weights are left untouched.
pub fn train_item(weights: &mut WeightStore, learning_rate: f64, item: &TrainingItem) -> Result<f64> {
    check_item(weights, item)?;
    let mut scratch = TrainScratch::for_weights(weights);
    backpropagate(weights, learning_rate, item.input(), item.expected(), &mut scratch)
}

/// Forward pass, error propagation, then a forward-ordered weight update.
///
/// Every error signal is computed from the pre-update weights before any
/// matrix is touched, so the update is consistent across layers.
fn backpropagate(
    weights: &mut WeightStore,
    learning_rate: f64,
    input: &[f64],
    target: &[f64],
    scratch: &mut TrainScratch,
) -> Result<f64> {
    forward_into(weights, input, &mut scratch.activations)?;

    let last = weights.len() - 1;
    let output = &scratch.activations.layers[last];
    let loss = MseLoss::loss(output, target);

    // Output error: target - a[L].
    let errors = &mut scratch.errors;
    errors.resize_with(weights.len(), Vec::new);
    errors[last].clear();
    errors[last].extend(target.iter().zip(output).map(|(t, a)| t - a));

    // Hidden errors: e[i] = transpose(W[i+1]) · e[i+1].
    for i in (0..last).rev() {
        let (head, tail) = errors.split_at_mut(i + 1);
        head[i] = weights.layers()[i + 1].transpose_mul_vec(&tail[0]);
    }

    // W[i] += lr * (e[i] ⊙ a[i](1 - a[i])) · transpose(a[i-1]).
    let layers = weights.layers_mut();
    for (i, matrix) in layers.iter_mut().enumerate() {
        let activation = &scratch.activations.layers[i];
        scratch.gradient.clear();
        scratch.gradient.extend(
            scratch.errors[i]
                .iter()
                .zip(activation)
                .map(|(e, &a)| e * sigmoid_prime_from_output(a)),
        );
        let layer_input = scratch.activations.layer_input(input, i);
        matrix.add_scaled_outer(learning_rate, &scratch.gradient, layer_input);
    }

    Ok(loss)
}
