use crate::error::{NetError, Result};

/// Target value for the true class. Kept off 1.0 so the sigmoid never has to saturate.
pub const TARGET_ON: f64 = 0.999;
/// Target value for every other class.
pub const TARGET_OFF: f64 = 0.001;

/// One training sample: an input vector and the output the network should
/// produce for it. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingItem {
    input_data: Vec<f64>,
    expected_output: Vec<f64>,
}

impl TrainingItem {
    pub fn new(input_data: Vec<f64>, expected_output: Vec<f64>) -> TrainingItem {
        TrainingItem { input_data, expected_output }
    }

    /// Builds an item whose target is [`target_vector`] for `label`.
    pub fn labelled(input_data: Vec<f64>, label: usize, output_count: usize) -> Result<TrainingItem> {
        Ok(TrainingItem::new(input_data, target_vector(label, output_count)?))
    }

    pub fn input(&self) -> &[f64] {
        &self.input_data
    }

    pub fn expected(&self) -> &[f64] {
        &self.expected_output
    }
}

/// One-hot-like target: `TARGET_ON` at `label`, `TARGET_OFF` elsewhere.
pub fn target_vector(label: usize, output_count: usize) -> Result<Vec<f64>> {
    if label >= output_count {
        return Err(NetError::Dataset(format!(
            "label {label} is out of range for {output_count} outputs"
        )));
    }
    let mut target = vec![TARGET_OFF; output_count];
    target[label] = TARGET_ON;
    Ok(target)
}
