use thiserror::Error;

/// Every failure the engine and its data adapters can report.
///
/// None of these are retried internally; the caller decides what to do.
#[derive(Debug, Error)]
pub enum NetError {
    /// An input or target vector does not match the configured network shape.
    #[error("{what} has length {actual}, network expects {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A persisted shape fingerprint disagrees with the live network.
    #[error("saved {field} is {found}, network has {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv record error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// The fingerprint matched but the matrix payload could not be decoded.
    #[error("corrupt weight data: {0}")]
    CorruptWeights(String),

    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset error: {0}")]
    Dataset(String),
}

pub type Result<T> = std::result::Result<T, NetError>;

impl NetError {
    pub(crate) fn dimension(what: &'static str, expected: usize, actual: usize) -> NetError {
        NetError::DimensionMismatch { what, expected, actual }
    }
}
