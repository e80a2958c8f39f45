pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;
pub mod data;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::sigmoid::sigmoid;
pub use network::network::{argmax, Network};
pub use network::config::{Initializer, NetworkConfig};
pub use loss::mse::MseLoss;
pub use train::item::{target_vector, TrainingItem};
pub use train::loop_fn::{evaluate, train_loop, Evaluation};
pub use train::train_config::TrainConfig;
pub use train::trainer::train_network;
