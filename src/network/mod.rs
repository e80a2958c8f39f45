pub mod config;
pub mod forward;
pub mod network;
pub mod persist;
pub mod weights;

pub use config::{Initializer, NetworkConfig, ShapeFingerprint};
pub use network::{argmax, Network};
pub use weights::WeightStore;
