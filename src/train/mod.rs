pub mod backprop;
pub mod epoch_stats;
pub mod item;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::EpochStats;
pub use item::{target_vector, TrainingItem};
pub use loop_fn::{evaluate, train_loop, Evaluation};
pub use train_config::TrainConfig;
pub use trainer::train_network;
