//! Adapters that turn files on disk into input vectors and training items.
//!
//! Nothing here reaches into the network; everything hands back plain
//! `Vec<f64>` inputs or [`TrainingItem`](crate::train::TrainingItem)s.

pub mod image;
pub mod labels;
pub mod listing;
pub mod mnist;
pub mod pool;
pub mod split;

pub use self::image::{load_grayscale, normalize_brightness};
pub use labels::{filter_and_label, label_from_file_name};
pub use listing::{list_files, prefix_paths};
pub use pool::{load_images, MAX_OPEN_FILES};
pub use split::{segment_dataset, shuffle};
