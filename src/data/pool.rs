use log::info;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::data::image::load_grayscale;
use crate::error::{NetError, Result};

/// Default cap on images decoded at the same time.
pub const MAX_OPEN_FILES: usize = 25;

/// Loads every image in `paths` on a pool of at most `max_concurrency`
/// workers.
///
/// `result[i]` always belongs to `paths[i]`. The first decode failure aborts
/// the batch: no further images are started and the error is returned.
pub fn load_images(
    paths: &[String],
    width: u32,
    height: u32,
    max_concurrency: usize,
) -> Result<Vec<Vec<f64>>> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(max_concurrency.max(1))
        .build()
        .map_err(|e| NetError::Dataset(format!("cannot start image loader pool: {e}")))?;

    let images = pool.install(|| {
        paths
            .par_iter()
            .map(|path| load_grayscale(path, width, height))
            .collect::<Result<Vec<Vec<f64>>>>()
    })?;

    info!("loaded {} images at {width}x{height}", images.len());
    Ok(images)
}
