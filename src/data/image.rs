//! Image preprocessing for the handwriting datasets.
//!
//! Images are decoded (PNG/JPEG/BMP/GIF), resized to the network's input
//! dimensions, converted to grayscale, and min/max normalised so no pixel
//! sits exactly on 0 or 1.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use log::{debug, warn};

use crate::error::Result;
use crate::train::item::{TARGET_OFF, TARGET_ON};

/// Decodes the image at `path` and returns `width * height` brightness values
/// in row-major order, normalised into `[0.001, 1.0]`.
pub fn load_grayscale<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let img = image::open(path)?;
    debug!("decoded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(grayscale_input(&img, width, height))
}

/// Resizes `img` to `width × height`, converts it to grayscale, and normalises
/// the brightness values.
pub fn grayscale_input(img: &DynamicImage, width: u32, height: u32) -> Vec<f64> {
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);
    let gray = resized.to_luma8();
    let mut values: Vec<f64> = gray.pixels().map(|p| p.0[0] as f64).collect();
    normalize_brightness(&mut values);
    values
}

/// Maps `values` linearly so the minimum becomes 0.001 and the maximum 1.0.
///
/// A constant image has no contrast to stretch and becomes all 0.001.
pub fn normalize_brightness(values: &mut [f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !(range > 0.0) {
        if !values.is_empty() {
            warn!("image has constant brightness; normalising to {TARGET_OFF}");
        }
        values.iter_mut().for_each(|v| *v = TARGET_OFF);
        return;
    }

    for v in values.iter_mut() {
        *v = TARGET_ON * ((*v - min) / range) + TARGET_OFF;
    }
}
