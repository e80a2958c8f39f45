//! MNIST in CSV form: one sample per row, `label, pixel_0, ..., pixel_n`,
//! pixels in `[0, 255]`.
//!
//! A leading header row is detected and skipped when its first cell is not an
//! integer.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use log::info;

use crate::error::{NetError, Result};
use crate::train::item::{TrainingItem, TARGET_OFF, TARGET_ON};

/// Scales a raw pixel in `[0, 255]` into `[0.001, 1.0]`.
pub fn scale_pixel(raw: f64) -> f64 {
    raw / 255.0 * TARGET_ON + TARGET_OFF
}

/// Parses every row of `reader` into a training item.
///
/// Only the first `input_count` pixels of a row are used; a row with fewer
/// pixels, a non-numeric cell, or a label outside `output_count` is an error.
pub fn read_csv<R: Read>(reader: R, input_count: usize, output_count: usize) -> Result<Vec<TrainingItem>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut items = Vec::new();
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = row_idx + 1;

        let label_cell = record.get(0).unwrap_or("").trim();
        let label: usize = match label_cell.parse() {
            Ok(label) => label,
            Err(_) if row_idx == 0 => continue,
            Err(_) => {
                return Err(NetError::Dataset(format!(
                    "row {row}: label '{label_cell}' is not a non-negative integer"
                )))
            }
        };

        if record.len() < input_count + 1 {
            return Err(NetError::Dataset(format!(
                "row {row}: expected {input_count} pixels, found {}",
                record.len().saturating_sub(1)
            )));
        }

        let input = record
            .iter()
            .skip(1)
            .take(input_count)
            .map(|cell| {
                cell.trim().parse::<f64>().map(scale_pixel).map_err(|_| {
                    NetError::Dataset(format!("row {row}: '{cell}' is not a valid pixel value"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let item = TrainingItem::labelled(input, label, output_count)
            .map_err(|e| NetError::Dataset(format!("row {row}: {e}")))?;
        items.push(item);
    }

    Ok(items)
}

/// Reads an MNIST CSV file from disk.
pub fn load_csv<P: AsRef<Path>>(path: P, input_count: usize, output_count: usize) -> Result<Vec<TrainingItem>> {
    let path = path.as_ref();
    let items = read_csv(BufReader::new(File::open(path)?), input_count, output_count)?;
    info!("read {} samples from {}", items.len(), path.display());
    Ok(items)
}
