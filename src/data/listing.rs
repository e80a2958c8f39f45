use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Reads an index file listing one dataset path per line.
///
/// Blank lines and surrounding whitespace are dropped.
pub fn list_files<P: AsRef<Path>>(index_path: P) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(index_path)?);
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(trimmed.to_string());
        }
    }
    Ok(paths)
}

/// Prepends `prefix` to every path.
pub fn prefix_paths(paths: &[String], prefix: &str) -> Vec<String> {
    paths.iter().map(|p| format!("{prefix}{p}")).collect()
}
