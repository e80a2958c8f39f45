use std::path::Path;

use crate::error::{NetError, Result};

/// Length of the sample prefix in names like `img011-042.png`.
const NAME_PREFIX_LEN: usize = 3;

/// Class label encoded in a sample file name.
///
/// `img011-042.png` is sample 42 of class 11, which maps to label 10: class
/// numbers in file names are 1-based.
pub fn label_from_file_name(name: &str) -> Result<usize> {
    let invalid = || NetError::Dataset(format!("image name in invalid format: {name}"));

    let dash = name.find('-').ok_or_else(invalid)?;
    let digits = name.get(NAME_PREFIX_LEN..dash).ok_or_else(invalid)?;
    let class: usize = digits.parse().map_err(|_| invalid())?;
    class.checked_sub(1).ok_or_else(invalid)
}

/// Keeps the paths whose label is below `classes` and returns the labels
/// alongside them, in input order.
pub fn filter_and_label(paths: &[String], classes: usize) -> Result<(Vec<usize>, Vec<String>)> {
    let mut labels = Vec::new();
    let mut kept = Vec::new();
    for path in paths {
        let file_name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path);
        let label = label_from_file_name(file_name)?;
        if label < classes {
            labels.push(label);
            kept.push(path.clone());
        }
    }
    Ok((labels, kept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_zero_based_class_number() {
        assert_eq!(label_from_file_name("img001-001.png").unwrap(), 0);
        assert_eq!(label_from_file_name("img010-055.png").unwrap(), 9);
        assert_eq!(label_from_file_name("img036-002.png").unwrap(), 35);
    }

    #[test]
    fn malformed_names_are_rejected() {
        for name in ["img001.png", "imgabc-001.png", "ab-1.png", "img000-001.png"] {
            assert!(matches!(label_from_file_name(name), Err(NetError::Dataset(_))), "{name}");
        }
    }

    #[test]
    fn filter_keeps_only_wanted_classes() {
        let paths: Vec<String> = [
            "Hnd/Sample001/img001-001.png",
            "Hnd/Sample011/img011-001.png",
            "Hnd/Sample003/img003-004.png",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let (labels, kept) = filter_and_label(&paths, 10).unwrap();
        assert_eq!(labels, vec![0, 2]);
        assert_eq!(kept, vec![paths[0].clone(), paths[2].clone()]);
    }
}
