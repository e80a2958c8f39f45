use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::error::{NetError, Result};

/// Randomly splits `items` into two partitions.
///
/// The first holds `floor(len * ratio)` items chosen with `rng`, the second
/// the rest. Both keep the original relative order. `ratio` must lie in
/// `[0, 1]`.
pub fn segment_dataset<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    ratio: f64,
    rng: &mut R,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(NetError::Dataset(format!("split ratio {ratio} is outside [0, 1]")));
    }

    let len_a = (items.len() as f64 * ratio) as usize;
    let mut in_a = vec![false; items.len()];
    for i in index::sample(rng, items.len(), len_a) {
        in_a[i] = true;
    }

    let mut part_a = Vec::with_capacity(len_a);
    let mut part_b = Vec::with_capacity(items.len() - len_a);
    for (item, &chosen) in items.iter().zip(&in_a) {
        if chosen {
            part_a.push(item.clone());
        } else {
            part_b.push(item.clone());
        }
    }
    Ok((part_a, part_b))
}

/// Shuffles `items` in place with the supplied generator.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn split_sizes_follow_ratio() {
        let items: Vec<u32> = (0..10).collect();
        let mut rng = StdRng::seed_from_u64(8);
        let (a, b) = segment_dataset(&items, 0.35, &mut rng).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 7);
    }

    #[test]
    fn split_is_a_partition_preserving_order() {
        let items: Vec<u32> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(21);
        let (a, b) = segment_dataset(&items, 0.5, &mut rng).unwrap();
        assert!(a.windows(2).all(|w| w[0] < w[1]));
        assert!(b.windows(2).all(|w| w[0] < w[1]));
        let mut all: Vec<u32> = a.iter().chain(&b).copied().collect();
        all.sort_unstable();
        assert_eq!(all, items);
    }

    #[test]
    fn split_is_reproducible_with_same_seed() {
        let items: Vec<u32> = (0..30).collect();
        let first = segment_dataset(&items, 0.2, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = segment_dataset(&items, 0.2, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn extreme_ratios() {
        let items = vec!['a', 'b', 'c'];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(segment_dataset(&items, 0.0, &mut rng).unwrap(), (vec![], items.clone()));
        assert_eq!(segment_dataset(&items, 1.0, &mut rng).unwrap(), (items.clone(), vec![]));
        assert!(matches!(segment_dataset(&items, 1.5, &mut rng), Err(NetError::Dataset(_))));
        assert!(matches!(segment_dataset(&items, -0.1, &mut rng), Err(NetError::Dataset(_))));
    }
}
