use std::cmp::Ordering;

use rand::Rng;

/// Picks one element uniformly at random, leaving the slice unchanged.
///
/// # Returns
/// `None` if `items` is empty.
///
/// # Examples
/// ```rust
/// use rand::{rngs::StdRng, SeedableRng};
/// use ttt_mcts::utils::pick;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let value = pick(&[3, 5, 8], &mut rng).unwrap();
/// assert!([3, 5, 8].contains(&value));
/// assert_eq!(pick::<u8, _>(&[], &mut rng), None);
/// ```
pub fn pick<T: Copy, R: Rng>(items: &[T], rng: &mut R) -> Option<T>{
    if items.is_empty() {
        return None;
    }

    Some(items[rng.random_range(0..items.len())])
}

/// Removes one element chosen uniformly at random and returns it.
///
/// The remaining elements keep their relative order.
///
/// # Returns
/// `None` if `items` is empty.
pub fn take<T, R: Rng>(items: &mut Vec<T>, rng: &mut R) -> Option<T>{
    if items.is_empty() {
        return None;
    }

    let index = rng.random_range(0..items.len());
    Some(items.remove(index))
}

/// Returns the element with the greatest key; among equal maxima the
/// first one encountered wins.
///
/// Keys are compared with [`f64::total_cmp`], so `f64::INFINITY` ranks
/// above every finite score.
pub fn first_max_by_key<T, I, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64
{
    let mut best: Option<(T, f64)> = None;

    for item in items {
        let score = key(&item);

        let better = match &best {
            Some((_, best_score)) => score.total_cmp(best_score) == Ordering::Greater,
            None => true
        };

        if better {
            best = Some((item, score));
        }
    }

    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_take_drains_every_element_once(){
        let mut rng = StdRng::seed_from_u64(42);
        let mut items = vec![1, 2, 3, 4, 5];
        let mut taken = Vec::new();

        while let Some(item) = take(&mut items, &mut rng) {
            taken.push(item);
        }

        taken.sort();
        assert_eq!(taken, vec![1, 2, 3, 4, 5]);
        assert!(items.is_empty());
    }

    #[test]
    fn test_take_keeps_order_of_rest(){
        let mut rng = StdRng::seed_from_u64(1);
        let mut items = vec![1, 2, 3, 4, 5];
        let removed = take(&mut items, &mut rng).unwrap();

        let expected: Vec<_> = (1..=5).filter(|&x| x != removed).collect();
        assert_eq!(items, expected);
    }

    #[test]
    fn test_pick_is_roughly_uniform(){
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0usize; 3];

        for _ in 0..3000 {
            counts[pick(&[0usize, 1, 2], &mut rng).unwrap()] += 1;
        }

        assert!(counts.iter().all(|&c| c > 800 && c < 1200), "{:?}", counts);
    }

    #[test]
    fn test_first_max_by_key_prefers_first(){
        let items = [(0, 1.0), (1, 3.0), (2, 3.0), (3, 2.0)];
        assert_eq!(first_max_by_key(items, |x| x.1).map(|x| x.0), Some(1));

        let items = [(0, 5.0), (1, f64::INFINITY), (2, f64::INFINITY)];
        assert_eq!(first_max_by_key(items, |x| x.1).map(|x| x.0), Some(1));

        assert_eq!(first_max_by_key(Vec::<(u8, f64)>::new(), |x| x.1), None);
    }
}
