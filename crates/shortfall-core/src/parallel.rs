//! Conditional parallel iteration.
//!
//! Portfolios are mutually independent, so the batch runner can fan out one
//! task per portfolio. Parallelism is used only when the `parallel` feature
//! is enabled, the config allows it, and the batch is large enough for the
//! thread overhead to pay off.

use crate::types::RiskConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The item count reaches `config.parallel_threshold`
///
/// # Example
///
/// ```ignore
/// let reports = maybe_parallel_map(&entries, &config, |(id, series)| run(id, series));
/// ```
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &RiskConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_map() {
        let config = RiskConfig::sequential();
        let items = vec![1, 2, 3];
        let doubled: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(doubled, vec![2, 4, 6]);
    }

    #[test]
    fn test_map_preserves_order() {
        let config = RiskConfig::new().with_threshold(1);
        let items: Vec<usize> = (0..64).collect();
        let mapped: Vec<usize> = maybe_parallel_map(&items, &config, |x| x + 1);
        assert_eq!(mapped, (1..=64).collect::<Vec<_>>());
    }
}
