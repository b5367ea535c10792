use rayon::prelude::*;

/// Controls how per-row image operations are executed.
///
/// Every output row is computed independently, so all strategies produce
/// bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the caller already runs
    /// many filters concurrently.
    Serial,

    /// Use the global Rayon thread pool to process output rows in parallel.
    #[default]
    ParallelRows,
}

/// Apply `f(row_index, row)` to every row of `dst` using the given strategy.
///
/// # Arguments
///
/// * `dst` - The destination buffer, row-major.
/// * `row_len` - Number of elements in one row (width * channels).
/// * `strategy` - The execution strategy.
/// * `f` - The operation that fills one row.
///
/// A trailing partial row, or a zero `row_len`, is never handed to `f`.
pub fn for_each_row<T, F>(dst: &mut [T], row_len: usize, strategy: ExecutionStrategy, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_rows(strategy: ExecutionStrategy) -> Vec<usize> {
        let mut dst = vec![0; 6];
        for_each_row(&mut dst, 2, strategy, |y, row| {
            row.iter_mut().enumerate().for_each(|(x, v)| *v = y * 10 + x);
        });
        dst
    }

    #[test]
    fn test_for_each_row_serial() {
        assert_eq!(fill_rows(ExecutionStrategy::Serial), vec![0, 1, 10, 11, 20, 21]);
    }

    #[test]
    fn test_for_each_row_parallel() {
        assert_eq!(
            fill_rows(ExecutionStrategy::ParallelRows),
            vec![0, 1, 10, 11, 20, 21]
        );
    }

    #[test]
    fn test_for_each_row_zero_len() {
        let mut dst = vec![1, 2];
        for_each_row(&mut dst, 0, ExecutionStrategy::Serial, |_, row| row.fill(0));
        assert_eq!(dst, vec![1, 2]);
    }

    #[test]
    fn test_default_strategy() {
        assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::ParallelRows);
    }
}
