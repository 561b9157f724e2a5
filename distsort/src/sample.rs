//! Representative sampling and global splitter resolution.
//!
//! Each rank contributes a handful of evenly spaced values from its sorted
//! partition; the coordinator merges them and derives one splitter per rank.
//! The final splitter is always a sentinel greater than any real element, so
//! the last bucket is closed and no destination index can fall out of range.

/// Sentinel terminating the splitter vector; compares `>=` every element.
pub const SPLITTER_SENTINEL: i32 = i32::MAX;

/// Samples requested per rank: `max(1, ceil(log2(nprocs)))`. Keeps splitter
/// resolution cheap at the coordinator while still giving decent balance.
pub fn sample_count(nprocs: usize) -> usize {
    debug_assert!(nprocs > 0);
    (nprocs.next_power_of_two().trailing_zeros() as usize).max(1)
}

/// Pick `nsamples` values at regular stride from a sorted partition. When
/// the partition is smaller than the request, every element is a sample;
/// an empty partition contributes nothing.
pub fn select_samples(sorted: &[i32], nsamples: usize) -> Vec<i32> {
    let n = sorted.len();
    let k = nsamples.min(n);
    (0..k).map(|i| sorted[(i + 1) * n / (k + 1)]).collect()
}

/// Derive the splitter vector from the pooled samples of all ranks:
/// splitter `j` is the sample at position `(j + 1) * nsamples / nprocs`,
/// and the vector is closed with [`SPLITTER_SENTINEL`]. When no rank had
/// anything to sample every splitter collapses to the sentinel and all
/// data routes to rank 0.
pub fn resolve_splitters(mut samples: Vec<i32>, nprocs: usize) -> Vec<i32> {
    samples.sort_unstable();
    let nsamples = samples.len();

    let mut splitters = Vec::with_capacity(nprocs);
    for j in 0..nprocs - 1 {
        if nsamples == 0 {
            splitters.push(SPLITTER_SENTINEL);
        } else {
            splitters.push(samples[(j + 1) * nsamples / nprocs]);
        }
    }
    splitters.push(SPLITTER_SENTINEL);
    splitters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(1), 1);
        assert_eq!(sample_count(2), 1);
        assert_eq!(sample_count(4), 2);
        assert_eq!(sample_count(5), 3);
        assert_eq!(sample_count(8), 3);
    }

    #[test]
    fn test_select_samples_stride() {
        let sorted: Vec<i32> = (0..12).collect();
        // stride n / (k + 1) with n = 12, k = 3
        assert_eq!(select_samples(&sorted, 3), vec![3, 6, 9]);
    }

    #[test]
    fn test_select_samples_small_partition() {
        let sorted = vec![7, 9];
        let samples = select_samples(&sorted, 5);
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|s| sorted.contains(s)));
    }

    #[test]
    fn test_select_samples_empty() {
        assert!(select_samples(&[], 4).is_empty());
    }

    #[test]
    fn test_select_samples_single() {
        assert_eq!(select_samples(&[42], 3), vec![42]);
    }

    #[test]
    fn test_resolve_splitters() {
        let samples = vec![10, 2, 30, 4, 50, 6, 70, 8];
        let splitters = resolve_splitters(samples, 4);
        // sorted: [2, 4, 6, 8, 10, 30, 50, 70]; positions 2, 4, 6
        assert_eq!(splitters, vec![6, 10, 50, SPLITTER_SENTINEL]);
    }

    #[test]
    fn test_resolve_splitters_monotonic() {
        let samples = vec![9, 1, 1, 3, 3, 3, 7];
        let splitters = resolve_splitters(samples, 5);
        assert_eq!(splitters.len(), 5);
        assert!(splitters.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*splitters.last().unwrap(), SPLITTER_SENTINEL);
    }

    #[test]
    fn test_resolve_splitters_no_samples() {
        let splitters = resolve_splitters(Vec::new(), 3);
        assert_eq!(splitters, vec![SPLITTER_SENTINEL; 3]);
    }

    #[test]
    fn test_resolve_splitters_single_rank() {
        assert_eq!(resolve_splitters(vec![5, 1], 1), vec![SPLITTER_SENTINEL]);
    }
}
