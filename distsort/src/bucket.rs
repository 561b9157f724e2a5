//! Routing of sorted local data into per-destination buckets.

use mpi::Count;

use crate::plan::displacements;

/// Local data regrouped by destination rank: `payload` holds all elements
/// for rank 0 first, then rank 1, and so on; `counts[d]` and `displs[d]`
/// bound rank `d`'s slice of it.
#[derive(Debug)]
pub struct Buckets {
    pub counts: Vec<Count>,
    pub displs: Vec<Count>,
    pub payload: Vec<i32>,
}

/// Assign every element of a sorted partition to the smallest destination
/// `d` with `element <= splitters[d]`. Ties route to the lower-indexed
/// bucket, so duplicates never straddle a splitter inconsistently.
///
/// Because the input is sorted, bucket `d` is a contiguous slice and the
/// whole assignment reduces to finding the cut point below each splitter;
/// the payload is the input itself. The terminal sentinel closes the last
/// bucket, so no element can demand a destination `>= splitters.len()`.
pub fn partition(sorted: &[i32], splitters: &[i32]) -> Buckets {
    let nprocs = splitters.len();
    let mut counts = vec![0 as Count; nprocs];

    let mut start = 0usize;
    for (d, &splitter) in splitters.iter().enumerate() {
        let end = if d + 1 == nprocs {
            sorted.len()
        } else {
            start + sorted[start..].partition_point(|&x| x <= splitter)
        };
        counts[d] = (end - start) as Count;
        start = end;
    }
    debug_assert_eq!(counts.iter().sum::<Count>() as usize, sorted.len());

    Buckets {
        displs: displacements(&counts),
        counts,
        payload: sorted.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SPLITTER_SENTINEL;

    #[test]
    fn test_partition_basic() {
        let sorted = vec![0, 7, 8, 21, 184, 245, 423, 688];
        let splitters = vec![8, 184, 423, SPLITTER_SENTINEL];
        let buckets = partition(&sorted, &splitters);
        assert_eq!(buckets.counts, vec![3, 2, 2, 1]);
        assert_eq!(buckets.displs, vec![0, 3, 5, 7]);
        assert_eq!(buckets.payload, sorted);
    }

    #[test]
    fn test_partition_ties_go_low() {
        // Elements equal to a splitter land in that splitter's bucket,
        // never the one above it.
        let sorted = vec![5, 5, 5, 5];
        let splitters = vec![5, SPLITTER_SENTINEL];
        let buckets = partition(&sorted, &splitters);
        assert_eq!(buckets.counts, vec![4, 0]);
    }

    #[test]
    fn test_partition_equal_splitters() {
        let sorted = vec![1, 3, 3, 3, 9];
        let splitters = vec![3, 3, SPLITTER_SENTINEL];
        let buckets = partition(&sorted, &splitters);
        // The repeated splitter's second bucket stays empty.
        assert_eq!(buckets.counts, vec![4, 0, 1]);
    }

    #[test]
    fn test_partition_all_sentinel_routes_to_zero() {
        let sorted = vec![4, 8, 15];
        let splitters = vec![SPLITTER_SENTINEL; 3];
        let buckets = partition(&sorted, &splitters);
        assert_eq!(buckets.counts, vec![3, 0, 0]);
    }

    #[test]
    fn test_partition_empty_input() {
        let buckets = partition(&[], &[10, SPLITTER_SENTINEL]);
        assert_eq!(buckets.counts, vec![0, 0]);
        assert!(buckets.payload.is_empty());
    }

    #[test]
    fn test_partition_extreme_values() {
        let sorted = vec![i32::MIN, -1, 0, i32::MAX];
        let splitters = vec![0, SPLITTER_SENTINEL];
        let buckets = partition(&sorted, &splitters);
        assert_eq!(buckets.counts, vec![3, 1]);
    }

    #[test]
    fn test_partition_counts_cover_input() {
        let sorted: Vec<i32> = (0..100).map(|i| i * 3 % 91).collect();
        let mut sorted = sorted;
        sorted.sort_unstable();
        let splitters = vec![20, 40, 60, SPLITTER_SENTINEL];
        let buckets = partition(&sorted, &splitters);
        assert_eq!(buckets.counts.iter().sum::<Count>() as usize, sorted.len());
    }
}
