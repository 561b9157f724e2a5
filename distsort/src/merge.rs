//! Local sorting and run merging.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use mpi::Count;

/// Sort a local partition in place, non-decreasing.
///
/// Backed by the standard introspective sort, which keeps an O(n log n)
/// worst case on sorted and reverse-sorted input. Zero- and one-element
/// partitions are no-ops.
pub fn local_sort(data: &mut [i32]) {
    data.sort_unstable();
}

/// Merge the concatenation of per-source sorted runs left behind by the
/// exchange into one sorted partition. `run_lens` holds one length per
/// source rank, in rank order; lengths of zero are permitted.
///
/// A k-way heap merge, O(n log k), cheaper than re-sorting the whole
/// buffer from scratch.
pub fn merge_sorted_runs(buf: &[i32], run_lens: &[Count]) -> Vec<i32> {
    debug_assert_eq!(run_lens.iter().sum::<Count>() as usize, buf.len());

    // (cursor, end) per non-empty run
    let mut cursors = Vec::with_capacity(run_lens.len());
    let mut start = 0usize;
    for &len in run_lens {
        let end = start + len as usize;
        if len > 0 {
            cursors.push((start, end));
        }
        start = end;
    }

    let mut heap: BinaryHeap<Reverse<(i32, usize)>> = cursors
        .iter()
        .enumerate()
        .map(|(run, &(cursor, _))| Reverse((buf[cursor], run)))
        .collect();

    let mut merged = Vec::with_capacity(buf.len());
    while let Some(Reverse((value, run))) = heap.pop() {
        merged.push(value);
        let (cursor, end) = &mut cursors[run];
        *cursor += 1;
        if *cursor < *end {
            heap.push(Reverse((buf[*cursor], run)));
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_sort() {
        let mut data = vec![423, 7, 21, 8, 184, 688, 0, 245];
        local_sort(&mut data);
        assert_eq!(data, vec![0, 7, 8, 21, 184, 245, 423, 688]);
    }

    #[test]
    fn test_local_sort_degenerate() {
        let mut empty: Vec<i32> = Vec::new();
        local_sort(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![42];
        local_sort(&mut single);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_local_sort_reverse_sorted() {
        let mut data: Vec<i32> = (0..1000).rev().collect();
        local_sort(&mut data);
        let expected: Vec<i32> = (0..1000).collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_merge_sorted_runs() {
        let buf = vec![1, 4, 9, 2, 3, 10, 0, 5];
        let merged = merge_sorted_runs(&buf, &[3, 3, 2]);
        assert_eq!(merged, vec![0, 1, 2, 3, 4, 5, 9, 10]);
    }

    #[test]
    fn test_merge_sorted_runs_with_empty_runs() {
        let buf = vec![5, 6, 1, 8];
        let merged = merge_sorted_runs(&buf, &[0, 2, 0, 2, 0]);
        assert_eq!(merged, vec![1, 5, 6, 8]);
    }

    #[test]
    fn test_merge_sorted_runs_duplicates() {
        let buf = vec![5, 5, 5, 5];
        let merged = merge_sorted_runs(&buf, &[2, 2]);
        assert_eq!(merged, vec![5, 5, 5, 5]);
    }

    #[test]
    fn test_merge_sorted_runs_empty() {
        let merged = merge_sorted_runs(&[], &[0, 0]);
        assert!(merged.is_empty());
    }
}
