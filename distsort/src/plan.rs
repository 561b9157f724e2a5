//! Partition planning: who owns how much of the global array, and the
//! per-pass bookkeeping for a variable-size all-to-all exchange.

use itertools::Itertools;
use mpi::Count;

/// Number of elements owned by each rank for a global array of `total`
/// elements split across `nprocs` ranks. The remainder goes to the
/// low-ranked processes, one element each, so counts always sum to `total`.
pub fn partition_counts(total: usize, nprocs: usize) -> Vec<Count> {
    debug_assert!(nprocs > 0);
    let base = total / nprocs;
    let rem = total % nprocs;
    (0..nprocs)
        .map(|rank| (base + usize::from(rank < rem)) as Count)
        .collect()
}

/// Exclusive prefix sum of `counts`, the displacement vector expected by
/// every varcount collective.
pub fn displacements(counts: &[Count]) -> Vec<Count> {
    counts
        .iter()
        .scan(0, |acc, &x| {
            let tmp = *acc;
            *acc += x;
            Some(tmp)
        })
        .collect_vec()
}

/// Send/receive counts and offsets for one exchange pass. Built fresh from
/// the count round every pass and discarded once the payload has moved.
#[derive(Debug)]
pub struct ExchangePlan {
    pub send_counts: Vec<Count>,
    pub send_displs: Vec<Count>,
    pub recv_counts: Vec<Count>,
    pub recv_displs: Vec<Count>,
}

impl ExchangePlan {
    pub fn total_send(&self) -> usize {
        self.send_counts.iter().sum::<Count>() as usize
    }

    pub fn total_recv(&self) -> usize {
        self.recv_counts.iter().sum::<Count>() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_counts_even() {
        let counts = partition_counts(12, 4);
        assert_eq!(counts, vec![3, 3, 3, 3]);
    }

    #[test]
    fn test_partition_counts_remainder_to_low_ranks() {
        let counts = partition_counts(10, 4);
        assert_eq!(counts, vec![3, 3, 2, 2]);
        assert_eq!(counts.iter().sum::<Count>(), 10);
    }

    #[test]
    fn test_partition_counts_more_ranks_than_elements() {
        let counts = partition_counts(2, 5);
        assert_eq!(counts, vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_partition_counts_empty() {
        let counts = partition_counts(0, 3);
        assert_eq!(counts, vec![0, 0, 0]);
    }

    #[test]
    fn test_partition_counts_sum_consistent() {
        for total in 0..50 {
            for nprocs in 1..9 {
                let counts = partition_counts(total, nprocs);
                assert_eq!(counts.iter().sum::<Count>() as usize, total);
            }
        }
    }

    #[test]
    fn test_displacements() {
        assert_eq!(displacements(&[3, 0, 2, 5]), vec![0, 3, 3, 5]);
        assert_eq!(displacements(&[]), Vec::<Count>::new());
    }

    #[test]
    fn test_exchange_plan_totals() {
        let send_counts = vec![2, 0, 4];
        let recv_counts = vec![1, 1, 1];
        let plan = ExchangePlan {
            send_displs: displacements(&send_counts),
            recv_displs: displacements(&recv_counts),
            send_counts,
            recv_counts,
        };
        assert_eq!(plan.total_send(), 6);
        assert_eq!(plan.total_recv(), 3);
        assert_eq!(plan.send_displs, vec![0, 2, 2]);
        assert_eq!(plan.recv_displs, vec![0, 1, 2]);
    }
}
