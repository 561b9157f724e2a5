//! Variable-size all-to-all exchange of bucketed data.

use log::debug;
use mpi::{
    collective::SystemOperation,
    datatype::{Partition, PartitionMut},
    topology::SimpleCommunicator,
    traits::{Communicator, CommunicatorCollectives},
    Count,
};

use crate::bucket::Buckets;
use crate::error::{Result, SortError};
use crate::plan::{displacements, ExchangePlan};

/// Move every bucket to its destination rank in two collective rounds:
/// first the count row, so each rank learns how much it will receive from
/// every peer, then the payload itself through a varcount all-to-all.
///
/// Returns the received elements, a concatenation of one sorted run per
/// source rank in rank order, together with the run lengths. The old local
/// partition is consumed; ownership of the data moves wholesale.
///
/// Between the two rounds every rank contributes its send volume, receive
/// volume, and receive-buffer allocation outcome to one all-reduce. The
/// reduced vector is identical everywhere, so a volume disagreement
/// (the multiset invariant broke, [`SortError::Protocol`]) or an exhausted
/// rank ([`SortError::AllocationFailure`]) makes every rank take the same
/// early error before anyone enters the payload collective; nobody is left
/// blocking on an unmatched call, and the damage of driving the varcount
/// round with inconsistent counts never happens.
pub fn exchange(world: &SimpleCommunicator, buckets: Buckets) -> Result<(Vec<i32>, Vec<Count>)> {
    let nprocs = world.size() as usize;
    debug_assert_eq!(buckets.counts.len(), nprocs);

    let mut recv_counts = vec![0 as Count; nprocs];
    world.all_to_all_into(&buckets.counts, &mut recv_counts);

    let plan = ExchangePlan {
        recv_displs: displacements(&recv_counts),
        send_counts: buckets.counts,
        send_displs: buckets.displs,
        recv_counts,
    };

    let total = plan.total_recv();
    let mut received: Vec<i32> = Vec::new();
    let alloc_failed = received.try_reserve_exact(total).is_err();

    let local = [
        plan.total_send() as i64,
        total as i64,
        if alloc_failed { total as i64 } else { 0 },
    ];
    let mut global = [0i64; 3];
    world.all_reduce_into(&local[..], &mut global[..], SystemOperation::sum());
    exchange_verdict(global)?;
    received.resize(total, 0);

    {
        let send = Partition::new(
            &buckets.payload[..],
            &plan.send_counts[..],
            &plan.send_displs[..],
        );
        let mut recv = PartitionMut::new(
            &mut received[..],
            &plan.recv_counts[..],
            &plan.recv_displs[..],
        );
        world.all_to_all_varcount_into(&send, &mut recv);
    }

    debug!(
        "rank {}: exchanged {} out, {} in",
        world.rank(),
        plan.total_send(),
        total
    );

    Ok((received, plan.recv_counts))
}

/// Decide whether the payload round may proceed, from the reduced
/// `[sent, to_receive, allocation_shortfall]` vector. Every rank holds the
/// same vector, so every rank reaches the same decision.
fn exchange_verdict(global: [i64; 3]) -> Result<()> {
    if global[0] != global[1] {
        return Err(SortError::Protocol {
            sent: global[0],
            received: global[1],
        });
    }
    if global[2] > 0 {
        return Err(SortError::AllocationFailure(global[2] as usize));
    }
    Ok(())
}
