//! Sample-sort orchestration.
//!
//! Every rank walks the same collective sequence: status broadcast, size
//! broadcast, scatter, sample gather, splitter broadcast, two-phase
//! exchange, size gather, payload gather. The coordinator additionally
//! stages input, resolves splitters, and assembles the output. A rank that
//! skips or reorders a collective deadlocks the whole communicator, which
//! is why staging errors are broadcast as a status code before any data
//! moves: every rank observes the same code and takes the same exit.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use mpi::{
    datatype::{Partition, PartitionMut},
    topology::SimpleCommunicator,
    traits::{Communicator, CommunicatorCollectives, Root},
    Count,
};

use crate::error::{Result, SortError, STATUS_OK};
use crate::plan::{displacements, partition_counts};
use crate::{bucket, exchange, input, merge, sample};

/// Rank that owns file I/O, splitter resolution, and final assembly.
pub const COORDINATOR_RANK: i32 = 0;

/// Sort the integers in `input_path` across all ranks of `world`, writing
/// the labelled unsorted and sorted arrays to `output_path` on the
/// coordinator. Must be called by every rank of the communicator.
pub fn sort_file(world: &SimpleCommunicator, input_path: &Path, output_path: &Path) -> Result<()> {
    if world.rank() == COORDINATOR_RANK {
        Coordinator { world }.run(input_path, output_path)
    } else {
        Worker { world }.run()
    }
}

/// Local compute shared by both roles: sort the scattered slice and draw
/// its representative samples.
fn local_pass(local: &mut [i32], nprocs: usize) -> Vec<i32> {
    merge::local_sort(local);
    sample::select_samples(local, sample::sample_count(nprocs))
}

struct Coordinator<'a> {
    world: &'a SimpleCommunicator,
}

impl Coordinator<'_> {
    fn run(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let nprocs = self.world.size() as usize;
        let root = self.world.process_at_rank(COORDINATOR_RANK);

        // Stage input, then publish the verdict before any data collective.
        let staged = self.stage(input_path, output_path);
        let mut code = match &staged {
            Ok(_) => STATUS_OK,
            Err(e) => e.status(),
        };
        root.broadcast_into(&mut code);
        let array = staged?;

        let mut n = array.len() as Count;
        root.broadcast_into(&mut n);
        info!("sorting {} elements across {} ranks", n, nprocs);

        self.world.barrier();
        let start = Instant::now();

        // Scatter slices to every rank, keeping rank 0's own slice.
        let counts = partition_counts(array.len(), nprocs);
        let displs = displacements(&counts);
        let mut local = vec![0i32; counts[COORDINATOR_RANK as usize] as usize];
        {
            let partition = Partition::new(&array[..], &counts[..], &displs[..]);
            root.scatter_varcount_into_root(&partition, &mut local[..]);
        }
        drop(array);

        let samples = local_pass(&mut local, nprocs);

        // Pool every rank's samples and publish the splitter vector.
        let mut all_ks = vec![0 as Count; nprocs];
        root.gather_into_root(&(samples.len() as Count), &mut all_ks[..]);

        let sample_displs = displacements(&all_ks);
        let mut pooled = vec![0i32; all_ks.iter().sum::<Count>() as usize];
        {
            let mut partition = PartitionMut::new(&mut pooled[..], &all_ks[..], &sample_displs[..]);
            root.gather_varcount_into_root(&samples[..], &mut partition);
        }

        let mut splitters = sample::resolve_splitters(pooled, nprocs);
        root.broadcast_into(&mut splitters[..]);
        debug!("splitters: {:?}", splitters);

        let buckets = bucket::partition(&local, &splitters);
        drop(local);
        let (received, run_lens) = exchange::exchange(self.world, buckets)?;
        let merged = merge::merge_sorted_runs(&received, &run_lens);

        // Gather final slice sizes, then the slices themselves, in rank order.
        let mut all_lens = vec![0 as Count; nprocs];
        root.gather_into_root(&(merged.len() as Count), &mut all_lens[..]);

        let final_displs = displacements(&all_lens);
        let gathered = all_lens.iter().sum::<Count>() as usize;
        let mut sorted = vec![0i32; gathered];
        {
            let mut partition = PartitionMut::new(&mut sorted[..], &all_lens[..], &final_displs[..]);
            root.gather_varcount_into_root(&merged[..], &mut partition);
        }

        self.world.barrier();

        // Workers are past their last collective by now, so failing here
        // cannot strand anyone. A size drift at this point means the
        // multiset invariant broke somewhere upstream.
        if gathered != n as usize {
            return Err(SortError::Protocol {
                sent: n as i64,
                received: gathered as i64,
            });
        }
        println!(
            "Sample sort execution time: {} ms",
            start.elapsed().as_millis()
        );

        input::append_sorted(output_path, &sorted)
    }

    /// Read the input array and record its pre-sort form in the output
    /// file. Everything here happens before the first collective.
    fn stage(&self, input_path: &Path, output_path: &Path) -> Result<Vec<i32>> {
        let array = input::read_array(input_path)?;
        if array.is_empty() {
            return Err(SortError::EmptyInput);
        }
        info!("read {} elements from {}", array.len(), input_path.display());
        input::write_unsorted(output_path, &array)?;
        Ok(array)
    }
}

struct Worker<'a> {
    world: &'a SimpleCommunicator,
}

impl Worker<'_> {
    fn run(&self) -> Result<()> {
        let nprocs = self.world.size() as usize;
        let rank = self.world.rank();
        let root = self.world.process_at_rank(COORDINATOR_RANK);

        let mut code = STATUS_OK;
        root.broadcast_into(&mut code);
        if code != STATUS_OK {
            return Err(SortError::Aborted { status: code });
        }

        let mut n: Count = 0;
        root.broadcast_into(&mut n);

        self.world.barrier();

        let counts = partition_counts(n as usize, nprocs);
        let mut local = vec![0i32; counts[rank as usize] as usize];
        root.scatter_varcount_into(&mut local[..]);

        let samples = local_pass(&mut local, nprocs);

        root.gather_into(&(samples.len() as Count));
        root.gather_varcount_into(&samples[..]);

        let mut splitters = vec![0i32; nprocs];
        root.broadcast_into(&mut splitters[..]);

        let buckets = bucket::partition(&local, &splitters);
        drop(local);
        let (received, run_lens) = exchange::exchange(self.world, buckets)?;
        let merged = merge::merge_sorted_runs(&received, &run_lens);
        debug!("rank {}: holds {} elements after merge", rank, merged.len());

        root.gather_into(&(merged.len() as Count));
        root.gather_varcount_into(&merged[..]);

        self.world.barrier();
        Ok(())
    }
}
