use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::error;
use mpi::traits::Communicator;

use distsort::engine;
use distsort::error::STATUS_OK;

/// Distributed sample sort over MPI.
///
/// Rank 0 reads the input file, the array is sorted cooperatively by all
/// ranks, and rank 0 writes the labelled unsorted and sorted arrays to the
/// output file. Launch with e.g. `mpirun -n 4 distsort input.txt output.txt`.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Input file of whitespace-separated integers
    input: PathBuf,
    /// Output file receiving the unsorted and sorted arrays
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let universe = mpi::initialize().expect("failed to initialize MPI");
    let world = universe.world();

    let status = match engine::sort_file(&world, &args.input, &args.output) {
        Ok(()) => STATUS_OK,
        Err(e) => {
            // One readable message, from the rank that knows the details.
            if world.rank() == engine::COORDINATOR_RANK {
                error!("{}", e);
                eprintln!("distsort: {}", e);
            }
            e.status()
        }
    };

    // Error paths are symmetric across ranks, so everyone reaches finalize.
    drop(world);
    drop(universe);
    if status != STATUS_OK {
        exit(status);
    }
}
