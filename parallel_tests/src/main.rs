//! Integration scenarios for the distributed sample sort, launched as
//! `mpirun -n <P> parallel_tests` for any P >= 1.

use mpi::traits::{Communicator, CommunicatorCollectives};

mod scenarios;

fn main() {
    let universe = mpi::initialize().expect("failed to initialize MPI");
    let world = universe.world();

    if world.rank() == 0 {
        println!(
            "Test distributed sample sort across {} ranks:",
            world.size()
        );
    }

    scenarios::test_fixture(&world);
    scenarios::test_random_sort(&world);
    scenarios::test_all_duplicates(&world);
    scenarios::test_single_element(&world);
    scenarios::test_idempotent(&world);
    scenarios::test_empty_input(&world);

    world.barrier();
    if world.rank() == 0 {
        println!("all scenarios passed");
    }
}
