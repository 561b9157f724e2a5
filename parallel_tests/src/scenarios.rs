//! End-to-end sort scenarios. Every rank enters every scenario; only the
//! coordinator touches the filesystem and checks results, mirroring how
//! the engine divides responsibility.

use std::fs;
use std::path::PathBuf;

use mpi::topology::SimpleCommunicator;
use mpi::traits::{Communicator, CommunicatorCollectives};

use distsort::engine::{self, COORDINATOR_RANK};
use distsort::error::SortError;
use distsort::input;

fn scratch(name: &str) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir();
    (
        dir.join(format!("distsort-{}-in.txt", name)),
        dir.join(format!("distsort-{}-out.txt", name)),
    )
}

/// Run one full sort pass over `data`. Returns the sorted array parsed
/// back out of the output file on the coordinator, `None` elsewhere.
fn run_sort(world: &SimpleCommunicator, name: &str, data: &[i32]) -> Option<Vec<i32>> {
    let (input_path, output_path) = scratch(name);
    let at_root = world.rank() == COORDINATOR_RANK;

    if at_root {
        let line: Vec<String> = data.iter().map(|x| x.to_string()).collect();
        fs::write(&input_path, line.join(" ")).unwrap();
    }

    engine::sort_file(world, &input_path, &output_path).unwrap();

    if at_root {
        let contents = fs::read_to_string(&output_path).unwrap();
        let sorted_line = contents
            .lines()
            .find_map(|l| l.strip_prefix("Sorted array: "))
            .expect("output file is missing the sorted line");
        let sorted = sorted_line
            .split_whitespace()
            .map(|t| t.parse().unwrap())
            .collect();
        fs::remove_file(&input_path).unwrap();
        fs::remove_file(&output_path).unwrap();
        Some(sorted)
    } else {
        None
    }
}

pub fn test_fixture(world: &SimpleCommunicator) {
    let data = [423, 7, 21, 8, 184, 688, 0, 245];
    if let Some(sorted) = run_sort(world, "fixture", &data) {
        assert_eq!(sorted, vec![0, 7, 8, 21, 184, 245, 423, 688]);
        println!("test_fixture ... ok");
    }
}

pub fn test_random_sort(world: &SimpleCommunicator) {
    let data = if world.rank() == COORDINATOR_RANK {
        input::random(10_000, 1_000)
    } else {
        Vec::new()
    };

    if let Some(sorted) = run_sort(world, "random", &data) {
        let mut expected = data;
        expected.sort_unstable();
        assert_eq!(sorted, expected);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        println!("test_random_sort ... ok");
    }
}

pub fn test_all_duplicates(world: &SimpleCommunicator) {
    if let Some(sorted) = run_sort(world, "duplicates", &[5, 5, 5, 5]) {
        // No element may be dropped or duplicated across a splitter tie.
        assert_eq!(sorted, vec![5, 5, 5, 5]);
        println!("test_all_duplicates ... ok");
    }
}

pub fn test_single_element(world: &SimpleCommunicator) {
    if let Some(sorted) = run_sort(world, "single", &[42]) {
        assert_eq!(sorted, vec![42]);
        println!("test_single_element ... ok");
    }
}

pub fn test_idempotent(world: &SimpleCommunicator) {
    let data: Vec<i32> = (0..500).collect();
    if let Some(sorted) = run_sort(world, "idempotent", &data) {
        assert_eq!(sorted, data);
        println!("test_idempotent ... ok");
    }
}

/// An empty input must surface the same failure status on every rank,
/// with nobody left hanging on an unmatched collective.
pub fn test_empty_input(world: &SimpleCommunicator) {
    let (input_path, output_path) = scratch("empty");
    let at_root = world.rank() == COORDINATOR_RANK;

    if at_root {
        fs::write(&input_path, "").unwrap();
    }

    let err = engine::sort_file(world, &input_path, &output_path).unwrap_err();
    if at_root {
        assert!(matches!(err, SortError::EmptyInput));
        fs::remove_file(&input_path).unwrap();
    } else {
        assert!(matches!(err, SortError::Aborted { status } if status == SortError::EmptyInput.status()));
    }

    world.barrier();
    if at_root {
        println!("test_empty_input ... ok");
    }
}
