//! Flat-file input staging and labelled result output, plus random data
//! generation for the parallel test driver. Only the coordinator touches
//! the filesystem.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use itertools::Itertools;
use rand::Rng;

use crate::error::{Result, SortError};

/// Read a whitespace-separated integer array, stopping at the first token
/// that is not an integer. A missing or unopenable file is an error; an
/// empty array is not, and is diagnosed by the engine instead.
pub fn read_array(path: &Path) -> Result<Vec<i32>> {
    let contents = fs::read_to_string(path).map_err(|source| SortError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .split_whitespace()
        .map_while(|tok| tok.parse().ok())
        .collect())
}

/// Write the pre-sort array under its label, truncating any previous file.
pub fn write_unsorted(path: &Path, array: &[i32]) -> Result<()> {
    write_labelled(path, "Unsorted array", array, false)
}

/// Append the post-sort array under its label.
pub fn append_sorted(path: &Path, array: &[i32]) -> Result<()> {
    write_labelled(path, "Sorted array", array, true)
}

fn write_labelled(path: &Path, label: &str, array: &[i32], append: bool) -> Result<()> {
    let unwritable = |source| SortError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(append)
        .write(true)
        .truncate(!append)
        .open(path)
        .map_err(unwritable)?;

    writeln!(file, "{}: {}", label, array.iter().join(" ")).map_err(unwritable)
}

/// Generate `nelems` uniform random values in `[0, bound)`, for testing.
pub fn random(nelems: usize, bound: i32) -> Vec<i32> {
    let mut rng = rand::thread_rng();
    (0..nelems).map(|_| rng.gen_range(0..bound)).collect()
}
