//! Error types for the sort engine.

use std::{
    error::Error,
    fmt::{Display, Formatter},
    io,
    path::PathBuf,
    result,
};

/// Result type alias for sort engine operations.
pub type Result<T> = result::Result<T, SortError>;

/// Status code broadcast by the coordinator when input staging succeeds.
pub const STATUS_OK: i32 = 0;

/// Errors raised while staging input, exchanging data, or writing results.
#[derive(Debug)]
pub enum SortError {
    /// Input file missing or unopenable.
    InputUnreadable { path: PathBuf, source: io::Error },
    /// Output file could not be created or written.
    OutputUnwritable { path: PathBuf, source: io::Error },
    /// Input file parsed to zero elements.
    EmptyInput,
    /// Memory exhaustion while building an exchange buffer of this many elements.
    AllocationFailure(usize),
    /// Send and receive volumes disagree across the communicator, which
    /// means an element was created, lost, or duplicated. A correctness
    /// bug, never a transient condition.
    Protocol { sent: i64, received: i64 },
    /// Observed on non-coordinator ranks when the coordinator broadcasts a
    /// failure status before the first data collective.
    Aborted { status: i32 },
}

impl SortError {
    /// Wire code for the pre-scatter status broadcast, also used as the
    /// process exit code so every rank terminates identically.
    pub fn status(&self) -> i32 {
        match self {
            SortError::InputUnreadable { .. } => 1,
            SortError::EmptyInput => 2,
            SortError::AllocationFailure(_) => 3,
            SortError::Protocol { .. } => 4,
            SortError::OutputUnwritable { .. } => 5,
            SortError::Aborted { status } => *status,
        }
    }
}

impl Display for SortError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            SortError::InputUnreadable { path, source } => {
                write!(f, "cannot read input file {}: {}", path.display(), source)
            }
            SortError::OutputUnwritable { path, source } => {
                write!(f, "cannot write output file {}: {}", path.display(), source)
            }
            SortError::EmptyInput => write!(f, "input contains no elements"),
            SortError::AllocationFailure(nelems) => {
                write!(f, "failed to allocate exchange buffer for {} elements", nelems)
            }
            SortError::Protocol { sent, received } => write!(
                f,
                "all-to-all volume mismatch: {} elements sent, {} received",
                sent, received
            ),
            SortError::Aborted { status } => {
                write!(f, "run aborted by coordinator (status {})", status)
            }
        }
    }
}

impl Error for SortError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SortError::InputUnreadable { source, .. }
            | SortError::OutputUnwritable { source, .. } => Some(source),
            _ => None,
        }
    }
}
