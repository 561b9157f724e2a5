//! Distributed sorting in Rust
//!
//! Sample sort parallelised over MPI: every rank sorts a private slice of
//! the global array, contributes a few representative samples, and the
//! pooled samples yield one splitter per rank. A variable-size all-to-all
//! then routes each element to the rank owning its value range, after
//! which a local merge leaves the array globally ordered across ranks.
//!
//! # References
//! [1] Frazer, W. D., and A. C. McKellar. "Samplesort: A sampling approach
//! to minimal storage tree sorting." Journal of the ACM 17.3 (1970): 496-507.
//!
//! [2] Blelloch, Guy E., et al. "A comparison of sorting algorithms for the
//! connection machine CM-2." Proceedings of the third annual ACM symposium
//! on Parallel algorithms and architectures (1991).

/// Route sorted local data into per-destination buckets.
pub mod bucket;

/// Error types for the sort engine.
pub mod error;

/// Sample-sort orchestration across MPI ranks.
pub mod engine;

/// Variable-size all-to-all exchange.
pub mod exchange;

/// File staging, result output, and test-data generation.
pub mod input;

/// Local sorting and run merging.
pub mod merge;

/// Partition planning and exchange bookkeeping.
pub mod plan;

/// Representative sampling and splitter resolution.
pub mod sample;
