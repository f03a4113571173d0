//! Error types.
//!
//! Most operations in this crate report absence through [`Option`] rather than
//! an error. [`Error`] covers the few cases where a caller asked for a strict
//! variant of an operation, or broke a construction precondition.

/// Errors reported by the fallible constructors and strict operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A hash table needs at least one bucket to place entries into.
    #[error("hash table requires at least one bucket")]
    ZeroBuckets,

    /// An edge endpoint does not exist in the graph.
    #[error("graph does not contain the requested node")]
    MissingNode,

    /// A node with an equal value already exists in the graph.
    #[error("graph already contains a node with this value")]
    DuplicateNode,
}

/// Result type for the crate.
pub type Result<T> = core::result::Result<T, Error>;
