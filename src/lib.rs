//! Data Structures & Algorithms Catalog
//!
//! Self-contained implementations of the classic containers, built on one
//! another rather than on `std::collections`. The centrepieces are a
//! self-balancing [`AvlTree`](collections::AvlTree) and a weighted
//! [`Graph`](collections::Graph) with depth-first and breadth-first
//! traversal, cycle detection and Dijkstra shortest paths.
//!
//! Nothing is logged unless the caller installs a [`tracing`] subscriber.

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod collections;
pub mod error;

/// Data Structures & Algorithms Prelude
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::collections::prelude::*;

    #[doc(no_inline)]
    pub use crate::error::{Error, Result};
}
