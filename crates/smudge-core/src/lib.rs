//! Core data structures for the smudge keyboard cipher.
//!
//! This crate builds the immutable keyboard adjacency graph that every
//! cipher operation runs against. A layout definition ([`LayoutSpec`]) is
//! turned into a [`KeyGraph`]: a padded, row-major arena of [`Key`] cells
//! whose rows are horizontal rings and whose columns are non-wrapping
//! vertical chains, plus three derived neighbor relations per key:
//!
//! - *deciphers-to* — all non-blank keys among the eight directed neighbors,
//!   in the fixed counterclockwise order of [`Direction::ALL`];
//! - *encrypts-to* — the exact inverse relation;
//! - *surround* — the symmetric subset, where both keys list each other.
//!
//! Construction is fallible ([`LayoutError`]): duplicated symbols and
//! insufficient alphabet coverage abort the build. The graph is never
//! mutated after construction.
//!
//! # Examples
//!
//! ```
//! use smudge_core::{KeyGraph, LayoutSpec};
//!
//! let spec = LayoutSpec::from_rows(&["qwertyuiop", "asdfghjkl", "zxcvbnm"]);
//! let graph = KeyGraph::build(&spec)?;
//!
//! let a = graph.lookup('a').unwrap();
//! assert_eq!(graph.symbols(graph.surround(a)), "swqplzx");
//! assert!(graph.surround(a).len() <= graph.deciphers_to(a).len());
//! # Ok::<(), smudge_core::LayoutError>(())
//! ```

pub mod direction;
pub mod graph;
pub mod key;
pub mod layout;

// Re-export commonly used types
pub use self::{
    direction::Direction,
    graph::{KeyGraph, NeighborList},
    key::{Key, KeyId},
    layout::{LayoutError, LayoutSpec},
};
