//! The smudge cipher transform.
//!
//! This crate implements the stateless encode/decode engine over a built
//! [`smudge_core::KeyGraph`]. Each character of a text is replaced by one of
//! its keyboard neighbors; which neighbors are eligible is selected by a
//! [`Mode`], and which of them is picked is driven by deterministic index
//! arithmetic, optionally preceded by a per-character shuffle from an
//! injectable random source.
//!
//! # Examples
//!
//! ```
//! use smudge_cipher::{EncodeOptions, Engine, Mode};
//! use smudge_core::{KeyGraph, LayoutSpec};
//!
//! let spec = LayoutSpec::from_rows(&["qwertyuiop", "asdfghjkl", "zxcvbnm"]);
//! let graph = KeyGraph::build(&spec)?;
//! let engine = Engine::new(&graph);
//!
//! // Deterministic: always the first surround entry of each character.
//! let rows = engine.encode_text("cat", &EncodeOptions {
//!     drop_unknown: true,
//!     ..EncodeOptions::default()
//! });
//! assert_eq!(rows, ["cat", "vsy"]);
//!
//! // Seeded: reproducible randomized candidates.
//! let rows = engine.encode_text_seeded(
//!     "cat",
//!     &EncodeOptions {
//!         drop_unknown: true,
//!         randomize: true,
//!         max_outputs: 3,
//!         ..EncodeOptions::default()
//!     },
//!     42,
//! );
//! assert_eq!(rows.len(), 4);
//! # Ok::<(), smudge_core::LayoutError>(())
//! ```

pub mod engine;
pub mod mode;

// Re-export commonly used types
pub use self::{
    engine::{EncodeOptions, Engine},
    mode::Mode,
};
