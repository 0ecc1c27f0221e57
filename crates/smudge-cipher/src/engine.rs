//! The stateless cipher transform.

use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;
use smudge_core::KeyGraph;

use crate::Mode;

/// Options for [`Engine::encode_text`].
///
/// The defaults reproduce the deterministic single-candidate transform:
/// reversible mode, unknown characters kept, no shuffling, one output row,
/// zero offset and stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Drop characters that are not in the layout instead of passing them
    /// through unchanged.
    pub drop_unknown: bool,
    /// The relation to substitute from.
    pub mode: Mode,
    /// Shuffle each character's possibility list before selection. Changes
    /// order only, never membership.
    pub randomize: bool,
    /// Number of candidate rows to produce.
    pub max_outputs: usize,
    /// Base index into each possibility list.
    pub start_offset: usize,
    /// Per-character-position stride added to the selection index.
    pub jump_stride: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            drop_unknown: false,
            mode: Mode::Reversible,
            randomize: false,
            max_outputs: 1,
            start_offset: 0,
            jump_stride: 0,
        }
    }
}

/// The cipher engine: pure functions over an immutable [`KeyGraph`].
///
/// The engine holds no state of its own; every call is a function of its
/// arguments, the borrowed graph and (when shuffling) the supplied random
/// source. Tests pin outcomes by injecting a seeded generator through
/// [`encode_text_seeded`](Self::encode_text_seeded) or the `_with_rng`
/// variants.
///
/// # Examples
///
/// ```
/// use smudge_cipher::{EncodeOptions, Engine, Mode};
/// use smudge_core::{KeyGraph, LayoutSpec};
///
/// let spec = LayoutSpec::from_rows(&["qwertyuiop", "asdfghjkl", "zxcvbnm"]);
/// let graph = KeyGraph::build(&spec)?;
/// let engine = Engine::new(&graph);
///
/// let options = EncodeOptions {
///     drop_unknown: true,
///     ..EncodeOptions::default()
/// };
/// assert_eq!(engine.encode_text("cat", &options), ["cat", "vsy"]);
/// # Ok::<(), smudge_core::LayoutError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Engine<'graph> {
    graph: &'graph KeyGraph,
}

impl<'graph> Engine<'graph> {
    /// Creates an engine over a built graph.
    #[must_use]
    pub const fn new(graph: &'graph KeyGraph) -> Self {
        Self { graph }
    }

    /// Returns the graph this engine operates on.
    #[must_use]
    pub const fn graph(&self) -> &'graph KeyGraph {
        self.graph
    }

    /// Returns the substitution possibilities for one symbol under a mode,
    /// in the fixed 8-direction rendering order.
    ///
    /// A symbol that is not in the layout yields an empty list when
    /// `drop_unknown` is set, and the symbol itself otherwise. Under
    /// [`Mode::Echo`] a known symbol echoes itself.
    #[must_use]
    pub fn possibilities(&self, symbol: char, mode: Mode, drop_unknown: bool) -> Vec<char> {
        let Some(id) = self.graph.lookup(symbol) else {
            return if drop_unknown { Vec::new() } else { vec![symbol] };
        };
        let relation = match mode {
            Mode::Echo => return vec![symbol],
            Mode::Reversible => self.graph.surround(id),
            Mode::Encrypt => self.graph.encrypts_to(id),
            Mode::Decipher => self.graph.deciphers_to(id),
        };
        relation
            .iter()
            .filter_map(|&key| self.graph.key(key).symbol())
            .collect()
    }

    /// Like [`possibilities`](Self::possibilities), with the result order
    /// shuffled by `rng`. Membership is unaffected.
    #[must_use]
    pub fn possibilities_with_rng<R>(
        &self,
        symbol: char,
        mode: Mode,
        drop_unknown: bool,
        rng: &mut R,
    ) -> Vec<char>
    where
        R: Rng + ?Sized,
    {
        let mut possibilities = self.possibilities(symbol, mode, drop_unknown);
        possibilities.shuffle(rng);
        possibilities
    }

    /// Encodes a whole text, drawing entropy from the thread-local random
    /// source when `options.randomize` is set.
    ///
    /// See [`encode_text_with_rng`](Self::encode_text_with_rng) for the
    /// transform itself.
    #[must_use]
    pub fn encode_text(&self, text: &str, options: &EncodeOptions) -> Vec<String> {
        self.encode_text_with_rng(text, options, &mut rand::rng())
    }

    /// Encodes a whole text with a deterministic random source seeded from
    /// `seed`. Identical seeds produce identical output.
    #[must_use]
    pub fn encode_text_seeded(&self, text: &str, options: &EncodeOptions, seed: u64) -> Vec<String> {
        self.encode_text_with_rng(text, options, &mut Pcg64Mcg::seed_from_u64(seed))
    }

    /// Encodes a whole text: normalizes it, computes each character's
    /// possibility list, and assembles `options.max_outputs` candidate rows.
    ///
    /// The text is lower-cased and trimmed; the normalized form is always
    /// the first returned row. [`Mode::Echo`] short-circuits to the
    /// normalized text twice, ignoring every other option. Otherwise
    /// candidate `k` selects, for character position `i`, the entry at
    /// `(start_offset + k + i * jump_stride) mod len` of that character's
    /// possibility list — shuffled once per character beforehand when
    /// `options.randomize` is set, so the arithmetic stays mechanical while
    /// the shuffle supplies the entropy.
    ///
    /// A character whose possibility list is empty (unknown-and-dropped, or
    /// an isolated key in a sparse layout) is dropped from every candidate
    /// row rather than faulting the selection.
    #[must_use]
    pub fn encode_text_with_rng<R>(
        &self,
        text: &str,
        options: &EncodeOptions,
        rng: &mut R,
    ) -> Vec<String>
    where
        R: Rng + ?Sized,
    {
        let normalized = text.trim().to_lowercase();
        if options.mode == Mode::Echo {
            return vec![normalized.clone(), normalized];
        }

        let lists: Vec<Vec<char>> = normalized
            .chars()
            .map(|symbol| {
                if options.randomize {
                    self.possibilities_with_rng(symbol, options.mode, options.drop_unknown, rng)
                } else {
                    self.possibilities(symbol, options.mode, options.drop_unknown)
                }
            })
            .collect();

        let mut rows = Vec::with_capacity(options.max_outputs + 1);
        rows.push(normalized);
        for candidate in 0..options.max_outputs {
            let row = lists
                .iter()
                .enumerate()
                .filter(|(_, list)| !list.is_empty())
                .map(|(position, list)| {
                    let index = options.start_offset + candidate + position * options.jump_stride;
                    list[index % list.len()]
                })
                .collect();
            rows.push(row);
        }
        rows
    }
}
