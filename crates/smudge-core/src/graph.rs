//! The keyboard adjacency graph and its derived neighbor relations.

use std::collections::HashMap;

use tinyvec::ArrayVec;

use crate::{
    Direction, Key, KeyId,
    layout::{LayoutError, LayoutSpec},
};

/// A bounded list of neighboring keys.
///
/// Every relation of a key has at most eight entries (one per direction).
/// Degenerate layouts (width-1 or width-2 rings) may list the same key more
/// than once; duplicates are preserved.
pub type NeighborList = ArrayVec<[KeyId; 8]>;

/// The immutable keyboard graph: a padded grid of linked keys plus the
/// derived neighbor relations.
///
/// Built once from a [`LayoutSpec`] and never mutated afterwards. Keys are
/// stored in a flat row-major arena (`id = row * width + col`); all links and
/// relation entries are [`KeyId`] indices into that arena.
///
/// Three relations are precomputed per key:
///
/// - *deciphers-to*: the non-blank entries of the raw 8-direction surround,
///   in the fixed counterclockwise order of [`Direction::ALL`];
/// - *encrypts-to*: the exact inverse relation, populated in a second
///   row-major pass;
/// - *surround*: the symmetric subset of deciphers-to, where both keys list
///   each other.
///
/// # Examples
///
/// ```
/// use smudge_core::{KeyGraph, LayoutSpec};
///
/// let spec = LayoutSpec::from_rows(&["qwertyuiop", "asdfghjkl", "zxcvbnm"]);
/// let graph = KeyGraph::build(&spec)?;
///
/// let c = graph.lookup('c').unwrap();
/// assert_eq!(graph.symbols(graph.surround(c)), "vfdsx");
/// # Ok::<(), smudge_core::LayoutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyGraph {
    keys: Vec<Key>,
    width: usize,
    height: usize,
    letter_index: HashMap<char, KeyId>,
    deciphers_to: Vec<NeighborList>,
    encrypts_to: Vec<NeighborList>,
    surround: Vec<NeighborList>,
    asymmetric: Vec<usize>,
}

impl KeyGraph {
    /// Builds the graph from a layout definition.
    ///
    /// Construction is two-pass: the grid is instantiated, validated and
    /// linked first, then the neighbor relations are derived from the links.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Empty`] for a layout without rows,
    /// [`LayoutError::BlankRow`] for a row without symbols,
    /// [`LayoutError::DuplicateSymbol`] when a symbol repeats, and
    /// [`LayoutError::MissingAlphabetCoverage`] when fewer distinct symbols
    /// are present than `alphabet_check` expects. A surplus of symbols is
    /// only logged as a warning.
    pub fn build(spec: &LayoutSpec) -> Result<Self, LayoutError> {
        if spec.rows.is_empty() {
            return Err(LayoutError::Empty);
        }
        for (row, symbols) in spec.rows.iter().enumerate() {
            if symbols.iter().all(|symbol| symbol.is_whitespace()) {
                return Err(LayoutError::BlankRow { row });
            }
        }

        let height = spec.rows.len();
        let width = spec.rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut graph = Self {
            keys: Vec::with_capacity(width * height),
            width,
            height,
            letter_index: HashMap::new(),
            deciphers_to: Vec::new(),
            encrypts_to: Vec::new(),
            surround: Vec::new(),
            asymmetric: Vec::new(),
        };

        graph.instantiate(spec);
        graph.index_letters(spec.alphabet_check)?;
        graph.link_horizontal(spec);
        graph.link_vertical(spec.reverse);
        graph.derive_relations();
        Ok(graph)
    }

    /// Instantiates one key per grid cell, pads included, in row-major
    /// stored order. For mirrored layouts the pads land on the left of the
    /// stored row (they are appended to the reversed working row and end up
    /// leading once the order is restored).
    fn instantiate(&mut self, spec: &LayoutSpec) {
        for (row, symbols) in spec.rows.iter().enumerate() {
            let len = symbols.len();
            for col in 0..self.width {
                let working = if spec.reverse {
                    self.width - 1 - col
                } else {
                    col
                };
                let symbol = if working < len {
                    let input = if spec.reverse { len - 1 - working } else { working };
                    Some(symbols[input]).filter(|symbol| !symbol.is_whitespace())
                } else {
                    None
                };
                self.keys.push(Key::new(symbol, row, col));
            }
        }
    }

    /// Builds the letter index and runs the coverage checks.
    fn index_letters(&mut self, alphabet_check: usize) -> Result<(), LayoutError> {
        for (index, key) in self.keys.iter().enumerate() {
            let Some(symbol) = key.symbol() else {
                continue;
            };
            if self
                .letter_index
                .insert(symbol, KeyId::new(index))
                .is_some()
            {
                return Err(LayoutError::DuplicateSymbol { symbol });
            }
        }

        let found = self.letter_index.len();
        if alphabet_check > 0 {
            if found < alphabet_check {
                return Err(LayoutError::MissingAlphabetCoverage {
                    expected: alphabet_check,
                    found,
                });
            }
            if found > alphabet_check {
                log::warn!(
                    "layout covers {found} symbols where {alphabet_check} were expected; \
                     extra symbols are accepted"
                );
            }
        }
        Ok(())
    }

    /// Links each row left/right as a ring over its real cells, then hangs
    /// the padding cells off the end: every pad links `left` to its
    /// predecessor and the final pad links `right` back to the row start.
    /// Pads are a spur, not part of the ring; the last real key's `right`
    /// stays on the ring.
    ///
    /// Mirrored layouts run this pass in reversed working order; the
    /// left/right swap that corrects for it happens in
    /// [`link_vertical`](Self::link_vertical).
    fn link_horizontal(&mut self, spec: &LayoutSpec) {
        let width = self.width;
        for (row, symbols) in spec.rows.iter().enumerate() {
            let len = symbols.len();
            let id_at = move |working: usize| {
                let col = if spec.reverse { width - 1 - working } else { working };
                KeyId::new(row * width + col)
            };

            for working in 0..len {
                let id = id_at(working);
                self.keys[id.index()].right = Some(id_at((working + 1) % len));
                self.keys[id.index()].left = Some(id_at((working + len - 1) % len));
            }
            for working in len..width {
                let id = id_at(working);
                self.keys[id.index()].left = Some(id_at(working - 1));
            }
            if len < width {
                let last = id_at(width - 1);
                self.keys[last.index()].right = Some(id_at(0));
            }
        }
    }

    /// Links rows vertically, column-wise over the padded width. Vertical
    /// adjacency does not wrap: the top row has no `up`, the bottom row no
    /// `down`. For mirrored layouts this stage also swaps every key's
    /// left/right pointers, restoring absolute geometry after the reversed
    /// horizontal pass.
    fn link_vertical(&mut self, reverse: bool) {
        for row in 0..self.height - 1 {
            for col in 0..self.width {
                let upper = KeyId::new(row * self.width + col);
                let lower = KeyId::new((row + 1) * self.width + col);
                self.keys[upper.index()].down = Some(lower);
                self.keys[lower.index()].up = Some(upper);
            }
        }
        if reverse {
            for key in &mut self.keys {
                std::mem::swap(&mut key.left, &mut key.right);
            }
        }
    }

    /// Derives deciphers-to, encrypts-to and surround for every key.
    ///
    /// Blank keys keep empty relations: they shape the geometry but never
    /// appear in (or own) a relation list.
    fn derive_relations(&mut self) {
        let len = self.keys.len();

        let mut deciphers_to = vec![NeighborList::new(); len];
        for (index, list) in deciphers_to.iter_mut().enumerate() {
            let id = KeyId::new(index);
            if self.keys[index].is_blank() {
                continue;
            }
            for neighbor in self.raw_surround(id).into_iter().flatten() {
                if !self.keys[neighbor.index()].is_blank() {
                    list.push(neighbor);
                }
            }
        }

        // Second pass, in row-major arena order so the inverse lists come out
        // in a stable, documented order.
        let mut encrypts_to = vec![NeighborList::new(); len];
        for (index, list) in deciphers_to.iter().enumerate() {
            for target in list {
                encrypts_to[target.index()].push(KeyId::new(index));
            }
        }

        let mut surround = vec![NeighborList::new(); len];
        let mut asymmetric = vec![0_usize; len];
        for (index, list) in deciphers_to.iter().enumerate() {
            let id = KeyId::new(index);
            for &neighbor in list {
                if deciphers_to[neighbor.index()].contains(&id) {
                    surround[index].push(neighbor);
                } else {
                    asymmetric[index] += 1;
                }
            }
        }

        self.deciphers_to = deciphers_to;
        self.encrypts_to = encrypts_to;
        self.surround = surround;
        self.asymmetric = asymmetric;
    }

    /// Returns the padded grid width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the key with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    #[must_use]
    pub fn key(&self, id: KeyId) -> &Key {
        &self.keys[id.index()]
    }

    /// Returns the key at a grid position, if the position is on the grid.
    #[must_use]
    pub fn key_at(&self, row: usize, col: usize) -> Option<&Key> {
        (row < self.height && col < self.width).then(|| &self.keys[row * self.width + col])
    }

    /// Iterates over all keys in row-major order, pads included.
    pub fn keys(&self) -> impl Iterator<Item = (KeyId, &Key)> {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, key)| (KeyId::new(index), key))
    }

    /// Looks up the key carrying a symbol.
    #[must_use]
    pub fn lookup(&self, symbol: char) -> Option<KeyId> {
        self.letter_index.get(&symbol).copied()
    }

    /// Returns the number of distinct symbols in the layout.
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.letter_index.len()
    }

    /// Resolves the neighbor of a key in one of the eight directions.
    ///
    /// Diagonals compose the orthogonal links (north-east is the upper
    /// neighbor's right, and so on); a missing intermediate link makes the
    /// diagonal absent too.
    #[must_use]
    pub fn neighbor(&self, id: KeyId, direction: Direction) -> Option<KeyId> {
        let key = self.key(id);
        match direction {
            Direction::Right => key.right,
            Direction::Up => key.up,
            Direction::Left => key.left,
            Direction::Down => key.down,
            Direction::NorthEast => key.up.and_then(|up| self.keys[up.index()].right),
            Direction::NorthWest => key.up.and_then(|up| self.keys[up.index()].left),
            Direction::SouthWest => key.down.and_then(|down| self.keys[down.index()].left),
            Direction::SouthEast => key.down.and_then(|down| self.keys[down.index()].right),
        }
    }

    /// Returns the raw surround of a key: all eight directed neighbor slots
    /// in the fixed order of [`Direction::ALL`], blanks and absences
    /// included.
    #[must_use]
    pub fn raw_surround(&self, id: KeyId) -> [Option<KeyId>; 8] {
        Direction::ALL.map(|direction| self.neighbor(id, direction))
    }

    /// Returns the deciphers-to relation: every non-blank neighbor, in fixed
    /// direction order. Empty for blank keys.
    #[must_use]
    pub fn deciphers_to(&self, id: KeyId) -> &[KeyId] {
        &self.deciphers_to[id.index()]
    }

    /// Returns the encrypts-to relation: every key whose deciphers-to list
    /// contains this key, in row-major order of the listing keys.
    #[must_use]
    pub fn encrypts_to(&self, id: KeyId) -> &[KeyId] {
        &self.encrypts_to[id.index()]
    }

    /// Returns the surround relation: the mutual subset of deciphers-to.
    ///
    /// A neighbor belongs to the surround exactly when both keys list each
    /// other in deciphers-to, which makes the relation symmetric.
    #[must_use]
    pub fn surround(&self, id: KeyId) -> &[KeyId] {
        &self.surround[id.index()]
    }

    /// Returns how many deciphers-to entries of this key were excluded from
    /// its surround for lacking a link back. Diagnostic only; asymmetry is
    /// normal near the padded edge of ragged layouts.
    #[must_use]
    pub fn asymmetric_exclusions(&self, id: KeyId) -> usize {
        self.asymmetric[id.index()]
    }

    /// Renders a sequence of key ids as their symbols.
    ///
    /// Blank keys (which never occur in relation lists) render as `·`.
    #[must_use]
    pub fn symbols<'a, I>(&self, ids: I) -> String
    where
        I: IntoIterator<Item = &'a KeyId>,
    {
        ids.into_iter()
            .map(|&id| self.key(id).symbol().unwrap_or('·'))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
    const QWERTY_MIRRORED_ROWS: [&str; 3] = ["poiuytrewq", "lkjhgfdsa", "mnbvcxz"];
    const ALPHABET: &str = "qwertyuiopasdfghjklzxcvbnm";

    fn qwerty() -> KeyGraph {
        KeyGraph::build(&LayoutSpec::from_rows(&QWERTY_ROWS)).unwrap()
    }

    fn relation(graph: &KeyGraph, symbol: char, pick: fn(&KeyGraph, KeyId) -> &[KeyId]) -> String {
        let id = graph.lookup(symbol).unwrap();
        graph.symbols(pick(graph, id))
    }

    #[test]
    fn test_grid_shape_and_padding() {
        let graph = qwerty();
        assert_eq!(graph.width(), 10);
        assert_eq!(graph.height(), 3);
        assert_eq!(graph.letter_count(), 26);

        // Short rows are padded on the right with blanks.
        assert!(graph.key_at(1, 9).unwrap().is_blank());
        assert!(graph.key_at(2, 7).unwrap().is_blank());
        assert!(graph.key_at(2, 9).unwrap().is_blank());
        assert_eq!(graph.key_at(0, 9).unwrap().symbol(), Some('p'));
        assert!(graph.key_at(3, 0).is_none());
        assert!(graph.key_at(0, 10).is_none());
    }

    #[test]
    fn test_rows_are_rings_with_pad_spur() {
        let graph = qwerty();
        let a = graph.lookup('a').unwrap();
        let l = graph.lookup('l').unwrap();

        // The ring closes over the real keys; the pad hangs off the end.
        assert_eq!(graph.neighbor(l, Direction::Right), Some(a));
        assert_eq!(graph.neighbor(a, Direction::Left), Some(l));

        let pad = KeyId::new(graph.width() + 9);
        assert!(graph.key(pad).is_blank());
        assert_eq!(graph.neighbor(pad, Direction::Left), Some(l));
        assert_eq!(graph.neighbor(pad, Direction::Right), Some(a));
    }

    #[test]
    fn test_vertical_links_do_not_wrap() {
        let graph = qwerty();
        let q = graph.lookup('q').unwrap();
        let a = graph.lookup('a').unwrap();
        let z = graph.lookup('z').unwrap();

        assert_eq!(graph.neighbor(q, Direction::Up), None);
        assert_eq!(graph.neighbor(q, Direction::Down), Some(a));
        assert_eq!(graph.neighbor(a, Direction::Up), Some(q));
        assert_eq!(graph.neighbor(a, Direction::Down), Some(z));
        assert_eq!(graph.neighbor(z, Direction::Down), None);
        assert_eq!(graph.neighbor(z, Direction::SouthWest), None);
    }

    #[test]
    fn test_pinned_relations() {
        // Ground truth derived by executing the construction rules by hand
        // over the fixed QWERTY grid.
        let graph = qwerty();
        assert_eq!(relation(&graph, 'c', KeyGraph::deciphers_to), "vfdsx");
        assert_eq!(relation(&graph, 'c', KeyGraph::surround), "vfdsx");
        assert_eq!(relation(&graph, 'a', KeyGraph::deciphers_to), "swqplmzx");
        assert_eq!(relation(&graph, 'a', KeyGraph::encrypts_to), "qwopslzx");
        assert_eq!(relation(&graph, 'a', KeyGraph::surround), "swqplzx");
        assert_eq!(relation(&graph, 't', KeyGraph::surround), "yrfgh");
        assert_eq!(relation(&graph, 'z', KeyGraph::deciphers_to), "xsalm");
        assert_eq!(relation(&graph, 'z', KeyGraph::surround), "xsam");
        assert_eq!(relation(&graph, 'p', KeyGraph::deciphers_to), "qola");
    }

    #[test]
    fn test_asymmetric_exclusions_diagnostic() {
        // Exactly five QWERTY keys lose one deciphers-to entry to asymmetry,
        // all of them adjacent to the padded edge.
        let graph = qwerty();
        let excluded: Vec<char> = ALPHABET
            .chars()
            .filter(|&symbol| {
                let id = graph.lookup(symbol).unwrap();
                graph.asymmetric_exclusions(id) > 0
            })
            .collect();
        assert_eq!(excluded, vec!['q', 'o', 'a', 'j', 'z']);
        for symbol in excluded {
            let id = graph.lookup(symbol).unwrap();
            assert_eq!(graph.asymmetric_exclusions(id), 1);
        }
    }

    #[test]
    fn test_mirrored_layout_preserves_geometry() {
        // A physically mirrored layout with the reverse flag must produce
        // the same relation sets, symbol for symbol, as its plain twin.
        let plain = qwerty();
        let mirrored = KeyGraph::build(
            &LayoutSpec::from_rows(&QWERTY_MIRRORED_ROWS).with_reverse(true),
        )
        .unwrap();

        for symbol in ALPHABET.chars() {
            let p = plain.lookup(symbol).unwrap();
            let m = mirrored.lookup(symbol).unwrap();
            for pick in [
                KeyGraph::deciphers_to as fn(&KeyGraph, KeyId) -> &[KeyId],
                KeyGraph::encrypts_to,
                KeyGraph::surround,
            ] {
                let mut ours: Vec<char> = plain.symbols(pick(&plain, p)).chars().collect();
                let mut theirs: Vec<char> = mirrored.symbols(pick(&mirrored, m)).chars().collect();
                ours.sort_unstable();
                theirs.sort_unstable();
                assert_eq!(ours, theirs, "relation sets differ for '{symbol}'");
            }
        }
    }

    #[test]
    fn test_duplicate_symbol_is_fatal() {
        let spec = LayoutSpec::from_rows(&["abc", "cde"]).with_alphabet_check(0);
        assert_eq!(
            KeyGraph::build(&spec).unwrap_err(),
            LayoutError::DuplicateSymbol { symbol: 'c' }
        );
    }

    #[test]
    fn test_alphabet_coverage() {
        // Fewer symbols than expected: fatal.
        let short = LayoutSpec::from_rows(&["abc"]).with_alphabet_check(4);
        assert_eq!(
            KeyGraph::build(&short).unwrap_err(),
            LayoutError::MissingAlphabetCoverage {
                expected: 4,
                found: 3
            }
        );

        // More symbols than expected: accepted with a warning.
        let long = LayoutSpec::from_rows(&["abcdef"]).with_alphabet_check(4);
        assert!(KeyGraph::build(&long).is_ok());

        // Zero disables the check entirely.
        let unchecked = LayoutSpec::from_rows(&["abc"]).with_alphabet_check(0);
        assert!(KeyGraph::build(&unchecked).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        assert_eq!(
            KeyGraph::build(&LayoutSpec::from_rows(&[])).unwrap_err(),
            LayoutError::Empty
        );
        assert_eq!(
            KeyGraph::build(&LayoutSpec::from_rows(&["abc", "   "]).with_alphabet_check(0))
                .unwrap_err(),
            LayoutError::BlankRow { row: 1 }
        );
    }

    #[test]
    fn test_single_column_self_ring() {
        // A width-1 row is a ring of one: left and right point at the key
        // itself, and duplicates appear in its relations.
        let graph =
            KeyGraph::build(&LayoutSpec::from_rows(&["a", "b"]).with_alphabet_check(0)).unwrap();
        let a = graph.lookup('a').unwrap();
        assert_eq!(graph.neighbor(a, Direction::Left), Some(a));
        assert_eq!(graph.neighbor(a, Direction::Right), Some(a));
        assert_eq!(graph.symbols(graph.deciphers_to(a)), "aabbb");
        assert_eq!(graph.symbols(graph.surround(a)), "aabbb");
    }

    #[test]
    fn test_blank_cells_inside_rows() {
        // In-row whitespace forms blank cells that shape geometry but carry
        // no relations; a fully blank-flanked key ends up isolated.
        let graph =
            KeyGraph::build(&LayoutSpec::from_rows(&[" a "]).with_alphabet_check(0)).unwrap();
        let a = graph.lookup('a').unwrap();
        assert_eq!(graph.letter_count(), 1);
        assert!(graph.deciphers_to(a).is_empty());
        assert!(graph.surround(a).is_empty());
        assert!(graph.encrypts_to(a).is_empty());
    }

    /// Strategy: split a prefix of the alphabet into 1-4 rows of width 1-10,
    /// guaranteeing unique symbols, with an arbitrary reverse flag.
    fn arbitrary_layout() -> impl Strategy<Value = LayoutSpec> {
        (proptest::collection::vec(1_usize..=10, 1..=4), any::<bool>()).prop_map(
            |(widths, reverse)| {
                let mut rest = ALPHABET;
                let mut rows = Vec::new();
                for width in widths {
                    if rest.is_empty() {
                        break;
                    }
                    let take = width.min(rest.len());
                    rows.push(&rest[..take]);
                    rest = &rest[take..];
                }
                LayoutSpec::from_rows(&rows)
                    .with_reverse(reverse)
                    .with_alphabet_check(0)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_surround_is_symmetric(spec in arbitrary_layout()) {
            let graph = KeyGraph::build(&spec).unwrap();
            for (id, key) in graph.keys() {
                if key.is_blank() {
                    continue;
                }
                for &other in graph.surround(id) {
                    prop_assert!(
                        graph.surround(other).contains(&id),
                        "surround not symmetric between {} and {}",
                        graph.key(id),
                        graph.key(other),
                    );
                }
            }
        }

        #[test]
        fn prop_encrypts_is_exact_inverse(spec in arbitrary_layout()) {
            let graph = KeyGraph::build(&spec).unwrap();
            for (id, key) in graph.keys() {
                if key.is_blank() {
                    continue;
                }
                for &target in graph.deciphers_to(id) {
                    prop_assert!(graph.encrypts_to(target).contains(&id));
                }
                for &source in graph.encrypts_to(id) {
                    prop_assert!(graph.deciphers_to(source).contains(&id));
                }
            }
        }

        #[test]
        fn prop_relation_sizes_bounded(spec in arbitrary_layout()) {
            let graph = KeyGraph::build(&spec).unwrap();
            for (id, _) in graph.keys() {
                let surround = graph.surround(id).len();
                let deciphers = graph.deciphers_to(id).len();
                prop_assert!(surround <= deciphers);
                prop_assert!(deciphers <= 8);
                prop_assert_eq!(
                    deciphers - surround,
                    graph.asymmetric_exclusions(id)
                );
            }
        }

        #[test]
        fn prop_letter_index_is_complete(spec in arbitrary_layout()) {
            let graph = KeyGraph::build(&spec).unwrap();
            let letters: usize = spec
                .rows
                .iter()
                .map(|row| row.iter().filter(|symbol| !symbol.is_whitespace()).count())
                .sum();
            prop_assert_eq!(graph.letter_count(), letters);
        }
    }
}
