//! Key cells and arena identifiers.

use std::fmt::{self, Display};

/// Identifier of a [`Key`] in a [`KeyGraph`] arena.
///
/// Keys are stored in a flat row-major arena; a `KeyId` is an index into that
/// arena. Neighbor links are stored as ids rather than references, so the
/// cyclic adjacency structure never forms an ownership cycle.
///
/// The `Default` impl (id 0) exists only to satisfy container requirements;
/// a default-constructed id is meaningless outside the graph that issued it.
///
/// [`KeyGraph`]: crate::KeyGraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId(usize);

impl KeyId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of this id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One position in the keyboard grid.
///
/// A key either carries a symbol or is a *blank*: a padding cell that
/// participates in the adjacency geometry but is excluded from every cipher
/// relation. The four orthogonal links are assigned during graph
/// construction; `up`/`down` stay `None` on the top and bottom rows because
/// vertical adjacency does not wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    symbol: Option<char>,
    row: usize,
    col: usize,
    pub(crate) left: Option<KeyId>,
    pub(crate) right: Option<KeyId>,
    pub(crate) up: Option<KeyId>,
    pub(crate) down: Option<KeyId>,
}

impl Key {
    pub(crate) const fn new(symbol: Option<char>, row: usize, col: usize) -> Self {
        Self {
            symbol,
            row,
            col,
            left: None,
            right: None,
            up: None,
            down: None,
        }
    }

    /// Returns the symbol on this key, or `None` for a blank.
    #[must_use]
    pub const fn symbol(&self) -> Option<char> {
        self.symbol
    }

    /// Returns `true` if this key is a blank padding cell.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.symbol.is_none()
    }

    /// Returns the row of this key in the padded grid.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns the column of this key in the padded grid.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Some(symbol) => Display::fmt(&symbol, f),
            None => f.write_str("·"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        let blank = Key::new(None, 0, 3);
        assert!(blank.is_blank());
        assert_eq!(blank.symbol(), None);
        assert_eq!(format!("{blank}"), "·");

        let key = Key::new(Some('q'), 0, 0);
        assert!(!key.is_blank());
        assert_eq!(key.symbol(), Some('q'));
        assert_eq!(format!("{key}"), "q");
    }

    #[test]
    fn test_key_id_index() {
        let id = KeyId::new(17);
        assert_eq!(id.index(), 17);
        assert_eq!(KeyId::default(), KeyId::new(0));
    }
}
