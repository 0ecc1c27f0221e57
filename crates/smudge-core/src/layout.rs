//! Layout definitions consumed by the graph builder.

use derive_more::{Display, Error};

/// The canonical `alphabet_check` value for Latin-alphabet layouts.
pub const LATIN_ALPHABET: usize = 26;

/// A parsed layout definition: the input to [`KeyGraph::build`].
///
/// Rows are ordered top physical row first. Symbols are single characters;
/// whitespace characters are blank cells. Rows of differing length are
/// normal; the builder pads them to a common width.
///
/// `reverse` marks a physically mirrored layout: horizontal links must be
/// built on a reversed row order and corrected afterwards so that absolute
/// geometry is preserved.
///
/// `alphabet_check` is the expected number of distinct symbols; `0` disables
/// the check. Fewer symbols than expected is a build error, more is only a
/// warning.
///
/// # Examples
///
/// ```
/// use smudge_core::LayoutSpec;
///
/// let spec = LayoutSpec::from_rows(&["QWERTYUIOP", "asdfghjkl", "zxcvbnm"]);
/// assert_eq!(spec.rows[0][0], 'q'); // rows are normalized to lower case
/// assert_eq!(spec.alphabet_check, smudge_core::layout::LATIN_ALPHABET);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSpec {
    /// Symbol rows, top physical row first, lower-cased.
    pub rows: Vec<Vec<char>>,
    /// Whether the layout is physically mirrored.
    pub reverse: bool,
    /// Expected distinct symbol count; `0` disables the check.
    pub alphabet_check: usize,
}

impl LayoutSpec {
    /// Creates a spec from string rows, normalizing to lower case.
    ///
    /// Defaults to a non-mirrored layout with the Latin-alphabet coverage
    /// check. Use [`with_reverse`](Self::with_reverse) and
    /// [`with_alphabet_check`](Self::with_alphabet_check) to adjust.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.chars().flat_map(char::to_lowercase).collect())
            .collect();
        Self {
            rows,
            reverse: false,
            alphabet_check: LATIN_ALPHABET,
        }
    }

    /// Sets the mirrored-layout flag.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Sets the expected distinct symbol count (`0` disables the check).
    #[must_use]
    pub fn with_alphabet_check(mut self, alphabet_check: usize) -> Self {
        self.alphabet_check = alphabet_check;
        self
    }
}

/// Errors detected while building a [`KeyGraph`] from a [`LayoutSpec`].
///
/// Every variant is fatal: construction aborts and no partially built graph
/// is observable.
///
/// [`KeyGraph`]: crate::KeyGraph
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LayoutError {
    /// The layout has no rows at all.
    #[display("layout has no rows")]
    Empty,

    /// A row contains no symbols (empty or whitespace-only).
    #[display("layout row {row} is blank")]
    BlankRow {
        /// Zero-based index of the offending row.
        row: usize,
    },

    /// A non-blank symbol appears more than once in the layout.
    #[display("duplicate symbol '{symbol}' in layout")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },

    /// The layout has fewer distinct symbols than `alphabet_check` expects.
    #[display("layout covers {found} symbols, expected at least {expected}")]
    MissingAlphabetCoverage {
        /// The configured `alphabet_check` threshold.
        expected: usize,
        /// The number of distinct symbols actually present.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_normalizes() {
        let spec = LayoutSpec::from_rows(&["QwErTy"]);
        assert_eq!(spec.rows, vec![vec!['q', 'w', 'e', 'r', 't', 'y']]);
        assert!(!spec.reverse);
        assert_eq!(spec.alphabet_check, LATIN_ALPHABET);
    }

    #[test]
    fn test_builder_style_setters() {
        let spec = LayoutSpec::from_rows(&["abc"])
            .with_reverse(true)
            .with_alphabet_check(0);
        assert!(spec.reverse);
        assert_eq!(spec.alphabet_check, 0);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LayoutError::DuplicateSymbol { symbol: 'q' }.to_string(),
            "duplicate symbol 'q' in layout"
        );
        assert_eq!(
            LayoutError::MissingAlphabetCoverage {
                expected: 26,
                found: 20
            }
            .to_string(),
            "layout covers 20 symbols, expected at least 26"
        );
        assert_eq!(
            LayoutError::BlankRow { row: 2 }.to_string(),
            "layout row 2 is blank"
        );
    }
}
