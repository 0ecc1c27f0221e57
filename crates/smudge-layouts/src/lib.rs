//! Keyboard layout definitions for the smudge cipher.
//!
//! This crate is the layout loader: it carries the built-in boards, a
//! case-insensitive registry over them, and a loader for layout files. Both
//! paths produce a [`LayoutSpec`] for [`smudge_core::KeyGraph::build`].
//!
//! A layout file holds one row per line, top physical row first, single-width
//! symbols with no separators. Case is irrelevant (rows are normalized to
//! lower case) and whitespace characters inside a row are blank cells; a line
//! that is *entirely* blank is invalid.
//!
//! # Examples
//!
//! ```
//! use smudge_core::{KeyGraph, layout::LATIN_ALPHABET};
//!
//! let layout = smudge_layouts::find("qwerty").unwrap();
//! let graph = KeyGraph::build(&layout.spec(LATIN_ALPHABET)).unwrap();
//! assert_eq!(graph.letter_count(), 26);
//! ```

use std::{fs, path::Path};

use derive_more::{Display, Error};
use smudge_core::LayoutSpec;

/// A named, built-in keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Registry name of the layout.
    pub name: &'static str,
    /// Symbol rows, top physical row first.
    pub rows: &'static [&'static str],
    /// Whether the layout is physically mirrored and needs reversed
    /// horizontal linkage during construction.
    pub reverse: bool,
}

impl Layout {
    /// Produces the builder input for this layout.
    #[must_use]
    pub fn spec(&self, alphabet_check: usize) -> LayoutSpec {
        LayoutSpec::from_rows(self.rows)
            .with_reverse(self.reverse)
            .with_alphabet_check(alphabet_check)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the width of the widest row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }
}

/// The standard QWERTY board.
pub const QWERTY: Layout = Layout {
    name: "qwerty",
    rows: &["qwertyuiop", "asdfghjkl", "zxcvbnm"],
    reverse: false,
};

/// The Colemak board.
pub const COLEMAK: Layout = Layout {
    name: "colemak",
    rows: &["qwfpgjluy", "arstdhneio", "zxcvbkm"],
    reverse: false,
};

/// The Workman board.
pub const WORKMAN: Layout = Layout {
    name: "workman",
    rows: &["qdrwbjfup", "ashtgyneoi", "zxmcvkl"],
    reverse: false,
};

/// The Dvorak board (letter keys only).
pub const DVORAK: Layout = Layout {
    name: "dvorak",
    rows: &["pyfgcrl", "aoeuidhtns", "qjkxbmwvz"],
    reverse: false,
};

/// A physically mirrored QWERTY board. Exercises the reversed horizontal
/// linkage: it must produce the same neighbor sets as [`QWERTY`].
pub const QWERTY_MIRRORED: Layout = Layout {
    name: "qwerty-mirrored",
    rows: &["poiuytrewq", "lkjhgfdsa", "mnbvcxz"],
    reverse: true,
};

/// All built-in layouts.
pub static BUILTIN: [Layout; 5] = [QWERTY, COLEMAK, WORKMAN, DVORAK, QWERTY_MIRRORED];

/// Finds a built-in layout by name, ignoring ASCII case.
#[must_use]
pub fn find(name: &str) -> Option<&'static Layout> {
    BUILTIN
        .iter()
        .find(|layout| layout.name.eq_ignore_ascii_case(name))
}

/// Errors from loading a layout definition from text or a file.
#[derive(Debug, Display, Error)]
pub enum LoadError {
    /// Reading the layout file failed.
    #[display("failed to read layout file: {_0}")]
    Io(#[error(source)] std::io::Error),

    /// The definition contains no rows.
    #[display("layout definition is empty")]
    Empty,

    /// A line contains no symbols (empty or whitespace-only).
    #[display("layout line {line} is blank")]
    BlankLine {
        /// One-based line number of the offending line.
        line: usize,
    },
}

impl From<std::io::Error> for LoadError {
    fn from(source: std::io::Error) -> Self {
        Self::Io(source)
    }
}

/// Parses a layout definition from text, one row per line.
///
/// # Errors
///
/// Returns [`LoadError::Empty`] for text without any lines and
/// [`LoadError::BlankLine`] for a line without symbols.
pub fn parse(
    text: &str,
    reverse: bool,
    alphabet_check: usize,
) -> Result<LayoutSpec, LoadError> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.chars().all(char::is_whitespace) {
            return Err(LoadError::BlankLine { line: index + 1 });
        }
        rows.push(line);
    }
    if rows.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(LayoutSpec::from_rows(&rows)
        .with_reverse(reverse)
        .with_alphabet_check(alphabet_check))
}

/// Loads a layout definition from a file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read, plus everything
/// [`parse`] reports.
pub fn from_path(
    path: impl AsRef<Path>,
    reverse: bool,
    alphabet_check: usize,
) -> Result<LayoutSpec, LoadError> {
    let text = fs::read_to_string(path)?;
    parse(&text, reverse, alphabet_check)
}

#[cfg(test)]
mod tests {
    use smudge_core::{KeyGraph, layout::LATIN_ALPHABET};

    use super::*;

    #[test]
    fn test_builtins_cover_the_alphabet() {
        for layout in BUILTIN {
            let graph = KeyGraph::build(&layout.spec(LATIN_ALPHABET))
                .unwrap_or_else(|error| panic!("{} failed to build: {error}", layout.name));
            assert_eq!(graph.letter_count(), 26, "{}", layout.name);
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("QWERTY"), Some(&QWERTY));
        assert_eq!(find("Colemak"), Some(&COLEMAK));
        assert_eq!(find("qwerty-MIRRORED"), Some(&QWERTY_MIRRORED));
        assert_eq!(find("azerty"), None);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(QWERTY.height(), 3);
        assert_eq!(QWERTY.width(), 10);
        assert_eq!(DVORAK.width(), 10);
    }

    #[test]
    fn test_parse_normalizes_and_flags() {
        let spec = parse("AB\ncd", true, 0).unwrap();
        assert_eq!(spec.rows, vec![vec!['a', 'b'], vec!['c', 'd']]);
        assert!(spec.reverse);
        assert_eq!(spec.alphabet_check, 0);
    }

    #[test]
    fn test_parse_rejects_blank_definitions() {
        assert!(matches!(parse("", false, 0), Err(LoadError::Empty)));
        assert!(matches!(
            parse("abc\n   \ndef", false, 0),
            Err(LoadError::BlankLine { line: 2 })
        ));
    }

    #[test]
    fn test_from_path_round_trip() {
        let path = std::env::temp_dir().join("smudge-layout-test.txt");
        fs::write(&path, "qwertyuiop\nasdfghjkl\nzxcvbnm\n").unwrap();
        let spec = from_path(&path, false, LATIN_ALPHABET).unwrap();
        fs::remove_file(&path).ok();

        let graph = KeyGraph::build(&spec).unwrap();
        assert_eq!(graph.letter_count(), 26);
    }

    #[test]
    fn test_from_path_missing_file() {
        let error = from_path("/nonexistent/layout.txt", false, 0).unwrap_err();
        assert!(matches!(error, LoadError::Io(_)));
    }
}
