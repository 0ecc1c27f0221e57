//! ASCII rendering of a built keyboard graph.
//!
//! Meant for manual inspection of the linking: the board view shows the
//! padded grid (blanks as `·`), and the letter view shows one key's eight
//! directed neighbors laid out around it, which makes broken diagonal
//! compositions easy to spot.

use std::fmt::Write as _;

use smudge_core::{Direction, KeyGraph};

/// Renders the padded grid with cell borders.
pub fn board(graph: &KeyGraph) -> String {
    let mut out = String::new();
    let rule = format!("+{}\n", "---+".repeat(graph.width()));
    out.push_str(&rule);
    for row in 0..graph.height() {
        out.push('|');
        for col in 0..graph.width() {
            let key = graph.key_at(row, col).expect("position is on the grid");
            let _ = write!(out, " {key} |");
        }
        out.push('\n');
        out.push_str(&rule);
    }
    out
}

/// Renders one key's neighborhood as a 3×3 block: the key in the middle,
/// its eight directed neighbors around it, absences as `·`.
///
/// Returns `None` for symbols not in the layout.
pub fn letter(graph: &KeyGraph, symbol: char) -> Option<String> {
    let id = graph.lookup(symbol)?;
    let glyph = |direction: Direction| {
        graph
            .neighbor(id, direction)
            .and_then(|neighbor| graph.key(neighbor).symbol())
            .unwrap_or('·')
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        glyph(Direction::NorthWest),
        glyph(Direction::Up),
        glyph(Direction::NorthEast),
    );
    let _ = writeln!(
        out,
        "{} {symbol} {}",
        glyph(Direction::Left),
        glyph(Direction::Right),
    );
    let _ = writeln!(
        out,
        "{} {} {}",
        glyph(Direction::SouthWest),
        glyph(Direction::Down),
        glyph(Direction::SouthEast),
    );
    Some(out)
}

/// Renders one key's relation lists, with the asymmetric-exclusion
/// diagnostic when it is non-zero.
pub fn relations(graph: &KeyGraph, symbol: char) -> Option<String> {
    let id = graph.lookup(symbol)?;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  deciphers-to: {}",
        graph.symbols(graph.deciphers_to(id))
    );
    let _ = writeln!(out, "  encrypts-to:  {}", graph.symbols(graph.encrypts_to(id)));
    let excluded = graph.asymmetric_exclusions(id);
    if excluded == 0 {
        let _ = writeln!(out, "  surround:     {}", graph.symbols(graph.surround(id)));
    } else {
        let _ = writeln!(
            out,
            "  surround:     {} ({excluded} asymmetric excluded)",
            graph.symbols(graph.surround(id)),
        );
    }
    Some(out)
}

/// Returns every symbol of the layout in grid order, for the all-letters
/// drawing mode.
pub fn grid_symbols(graph: &KeyGraph) -> Vec<char> {
    graph
        .keys()
        .filter_map(|(_, key)| key.symbol())
        .collect()
}
