//! The eight neighbor directions of a key.

use std::fmt::{self, Display};

/// A compass direction from one key to a neighboring key.
///
/// The order of [`Direction::ALL`] is the fixed counterclockwise order in
/// which every neighbor relation is rendered: right, north-east, up,
/// north-west, left, south-west, down, south-east. Diagonals are not stored
/// on keys; they are compositions of the orthogonal links (north-east is the
/// upper neighbor's right, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The key to the right (rows are rings, so this always exists).
    Right,
    /// Up, then right.
    NorthEast,
    /// The key above (absent on the top row).
    Up,
    /// Up, then left.
    NorthWest,
    /// The key to the left.
    Left,
    /// Down, then left.
    SouthWest,
    /// The key below (absent on the bottom row).
    Down,
    /// Down, then right.
    SouthEast,
}

impl Direction {
    /// All eight directions in the fixed counterclockwise rendering order.
    pub const ALL: [Self; 8] = [
        Self::Right,
        Self::NorthEast,
        Self::Up,
        Self::NorthWest,
        Self::Left,
        Self::SouthWest,
        Self::Down,
        Self::SouthEast,
    ];

    /// Returns `true` for the four diagonal directions.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::NorthWest | Self::SouthWest | Self::SouthEast
        )
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Right => "right",
            Self::NorthEast => "north-east",
            Self::Up => "up",
            Self::NorthWest => "north-west",
            Self::Left => "left",
            Self::SouthWest => "south-west",
            Self::Down => "down",
            Self::SouthEast => "south-east",
        };
        f.write_str(name)
    }
}
