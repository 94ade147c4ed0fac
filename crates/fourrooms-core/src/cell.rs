//! Grid positions and static cell kinds.

use std::fmt;

/// A `(row, col)` position on the grid.
///
/// Signed so that window and move arithmetic can step off the grid
/// without wrapping; lookups treat any out-of-grid position as a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    /// Row index, growing downward.
    pub row: i32,
    /// Column index, growing rightward.
    pub col: i32,
}

impl Pos {
    /// Create a position from row and column.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position displaced by `(dr, dc)`.
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Whether the position lies inside a square grid of side `size`.
    pub fn in_bounds(self, size: u32) -> bool {
        let n = size as i32;
        self.row >= 0 && self.row < n && self.col >= 0 && self.col < n
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// Static cell kind of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellKind {
    /// Walkable cell.
    Floor = 0,
    /// Impassable cell. Out-of-grid lookups also report `Wall`.
    Wall = 1,
}

impl CellKind {
    /// Whether an agent may stand on this cell.
    pub fn is_floor(self) -> bool {
        self == CellKind::Floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_both_axes() {
        let p = Pos::new(4, 7).offset(-1, 2);
        assert_eq!(p, Pos::new(3, 9));
    }

    #[test]
    fn in_bounds_rejects_negative_and_edge() {
        assert!(Pos::new(0, 0).in_bounds(9));
        assert!(Pos::new(8, 8).in_bounds(9));
        assert!(!Pos::new(-1, 0).in_bounds(9));
        assert!(!Pos::new(0, 9).in_bounds(9));
    }

    #[test]
    fn cell_kind_discriminants_match_channel_encoding() {
        assert_eq!(CellKind::Floor as u8, 0);
        assert_eq!(CellKind::Wall as u8, 1);
        assert!(CellKind::Floor.is_floor());
        assert!(!CellKind::Wall.is_floor());
    }

    #[test]
    fn display_formats_row_col() {
        assert_eq!(Pos::new(2, 5).to_string(), "(2, 5)");
    }
}
