//! Wall occlusion along a rasterised line.

use fourrooms_core::{CellKind, Pos};
use fourrooms_space::GridMap;

/// Whether `to` is visible from `from`.
///
/// Walks the Bresenham line between the two cells. Any wall strictly
/// between them blocks the view; the target itself is always visible, so
/// the first wall in a direction can be seen but nothing behind it.
/// Out-of-grid cells on the line do not block.
pub fn line_of_sight(map: &GridMap, from: Pos, to: Pos) -> bool {
    let dx = (to.col - from.col).abs();
    let dy = (to.row - from.row).abs();
    let sx = if to.col > from.col { 1 } else { -1 };
    let sy = if to.row > from.row { 1 } else { -1 };
    let mut err = dx - dy;
    let mut cur = from;

    while cur != to {
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            cur.col += sx;
        }
        if e2 < dx {
            err += dx;
            cur.row += sy;
        }
        if cur != to && map.rank(cur).is_some() && map.cell(cur) == CellKind::Wall {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_cell_and_neighbours_are_visible() {
        let map = GridMap::four_rooms(19).unwrap();
        let a = Pos::new(3, 3);
        assert!(line_of_sight(&map, a, a));
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1), (1, 1)] {
            assert!(line_of_sight(&map, a, a.offset(dr, dc)));
        }
    }

    #[test]
    fn dividing_wall_is_visible_but_blocks_beyond() {
        let map = GridMap::four_rooms(19).unwrap();
        // Row 2 of the NW room; column 9 is the wall (door is at row 4).
        let a = Pos::new(2, 7);
        assert!(line_of_sight(&map, a, Pos::new(2, 9)));
        assert!(!line_of_sight(&map, a, Pos::new(2, 10)));
    }

    #[test]
    fn doorway_lets_sight_through() {
        let map = GridMap::four_rooms(19).unwrap();
        let a = Pos::new(4, 7);
        assert!(line_of_sight(&map, a, Pos::new(4, 10)));
    }

    #[test]
    fn outside_grid_does_not_block() {
        let map = GridMap::four_rooms(9).unwrap();
        // Line from the corner room toward a far out-of-grid cell passes
        // the outer wall first, which blocks.
        assert!(!line_of_sight(&map, Pos::new(1, 1), Pos::new(-2, 1)));
        // The outer wall cell itself is visible.
        assert!(line_of_sight(&map, Pos::new(1, 1), Pos::new(0, 1)));
    }
}
