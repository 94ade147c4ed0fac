//! The static four-rooms layout.

use crate::error::MapError;
use crate::reach;
use fourrooms_core::{CellKind, Pos};

/// A square grid of walls and floor split into four rooms.
///
/// Layout for side `n` with `m = n / 2`:
/// - a wall ring on rows/cols `0` and `n - 1`
/// - a dividing wall along row `m` and along column `m`
/// - one single-cell doorway centered on each of the four dividing wall
///   segments, so every pair of adjacent rooms shares exactly one door
///
/// Generation is a pure function of `n`. The floor list is kept in
/// row-major order so uniform sampling by index is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    size: u32,
    cells: Vec<CellKind>,
    floor: Vec<Pos>,
    doorways: [Pos; 4],
}

impl GridMap {
    /// Smallest side that leaves each room a 3x3 interior.
    pub const MIN_SIZE: u32 = 9;
    /// Largest accepted side.
    pub const MAX_SIZE: u32 = 4095;
    /// Default side, matching the classic task.
    pub const DEFAULT_SIZE: u32 = 19;

    /// Check a side length without building anything.
    pub fn check_size(size: u32) -> Result<(), MapError> {
        if size < Self::MIN_SIZE {
            return Err(MapError::TooSmall {
                size,
                min: Self::MIN_SIZE,
            });
        }
        if size > Self::MAX_SIZE {
            return Err(MapError::TooLarge {
                size,
                max: Self::MAX_SIZE,
            });
        }
        if size % 2 == 0 {
            return Err(MapError::EvenSize { size });
        }
        Ok(())
    }

    /// Build the four-rooms layout for side `size`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if `size` is below [`MIN_SIZE`](Self::MIN_SIZE),
    /// above [`MAX_SIZE`](Self::MAX_SIZE), or even.
    pub fn four_rooms(size: u32) -> Result<Self, MapError> {
        Self::check_size(size)?;

        let n = size as i32;
        let m = n / 2;
        let idx = |r: i32, c: i32| (r as usize) * (size as usize) + (c as usize);

        let mut cells = vec![CellKind::Floor; (size as usize) * (size as usize)];
        for i in 0..n {
            cells[idx(0, i)] = CellKind::Wall;
            cells[idx(n - 1, i)] = CellKind::Wall;
            cells[idx(i, 0)] = CellKind::Wall;
            cells[idx(i, n - 1)] = CellKind::Wall;
            cells[idx(m, i)] = CellKind::Wall;
            cells[idx(i, m)] = CellKind::Wall;
        }

        // Segments span 1..=m-1 and m+1..=n-2; doors sit at their midpoints.
        let near = m / 2;
        let far = (m + 1 + n - 2) / 2;
        let doorways = [
            Pos::new(near, m),
            Pos::new(far, m),
            Pos::new(m, near),
            Pos::new(m, far),
        ];
        for d in doorways {
            cells[idx(d.row, d.col)] = CellKind::Floor;
        }

        let floor = (0..n)
            .flat_map(|r| (0..n).map(move |c| Pos::new(r, c)))
            .filter(|p| cells[idx(p.row, p.col)] == CellKind::Floor)
            .collect();

        let map = Self {
            size,
            cells,
            floor,
            doorways,
        };
        debug_assert!(reach::is_connected(&map), "four-rooms map must be connected");
        Ok(map)
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major cell kinds, `size * size` entries.
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Row-major index of an in-grid position.
    pub fn rank(&self, pos: Pos) -> Option<usize> {
        if pos.in_bounds(self.size) {
            Some((pos.row as usize) * (self.size as usize) + (pos.col as usize))
        } else {
            None
        }
    }

    /// Kind of the cell at `pos`; out-of-grid positions are walls.
    #[inline]
    pub fn cell(&self, pos: Pos) -> CellKind {
        match self.rank(pos) {
            Some(i) => self.cells[i],
            None => CellKind::Wall,
        }
    }

    /// Whether an agent may stand at `pos`.
    #[inline]
    pub fn is_floor(&self, pos: Pos) -> bool {
        self.cell(pos).is_floor()
    }

    /// Every floor cell in row-major order.
    pub fn floor_cells(&self) -> &[Pos] {
        &self.floor
    }

    /// Number of floor cells.
    pub fn floor_count(&self) -> usize {
        self.floor.len()
    }

    /// The four doorways: north and south gaps in the vertical wall, then
    /// west and east gaps in the horizontal wall.
    pub fn doorways(&self) -> &[Pos; 4] {
        &self.doorways
    }

    /// Quadrant index (0 = NW, 1 = NE, 2 = SW, 3 = SE) of a room cell.
    ///
    /// Returns `None` for walls, doorways and out-of-grid positions.
    pub fn room_of(&self, pos: Pos) -> Option<usize> {
        let m = (self.size / 2) as i32;
        if !self.is_floor(pos) || pos.row == m || pos.col == m {
            return None;
        }
        let south = usize::from(pos.row > m);
        let east = usize::from(pos.col > m);
        Some(south * 2 + east)
    }
}
