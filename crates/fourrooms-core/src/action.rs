//! The seven-way discrete action table.

/// Number of discrete actions. Valid raw actions are `0..NUM_ACTIONS`.
pub const NUM_ACTIONS: usize = 7;

/// A discrete agent action.
///
/// Four cardinal moves, two diagonal moves, and a no-op. Any raw value
/// outside `0..7` decodes to [`Action::Stay`] so that one corrupted slot
/// in the action buffer cannot abort the rest of the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    /// Move one cell north (row - 1).
    North = 0,
    /// Move one cell south (row + 1).
    South = 1,
    /// Move one cell west (col - 1).
    West = 2,
    /// Move one cell east (col + 1).
    East = 3,
    /// Move one cell north-east (row - 1, col + 1).
    NorthEast = 4,
    /// Move one cell south-west (row + 1, col - 1).
    SouthWest = 5,
    /// Stay in place.
    Stay = 6,
}

impl Action {
    /// All actions in raw-value order.
    pub const ALL: [Action; NUM_ACTIONS] = [
        Action::North,
        Action::South,
        Action::West,
        Action::East,
        Action::NorthEast,
        Action::SouthWest,
        Action::Stay,
    ];

    /// Decode a raw action value from the shared action buffer.
    ///
    /// Out-of-range values (negative or `>= 7`) decode to [`Action::Stay`].
    #[inline]
    pub fn from_raw(raw: i32) -> Action {
        usize::try_from(raw)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Action::Stay)
    }

    /// Returns the `(row_offset, col_offset)` for this action.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Action::North => (-1, 0),
            Action::South => (1, 0),
            Action::West => (0, -1),
            Action::East => (0, 1),
            Action::NorthEast => (-1, 1),
            Action::SouthWest => (1, -1),
            Action::Stay => (0, 0),
        }
    }
}

impl From<Action> for i32 {
    fn from(a: Action) -> i32 {
        a as i32
    }
}
