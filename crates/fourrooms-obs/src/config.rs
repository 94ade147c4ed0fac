//! Observation configuration and the MiniGrid code tables.

/// How each window cell is written into its three channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObsEncoding {
    /// `[cell kind, agent mark, goal mark]`, each 0 or 1.
    #[default]
    Binary,
    /// `[object, color, state]` from the [`minigrid`] tables.
    MiniGrid,
}

/// Observation settings shared by every instance of an engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObsConfig {
    /// Channel encoding. Default: [`ObsEncoding::Binary`].
    pub encoding: ObsEncoding,
    /// MiniGrid only: when `false`, cells hidden behind a wall along the
    /// line from the agent are written as unseen. Default: `false`.
    pub see_through_walls: bool,
}

/// MiniGrid object and colour indices.
pub mod minigrid {
    /// Occluded cell.
    pub const UNSEEN: u8 = 0;
    /// Visible floor.
    pub const EMPTY: u8 = 1;
    /// Wall, or any cell outside the grid.
    pub const WALL: u8 = 2;
    /// The goal cell.
    pub const GOAL: u8 = 8;
    /// The agent's own cell.
    pub const AGENT: u8 = 10;

    /// Colour of floor and unseen cells.
    pub const COLOR_BLACK: u8 = 0;
    /// Colour of the goal.
    pub const COLOR_GREEN: u8 = 1;
    /// Colour of the agent.
    pub const COLOR_BLUE: u8 = 2;
    /// Colour of walls.
    pub const COLOR_GREY: u8 = 5;

    /// Largest value any channel can hold.
    pub const MAX_VALUE: u8 = AGENT;
}
