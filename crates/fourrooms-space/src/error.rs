//! Error types for map generation.

use std::fmt;

/// Errors arising from map construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The side length cannot host four rooms and their dividing walls.
    TooSmall {
        /// The requested side length.
        size: u32,
        /// Smallest accepted side length.
        min: u32,
    },
    /// The side length exceeds what coordinates can address.
    TooLarge {
        /// The requested side length.
        size: u32,
        /// Largest accepted side length.
        max: u32,
    },
    /// Even side lengths cannot split into four equal rooms around a
    /// single-cell dividing wall.
    EvenSize {
        /// The requested side length.
        size: u32,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { size, min } => {
                write!(f, "grid size {size} is below minimum of {min}")
            }
            Self::TooLarge { size, max } => {
                write!(f, "grid size {size} exceeds maximum of {max}")
            }
            Self::EvenSize { size } => write!(f, "grid size {size} must be odd"),
        }
    }
}

impl std::error::Error for MapError {}
