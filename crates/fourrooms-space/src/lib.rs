//! Static map layout for the Four Rooms grid-world.
//!
//! [`GridMap::four_rooms`] builds the wall/doorway layout for a given
//! side length. The map is immutable after construction and shared by
//! every instance of an engine through [`shared_map`], which generates
//! each distinct size at most once while any engine still holds it.
//!
//! [`reachable_from`] and [`is_connected`] provide the breadth-first
//! connectivity check used as a generation post-condition.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod gridmap;
pub mod reach;

pub use cache::shared_map;
pub use error::MapError;
pub use gridmap::GridMap;
pub use reach::{is_connected, reachable_from};
