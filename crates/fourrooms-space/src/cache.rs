//! Process-wide sharing of generated maps, keyed by side length.
//!
//! Entries hold [`Weak`] references, so a map is freed once the last
//! engine using it closes and is regenerated on the next request.

use std::sync::{Arc, Mutex, Weak};

use crate::error::MapError;
use crate::gridmap::GridMap;

static MAPS: Mutex<Vec<(u32, Weak<GridMap>)>> = Mutex::new(Vec::new());

/// Return the shared map for `size`, generating it if no live copy exists.
///
/// # Errors
///
/// Propagates [`MapError`] from [`GridMap::four_rooms`].
pub fn shared_map(size: u32) -> Result<Arc<GridMap>, MapError> {
    GridMap::check_size(size)?;

    let mut maps = match MAPS.lock() {
        Ok(g) => g,
        // A panic while holding the lock leaves only stale weak refs behind;
        // fall back to an unshared map rather than propagating the poison.
        Err(_) => return GridMap::four_rooms(size).map(Arc::new),
    };

    maps.retain(|(_, w)| w.strong_count() > 0);
    if let Some(map) = maps
        .iter()
        .find(|(s, _)| *s == size)
        .and_then(|(_, w)| w.upgrade())
    {
        return Ok(map);
    }

    let map = Arc::new(GridMap::four_rooms(size)?);
    tracing::debug!(
        size,
        floor_cells = map.floor_count(),
        "generated four-rooms map"
    );
    maps.push((size, Arc::downgrade(&map)));
    Ok(map)
}
