//! Breadth-first reachability over floor cells.

use crate::gridmap::GridMap;
use fourrooms_core::Pos;
use std::collections::VecDeque;

/// 4-connected neighbour offsets: N, S, W, E.
const OFFSETS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Mark every floor cell reachable from `start` with 4-connected moves.
///
/// Returns a row-major mask of `size * size` entries. A `start` that is
/// not a floor cell reaches nothing.
pub fn reachable_from(map: &GridMap, start: Pos) -> Vec<bool> {
    let mut visited = vec![false; map.cells().len()];
    let Some(start_idx) = map.rank(start).filter(|_| map.is_floor(start)) else {
        return visited;
    };

    let mut queue = VecDeque::new();
    visited[start_idx] = true;
    queue.push_back(start);

    while let Some(p) = queue.pop_front() {
        for (dr, dc) in OFFSETS_4 {
            let n = p.offset(dr, dc);
            if !map.is_floor(n) {
                continue;
            }
            if let Some(i) = map.rank(n) {
                if !visited[i] {
                    visited[i] = true;
                    queue.push_back(n);
                }
            }
        }
    }

    visited
}

/// Whether every floor cell can reach every other floor cell.
pub fn is_connected(map: &GridMap) -> bool {
    let Some(&first) = map.floor_cells().first() else {
        return true;
    };
    let visited = reachable_from(map, first);
    map.floor_cells()
        .iter()
        .all(|p| map.rank(*p).is_some_and(|i| visited[i]))
}
