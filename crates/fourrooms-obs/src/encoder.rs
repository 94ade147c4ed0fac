//! The agent-centred window encoder.

use crate::sight::line_of_sight;
use crate::config::{minigrid, ObsConfig, ObsEncoding};
use fourrooms_core::{CellKind, Pos, OBS_CHANNELS, OBS_LEN, OBS_WINDOW};
use fourrooms_space::GridMap;

const HALF: i32 = (OBS_WINDOW / 2) as i32;

/// Writes the `7 x 7 x 3` window around an agent into a byte slot.
///
/// Window cell `(i, j)` covers world cell
/// `(agent.row - 3 + i, agent.col - 3 + j)` and occupies bytes
/// `(i * 7 + j) * 3 .. + 3` of the slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObservationEncoder {
    config: ObsConfig,
}

impl ObservationEncoder {
    /// Create an encoder for the given settings.
    pub fn new(config: ObsConfig) -> Self {
        Self { config }
    }

    /// The settings this encoder was built with.
    pub fn config(&self) -> &ObsConfig {
        &self.config
    }

    /// Encode the window around `agent` into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != OBS_LEN`.
    pub fn encode(&self, map: &GridMap, agent: Pos, goal: Pos, out: &mut [u8]) {
        assert_eq!(out.len(), OBS_LEN, "observation slot must be 7*7*3 bytes");
        for (k, cell) in out.chunks_exact_mut(OBS_CHANNELS).enumerate() {
            let i = (k / OBS_WINDOW) as i32;
            let j = (k % OBS_WINDOW) as i32;
            let world = agent.offset(i - HALF, j - HALF);
            let triple = match self.config.encoding {
                ObsEncoding::Binary => binary_cell(map, world, agent, goal),
                ObsEncoding::MiniGrid => {
                    minigrid_cell(map, world, agent, goal, self.config.see_through_walls)
                }
            };
            cell.copy_from_slice(&triple);
        }
    }
}

#[inline]
fn binary_cell(map: &GridMap, world: Pos, agent: Pos, goal: Pos) -> [u8; 3] {
    [
        map.cell(world) as u8,
        u8::from(world == agent),
        u8::from(world == goal),
    ]
}

#[inline]
fn minigrid_cell(map: &GridMap, world: Pos, agent: Pos, goal: Pos, see_through: bool) -> [u8; 3] {
    if map.rank(world).is_none() {
        return [minigrid::WALL, minigrid::COLOR_GREY, 0];
    }
    if !see_through && !line_of_sight(map, agent, world) {
        return [minigrid::UNSEEN, minigrid::COLOR_BLACK, 0];
    }
    if world == agent {
        return [minigrid::AGENT, minigrid::COLOR_BLUE, 0];
    }
    if world == goal {
        return [minigrid::GOAL, minigrid::COLOR_GREEN, 0];
    }
    match map.cell(world) {
        CellKind::Wall => [minigrid::WALL, minigrid::COLOR_GREY, 0],
        CellKind::Floor => [minigrid::EMPTY, minigrid::COLOR_BLACK, 0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(out: &[u8], i: usize, j: usize) -> [u8; 3] {
        let b = (i * OBS_WINDOW + j) * OBS_CHANNELS;
        [out[b], out[b + 1], out[b + 2]]
    }

    #[test]
    fn binary_marks_agent_at_centre() {
        let map = GridMap::four_rooms(19).unwrap();
        let enc = ObservationEncoder::default();
        let mut out = [0u8; OBS_LEN];
        enc.encode(&map, Pos::new(5, 5), Pos::new(15, 15), &mut out);
        assert_eq!(slot(&out, 3, 3), [0, 1, 0]);
        let agent_marks = out.chunks(3).filter(|c| c[1] == 1).count();
        assert_eq!(agent_marks, 1);
        // Goal outside the window: channel 2 all zero.
        assert!(out.chunks(3).all(|c| c[2] == 0));
    }

    #[test]
    fn binary_marks_goal_inside_window() {
        let map = GridMap::four_rooms(19).unwrap();
        let enc = ObservationEncoder::default();
        let mut out = [0u8; OBS_LEN];
        enc.encode(&map, Pos::new(5, 5), Pos::new(6, 7), &mut out);
        assert_eq!(slot(&out, 4, 5), [0, 0, 1]);
        assert_eq!(out.chunks(3).filter(|c| c[2] == 1).count(), 1);
    }

    #[test]
    fn binary_out_of_grid_is_wall() {
        let map = GridMap::four_rooms(19).unwrap();
        let enc = ObservationEncoder::default();
        let mut out = [0u8; OBS_LEN];
        enc.encode(&map, Pos::new(1, 1), Pos::new(2, 2), &mut out);
        // Rows 0..=1 and cols 0..=1 of the window are outside or on the ring.
        for j in 0..OBS_WINDOW {
            assert_eq!(slot(&out, 0, j)[0], 1);
            assert_eq!(slot(&out, 2, j)[0], 1);
        }
        assert_eq!(slot(&out, 3, 3), [0, 1, 0]);
        assert_eq!(slot(&out, 4, 4), [0, 0, 1]);
    }

    #[test]
    fn minigrid_uses_object_and_colour_codes() {
        let map = GridMap::four_rooms(19).unwrap();
        let enc = ObservationEncoder::new(ObsConfig {
            encoding: ObsEncoding::MiniGrid,
            see_through_walls: true,
        });
        let mut out = [0u8; OBS_LEN];
        enc.encode(&map, Pos::new(1, 1), Pos::new(2, 2), &mut out);
        assert_eq!(slot(&out, 3, 3), [minigrid::AGENT, minigrid::COLOR_BLUE, 0]);
        assert_eq!(slot(&out, 4, 4), [minigrid::GOAL, minigrid::COLOR_GREEN, 0]);
        assert_eq!(slot(&out, 0, 0), [minigrid::WALL, minigrid::COLOR_GREY, 0]);
        assert_eq!(slot(&out, 3, 4), [minigrid::EMPTY, minigrid::COLOR_BLACK, 0]);
        assert!(out.iter().all(|&v| v <= minigrid::MAX_VALUE));
    }

    #[test]
    fn minigrid_occludes_behind_walls() {
        let map = GridMap::four_rooms(19).unwrap();
        let mut enc_cfg = ObsConfig {
            encoding: ObsEncoding::MiniGrid,
            see_through_walls: false,
        };
        let agent = Pos::new(2, 7);
        let goal = Pos::new(15, 15);

        let mut hidden = [0u8; OBS_LEN];
        ObservationEncoder::new(enc_cfg).encode(&map, agent, goal, &mut hidden);
        // World (2, 10) sits at window (3, 6), beyond the wall at col 9.
        assert_eq!(slot(&hidden, 3, 6), [minigrid::UNSEEN, minigrid::COLOR_BLACK, 0]);
        assert_eq!(slot(&hidden, 3, 5), [minigrid::WALL, minigrid::COLOR_GREY, 0]);

        enc_cfg.see_through_walls = true;
        let mut seen = [0u8; OBS_LEN];
        ObservationEncoder::new(enc_cfg).encode(&map, agent, goal, &mut seen);
        assert_eq!(slot(&seen, 3, 6), [minigrid::EMPTY, minigrid::COLOR_BLACK, 0]);
    }

    #[test]
    #[should_panic(expected = "7*7*3")]
    fn wrong_slot_length_panics() {
        let map = GridMap::four_rooms(9).unwrap();
        let mut out = [0u8; 10];
        ObservationEncoder::default().encode(&map, Pos::new(1, 1), Pos::new(2, 2), &mut out);
    }
}
