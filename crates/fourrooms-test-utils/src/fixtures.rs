//! Scripted action sources for driving an engine in tests.
//!
//! - [`ConstActions`] writes the same raw value to every slot.
//! - [`CyclingActions`] walks the action table, offset per instance.
//! - [`RandomActions`] draws valid actions from a seeded stream.
//! - [`OutOfRangeActions`] writes only values outside `0..7`.

use fourrooms_core::NUM_ACTIONS;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fills the action buffer before each step.
pub trait ActionSource {
    fn fill(&mut self, tick: u64, actions: &mut [i32]);
}

/// The same raw action in every slot on every tick.
pub struct ConstActions(pub i32);

impl ActionSource for ConstActions {
    fn fill(&mut self, _tick: u64, actions: &mut [i32]) {
        actions.fill(self.0);
    }
}

/// `(tick + i) % 7` for instance `i`.
pub struct CyclingActions;

impl ActionSource for CyclingActions {
    fn fill(&mut self, tick: u64, actions: &mut [i32]) {
        for (i, a) in actions.iter_mut().enumerate() {
            *a = ((tick + i as u64) % NUM_ACTIONS as u64) as i32;
        }
    }
}

/// Uniform valid actions from a seeded ChaCha8 stream.
pub struct RandomActions {
    rng: ChaCha8Rng,
}

impl RandomActions {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ActionSource for RandomActions {
    fn fill(&mut self, _tick: u64, actions: &mut [i32]) {
        for a in actions {
            *a = self.rng.random_range(0..NUM_ACTIONS as i32);
        }
    }
}

/// Cycles through values that all decode to stay.
pub struct OutOfRangeActions;

impl OutOfRangeActions {
    pub const VALUES: [i32; 5] = [-1, 7, 8, 255, i32::MIN];
}

impl ActionSource for OutOfRangeActions {
    fn fill(&mut self, tick: u64, actions: &mut [i32]) {
        for (i, a) in actions.iter_mut().enumerate() {
            *a = Self::VALUES[(tick as usize + i) % Self::VALUES.len()];
        }
    }
}
