//! Safe [`EnvBuffers`] implementations: heap-owned and caller-borrowed.
//!
//! Neither type offers a way to resize after construction, so the
//! lengths the engine validated at construction hold for its lifetime.

use crate::traits::{BufferViews, EnvBuffers};

/// Side of the square observation window.
pub const OBS_WINDOW: usize = 7;
/// Channels per observation cell.
pub const OBS_CHANNELS: usize = 3;
/// Bytes per instance in the observation buffer (`7 * 7 * 3`).
pub const OBS_LEN: usize = OBS_WINDOW * OBS_WINDOW * OBS_CHANNELS;

// ── OwnedBuffers ────────────────────────────────────────────────

/// Heap-allocated buffers sized once for a fixed instance count.
#[derive(Clone, Debug)]
pub struct OwnedBuffers {
    observations: Vec<u8>,
    rewards: Vec<f32>,
    terminals: Vec<u8>,
    truncations: Vec<u8>,
    actions: Vec<i32>,
}

impl OwnedBuffers {
    /// Allocate zeroed buffers for `num_envs` instances.
    ///
    /// Actions start at 0; callers wanting a no-op first tick should
    /// fill them via [`actions_mut`](Self::actions_mut).
    pub fn new(num_envs: usize) -> Self {
        Self {
            observations: vec![0; num_envs * OBS_LEN],
            rewards: vec![0.0; num_envs],
            terminals: vec![0; num_envs],
            truncations: vec![0; num_envs],
            actions: vec![0; num_envs],
        }
    }

    /// Number of instances these buffers were sized for.
    pub fn num_envs(&self) -> usize {
        self.rewards.len()
    }

    /// The full observation buffer.
    pub fn observations(&self) -> &[u8] {
        &self.observations
    }

    /// One instance's `7 * 7 * 3` observation slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_envs()`.
    pub fn observation(&self, index: usize) -> &[u8] {
        &self.observations[index * OBS_LEN..(index + 1) * OBS_LEN]
    }

    /// Rewards from the most recent tick.
    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    /// Terminal flags (0 or 1) from the most recent tick.
    pub fn terminals(&self) -> &[u8] {
        &self.terminals
    }

    /// Truncation flags (0 or 1) from the most recent tick.
    pub fn truncations(&self) -> &[u8] {
        &self.truncations
    }

    /// Actions for the next tick.
    pub fn actions(&self) -> &[i32] {
        &self.actions
    }

    /// Write access to the action buffer.
    pub fn actions_mut(&mut self) -> &mut [i32] {
        &mut self.actions
    }
}

impl EnvBuffers for OwnedBuffers {
    fn views(&mut self) -> BufferViews<'_> {
        BufferViews {
            observations: &mut self.observations,
            rewards: &mut self.rewards,
            terminals: &mut self.terminals,
            truncations: &mut self.truncations,
            actions: &self.actions,
        }
    }
}

// ── BorrowedBuffers ─────────────────────────────────────────────

/// Caller-owned slices bound for the lifetime `'a`.
///
/// The engine writes straight into the caller's memory; nothing is
/// copied. Actions stay writable through [`actions_mut`](Self::actions_mut)
/// while the binding is held by an engine.
pub struct BorrowedBuffers<'a> {
    observations: &'a mut [u8],
    rewards: &'a mut [f32],
    terminals: &'a mut [u8],
    truncations: &'a mut [u8],
    actions: &'a mut [i32],
}

impl<'a> BorrowedBuffers<'a> {
    /// Bind caller-owned slices. Lengths are validated by the engine.
    pub fn new(
        observations: &'a mut [u8],
        rewards: &'a mut [f32],
        terminals: &'a mut [u8],
        truncations: &'a mut [u8],
        actions: &'a mut [i32],
    ) -> Self {
        Self {
            observations,
            rewards,
            terminals,
            truncations,
            actions,
        }
    }

    /// The bound observation buffer.
    pub fn observations(&self) -> &[u8] {
        &*self.observations
    }

    /// The bound reward buffer.
    pub fn rewards(&self) -> &[f32] {
        &*self.rewards
    }

    /// The bound terminal flags.
    pub fn terminals(&self) -> &[u8] {
        &*self.terminals
    }

    /// The bound truncation flags.
    pub fn truncations(&self) -> &[u8] {
        &*self.truncations
    }

    /// Write access to the bound action buffer.
    pub fn actions_mut(&mut self) -> &mut [i32] {
        &mut *self.actions
    }
}

impl EnvBuffers for BorrowedBuffers<'_> {
    fn views(&mut self) -> BufferViews<'_> {
        BufferViews {
            observations: &mut *self.observations,
            rewards: &mut *self.rewards,
            terminals: &mut *self.terminals,
            truncations: &mut *self.truncations,
            actions: &*self.actions,
        }
    }
}
