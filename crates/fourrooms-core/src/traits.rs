//! The binding between the engine and caller-owned output buffers.

use crate::buffers::OBS_LEN;

/// Borrowed views of the five shared buffers for the duration of one call.
///
/// Layouts are flat and indexed by instance:
/// - `observations`: `[instances, 7, 7, 3]` bytes
/// - `rewards`: `[instances]`
/// - `terminals`, `truncations`: `[instances]` bytes holding 0 or 1
/// - `actions`: `[instances]`, read only
pub struct BufferViews<'a> {
    /// Observation tensor for every instance.
    pub observations: &'a mut [u8],
    /// Reward emitted by the most recent tick.
    pub rewards: &'a mut [f32],
    /// Terminal flag emitted by the most recent tick.
    pub terminals: &'a mut [u8],
    /// Truncation flag emitted by the most recent tick.
    pub truncations: &'a mut [u8],
    /// Actions written by the caller before each step.
    pub actions: &'a [i32],
}

impl BufferViews<'_> {
    /// Compare every buffer length against the layout for `num_envs`
    /// instances, returning the first mismatch.
    pub fn shape_mismatch(&self, num_envs: usize) -> Option<ShapeMismatch> {
        let checks = [
            ("observations", num_envs * OBS_LEN, self.observations.len()),
            ("rewards", num_envs, self.rewards.len()),
            ("terminals", num_envs, self.terminals.len()),
            ("truncations", num_envs, self.truncations.len()),
            ("actions", num_envs, self.actions.len()),
        ];
        checks
            .into_iter()
            .find(|&(_, expected, actual)| expected != actual)
            .map(|(buffer, expected, actual)| ShapeMismatch {
                buffer,
                expected,
                actual,
            })
    }
}

/// A buffer whose length does not match the instance count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Which buffer is wrong.
    pub buffer: &'static str,
    /// Required element count.
    pub expected: usize,
    /// Element count actually bound.
    pub actual: usize,
}

/// Storage the engine writes observations, rewards and flags into.
///
/// Implementors own or borrow fixed-length memory. The engine checks the
/// lengths once at construction and assumes they never change afterwards;
/// implementors must return slices of the same length on every call.
pub trait EnvBuffers {
    /// Borrow all five buffers at once.
    fn views(&mut self) -> BufferViews<'_>;
}
