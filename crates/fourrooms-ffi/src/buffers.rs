//! Caller-owned raw buffers bound across the C boundary.

use std::slice;

use fourrooms_core::{BufferViews, EnvBuffers};

/// Pointers and element counts for the five shared buffers.
///
/// The memory must stay valid, unaliased by other engines, and not be
/// freed until the engine is closed. The caller may write `actions` and
/// read the outputs between calls, but never during one.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FourRoomsBuffers {
    /// `num_envs * 147` bytes.
    pub observations: *mut u8,
    /// Element count of `observations`.
    pub observations_len: usize,
    /// `num_envs` rewards.
    pub rewards: *mut f32,
    /// Element count of `rewards`.
    pub rewards_len: usize,
    /// `num_envs` terminal flags (0 or 1).
    pub terminals: *mut u8,
    /// Element count of `terminals`.
    pub terminals_len: usize,
    /// `num_envs` truncation flags (0 or 1).
    pub truncations: *mut u8,
    /// Element count of `truncations`.
    pub truncations_len: usize,
    /// `num_envs` actions, written by the caller.
    pub actions: *const i32,
    /// Element count of `actions`.
    pub actions_len: usize,
}

/// [`EnvBuffers`] over caller-owned raw memory.
///
/// Slices are rebuilt from the stored pointers on every call; nothing is
/// copied.
#[derive(Debug)]
pub struct RawBuffers {
    raw: FourRoomsBuffers,
}

impl RawBuffers {
    /// Wrap `raw`, rejecting null pointers.
    ///
    /// # Safety
    ///
    /// Every pointer must be valid for its stated length, suitably
    /// aligned, and remain valid until the returned value is dropped.
    /// The output regions must not overlap each other or `actions`.
    #[allow(unsafe_code)]
    pub unsafe fn new(raw: FourRoomsBuffers) -> Option<Self> {
        let any_null = raw.observations.is_null()
            || raw.rewards.is_null()
            || raw.terminals.is_null()
            || raw.truncations.is_null()
            || raw.actions.is_null();
        (!any_null).then_some(Self { raw })
    }
}

// SAFETY: the engine holding a RawBuffers is only reached through a
// mutex, and the caller contract forbids concurrent access to the memory.
#[allow(unsafe_code)]
unsafe impl Send for RawBuffers {}

#[allow(unsafe_code)]
impl EnvBuffers for RawBuffers {
    fn views(&mut self) -> BufferViews<'_> {
        let r = &self.raw;
        // SAFETY: pointers are non-null and valid for their lengths per the
        // contract of `RawBuffers::new`; `&mut self` rules out a second view.
        unsafe {
            BufferViews {
                observations: slice::from_raw_parts_mut(r.observations, r.observations_len),
                rewards: slice::from_raw_parts_mut(r.rewards, r.rewards_len),
                terminals: slice::from_raw_parts_mut(r.terminals, r.terminals_len),
                truncations: slice::from_raw_parts_mut(r.truncations, r.truncations_len),
                actions: slice::from_raw_parts(r.actions, r.actions_len),
            }
        }
    }
}
