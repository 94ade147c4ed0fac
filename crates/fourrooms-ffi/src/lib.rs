//! C ABI for the Four Rooms batched grid-world engine.
//!
//! An external trainer allocates the five shared buffers, binds them at
//! [`fourrooms_engine_create`](engine::fourrooms_engine_create), and
//! drives the engine through an opaque `u64` handle. Every function
//! returns a [`FourRoomsStatus`] code; panics never cross the boundary.
//!
//! This is the only crate in the workspace that contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::os::raw::c_char;

/// Run `$body` under `catch_unwind`, returning `$fallback` if it panics.
macro_rules! ffi_guard_or {
    ($fallback:expr, $body:block) => {{
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(v) => v,
            Err(payload) => {
                $crate::record_panic(&*payload);
                $fallback
            }
        }
    }};
}

/// Run `$body` under `catch_unwind`, returning `Panicked` if it panics.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::FourRoomsStatus::Panicked as i32, $body)
    };
}

/// Lock a table mutex, returning `InternalError` from the enclosing
/// guard body if the lock is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(g) => g,
            Err(_) => return $crate::status::FourRoomsStatus::InternalError as i32,
        }
    };
}

pub mod buffers;
pub mod config;
pub mod engine;
mod handle;
pub mod status;

pub use buffers::{FourRoomsBuffers, RawBuffers};
pub use config::{fourrooms_config_default, FourRoomsConfig};
pub use engine::FourRoomsStats;
pub use status::FourRoomsStatus;

thread_local! {
    static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %msg, "panic caught at C boundary");
    LAST_PANIC.with(|p| *p.borrow_mut() = msg);
}

/// Copy the message of the most recent panic caught on this thread into
/// `buf` as a NUL-terminated string.
///
/// Returns the full message length in bytes (excluding the NUL), or 0 if
/// no panic has been caught on this thread. At most `cap - 1` bytes are
/// written; pass a null `buf` to query the length alone.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_last_panic_message(buf: *mut c_char, cap: usize) -> usize {
    LAST_PANIC.with(|p| {
        let msg = p.borrow();
        let bytes = msg.as_bytes();
        if !buf.is_null() && cap > 0 {
            let n = bytes.len().min(cap - 1);
            // SAFETY: buf points to at least `cap` writable bytes per caller contract.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        bytes.len()
    })
}
