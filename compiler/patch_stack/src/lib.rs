//! Stack growth for the recursive parts of the toolchain.
//!
//! The expression parser, the statement executor and value rendering all
//! recurse once per nesting level of the script. A patch that nests a few
//! thousand arrays or calls a user function recursively would otherwise
//! overflow the native stack long before any configured call-depth limit.
//!
//! On native targets [`ensure_sufficient_stack`] asks `stacker` for a fresh
//! segment whenever less than [`RED_ZONE`] bytes remain. On wasm32 it is a
//! plain call.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm32 manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
