//! Inbound calls: the engine invoking registered native closures.
//!
//! The engine drives every inbound call through three steps:
//!
//! 1. [`prepare`] a buffer for `argc` wire records and fill it;
//! 2. [`invoke`] the host function, which runs the closure and hands its
//!    result to a continuation function (the inbound direction cannot
//!    return values directly);
//! 3. [`cleanup`] the buffer, exactly once, after `invoke` has returned.
//!
//! Buffers are tracked in a per-thread live table, so `invoke` and `cleanup`
//! reject pointers that did not come from `prepare` or were already freed.

use crate::registry;
use crate::value::{JsFunction, JsValue};
use jsbridge_wire::{violation, BridgeError, HostFuncRef, ObjectRef, RawValue};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ptr;
use tracing::{debug, warn};

thread_local! {
    /// Live inbound buffers: base address → capacity in records.
    static LIVE: RefCell<BTreeMap<usize, usize>> = const { RefCell::new(BTreeMap::new()) };
}

/// Allocate a buffer for `argc` wire records.
///
/// Always at least one record wide, so every live buffer has a distinct
/// address even for zero-argument calls. Allocation failure aborts.
pub fn prepare(argc: u32) -> *mut RawValue {
    let capacity = (argc as usize).max(1);
    let buffer = vec![RawValue::UNDEFINED; capacity].into_boxed_slice();
    let base = Box::into_raw(buffer) as *mut RawValue;
    LIVE.with(|live| live.borrow_mut().insert(base as usize, capacity));
    base
}

/// Decode the first `argc` records of a live buffer.
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub fn inbound_arguments(argv: *const RawValue, argc: u32) -> Vec<JsValue> {
    let capacity = LIVE
        .with(|live| live.borrow().get(&(argv as usize)).copied())
        .unwrap_or_else(|| violation(BridgeError::UnknownBuffer(argv as usize)));
    if argc as usize > capacity {
        violation(BridgeError::BufferOverrun { argc, capacity });
    }
    // SAFETY: `argv` is a live buffer from `prepare` holding `capacity`
    // initialized records, and `argc <= capacity`.
    let records = unsafe { std::slice::from_raw_parts(argv, argc as usize) };
    records.iter().map(JsValue::decode).collect()
}

/// Run host function `handle` on the arguments in `argv` and deliver its
/// result by calling `continuation` with it.
pub fn invoke(handle: HostFuncRef, argv: *const RawValue, argc: u32, continuation: ObjectRef) {
    let arguments = inbound_arguments(argv, argc);
    let body = registry::lookup(handle);
    debug!(handle = %handle, argc, "inbound call");
    let result = body(&arguments);
    if let Err(exception) = JsFunction::from_id(continuation).call(&[result]) {
        warn!(handle = %handle, %exception, "continuation threw; result discarded");
    }
}

/// Free a buffer obtained from [`prepare`]. Freeing it twice is a protocol
/// violation.
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub fn cleanup(argv: *mut RawValue) {
    let capacity = LIVE
        .with(|live| live.borrow_mut().remove(&(argv as usize)))
        .unwrap_or_else(|| violation(BridgeError::UnknownBuffer(argv as usize)));
    // SAFETY: `argv` was produced by `prepare` as a boxed slice of
    // `capacity` records and has just been removed from the live table, so
    // it is reclaimed exactly once.
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(argv, capacity)) });
}

/// Number of inbound buffers prepared but not yet cleaned up on this thread.
pub fn live_buffer_count() -> usize {
    LIVE.with(|live| live.borrow().len())
}

// ── Exported entry points ───────────────────────────────────────────────────
//
// Panics cannot unwind out of `extern "C"` functions; a protocol violation
// raised below aborts the module.

#[no_mangle]
pub extern "C" fn jsbridge_prepare_host_call(argc: u32) -> *mut RawValue {
    prepare(argc)
}

#[no_mangle]
pub extern "C" fn jsbridge_call_host_function(
    handle: u32,
    argv: *const RawValue,
    argc: u32,
    continuation: u32,
) {
    invoke(HostFuncRef(handle), argv, argc, ObjectRef(continuation));
}

#[no_mangle]
pub extern "C" fn jsbridge_cleanup_host_call(argv: *mut RawValue) {
    cleanup(argv);
}
