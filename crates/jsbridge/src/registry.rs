//! Table of native closures the engine can call by handle.
//!
//! Entries live until they are explicitly unregistered. The engine gives no
//! reliable signal when it drops its last reference to a callable, so the
//! table never frees an entry on its own; see [`crate::JsClosure`] for the
//! owner-side contract.
//!
//! Handles are drawn from one process-wide counter, so no two closures in the
//! process ever share a handle. Bodies are not `Send` and stay in a table
//! owned by the thread that registered them; on `wasm32` that table is
//! process-wide.

use crate::value::JsValue;
use jsbridge_wire::{violation, BridgeError, HostFuncRef};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

/// Body of a registered closure.
pub type HostFn = dyn Fn(&[JsValue]) -> JsValue;

/// Next handle to hand out. Handle 0 is never used.
static NEXT_HANDLE: AtomicU32 = AtomicU32::new(1);

/// Take the next handle from `counter`. Handles are never reused, so a
/// released handle stays dead; running past `u32::MAX` is an error.
fn allocate(counter: &AtomicU32) -> Result<HostFuncRef, BridgeError> {
    counter
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        .map(HostFuncRef)
        .map_err(|_| BridgeError::HandlesExhausted)
}

/// Handle-to-body mapping for the closures registered on one thread.
#[derive(Default)]
struct ClosureTable {
    bodies: BTreeMap<HostFuncRef, Rc<HostFn>>,
}

impl ClosureTable {
    fn remove(&mut self, handle: HostFuncRef) -> Result<Rc<HostFn>, BridgeError> {
        self.bodies
            .remove(&handle)
            .ok_or(BridgeError::ReleasedClosure(handle))
    }

    fn get(&self, handle: HostFuncRef) -> Result<Rc<HostFn>, BridgeError> {
        self.bodies
            .get(&handle)
            .cloned()
            .ok_or(BridgeError::ReleasedClosure(handle))
    }
}

thread_local! {
    static REGISTRY: RefCell<ClosureTable> = RefCell::new(ClosureTable::default());
}

/// Store `body` under a fresh handle.
pub fn register(body: impl Fn(&[JsValue]) -> JsValue + 'static) -> HostFuncRef {
    let handle = allocate(&NEXT_HANDLE).unwrap_or_else(|err| violation(err));
    let body: Rc<HostFn> = Rc::new(body);
    REGISTRY.with(|table| table.borrow_mut().bodies.insert(handle, body));
    debug!(handle = %handle, "registered host function");
    handle
}

/// Remove `handle`. Removing a handle twice is a protocol violation.
pub fn unregister(handle: HostFuncRef) {
    // Drop the body outside the borrow: its captures may own other closures.
    let body = REGISTRY
        .with(|table| table.borrow_mut().remove(handle))
        .unwrap_or_else(|err| violation(err));
    drop(body);
    debug!(handle = %handle, "released host function");
}

/// The body registered under `handle`.
///
/// The returned `Rc` is detached from the table, so the body may register or
/// release closures while it runs.
pub fn lookup(handle: HostFuncRef) -> Rc<HostFn> {
    REGISTRY
        .with(|table| table.borrow().get(handle))
        .unwrap_or_else(|err| violation(err))
}

pub fn contains(handle: HostFuncRef) -> bool {
    REGISTRY.with(|table| table.borrow().bodies.contains_key(&handle))
}

/// Number of live closures on this thread.
pub fn len() -> usize {
    REGISTRY.with(|table| table.borrow().bodies.len())
}

pub fn is_empty() -> bool {
    len() == 0
}
