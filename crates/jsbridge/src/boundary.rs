//! The seam every outbound call crosses.
//!
//! On `wasm32` the default boundary is [`ImportedBoundary`], backed by the
//! functions the JavaScript runtime glue provides. Other embedders (and the
//! test harness) install their own implementation per thread with
//! [`install_boundary`].

use crate::args::RawArgs;
use jsbridge_wire::{HostFuncRef, ObjectRef, RawValue};
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
pub use crate::imports::ImportedBoundary;

/// The engine side of the bridge.
///
/// Every method is synchronous and may re-enter native code through the
/// inbound trampoline before it returns. `Err` carries a value thrown by the
/// engine, still in wire form.
pub trait Boundary {
    /// Call `function` with the engine's default receiver.
    fn call_function(&self, function: ObjectRef, args: RawArgs<'_>) -> Result<RawValue, RawValue>;

    /// Call `function` with `this` bound to `receiver`.
    fn call_function_with_this(
        &self,
        receiver: ObjectRef,
        function: ObjectRef,
        args: RawArgs<'_>,
    ) -> Result<RawValue, RawValue>;

    /// Invoke `constructor` as a constructor.
    ///
    /// Returns an object reference by type: the engine's construct semantics
    /// substitute the implicit receiver whenever the body does not return an
    /// object.
    fn call_new(&self, constructor: ObjectRef, args: RawArgs<'_>) -> Result<ObjectRef, RawValue>;

    /// Create an engine-resident callable that forwards to host function
    /// `handle`.
    fn create_function(&self, handle: HostFuncRef) -> ObjectRef;
}

thread_local! {
    static INSTALLED: RefCell<Option<Rc<dyn Boundary>>> = const { RefCell::new(None) };
}

/// Install `boundary` for the current thread, returning the previous one.
pub fn install_boundary(boundary: Rc<dyn Boundary>) -> Option<Rc<dyn Boundary>> {
    INSTALLED.with(|slot| slot.borrow_mut().replace(boundary))
}

/// Remove the boundary installed on the current thread.
pub fn uninstall_boundary() -> Option<Rc<dyn Boundary>> {
    INSTALLED.with(|slot| slot.borrow_mut().take())
}

/// The boundary outbound calls use on this thread.
///
/// The returned `Rc` is detached from the slot so nested calls can look it
/// up again while an outer call is still in flight.
pub fn current_boundary() -> Rc<dyn Boundary> {
    match INSTALLED.with(|slot| slot.borrow().clone()) {
        Some(boundary) => boundary,
        None => default_boundary(),
    }
}

#[cfg(target_arch = "wasm32")]
fn default_boundary() -> Rc<dyn Boundary> {
    Rc::new(ImportedBoundary)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_boundary() -> Rc<dyn Boundary> {
    jsbridge_wire::violation(jsbridge_wire::BridgeError::NoBoundary)
}
