//! Call bridge between native Rust code and a JavaScript engine.
//!
//! The engine is reachable only through flat functions taking integers and
//! pointers. Values cross as fixed 32-byte wire records (see
//! [`jsbridge_wire::raw`]); engine-resident values are opaque references.
//!
//! # Outbound
//!
//! [`JsFunction::call`], [`JsFunction::call_with_this`] and
//! [`JsFunction::construct`] encode their arguments into a buffer that lives
//! for exactly one boundary call and decode the single returned value.
//!
//! # Inbound
//!
//! [`JsClosure::new`] registers a native closure and asks the engine for a
//! callable bound to its handle. When the engine calls it, the exported
//! entry points in [`trampoline`] decode the arguments, run the closure and
//! pass the result to an engine continuation function. Closures must be
//! released explicitly with [`JsClosure::release`].
//!
//! # Boundary
//!
//! On `wasm32` calls go through the module's imports. Elsewhere, install a
//! [`Boundary`] implementation with [`install_boundary`] first.
//!
//! Everything here is single-threaded: calls may nest across both runtimes,
//! but never overlap.

pub mod args;
pub mod boundary;
mod closure;
pub mod gateway;
#[cfg(target_arch = "wasm32")]
mod imports;
pub mod registry;
pub mod trampoline;
mod value;

pub use args::{with_raw_values, RawArgs, RawArguments};
pub use boundary::{current_boundary, install_boundary, uninstall_boundary, Boundary};
pub use closure::JsClosure;
pub use gateway::JsException;
pub use jsbridge_wire::{BridgeError, HostFuncRef, ObjectRef, RawValue, ValueKind};
pub use value::{JsFunction, JsObject, JsString, JsValue};

#[cfg(target_arch = "wasm32")]
pub use boundary::ImportedBoundary;
