//! Wire-level types shared by both sides of the jsbridge boundary.
//!
//! The boundary between the native module and the JavaScript engine only
//! carries integers and pointers. This crate defines what those integers
//! mean: the fixed 32-byte [`RawValue`] record, its [`ValueKind`] tags, the
//! opaque [`ObjectRef`] / [`HostFuncRef`] handles, and the [`BridgeError`]
//! taxonomy for protocol violations.
//!
//! Interpreting the payload words of a record as a native value is done by
//! the `jsbridge` crate; nothing here dereferences a handle.

mod error;
mod handle;
pub mod raw;
pub mod symbols;

pub use error::{violation, BridgeError};
pub use handle::{HostFuncRef, ObjectRef};
pub use raw::{RawValue, ValueKind, VALUE_SIZE};

/// Result type used for checked wire operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
