//! Protocol-violation taxonomy.

use crate::{HostFuncRef, ValueKind};
use thiserror::Error;

/// A desynchronization between the native module and the engine, or a
/// misuse of the closure ownership contract.
///
/// None of these are recoverable: they are raised through [`violation`],
/// which aborts the current thread of control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A wire record carried a kind tag this build does not know.
    #[error("unknown wire value kind {0}")]
    UnknownKind(u32),

    /// A reference or length payload did not fit in 32 bits.
    #[error("{} record carries payload {payload:#x}, wider than 32 bits", .kind.name())]
    MalformedPayload { kind: ValueKind, payload: u64 },

    /// The engine invoked a closure handle that is not registered.
    #[error("host function {0} was already released")]
    ReleasedClosure(HostFuncRef),

    /// An inbound buffer pointer that is not live (double cleanup, or a
    /// pointer that never came from `prepare`).
    #[error("inbound argument buffer {0:#x} is not live (double cleanup or foreign pointer)")]
    UnknownBuffer(usize),

    /// The engine claimed more arguments than the buffer it prepared holds.
    #[error("inbound call claims {argc} arguments but the buffer holds {capacity}")]
    BufferOverrun { argc: u32, capacity: usize },

    /// The closure handle counter wrapped.
    #[error("closure handle space exhausted")]
    HandlesExhausted,

    /// A closure owner was dropped while its handle was still registered.
    #[error(
        "JsClosure for host function {0} dropped without calling `JsClosure::release`; \
         the engine cannot report when it drops its last reference, so closures \
         must be released manually"
    )]
    UnreleasedClosure(HostFuncRef),

    /// No boundary is installed on this thread and no default exists.
    #[error("no boundary installed; call `install_boundary` before crossing into the engine")]
    NoBoundary,
}

/// Report a fatal protocol violation and abort the current thread of control.
///
/// On `wasm32` builds with `panic = "abort"` this terminates the module.
#[cold]
#[track_caller]
pub fn violation(err: BridgeError) -> ! {
    tracing::error!(error = %err, "jsbridge protocol violation");
    panic!("{err}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreleased_closure_message_names_release() {
        let msg = BridgeError::UnreleasedClosure(HostFuncRef(4)).to_string();
        assert!(msg.contains("JsClosure::release"), "{msg}");
        assert!(msg.contains('4'));
    }

    #[test]
    fn unknown_buffer_is_hex() {
        let msg = BridgeError::UnknownBuffer(0x10).to_string();
        assert!(msg.contains("0x10"), "{msg}");
    }

    #[test]
    fn malformed_payload_names_kind() {
        let msg = BridgeError::MalformedPayload {
            kind: ValueKind::Object,
            payload: 1 << 32,
        }
        .to_string();
        assert_eq!(msg, "object record carries payload 0x100000000, wider than 32 bits");
    }

    #[test]
    #[should_panic(expected = "unknown wire value kind 99")]
    fn violation_panics_with_message() {
        violation(BridgeError::UnknownKind(99));
    }
}
