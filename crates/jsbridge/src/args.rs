//! Outbound argument buffers.
//!
//! An argument list is encoded into a contiguous array of [`RawValue`]s
//! whose base pointer and count are handed to the boundary for exactly one
//! call. [`RawArgs`] borrows the buffer, so the pointer cannot outlive the
//! scope that built it.

use crate::value::JsValue;
use jsbridge_wire::RawValue;

/// An encoded argument list that owns its storage.
#[derive(Debug, Clone, Default)]
pub struct RawArguments {
    values: Vec<RawValue>,
}

impl RawArguments {
    /// Encode each argument independently, in order.
    pub fn encode(args: &[JsValue]) -> Self {
        Self {
            values: args.iter().map(JsValue::encode).collect(),
        }
    }

    pub fn as_args(&self) -> RawArgs<'_> {
        RawArgs {
            values: &self.values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Borrowed pointer/count view of an encoded argument list.
#[derive(Debug, Clone, Copy)]
pub struct RawArgs<'a> {
    values: &'a [RawValue],
}

impl<'a> RawArgs<'a> {
    /// Base address of the buffer. Never null: an empty list yields a
    /// dangling, well-aligned pointer that must not be read.
    pub fn as_ptr(&self) -> *const RawValue {
        self.values.as_ptr()
    }

    pub fn argc(&self) -> u32 {
        // Argument lists are built from slices of native values; more than
        // u32::MAX of them cannot be encoded in the first place.
        self.values.len() as u32
    }

    pub fn as_slice(&self) -> &'a [RawValue] {
        self.values
    }

    pub fn decode_all(&self) -> Vec<JsValue> {
        self.values.iter().map(JsValue::decode).collect()
    }
}

/// Encode `args`, run `body` with a view of the encoded buffer, then drop
/// the buffer. The buffer is released on every exit path, unwinding
/// included.
pub fn with_raw_values<R>(args: &[JsValue], body: impl FnOnce(RawArgs<'_>) -> R) -> R {
    let encoded = RawArguments::encode(args);
    body(encoded.as_args())
}
