//! The fixed-layout wire record and its kind tags.
//!
//! Every value crossing the boundary is a 32-byte record:
//!
//! ```text
//! offset+0  : u32   — kind   (see ValueKind)
//! offset+4  : 4 bytes padding
//! offset+8  : u64   — payload1
//! offset+16 : u64   — payload2
//! offset+24 : u64   — payload3
//! ```
//!
//! # Payload layouts
//!
//! | Kind          | payload1                   | payload2          | payload3 |
//! |---------------|----------------------------|-------------------|----------|
//! | BOOLEAN   (0) | 0 = false, 1 = true        | 0                 | 0        |
//! | STRING    (1) | engine string reference    | UTF-8 byte length | 0        |
//! | NUMBER    (2) | `f64` bits                 | 0                 | 0        |
//! | OBJECT    (3) | engine object reference    | 0                 | 0        |
//! | NULL      (4) | 0                          | 0                 | 0        |
//! | UNDEFINED (5) | 0                          | 0                 | 0        |
//! | FUNCTION  (6) | engine function reference  | 0                 | 0        |
//!
//! The record size does not depend on the kind, so an argument list is a
//! plain array of records.

use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::mem;

/// Size of one wire record in bytes.
pub const VALUE_SIZE: u32 = 32;

/// Byte offset of the kind tag.
pub const KIND_OFFSET: u32 = 0;
/// Byte offsets of `payload1`, `payload2`, `payload3`.
pub const PAYLOAD_OFFSETS: [u32; 3] = [8, 16, 24];

/// Kind tag of a [`RawValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum ValueKind {
    Boolean = 0,
    String = 1,
    Number = 2,
    Object = 3,
    Null = 4,
    Undefined = 5,
    Function = 6,
}

impl ValueKind {
    /// Every kind, in code order.
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Boolean,
        ValueKind::String,
        ValueKind::Number,
        ValueKind::Object,
        ValueKind::Null,
        ValueKind::Undefined,
        ValueKind::Function,
    ];

    /// The numeric tag written into the record.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Lowercase name, as used by the JavaScript runtime glue.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Object => "object",
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Function => "function",
        }
    }
}

/// One value as it crosses the boundary.
///
/// Payload words are only given meaning by the decoder in the `jsbridge`
/// crate; this type just carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct RawValue {
    pub kind: u32,
    pub payload1: u64,
    pub payload2: u64,
    pub payload3: u64,
}

const _: () = assert!(mem::size_of::<RawValue>() == VALUE_SIZE as usize);
const _: () = assert!(mem::offset_of!(RawValue, kind) == KIND_OFFSET as usize);
const _: () = assert!(mem::offset_of!(RawValue, payload1) == PAYLOAD_OFFSETS[0] as usize);
const _: () = assert!(mem::offset_of!(RawValue, payload2) == PAYLOAD_OFFSETS[1] as usize);
const _: () = assert!(mem::offset_of!(RawValue, payload3) == PAYLOAD_OFFSETS[2] as usize);

impl RawValue {
    pub const UNDEFINED: RawValue = RawValue::new(ValueKind::Undefined, 0, 0);

    /// Build a record; `payload3` is reserved and always zero.
    pub const fn new(kind: ValueKind, payload1: u64, payload2: u64) -> Self {
        Self {
            kind: kind as u32,
            payload1,
            payload2,
            payload3: 0,
        }
    }

    /// Checked kind tag.
    pub fn kind(&self) -> Result<ValueKind> {
        ValueKind::from_code(self.kind).ok_or(BridgeError::UnknownKind(self.kind))
    }
}

impl Default for RawValue {
    fn default() -> Self {
        Self::UNDEFINED
    }
}
