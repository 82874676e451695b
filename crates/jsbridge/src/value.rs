//! Native view of values crossing the boundary, and the wire codec.
//!
//! [`JsValue::encode`] and [`JsValue::decode`] are the only places payload
//! words of a [`RawValue`] are interpreted.

use jsbridge_wire::{violation, BridgeError, ObjectRef, RawValue, ValueKind};

/// An object resident in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsObject {
    id: ObjectRef,
}

impl JsObject {
    pub fn from_id(id: ObjectRef) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ObjectRef {
        self.id
    }
}

/// A callable resident in the engine. Calls go through the gateway
/// (see `JsFunction::call`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsFunction {
    id: ObjectRef,
}

impl JsFunction {
    pub fn from_id(id: ObjectRef) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ObjectRef {
        self.id
    }

    /// View this function as a plain object, e.g. to pass it as a receiver.
    pub fn as_object(&self) -> JsObject {
        JsObject::from_id(self.id)
    }
}

/// A string resident in the engine.
///
/// Only the reference and the byte length reported by the engine travel
/// over the wire; reading the contents is left to the caller's string
/// loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsString {
    id: ObjectRef,
    byte_len: u32,
}

impl JsString {
    pub fn from_raw_parts(id: ObjectRef, byte_len: u32) -> Self {
        Self { id, byte_len }
    }

    pub fn id(&self) -> ObjectRef {
        self.id
    }

    pub fn byte_len(&self) -> u32 {
        self.byte_len
    }
}

/// A value as seen from native code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsValue {
    Boolean(bool),
    String(JsString),
    Number(f64),
    Object(JsObject),
    Function(JsFunction),
    Null,
    Undefined,
}

impl JsValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            JsValue::Boolean(_) => ValueKind::Boolean,
            JsValue::String(_) => ValueKind::String,
            JsValue::Number(_) => ValueKind::Number,
            JsValue::Object(_) => ValueKind::Object,
            JsValue::Function(_) => ValueKind::Function,
            JsValue::Null => ValueKind::Null,
            JsValue::Undefined => ValueKind::Undefined,
        }
    }

    /// Encode into a wire record. Unused payload words are zero.
    pub fn encode(&self) -> RawValue {
        match *self {
            JsValue::Boolean(b) => RawValue::new(ValueKind::Boolean, u64::from(b), 0),
            JsValue::String(s) => RawValue::new(
                ValueKind::String,
                u64::from(s.id.0),
                u64::from(s.byte_len),
            ),
            JsValue::Number(n) => RawValue::new(ValueKind::Number, n.to_bits(), 0),
            JsValue::Object(o) => RawValue::new(ValueKind::Object, u64::from(o.id.0), 0),
            JsValue::Function(f) => RawValue::new(ValueKind::Function, u64::from(f.id.0), 0),
            JsValue::Null => RawValue::new(ValueKind::Null, 0, 0),
            JsValue::Undefined => RawValue::new(ValueKind::Undefined, 0, 0),
        }
    }

    /// Decode a wire record. An unknown kind tag, or a reference that does
    /// not fit in 32 bits, means the two sides disagree on the protocol and
    /// aborts.
    pub fn decode(raw: &RawValue) -> JsValue {
        JsValue::try_from(*raw).unwrap_or_else(|err| violation(err))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            JsValue::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            JsValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<JsString> {
        match *self {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Objects and functions both answer here; a function is an object.
    pub fn as_object(&self) -> Option<JsObject> {
        match *self {
            JsValue::Object(o) => Some(o),
            JsValue::Function(f) => Some(f.as_object()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<JsFunction> {
        match *self {
            JsValue::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }
}

impl TryFrom<RawValue> for JsValue {
    type Error = BridgeError;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        let kind = raw.kind()?;
        // References and lengths are 32-bit on the engine side.
        let narrow = |payload: u64| {
            u32::try_from(payload).map_err(|_| BridgeError::MalformedPayload { kind, payload })
        };
        Ok(match kind {
            ValueKind::Boolean => JsValue::Boolean(raw.payload1 != 0),
            ValueKind::String => JsValue::String(JsString::from_raw_parts(
                ObjectRef(narrow(raw.payload1)?),
                narrow(raw.payload2)?,
            )),
            ValueKind::Number => JsValue::Number(f64::from_bits(raw.payload1)),
            ValueKind::Object => {
                JsValue::Object(JsObject::from_id(ObjectRef(narrow(raw.payload1)?)))
            }
            ValueKind::Function => {
                JsValue::Function(JsFunction::from_id(ObjectRef(narrow(raw.payload1)?)))
            }
            ValueKind::Null => JsValue::Null,
            ValueKind::Undefined => JsValue::Undefined,
        })
    }
}

impl From<&JsValue> for RawValue {
    fn from(value: &JsValue) -> Self {
        value.encode()
    }
}

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Boolean(b)
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        JsValue::Number(n)
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsValue {
                fn from(n: $ty) -> Self {
                    JsValue::Number(f64::from(n))
                }
            }
        )*
    };
}

number_from!(f32, i32, u32, i16, u16, i8, u8);

impl From<JsObject> for JsValue {
    fn from(o: JsObject) -> Self {
        JsValue::Object(o)
    }
}

impl From<JsFunction> for JsValue {
    fn from(f: JsFunction) -> Self {
        JsValue::Function(f)
    }
}

impl From<JsString> for JsValue {
    fn from(s: JsString) -> Self {
        JsValue::String(s)
    }
}

impl From<()> for JsValue {
    fn from(_: ()) -> Self {
        JsValue::Undefined
    }
}

impl<T: Into<JsValue>> From<Option<T>> for JsValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(JsValue::Null, Into::into)
    }
}
