//! Machine-readable description of the wire protocol.

use jsbridge_wire::raw::{KIND_OFFSET, PAYLOAD_OFFSETS};
use jsbridge_wire::{symbols, ValueKind, VALUE_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the JavaScript runtime glue needs to read and write wire
/// records and to wire up imports and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLayout {
    pub version: String,
    /// Size of one record in bytes.
    pub value_size: u32,
    pub kind_offset: u32,
    pub payload_offsets: [u32; 3],
    /// Kind name → tag.
    pub kinds: BTreeMap<String, u32>,
    pub import_module: String,
    /// Functions the glue must provide.
    pub imports: Vec<String>,
    /// Functions the glue may call.
    pub exports: Vec<String>,
}

impl WireLayout {
    /// The layout this build speaks.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            value_size: VALUE_SIZE,
            kind_offset: KIND_OFFSET,
            payload_offsets: PAYLOAD_OFFSETS,
            kinds: ValueKind::ALL
                .iter()
                .map(|k| (k.name().to_string(), k.code()))
                .collect(),
            import_module: symbols::IMPORT_MODULE.to_string(),
            imports: symbols::IMPORTS.iter().map(|s| s.to_string()).collect(),
            exports: symbols::EXPORTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Serialize to the JSON document returned by `wire_layout()`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"error":"Serialization error: {}"}}"#, e)
        })
    }
}
