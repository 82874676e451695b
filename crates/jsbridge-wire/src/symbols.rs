//! Symbol names on both sides of the boundary.
//!
//! The JavaScript runtime glue must provide every name in [`IMPORTS`] under
//! the [`IMPORT_MODULE`] namespace, and may call every name in [`EXPORTS`].

/// Wasm import module holding the engine-provided functions.
pub const IMPORT_MODULE: &str = "jsbridge";

// ── Imports (engine → native module) ────────────────────────────────────────

/// `(fn: u32, argv: *const RawValue, argc: u32, result: *mut RawValue) -> u32`
pub const CALL_FUNCTION: &str = "jsbridge_call_function";
/// `(this: u32, fn: u32, argv: *const RawValue, argc: u32, result: *mut RawValue) -> u32`
pub const CALL_FUNCTION_WITH_THIS: &str = "jsbridge_call_function_with_this";
/// `(ctor: u32, argv: *const RawValue, argc: u32, object: *mut u32, exception: *mut RawValue) -> u32`
pub const CALL_NEW: &str = "jsbridge_call_new";
/// `(handle: u32, object: *mut u32)`
pub const CREATE_FUNCTION: &str = "jsbridge_create_function";

pub const IMPORTS: [&str; 4] = [CALL_FUNCTION, CALL_FUNCTION_WITH_THIS, CALL_NEW, CREATE_FUNCTION];

// ── Exports (native module → engine) ────────────────────────────────────────

/// `(argc: u32) -> *mut RawValue`
pub const PREPARE_HOST_CALL: &str = "jsbridge_prepare_host_call";
/// `(handle: u32, argv: *const RawValue, argc: u32, continuation: u32)`
pub const CALL_HOST_FUNCTION: &str = "jsbridge_call_host_function";
/// `(argv: *mut RawValue)`
pub const CLEANUP_HOST_CALL: &str = "jsbridge_cleanup_host_call";

pub const EXPORTS: [&str; 3] = [PREPARE_HOST_CALL, CALL_HOST_FUNCTION, CLEANUP_HOST_CALL];
