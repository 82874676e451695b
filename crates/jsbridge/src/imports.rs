//! Boundary backed by the functions the JavaScript runtime glue imports into
//! the module. Only built for `wasm32`.

use crate::args::RawArgs;
use crate::boundary::Boundary;
use jsbridge_wire::{HostFuncRef, ObjectRef, RawValue};

#[link(wasm_import_module = "jsbridge")]
extern "C" {
    fn jsbridge_call_function(
        function: u32,
        argv: *const RawValue,
        argc: u32,
        result: *mut RawValue,
    ) -> u32;

    fn jsbridge_call_function_with_this(
        receiver: u32,
        function: u32,
        argv: *const RawValue,
        argc: u32,
        result: *mut RawValue,
    ) -> u32;

    fn jsbridge_call_new(
        constructor: u32,
        argv: *const RawValue,
        argc: u32,
        object: *mut u32,
        exception: *mut RawValue,
    ) -> u32;

    fn jsbridge_create_function(handle: u32, object: *mut u32);
}

/// The engine reached through Wasm imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportedBoundary;

fn thrown(flag: u32, value: RawValue) -> Result<RawValue, RawValue> {
    if flag == 0 {
        Ok(value)
    } else {
        Err(value)
    }
}

impl Boundary for ImportedBoundary {
    fn call_function(&self, function: ObjectRef, args: RawArgs<'_>) -> Result<RawValue, RawValue> {
        let mut result = RawValue::UNDEFINED;
        // SAFETY: `args` keeps the buffer alive for the duration of the call
        // and `result` is a valid, writable record.
        let flag =
            unsafe { jsbridge_call_function(function.0, args.as_ptr(), args.argc(), &mut result) };
        thrown(flag, result)
    }

    fn call_function_with_this(
        &self,
        receiver: ObjectRef,
        function: ObjectRef,
        args: RawArgs<'_>,
    ) -> Result<RawValue, RawValue> {
        let mut result = RawValue::UNDEFINED;
        // SAFETY: as in `call_function`.
        let flag = unsafe {
            jsbridge_call_function_with_this(
                receiver.0,
                function.0,
                args.as_ptr(),
                args.argc(),
                &mut result,
            )
        };
        thrown(flag, result)
    }

    fn call_new(&self, constructor: ObjectRef, args: RawArgs<'_>) -> Result<ObjectRef, RawValue> {
        let mut object = 0u32;
        let mut exception = RawValue::UNDEFINED;
        // SAFETY: as in `call_function`; both out-pointers are valid.
        let flag = unsafe {
            jsbridge_call_new(
                constructor.0,
                args.as_ptr(),
                args.argc(),
                &mut object,
                &mut exception,
            )
        };
        if flag == 0 {
            Ok(ObjectRef(object))
        } else {
            Err(exception)
        }
    }

    fn create_function(&self, handle: HostFuncRef) -> ObjectRef {
        let mut object = 0u32;
        // SAFETY: `object` is a valid out-pointer.
        unsafe { jsbridge_create_function(handle.0, &mut object) };
        ObjectRef(object)
    }
}
