use crate::boundary::current_boundary;
use crate::registry;
use crate::value::{JsFunction, JsValue};
use jsbridge_wire::{violation, BridgeError, HostFuncRef};
use std::ops::Deref;
use tracing::error;

/// A native closure exposed to the engine as a callable.
///
/// The owner must call [`JsClosure::release`] once the engine no longer
/// needs the callable. Dropping an unreleased closure is a usage error and
/// aborts: the engine cannot report when it drops its last reference, so
/// there is no safe point at which the bridge could release it implicitly.
///
/// ```no_run
/// use jsbridge::{JsClosure, JsValue};
///
/// let add = JsClosure::new(|args| {
///     let a = args.first().and_then(JsValue::as_f64).unwrap_or(0.0);
///     let b = args.get(1).and_then(JsValue::as_f64).unwrap_or(0.0);
///     JsValue::from(a + b)
/// });
/// // hand `JsValue::from(&add)` to the engine ...
/// add.release();
/// ```
#[derive(Debug)]
pub struct JsClosure {
    function: JsFunction,
    handle: HostFuncRef,
    released: bool,
}

impl JsClosure {
    /// Register `body` and create its engine-side callable.
    pub fn new(body: impl Fn(&[JsValue]) -> JsValue + 'static) -> Self {
        // Resolve the boundary first so a missing one cannot orphan an entry.
        let boundary = current_boundary();
        let handle = registry::register(body);
        let function = JsFunction::from_id(boundary.create_function(handle));
        Self {
            function,
            handle,
            released: false,
        }
    }

    /// Like [`JsClosure::new`] for bodies with no result; the engine sees
    /// `undefined`.
    pub fn new_void(body: impl Fn(&[JsValue]) + 'static) -> Self {
        Self::new(move |args| {
            body(args);
            JsValue::Undefined
        })
    }

    pub fn function(&self) -> JsFunction {
        self.function
    }

    pub fn handle(&self) -> HostFuncRef {
        self.handle
    }

    /// Unregister the body. Any later call from the engine is a protocol
    /// violation.
    pub fn release(mut self) {
        registry::unregister(self.handle);
        self.released = true;
    }
}

impl Deref for JsClosure {
    type Target = JsFunction;

    fn deref(&self) -> &JsFunction {
        &self.function
    }
}

impl From<&JsClosure> for JsValue {
    fn from(closure: &JsClosure) -> Self {
        JsValue::Function(closure.function)
    }
}

impl Drop for JsClosure {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let err = BridgeError::UnreleasedClosure(self.handle);
        if std::thread::panicking() {
            // Already unwinding; a second panic would abort without a message.
            error!(error = %err, "closure dropped during unwinding");
            return;
        }
        violation(err);
    }
}
