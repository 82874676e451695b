//! Outbound calls: native code invoking engine functions and constructors.

use crate::args::with_raw_values;
use crate::boundary::current_boundary;
use crate::value::{JsFunction, JsObject, JsValue};
use jsbridge_wire::RawValue;
use thiserror::Error;
use tracing::trace;

/// A value thrown by the engine during an outbound call.
///
/// The payload is delivered as-is; interpreting it (reading an error
/// message, a stack) is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("engine threw a {} value", .value.kind().name())]
pub struct JsException {
    pub value: JsValue,
}

impl JsException {
    fn from_raw(raw: RawValue) -> Self {
        Self {
            value: JsValue::decode(&raw),
        }
    }
}

fn decode_outcome(outcome: Result<RawValue, RawValue>) -> Result<JsValue, JsException> {
    match outcome {
        Ok(raw) => Ok(JsValue::decode(&raw)),
        Err(raw) => Err(JsException::from_raw(raw)),
    }
}

impl JsFunction {
    /// Call with the engine's default receiver.
    pub fn call(&self, args: &[JsValue]) -> Result<JsValue, JsException> {
        trace!(function = %self.id(), argc = args.len(), "call");
        let boundary = current_boundary();
        let outcome = with_raw_values(args, |raw| boundary.call_function(self.id(), raw));
        decode_outcome(outcome)
    }

    /// Call with `this` bound to `receiver`.
    pub fn call_with_this(
        &self,
        receiver: &JsObject,
        args: &[JsValue],
    ) -> Result<JsValue, JsException> {
        trace!(function = %self.id(), receiver = %receiver.id(), argc = args.len(), "call with this");
        let boundary = current_boundary();
        let outcome = with_raw_values(args, |raw| {
            boundary.call_function_with_this(receiver.id(), self.id(), raw)
        });
        decode_outcome(outcome)
    }

    /// Invoke as a constructor.
    ///
    /// Unless the constructor throws, the result is always an object: the one
    /// the body returned, or the implicit receiver when the body returned
    /// nothing or a non-object.
    pub fn construct(&self, args: &[JsValue]) -> Result<JsObject, JsException> {
        trace!(constructor = %self.id(), argc = args.len(), "construct");
        let boundary = current_boundary();
        with_raw_values(args, |raw| boundary.call_new(self.id(), raw))
            .map(JsObject::from_id)
            .map_err(JsException::from_raw)
    }

    /// [`JsFunction::call`] with arguments of any convertible types.
    ///
    /// ```no_run
    /// # use jsbridge::{JsFunction, ObjectRef};
    /// # let log = JsFunction::from_id(ObjectRef(1));
    /// log.call_with([1.5, 2.0])?;
    /// # Ok::<(), jsbridge::JsException>(())
    /// ```
    pub fn call_with<I>(&self, args: I) -> Result<JsValue, JsException>
    where
        I: IntoIterator,
        I::Item: Into<JsValue>,
    {
        self.call(&collect_args(args))
    }

    /// [`JsFunction::construct`] with arguments of any convertible types.
    pub fn construct_with<I>(&self, args: I) -> Result<JsObject, JsException>
    where
        I: IntoIterator,
        I::Item: Into<JsValue>,
    {
        self.construct(&collect_args(args))
    }
}

fn collect_args<I>(args: I) -> Vec<JsValue>
where
    I: IntoIterator,
    I::Item: Into<JsValue>,
{
    args.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::RawArgs;
    use crate::boundary::{install_boundary, Boundary};
    use jsbridge_wire::{HostFuncRef, ObjectRef};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records what crossed the boundary and answers from a script.
    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<(Option<ObjectRef>, ObjectRef, Vec<JsValue>)>>,
        throw: bool,
    }

    impl Recorder {
        fn answer(
            &self,
            receiver: Option<ObjectRef>,
            f: ObjectRef,
            args: RawArgs<'_>,
        ) -> Result<RawValue, RawValue> {
            let decoded = args.decode_all();
            let first = decoded.first().copied().unwrap_or(JsValue::Undefined);
            self.seen.borrow_mut().push((receiver, f, decoded));
            if self.throw {
                Err(JsValue::from(-1).encode())
            } else {
                Ok(first.encode())
            }
        }
    }

    impl Boundary for Recorder {
        fn call_function(&self, f: ObjectRef, args: RawArgs<'_>) -> Result<RawValue, RawValue> {
            self.answer(None, f, args)
        }

        fn call_function_with_this(
            &self,
            receiver: ObjectRef,
            f: ObjectRef,
            args: RawArgs<'_>,
        ) -> Result<RawValue, RawValue> {
            self.answer(Some(receiver), f, args)
        }

        fn call_new(&self, _: ObjectRef, _: RawArgs<'_>) -> Result<ObjectRef, RawValue> {
            if self.throw {
                Err(JsValue::Null.encode())
            } else {
                Ok(ObjectRef(77))
            }
        }

        fn create_function(&self, _: HostFuncRef) -> ObjectRef {
            ObjectRef(0)
        }
    }

    fn install(throw: bool) -> Rc<Recorder> {
        let recorder = Rc::new(Recorder {
            throw,
            ..Recorder::default()
        });
        install_boundary(recorder.clone());
        recorder
    }

    #[test]
    fn call_passes_arguments_and_decodes_result() {
        let recorder = install(false);
        let f = JsFunction::from_id(ObjectRef(3));
        let result = f.call(&[JsValue::from(2), JsValue::from(true)]).unwrap();
        assert_eq!(result, JsValue::Number(2.0));
        let seen = recorder.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, None);
        assert_eq!(seen[0].1, ObjectRef(3));
        assert_eq!(seen[0].2, vec![JsValue::Number(2.0), JsValue::Boolean(true)]);
    }

    #[test]
    fn call_with_this_forwards_receiver() {
        let recorder = install(false);
        let f = JsFunction::from_id(ObjectRef(3));
        let this = JsObject::from_id(ObjectRef(10));
        f.call_with_this(&this, &[]).unwrap();
        assert_eq!(recorder.seen.borrow()[0].0, Some(ObjectRef(10)));
    }

    #[test]
    fn thrown_value_becomes_exception() {
        install(true);
        let err = JsFunction::from_id(ObjectRef(3)).call(&[]).unwrap_err();
        assert_eq!(err.value, JsValue::Number(-1.0));
        assert_eq!(err.to_string(), "engine threw a number value");
    }

    #[test]
    fn call_with_converts_each_argument() {
        let recorder = install(false);
        let f = JsFunction::from_id(ObjectRef(3));
        let result = f.call_with([7u8, 9u8]).unwrap();
        assert_eq!(result, JsValue::Number(7.0));
        f.call_with(Vec::<JsValue>::new()).unwrap();
        f.call_with([None, Some(JsObject::from_id(ObjectRef(2)))]).unwrap();
        let seen = recorder.seen.borrow();
        assert_eq!(seen[0].2, vec![JsValue::Number(7.0), JsValue::Number(9.0)]);
        assert!(seen[1].2.is_empty());
        assert_eq!(
            seen[2].2,
            vec![JsValue::Null, JsValue::Object(JsObject::from_id(ObjectRef(2)))]
        );
    }

    #[test]
    fn construct_with_converts_arguments() {
        install(false);
        let obj = JsFunction::from_id(ObjectRef(4))
            .construct_with([true, false])
            .unwrap();
        assert_eq!(obj.id(), ObjectRef(77));
    }

    #[test]
    fn construct_returns_object_reference() {
        install(false);
        let obj = JsFunction::from_id(ObjectRef(4)).construct(&[]).unwrap();
        assert_eq!(obj.id(), ObjectRef(77));
    }

    #[test]
    fn construct_exception_is_passed_through() {
        install(true);
        let err = JsFunction::from_id(ObjectRef(4)).construct(&[]).unwrap_err();
        assert!(err.value.is_null());
    }
}
