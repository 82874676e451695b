//! In-process stand-in for the JavaScript engine and its runtime glue.
//!
//! `FakeEngine` keeps a handle table of engine-resident values, runs
//! "script" functions written as Rust closures, and drives host functions
//! through the trampoline the same way the real glue does:
//! prepare → fill → invoke (with a continuation) → cleanup.

#![allow(dead_code)]

use jsbridge::trampoline;
use jsbridge::{
    install_boundary, Boundary, HostFuncRef, JsFunction, JsObject, JsString, JsValue, ObjectRef,
    RawArgs, RawValue,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Body of an engine-side function: `(engine, this, args) -> return | throw`.
pub type ScriptFn =
    Rc<dyn Fn(&FakeEngine, Option<ObjectRef>, &[JsValue]) -> Result<JsValue, JsValue>>;

#[derive(Clone)]
enum Slot {
    Plain { class: &'static str },
    Str(String),
    Script { name: &'static str, body: ScriptFn },
    Host(HostFuncRef),
}

#[derive(Default)]
pub struct FakeEngine {
    objects: RefCell<Vec<Slot>>,
    /// Values handed to continuations, in delivery order.
    pub delivered: RefCell<Vec<JsValue>>,
    /// Raw records of the most recent outbound call from native code.
    pub last_raw_args: RefCell<Vec<RawValue>>,
}

impl FakeEngine {
    /// Create an engine and install it as this thread's boundary.
    pub fn install() -> Rc<FakeEngine> {
        let engine = Rc::new(FakeEngine::default());
        install_boundary(engine.clone());
        engine
    }

    fn alloc(&self, slot: Slot) -> ObjectRef {
        let mut objects = self.objects.borrow_mut();
        objects.push(slot);
        // Reference 0 is never handed out.
        ObjectRef(objects.len() as u32)
    }

    fn slot(&self, id: ObjectRef) -> Option<Slot> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.objects.borrow().get(index).cloned()
    }

    pub fn object(&self, class: &'static str) -> JsObject {
        JsObject::from_id(self.alloc(Slot::Plain { class }))
    }

    pub fn string(&self, s: &str) -> JsString {
        let id = self.alloc(Slot::Str(s.to_string()));
        JsString::from_raw_parts(id, s.len() as u32)
    }

    pub fn function(
        &self,
        name: &'static str,
        body: impl Fn(&FakeEngine, Option<ObjectRef>, &[JsValue]) -> Result<JsValue, JsValue> + 'static,
    ) -> JsFunction {
        JsFunction::from_id(self.alloc(Slot::Script {
            name,
            body: Rc::new(body),
        }))
    }

    /// Class name of a plain object (the constructor name for instances).
    pub fn class_of(&self, obj: JsObject) -> Option<&'static str> {
        match self.slot(obj.id())? {
            Slot::Plain { class } => Some(class),
            _ => None,
        }
    }

    pub fn string_value(&self, s: JsString) -> Option<String> {
        match self.slot(s.id())? {
            Slot::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_host_function(&self, f: JsFunction) -> bool {
        matches!(self.slot(f.id()), Some(Slot::Host(_)))
    }

    fn type_error(&self) -> JsValue {
        JsValue::Object(self.object("TypeError"))
    }

    /// Call `callee` from engine code, as a script would.
    pub fn invoke(&self, callee: JsValue, args: &[JsValue]) -> Result<JsValue, JsValue> {
        match callee.as_function() {
            Some(f) => self.dispatch(None, f.id(), args),
            None => Err(self.type_error()),
        }
    }

    fn dispatch(
        &self,
        this: Option<ObjectRef>,
        callee: ObjectRef,
        args: &[JsValue],
    ) -> Result<JsValue, JsValue> {
        match self.slot(callee) {
            Some(Slot::Script { body, .. }) => body(self, this, args),
            Some(Slot::Host(handle)) => Ok(self.call_host(handle, args)),
            _ => Err(self.type_error()),
        }
    }

    /// What the runtime glue does when a host-function callable is invoked.
    fn call_host(&self, handle: HostFuncRef, args: &[JsValue]) -> JsValue {
        let argc = args.len() as u32;
        let argv = trampoline::prepare(argc);
        for (i, arg) in args.iter().enumerate() {
            // SAFETY: `prepare` sized the buffer for `argc` records.
            unsafe { argv.add(i).write(arg.encode()) };
        }

        let received = Rc::new(Cell::new(None));
        let sink = received.clone();
        let continuation = self.function(
            "continuation",
            move |engine: &FakeEngine, _, args: &[JsValue]| {
                let value = args.first().copied().unwrap_or(JsValue::Undefined);
                engine.delivered.borrow_mut().push(value);
                sink.set(Some(value));
                Ok(JsValue::Undefined)
            },
        );

        trampoline::invoke(handle, argv, argc, continuation.id());
        trampoline::cleanup(argv);
        received
            .take()
            .expect("host function never delivered its result")
    }
}

impl Boundary for FakeEngine {
    fn call_function(&self, function: ObjectRef, args: RawArgs<'_>) -> Result<RawValue, RawValue> {
        *self.last_raw_args.borrow_mut() = args.as_slice().to_vec();
        self.dispatch(None, function, &args.decode_all())
            .map(|v| v.encode())
            .map_err(|e| e.encode())
    }

    fn call_function_with_this(
        &self,
        receiver: ObjectRef,
        function: ObjectRef,
        args: RawArgs<'_>,
    ) -> Result<RawValue, RawValue> {
        *self.last_raw_args.borrow_mut() = args.as_slice().to_vec();
        self.dispatch(Some(receiver), function, &args.decode_all())
            .map(|v| v.encode())
            .map_err(|e| e.encode())
    }

    fn call_new(&self, constructor: ObjectRef, args: RawArgs<'_>) -> Result<ObjectRef, RawValue> {
        let name = match self.slot(constructor) {
            Some(Slot::Script { name, .. }) => name,
            Some(Slot::Host(_)) => "Object",
            _ => return Err(self.type_error().encode()),
        };
        let receiver = self.alloc(Slot::Plain { class: name });
        let returned = self
            .dispatch(Some(receiver), constructor, &args.decode_all())
            .map_err(|e| e.encode())?;
        Ok(match returned.as_object() {
            Some(obj) => obj.id(),
            None => receiver,
        })
    }

    fn create_function(&self, handle: HostFuncRef) -> ObjectRef {
        self.alloc(Slot::Host(handle))
    }
}
