use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::Object;
use crate::token::Token;

/// A class declaration: a name, its resolved methods, and an optional parent
/// to fall back on. Classes are immutable once built, so unlike `Instance`
/// they need no interior mutability.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<Class>>,
    pub methods: HashMap<String, Rc<Function>>,
}

impl Class {
    pub fn new(name: String, superclass: Option<Rc<Class>>, methods: HashMap<String, Rc<Function>>) -> Self {
        Class { name, superclass, methods }
    }

    /// Walks the inheritance chain from `self` up through ancestors; the
    /// nearest ancestor defining `name` wins.
    pub fn find_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }

        self.superclass.as_ref().and_then(|parent| parent.find_method(name))
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

impl Class {
    /// `arity` is the `init` method's arity, or 0 for a class with none.
    pub fn arity(self: &Rc<Self>) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }

    /// Constructs an instance and, if `init` exists, binds and invokes it.
    pub fn call(self: &Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(self))));

        if let Some(init) = self.find_method("init") {
            let bound = Rc::new(init.bind(Object::Instance(Rc::clone(&instance))));
            bound.call(interpreter, arguments)?;
        }

        Ok(Object::Instance(instance))
    }
}

/// A live object: a reference to its class plus its own field map. Fields
/// are looked up before methods, so an instance can shadow an inherited
/// method with a plain field of the same name.
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<Class>,
    pub fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    pub fn get(this: &Rc<RefCell<Instance>>, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(field) = this.borrow().fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = this.borrow().class.find_method(&name.lexeme) {
            return Ok(Object::Callable(Rc::new(method.bind(Object::Instance(Rc::clone(this))))));
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined property '{}'.", name.lexeme),
        })
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}
