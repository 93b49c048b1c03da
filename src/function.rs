use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Unwind};
use crate::object::{Callable, Object};
use crate::stmt::FunctionStmt;
use crate::token::Token;

/// A user-declared function, bound method, or class initializer. All three
/// are the same shape — a declaration plus the environment captured at
/// declaration time — which is why `bind` (used for methods) just produces
/// another `Function` instead of a distinct type.
#[derive(Clone)]
pub struct Function {
    declaration: Rc<FunctionStmt>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl Function {
    pub fn new(declaration: Rc<FunctionStmt>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { declaration, closure, is_initializer }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// Produces the bound method: a fresh environment, parented on this
    /// function's own closure, with `this` defined to `instance`.
    pub fn bind(&self, instance: Object) -> Function {
        let environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.borrow_mut().define("this", instance);
        Function {
            declaration: Rc::clone(&self.declaration),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(self: Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let environment = Environment::new(Some(Rc::clone(&self.closure)));
        for (param, argument) in self.declaration.params.iter().zip(arguments.into_iter()) {
            environment.borrow_mut().define(&param.lexeme, argument);
        }

        let bound_this = || Environment::get_at(&self.closure, 0, &Token::from_identifier("this"));

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => {
                if self.is_initializer {
                    bound_this()
                } else {
                    Ok(Object::Nil)
                }
            }
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    bound_this()
                } else {
                    Ok(value)
                }
            }
            Err(Unwind::Error(err)) => Err(err),
        }
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

/// A host-provided callable — only `clock` per spec §6.2.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl NativeFunction {
    pub fn clock() -> NativeFunction {
        NativeFunction {
            name: "clock",
            arity: 0,
            function: |_, _| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("system clock to be after the Unix epoch")
                    .as_secs_f64();
                Ok(Object::Number(now))
            },
        }
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(self: Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin fn>")
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin fn>")
    }
}
