use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// One scope in the cactus stack: a name→value map plus an optional parent.
/// Environments are reference-counted so a closure can keep its declaring
/// scope alive after that scope's block has finished executing.
#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            enclosing,
            values: HashMap::new(),
        }))
    }

    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), value);
    }

    /// Walks `distance` parent links. `distance == 0` means `self`, so this
    /// is only ever called with `distance >= 1`.
    fn ancestor(start: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = Rc::clone(start);
        for _ in 0..distance {
            let parent = environment
                .borrow()
                .enclosing
                .clone()
                .expect("resolver-computed distance to stay within the environment chain");
            environment = parent;
        }
        environment
    }

    pub fn get(this: &Rc<RefCell<Environment>>, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = this.borrow().values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &this.borrow().enclosing {
            return Environment::get(enclosing, name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    pub fn get_at(this: &Rc<RefCell<Environment>>, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let target = if distance == 0 { Rc::clone(this) } else { Environment::ancestor(this, distance) };

        target.borrow().values.get(&name.lexeme).cloned().ok_or_else(|| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    pub fn assign(this: &Rc<RefCell<Environment>>, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if this.borrow().values.contains_key(&name.lexeme) {
            this.borrow_mut().values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        let enclosing = this.borrow().enclosing.clone();
        if let Some(enclosing) = enclosing {
            return Environment::assign(&enclosing, name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    pub fn assign_at(
        this: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
        value: Object,
    ) -> Result<(), RuntimeError> {
        let target = if distance == 0 { Rc::clone(this) } else { Environment::ancestor(this, distance) };

        if !target.borrow().values.contains_key(&name.lexeme) {
            return Err(RuntimeError {
                token: name.clone(),
                message: format!("Undefined variable '{}'.", name.lexeme),
            });
        }

        target.borrow_mut().values.insert(name.lexeme.clone(), value);
        Ok(())
    }
}
