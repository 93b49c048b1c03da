use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::{Expr, ExprId};
use crate::function::{Function, NativeFunction};
use crate::object::{Callable, Object};
use crate::stmt::{ClassStmt, Stmt};
use crate::token::{Token, Type};

/// Carries a non-local `return` up through block and control-flow execution
/// back to the nearest enclosing call, without being confused for a genuine
/// runtime error. `?` on a `Result<_, Unwind>` threads both cases uniformly;
/// only the function-invocation boundary distinguishes them.
#[derive(Debug)]
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type EvalResult = Result<Object, Unwind>;
type ExecResult = Result<(), Unwind>;

/// Walks the AST holding the fixed `globals` root and the current lexical
/// `environment`. `locals` is the resolver's side-table, keyed by the stable
/// id every `Variable`/`Assign`/`This`/`Super` node carries.
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    interactive: bool,
    /// Buffers every `print` and interactive echo rather than writing to
    /// stdout directly, so the driver ([`crate::Ember`]) can flush it to an
    /// arbitrary sink — real stdout in production, an in-memory buffer in
    /// tests. Never cleared on its own; see [`Interpreter::take_output`].
    output: Vec<u8>,
}

impl Interpreter {
    pub fn new(interactive: bool) -> Self {
        let globals = Environment::new(None);
        globals.borrow_mut().define("clock", Object::Callable(Rc::new(NativeFunction::clock())));

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            interactive,
            output: Vec::new(),
        }
    }

    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Drops every side-table entry from prior runs. Each `Parser` numbers
    /// its `ExprId`s from zero, so without this a later REPL line can reuse
    /// an id an earlier line resolved to a non-zero distance; if the new
    /// line's node with that id resolves globally instead, `lookup` would
    /// read the stale distance and walk off the end of the environment
    /// chain. Called once per [`Ember::run`], before resolving.
    pub fn clear_locals(&mut self) {
        self.locals.clear();
    }

    /// Hands back everything printed since the last call, leaving the
    /// interpreter's buffer empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    fn print_line(&mut self, value: &Object) {
        writeln!(self.output, "{value}").expect("writing to an in-memory buffer never fails");
    }

    /// Runs a top-level program. The resolver rejects `return` outside a
    /// function, so an `Unwind::Return` should never reach here; it is
    /// treated as a no-op rather than panicking, should that invariant ever
    /// be violated by a future change to the resolver.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => return Err(error),
                Err(Unwind::Return(_)) => {}
            }
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression(expr) => {
                let value = self.evaluate(expr)?;
                if self.interactive {
                    self.print_line(&value);
                }
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                self.print_line(&value);
                Ok(())
            }
            Stmt::Var(var) => {
                let value = match &var.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::Nil,
                };
                self.environment.borrow_mut().define(&var.name.lexeme, value);
                Ok(())
            }
            Stmt::Block(statements) => {
                let block_env = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(statements, block_env)
            }
            Stmt::If(if_stmt) => {
                if self.evaluate(&if_stmt.condition)?.is_truthy() {
                    self.execute(&if_stmt.then_branch)
                } else if let Some(else_branch) = &if_stmt.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While(while_stmt) => {
                while self.evaluate(&while_stmt.condition)?.is_truthy() {
                    self.execute(&while_stmt.body)?;
                }
                Ok(())
            }
            Stmt::Function(declaration) => {
                let function = Function::new(Rc::new(declaration.clone()), Rc::clone(&self.environment), false);
                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Object::Callable(Rc::new(function)));
                Ok(())
            }
            Stmt::Return(return_stmt) => {
                let value = match &return_stmt.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::Nil,
                };
                Err(Unwind::Return(value))
            }
            Stmt::Class(class_stmt) => self.execute_class(class_stmt),
        }
    }

    /// Runs `statements` in `environment`, restoring the prior environment on
    /// every exit path — including an error or a return unwind.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            if let Err(err) = self.execute(statement) {
                result = Err(err);
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn execute_class(&mut self, class_stmt: &ClassStmt) -> ExecResult {
        let superclass = match &class_stmt.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Object::Class(class) => Some(class),
                _ => return Err(runtime_error(superclass_token(expr), "A superclass must be a class.").into()),
            },
            None => None,
        };

        self.environment.borrow_mut().define(&class_stmt.name.lexeme, Object::Nil);

        let methods_environment = if let Some(superclass) = &superclass {
            let env = Environment::new(Some(Rc::clone(&self.environment)));
            env.borrow_mut().define("super", Object::Class(Rc::clone(superclass)));
            env
        } else {
            Rc::clone(&self.environment)
        };

        let mut methods = HashMap::new();
        for method in &class_stmt.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::new(method.clone()), Rc::clone(&methods_environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        let class = Rc::new(Class::new(class_stmt.name.lexeme.clone(), superclass, methods));
        Environment::assign(&self.environment, &class_stmt.name, Object::Class(class))?;

        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary(unary) => {
                let right = self.evaluate(&unary.right)?;
                match unary.operator.r#type {
                    Type::Bang => Ok(Object::Bool(!right.is_truthy())),
                    Type::Minus => match right {
                        Object::Number(n) => Ok(Object::Number(-n)),
                        _ => Err(runtime_error(&unary.operator, "Operand must be a number.").into()),
                    },
                    _ => unreachable!("scanner/parser only produce ! and - as unary operators"),
                }
            }
            Expr::Binary(binary) => self.evaluate_binary(binary),
            Expr::Logical(logical) => {
                let left = self.evaluate(&logical.left)?;
                if logical.operator.r#type == Type::Or {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate(&logical.right)
            }
            Expr::Variable(variable) => self.lookup(variable.id, &variable.name),
            Expr::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;
                match self.locals.get(&assign.id) {
                    Some(&distance) => Environment::assign_at(&self.environment, distance, &assign.name, value.clone())?,
                    None => Environment::assign(&self.globals, &assign.name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Call(call) => self.evaluate_call(call),
            Expr::Get(get) => {
                let object = self.evaluate(&get.object)?;
                match object {
                    Object::Instance(instance) => Ok(Instance::get(&instance, &get.name)?),
                    _ => Err(runtime_error(&get.name, "Only class instances have properties.").into()),
                }
            }
            Expr::Set(set) => {
                let object = self.evaluate(&set.object)?;
                match object {
                    Object::Instance(instance) => {
                        let value = self.evaluate(&set.value)?;
                        instance.borrow_mut().set(&set.name, value.clone());
                        Ok(value)
                    }
                    _ => Err(runtime_error(&set.name, "Only class instances have fields.").into()),
                }
            }
            Expr::This(this) => self.lookup(this.id, &this.keyword),
            Expr::Super(super_expr) => self.evaluate_super(super_expr),
        }
    }

    fn evaluate_binary(&mut self, binary: &crate::expr::BinaryExpr) -> EvalResult {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let op = &binary.operator;

        match op.r#type {
            Type::Plus => match (left, right) {
                (Object::Number(l), Object::Number(r)) => Ok(Object::Number(l + r)),
                (Object::String(l), Object::String(r)) => Ok(Object::from(format!("{l}{r}"))),
                _ => Err(runtime_error(op, "Operands must be numbers or strings.").into()),
            },
            Type::Minus => Ok(Object::Number(as_number(op, &left)? - as_number(op, &right)?)),
            Type::Star => Ok(Object::Number(as_number(op, &left)? * as_number(op, &right)?)),
            Type::Slash => {
                let (l, r) = (as_number(op, &left)?, as_number(op, &right)?);
                if r == 0.0 {
                    return Err(runtime_error(op, "Division by zero.").into());
                }
                Ok(Object::Number(l / r))
            }
            Type::Greater => Ok(Object::Bool(as_number(op, &left)? > as_number(op, &right)?)),
            Type::GreaterEqual => Ok(Object::Bool(as_number(op, &left)? >= as_number(op, &right)?)),
            Type::Less => Ok(Object::Bool(as_number(op, &left)? < as_number(op, &right)?)),
            Type::LessEqual => Ok(Object::Bool(as_number(op, &left)? <= as_number(op, &right)?)),
            Type::EqualEqual => Ok(Object::Bool(left == right)),
            Type::BangEqual => Ok(Object::Bool(left != right)),
            _ => unreachable!("scanner/parser only produce binary operators from this set"),
        }
    }

    fn evaluate_call(&mut self, call: &crate::expr::CallExpr) -> EvalResult {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Callable(callable) => callable.arity(),
            Object::Class(class) => class.arity(),
            _ => return Err(runtime_error(&call.paren, "Only functions and classes are callable.").into()),
        };

        if arguments.len() != arity {
            return Err(runtime_error(&call.paren, &format!("Expected {arity} arguments but got {}.", arguments.len())).into());
        }

        match callee {
            Object::Callable(callable) => Ok(callable.call(self, arguments)?),
            Object::Class(class) => Ok(class.call(self, arguments)?),
            _ => unreachable!("checked above"),
        }
    }

    fn evaluate_super(&mut self, super_expr: &crate::expr::SuperExpr) -> EvalResult {
        let distance = *self.locals.get(&super_expr.id).expect("resolver always resolves 'super' locally");
        let Object::Class(superclass) = Environment::get_at(&self.environment, distance, &super_expr.keyword)? else {
            unreachable!("'super' always resolves to a class value")
        };

        let this_token = Token::from_identifier("this");
        let instance = Environment::get_at(&self.environment, distance - 1, &this_token)?;

        let Some(method) = superclass.find_method(&super_expr.method.lexeme) else {
            return Err(runtime_error(&super_expr.method, &format!("Undefined property '{}'.", super_expr.method.lexeme)).into());
        };

        Ok(Object::Callable(Rc::new(method.bind(instance))))
    }

    fn lookup(&self, id: ExprId, name: &Token) -> EvalResult {
        match self.locals.get(&id) {
            Some(&distance) => Ok(Environment::get_at(&self.environment, distance, name)?),
            None => Ok(Environment::get(&self.globals, name)?),
        }
    }
}

fn as_number(op: &Token, value: &Object) -> Result<f64, RuntimeError> {
    match value {
        Object::Number(n) => Ok(*n),
        _ => Err(runtime_error(op, "Operands must be numbers.")),
    }
}

fn runtime_error(token: &Token, message: &str) -> RuntimeError {
    RuntimeError { token: token.clone(), message: message.to_string() }
}

fn superclass_token(expr: &Expr) -> &Token {
    match expr {
        Expr::Variable(variable) => &variable.name,
        _ => unreachable!("the parser only ever produces a Variable for a superclass expression"),
    }
}
