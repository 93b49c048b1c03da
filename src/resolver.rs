use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::Expr;
use crate::interpreter::Interpreter;
use crate::stmt::Stmt;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

type ResolveResult = Result<(), ResolveError>;

/// Simulates lexical scoping to compute, for every variable-bearing
/// expression, the hop distance to the environment holding its binding.
/// Stops at the first error in a traversal rather than collecting a batch —
/// unlike the scanner and parser, a resolver error can leave `scopes` in a
/// state later resolution shouldn't trust.
pub struct Resolver<'a> {
    interpreter: &'a mut Interpreter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a> Resolver<'a> {
    pub fn new(interpreter: &'a mut Interpreter) -> Self {
        Resolver { interpreter, scopes: vec![], current_function: FunctionType::None, current_class: ClassType::None }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) -> ResolveResult {
        for statement in statements {
            self.resolve_stmt(statement)?;
        }
        Ok(())
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        match stmt {
            Stmt::Expression(expr) => self.resolve_expr(expr),
            Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::Var(var) => {
                self.declare(&var.name)?;
                if let Some(initializer) = &var.initializer {
                    self.resolve_expr(initializer)?;
                }
                self.define(&var.name);
                Ok(())
            }
            Stmt::Block(statements) => {
                self.begin_scope();
                let result = self.resolve(statements);
                self.end_scope();
                result
            }
            Stmt::If(if_stmt) => {
                self.resolve_expr(&if_stmt.condition)?;
                self.resolve_stmt(&if_stmt.then_branch)?;
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.resolve_stmt(else_branch)?;
                }
                Ok(())
            }
            Stmt::While(while_stmt) => {
                self.resolve_expr(&while_stmt.condition)?;
                self.resolve_stmt(&while_stmt.body)
            }
            Stmt::Function(function) => {
                self.declare(&function.name)?;
                self.define(&function.name);
                self.resolve_function(function, FunctionType::Function)
            }
            Stmt::Return(return_stmt) => {
                if self.current_function == FunctionType::None {
                    return Err(ResolveError {
                        token: return_stmt.keyword.clone(),
                        message: "Cannot return from a top-level scope.".to_string(),
                    });
                }

                if let Some(value) = &return_stmt.value {
                    if self.current_function == FunctionType::Initializer {
                        return Err(ResolveError {
                            token: return_stmt.keyword.clone(),
                            message: "Cannot return from an initializer.".to_string(),
                        });
                    }
                    self.resolve_expr(value)?;
                }

                Ok(())
            }
            Stmt::Class(class_stmt) => self.resolve_class(class_stmt),
        }
    }

    fn resolve_class(&mut self, class_stmt: &crate::stmt::ClassStmt) -> ResolveResult {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class_stmt.name)?;
        self.define(&class_stmt.name);

        if let Some(superclass) = &class_stmt.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!("parser only ever produces a Variable here") };

            if class_stmt.name.lexeme == variable.name.lexeme {
                self.current_class = enclosing_class;
                return Err(ResolveError {
                    token: variable.name.clone(),
                    message: "A class cannot inherit from itself.".to_string(),
                });
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass)?;

            self.begin_scope();
            self.scopes.last_mut().expect("scope just pushed").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

        let result = (|| -> ResolveResult {
            for method in &class_stmt.methods {
                let kind = if method.name.lexeme == "init" { FunctionType::Initializer } else { FunctionType::Method };
                self.resolve_function(method, kind)?;
            }
            Ok(())
        })();

        self.end_scope();
        if class_stmt.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
        result
    }

    fn resolve_expr(&mut self, expr: &Expr) -> ResolveResult {
        match expr {
            Expr::Literal(_) => Ok(()),
            Expr::Grouping(inner) => self.resolve_expr(inner),
            Expr::Unary(unary) => self.resolve_expr(&unary.right),
            Expr::Binary(binary) => {
                self.resolve_expr(&binary.left)?;
                self.resolve_expr(&binary.right)
            }
            Expr::Logical(logical) => {
                self.resolve_expr(&logical.left)?;
                self.resolve_expr(&logical.right)
            }
            Expr::Variable(variable) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&variable.name.lexeme) == Some(&false) {
                        return Err(ResolveError {
                            token: variable.name.clone(),
                            message: "Cannot read a local variable in its own initializer.".to_string(),
                        });
                    }
                }
                self.resolve_local(variable.id, &variable.name);
                Ok(())
            }
            Expr::Assign(assign) => {
                self.resolve_expr(&assign.value)?;
                self.resolve_local(assign.id, &assign.name);
                Ok(())
            }
            Expr::Call(call) => {
                self.resolve_expr(&call.callee)?;
                for argument in &call.arguments {
                    self.resolve_expr(argument)?;
                }
                Ok(())
            }
            Expr::Get(get) => self.resolve_expr(&get.object),
            Expr::Set(set) => {
                self.resolve_expr(&set.value)?;
                self.resolve_expr(&set.object)
            }
            Expr::This(this) => {
                if self.current_class == ClassType::None {
                    return Err(ResolveError {
                        token: this.keyword.clone(),
                        message: "Cannot use 'this' outside of a class.".to_string(),
                    });
                }
                self.resolve_local(this.id, &this.keyword);
                Ok(())
            }
            Expr::Super(super_expr) => {
                match self.current_class {
                    ClassType::Subclass => {}
                    ClassType::None => {
                        return Err(ResolveError {
                            token: super_expr.keyword.clone(),
                            message: "Cannot use 'super' outside of a class.".to_string(),
                        });
                    }
                    ClassType::Class => {
                        return Err(ResolveError {
                            token: super_expr.keyword.clone(),
                            message: "Cannot use 'super' in a class with no superclass.".to_string(),
                        });
                    }
                }
                self.resolve_local(super_expr.id, &super_expr.keyword);
                Ok(())
            }
        }
    }

    fn resolve_function(&mut self, function: &crate::stmt::FunctionStmt, kind: FunctionType) -> ResolveResult {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in &function.params {
            self.declare(param)?;
            self.define(param);
        }
        let result = self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
        result
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) -> ResolveResult {
        let Some(scope) = self.scopes.last_mut() else { return Ok(()) };

        if scope.contains_key(&name.lexeme) {
            return Err(ResolveError {
                token: name.clone(),
                message: "A variable with this name already exists in this scope.".to_string(),
            });
        }

        scope.insert(name.lexeme.clone(), false);
        Ok(())
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn resolve_local(&mut self, id: crate::expr::ExprId, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }
}
