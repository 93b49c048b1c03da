//! A debug utility that renders an [`Expr`]/[`Stmt`] tree as a parenthesized
//! Lisp-like string, e.g. `(+ 1 2)`. Not part of the observable pipeline in
//! spec §6.3; used by the REPL's debug flag and by tests that want to assert
//! on parser shape without depending on evaluation.
//!
//! Dispatch is a plain `match` over the tagged enums rather than a visitor
//! trait, matching the choice made for the resolver and interpreter.

use crate::expr::Expr;
use crate::stmt::Stmt;

pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => value.to_string(),
        Expr::Grouping(inner) => parenthesize("group", &[inner]),
        Expr::Unary(unary) => parenthesize(&unary.operator.lexeme, &[&unary.right]),
        Expr::Binary(binary) => parenthesize(&binary.operator.lexeme, &[&binary.left, &binary.right]),
        Expr::Logical(logical) => parenthesize(&logical.operator.lexeme, &[&logical.left, &logical.right]),
        Expr::Variable(variable) => variable.name.lexeme.clone(),
        Expr::Assign(assign) => parenthesize(&format!("= {}", assign.name.lexeme), &[&assign.value]),
        Expr::Call(call) => {
            let mut s = print_expr(&call.callee);
            s.push('(');
            let args: Vec<String> = call.arguments.iter().map(print_expr).collect();
            s.push_str(&args.join(" "));
            s.push(')');
            s
        }
        Expr::Get(get) => format!("(. {} {})", print_expr(&get.object), get.name.lexeme),
        Expr::Set(set) => format!("(= (. {} {}) {})", print_expr(&set.object), set.name.lexeme, print_expr(&set.value)),
        Expr::This(_) => "this".to_string(),
        Expr::Super(super_expr) => format!("(super {})", super_expr.method.lexeme),
    }
}

pub fn print_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Expression(expr) => parenthesize("expr", &[expr]),
        Stmt::Print(expr) => parenthesize("print", &[expr]),
        Stmt::Var(var) => match &var.initializer {
            Some(init) => format!("(var {} = {})", var.name.lexeme, print_expr(init)),
            None => format!("(var {})", var.name.lexeme),
        },
        Stmt::Block(statements) => {
            let body: Vec<String> = statements.iter().map(print_stmt).collect();
            format!("{{ {} }}", body.join(" "))
        }
        Stmt::If(if_stmt) => {
            let mut s = format!("(if {} {}", print_expr(&if_stmt.condition), print_stmt(&if_stmt.then_branch));
            if let Some(else_branch) = &if_stmt.else_branch {
                s.push_str(" else ");
                s.push_str(&print_stmt(else_branch));
            }
            s.push(')');
            s
        }
        Stmt::While(while_stmt) => format!("(while {} {})", print_expr(&while_stmt.condition), print_stmt(&while_stmt.body)),
        Stmt::Function(function) => {
            let params = function.params.iter().map(|p| p.lexeme.as_str()).collect::<Vec<_>>().join(" ");
            let body: Vec<String> = function.body.iter().map(print_stmt).collect();
            format!("(fun {}({}) {{ {} }})", function.name.lexeme, params, body.join(" "))
        }
        Stmt::Return(return_stmt) => match &return_stmt.value {
            Some(value) => format!("(return {})", print_expr(value)),
            None => "(return)".to_string(),
        },
        Stmt::Class(class_stmt) => {
            let methods: Vec<String> = class_stmt.methods.iter().map(|m| m.name.lexeme.clone()).collect();
            match &class_stmt.superclass {
                Some(superclass) => format!("(class {} < {} {})", class_stmt.name.lexeme, print_expr(superclass), methods.join(" ")),
                None => format!("(class {} {})", class_stmt.name.lexeme, methods.join(" ")),
            }
        }
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut s = String::from("(");
    s.push_str(name);
    for expr in exprs {
        s.push(' ');
        s.push_str(&print_expr(expr));
    }
    s.push(')');
    s
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::{BinaryExpr, UnaryExpr};
    use crate::object::Object;
    use crate::token::{Token, Type};

    #[test]
    fn prints_binary_expression() {
        let expr = Expr::Binary(BinaryExpr {
            left: Box::new(Expr::Unary(UnaryExpr {
                operator: Token::new(Type::Minus, "-".to_string(), None, 1),
                right: Box::new(Expr::Literal(Object::Number(123.0))),
            })),
            operator: Token::new(Type::Star, "*".to_string(), None, 1),
            right: Box::new(Expr::Grouping(Box::new(Expr::Literal(Object::Number(45.67))))),
        });

        assert_eq!(print_expr(&expr), "(* (- 123) (group 45.67))");
    }
}
