//! Read-only tree traversal.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits children in source order. Override a `visit_*` method to act on a
//! node kind and call the `walk_*` function to keep descending.
//!
//! ```text
//! struct CountUpdates(usize);
//!
//! impl<'ast> Visitor<'ast> for CountUpdates {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if let Expr::Update(_) = expr {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{Expr, ForInit, Program, Stmt, VariableDeclaration};

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, program: &'ast Program) {
    for stmt in &program.body {
        visitor.visit_stmt(stmt);
    }
}

fn walk_declaration<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    decl: &'ast VariableDeclaration,
) {
    for declarator in &decl.declarations {
        visitor.visit_expr(&declarator.id);
        if let Some(init) = &declarator.init {
            visitor.visit_expr(init);
        }
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match stmt {
        Stmt::VariableDeclaration(decl) => walk_declaration(visitor, decl),
        Stmt::For(for_stmt) => {
            match &for_stmt.init {
                Some(ForInit::Declaration(decl)) => walk_declaration(visitor, decl),
                Some(ForInit::Expression(expr)) => visitor.visit_expr(expr),
                None => {}
            }
            if let Some(test) = &for_stmt.test {
                visitor.visit_expr(test);
            }
            if let Some(update) = &for_stmt.update {
                visitor.visit_expr(update);
            }
            visitor.visit_stmt(&for_stmt.body);
        }
        Stmt::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.test);
            visitor.visit_stmt(&if_stmt.consequent);
            if let Some(alternate) = &if_stmt.alternate {
                visitor.visit_stmt(alternate);
            }
        }
        Stmt::Block(block) => {
            for child in &block.body {
                visitor.visit_stmt(child);
            }
        }
        Stmt::Expression(expr_stmt) => visitor.visit_expr(&expr_stmt.expression),
        Stmt::Empty(_) | Stmt::Unsupported(_) => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) | Expr::Unsupported(_) => {}
        Expr::Binary(e) => {
            visitor.visit_expr(&e.left);
            visitor.visit_expr(&e.right);
        }
        Expr::Logical(e) => {
            visitor.visit_expr(&e.left);
            visitor.visit_expr(&e.right);
        }
        Expr::Unary(e) => visitor.visit_expr(&e.argument),
        Expr::Update(e) => visitor.visit_expr(&e.argument),
        Expr::Assignment(e) => {
            visitor.visit_expr(&e.left);
            visitor.visit_expr(&e.right);
        }
        Expr::Array(e) => {
            for element in e.elements.iter().flatten() {
                visitor.visit_expr(element);
            }
        }
        Expr::Member(e) => {
            visitor.visit_expr(&e.object);
            // `a.length`: the property is a name, not an expression to evaluate.
            if e.computed {
                visitor.visit_expr(&e.property);
            }
        }
        Expr::Call(e) => {
            visitor.visit_expr(&e.callee);
            for arg in &e.arguments {
                visitor.visit_expr(arg);
            }
        }
        Expr::Conditional(e) => {
            visitor.visit_expr(&e.test);
            visitor.visit_expr(&e.consequent);
            visitor.visit_expr(&e.alternate);
        }
    }
}
