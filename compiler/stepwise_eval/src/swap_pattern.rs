//! Recognition of the temp-variable swap idiom.
//!
//! ```text
//! if (a[j] > a[j + 1]) {
//!     let t = a[j];        // capture, executes normally
//!     a[j] = a[j + 1];     // first half: swap event
//!     a[j + 1] = t;        // second half: swap event, statement skipped
//! }
//! ```
//!
//! Detection is purely syntactic and never touches runtime state. The
//! executor asks [`detect_swap`] for a plan and then carries it out; if no
//! plan comes back the consequent runs as ordinary assignments.

use stepwise_ir::visitor::{walk_expr, Visitor};
use stepwise_ir::{AssignOp, Expr, IfStatement, Located, Stmt};

/// A matched swap inside an `if` consequent.
#[derive(Debug)]
pub struct SwapPlan<'a> {
    pub array_name: &'a str,
    /// Index written first (`a[first] = a[second]`).
    pub first_index: &'a Expr,
    /// Index written from the temporary (`a[second] = t`).
    pub second_index: &'a Expr,
    /// Position of the first write in the consequent body.
    pub first_stmt: usize,
    /// Position of the second write, which the executor skips.
    pub second_stmt: usize,
    pub first_line: Option<u32>,
    pub second_line: Option<u32>,
}

/// Match `if (a[x] <op> a[y]) { t = a[x]; a[x] = a[y]; a[y] = t; }`.
///
/// `x` and `y` may appear in either order in the body. The capture may be a
/// declaration (`let`/`const`/`var`) or a plain assignment.
pub fn detect_swap(if_stmt: &IfStatement) -> Option<SwapPlan<'_>> {
    let (array_name, test_index1, test_index2) = compared_elements(&if_stmt.test)?;
    let body = if_stmt.consequent.as_body();

    // The first two top-level writes to `array_name[...]`.
    let mut writes = body
        .iter()
        .enumerate()
        .filter_map(|(pos, stmt)| element_write(stmt, array_name).map(|w| (pos, w)));
    let (first_stmt, (first_index, first_value)) = writes.next()?;
    let (second_stmt, (second_index, second_value)) = writes.next()?;

    if first_stmt == 0 || second_stmt != first_stmt + 1 {
        return None;
    }

    // a[x] = a[y] with {x, y} the compared indices.
    let (value_array, value_index) = first_value.as_element_access()?;
    let written_compared = (same_expr(first_index, test_index1)
        && same_expr(value_index, test_index2))
        || (same_expr(first_index, test_index2) && same_expr(value_index, test_index1));
    if value_array != array_name || !written_compared {
        return None;
    }

    // a[y] = t, with `t` captured from a[x] just before.
    let temp = second_value.as_identifier()?;
    if !same_expr(second_index, value_index) || temp == array_name {
        return None;
    }
    let (captured_array, captured_index) = temp_capture(&body[first_stmt - 1], temp)?;
    if captured_array != array_name || !same_expr(captured_index, first_index) {
        return None;
    }

    if !is_stable(first_index, &[array_name, temp]) || !is_stable(second_index, &[array_name, temp])
    {
        return None;
    }

    Some(SwapPlan {
        array_name,
        first_index,
        second_index,
        first_stmt,
        second_stmt,
        first_line: body[first_stmt].line(),
        second_line: body[second_stmt].line(),
    })
}

/// `a[x] <cmp> a[y]` on the same identifier.
fn compared_elements(test: &Expr) -> Option<(&str, &Expr, &Expr)> {
    let Expr::Binary(binary) = test else {
        return None;
    };
    if !binary.operator.is_comparison() {
        return None;
    }
    let (left_name, left_index) = binary.left.as_element_access()?;
    let (right_name, right_index) = binary.right.as_element_access()?;
    (left_name == right_name).then_some((left_name, left_index, right_index))
}

/// `array_name[index] = value;` as a statement.
fn element_write<'a>(stmt: &'a Stmt, array_name: &str) -> Option<(&'a Expr, &'a Expr)> {
    let Stmt::Expression(expr_stmt) = stmt else {
        return None;
    };
    let Expr::Assignment(assign) = &expr_stmt.expression else {
        return None;
    };
    if assign.operator != AssignOp::Assign {
        return None;
    }
    let (name, index) = assign.left.as_element_access()?;
    (name == array_name).then_some((index, assign.right.as_ref()))
}

/// `let temp = a[x];` or `temp = a[x];`, returning `(a, x)`.
fn temp_capture<'a>(stmt: &'a Stmt, temp: &str) -> Option<(&'a str, &'a Expr)> {
    let value = match stmt {
        Stmt::VariableDeclaration(decl) => match decl.declarations.as_slice() {
            [declarator] if declarator.id.as_identifier() == Some(temp) => {
                declarator.init.as_ref()?
            }
            _ => return None,
        },
        Stmt::Expression(expr_stmt) => match &expr_stmt.expression {
            Expr::Assignment(assign)
                if assign.operator == AssignOp::Assign
                    && assign.left.as_identifier() == Some(temp) =>
            {
                assign.right.as_ref()
            }
            _ => return None,
        },
        _ => return None,
    };
    value.as_element_access()
}

/// Structural equality that ignores source locations.
fn same_expr(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Literal(a), Expr::Literal(b)) => a.value == b.value && a.regex == b.regex,
        (Expr::Identifier(a), Expr::Identifier(b)) => a.name == b.name,
        (Expr::Binary(a), Expr::Binary(b)) => {
            a.operator == b.operator && same_expr(&a.left, &b.left) && same_expr(&a.right, &b.right)
        }
        (Expr::Logical(a), Expr::Logical(b)) => {
            a.operator == b.operator && same_expr(&a.left, &b.left) && same_expr(&a.right, &b.right)
        }
        (Expr::Unary(a), Expr::Unary(b)) => {
            a.operator == b.operator && same_expr(&a.argument, &b.argument)
        }
        (Expr::Conditional(a), Expr::Conditional(b)) => {
            same_expr(&a.test, &b.test)
                && same_expr(&a.consequent, &b.consequent)
                && same_expr(&a.alternate, &b.alternate)
        }
        _ => false,
    }
}

/// Rejects index expressions whose value could change while the idiom runs.
struct StableIndex<'n> {
    forbidden: &'n [&'n str],
    stable: bool,
}

impl<'ast> Visitor<'ast> for StableIndex<'_> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::Identifier(ident) if self.forbidden.contains(&ident.name.as_str()) => {
                self.stable = false;
            }
            Expr::Literal(_)
            | Expr::Identifier(_)
            | Expr::Binary(_)
            | Expr::Logical(_)
            | Expr::Unary(_)
            | Expr::Conditional(_) => walk_expr(self, expr),
            _ => self.stable = false,
        }
    }
}

/// No side effects and no mention of any `forbidden` name.
fn is_stable(index: &Expr, forbidden: &[&str]) -> bool {
    let mut check = StableIndex {
        forbidden,
        stable: true,
    };
    check.visit_expr(index);
    check.stable
}
