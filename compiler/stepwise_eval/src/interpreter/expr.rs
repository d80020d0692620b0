//! Expression evaluation.
//!
//! Operands are evaluated left to right. Assignment and update targets go
//! through [`Place`], which is resolved (array found, index bounds-checked)
//! before anything is written.

use smallvec::SmallVec;
use stepwise_ir::ast::{
    AssignmentExpression, CallExpression, Literal, LogicalExpression, MemberExpression,
    UpdateExpression,
};
use stepwise_ir::{Expr, LiteralValue, Located, LogicalOp};
use stepwise_stack::ensure_sufficient_stack;
use tracing::trace;

use super::Interpreter;
use crate::builtins::{line_argument, Builtin, SwapTarget};
use crate::errors::{
    undefined_array, undefined_function, undefined_property, undefined_variable,
    unsupported_node_type, unsupported_operator, EvalResult,
};
use crate::history::{ElementAssign, EventDetails, VariableAssign};
use crate::operators::{evaluate_binary, is_supported_assign, is_supported_logical};
use crate::unary_operators::{apply_update, evaluate_unary};
use crate::value::{format_number, length_as_number, resolve_index, SharedArray, Value};

/// A resolved write target.
pub(crate) enum Place<'e> {
    Variable(&'e str),
    /// `label` is the source form of the array expression (`arr`, `grid[i]`).
    Element {
        label: String,
        array: SharedArray,
        index: usize,
    },
}

/// A completed write, carrying what an `assign` event reports.
pub(crate) enum Written {
    Variable {
        name: String,
        value: Value,
    },
    Element {
        label: String,
        array: SharedArray,
        index: usize,
        value: Value,
    },
}

impl Written {
    /// The value now stored in the target.
    pub fn value(&self) -> &Value {
        match self {
            Written::Variable { value, .. } | Written::Element { value, .. } => value,
        }
    }

    pub fn into_details(self) -> EventDetails {
        match self {
            Written::Variable { name, value } => VariableAssign {
                variable_name: name,
                value: value.snapshot(),
            }
            .into(),
            Written::Element {
                label,
                array,
                index,
                value,
            } => ElementAssign {
                array_name: label,
                index,
                value: value.snapshot(),
                array_state: array.snapshot(),
            }
            .into(),
        }
    }
}

impl Interpreter {
    /// Evaluate an expression.
    ///
    /// Failures are tagged with the innermost node type and line.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|err| err.at_node(expr.node_type(), expr.line()))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        trace!(node = expr.node_type(), line = ?expr.line(), "eval");
        match expr {
            Expr::Literal(lit) => eval_literal(lit),
            Expr::Identifier(ident) => self.eval_identifier(&ident.name),
            Expr::Binary(binary) => {
                let left = self.eval_expr(&binary.left)?;
                let right = self.eval_expr(&binary.right)?;
                evaluate_binary(&left, &right, binary.operator)
            }
            Expr::Logical(logical) => self.eval_logical(logical),
            Expr::Unary(unary) => {
                let value = self.eval_expr(&unary.argument)?;
                evaluate_unary(&value, unary.operator)
            }
            Expr::Update(update) => self.eval_update(update).map(|(result, _)| result),
            Expr::Assignment(assign) => self
                .eval_assignment(assign)
                .map(|written| written.value().clone()),
            Expr::Array(array) => {
                let mut elements = Vec::with_capacity(array.elements.len());
                for element in &array.elements {
                    elements.push(match element {
                        Some(element) => self.eval_expr(element)?,
                        None => Value::Undefined,
                    });
                }
                Ok(Value::array(elements))
            }
            Expr::Member(member) => self.eval_member(member),
            Expr::Call(call) => self.eval_call(call, expr.line()),
            Expr::Conditional(cond) => {
                if self.eval_expr(&cond.test)?.is_truthy() {
                    self.eval_expr(&cond.consequent)
                } else {
                    self.eval_expr(&cond.alternate)
                }
            }
            Expr::Unsupported(node) => Err(unsupported_node_type(&node.node_type)),
        }
    }

    /// Bound names first; `undefined`, `NaN` and `Infinity` otherwise.
    fn eval_identifier(&self, name: &str) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        match name {
            "undefined" => Ok(Value::Undefined),
            "NaN" => Ok(Value::Number(f64::NAN)),
            "Infinity" => Ok(Value::Number(f64::INFINITY)),
            _ => Err(undefined_variable(name)),
        }
    }

    /// `&&` and `||` with short-circuit evaluation.
    fn eval_logical(&mut self, logical: &LogicalExpression) -> EvalResult {
        if !is_supported_logical(logical.operator) {
            return Err(unsupported_operator(logical.operator.as_symbol()));
        }
        let left = self.eval_expr(&logical.left)?;
        match (logical.operator, left.is_truthy()) {
            (LogicalOp::And, true) | (LogicalOp::Or, false) => self.eval_expr(&logical.right),
            _ => Ok(left),
        }
    }

    /// `a.length` or `a[i]`.
    fn eval_member(&mut self, member: &MemberExpression) -> EvalResult {
        if !member.computed {
            let object = self.eval_expr(&member.object)?;
            let Some(property) = member.property.as_identifier() else {
                return Err(unsupported_node_type(member.property.node_type()));
            };
            return match (&object, property) {
                (Value::Array(array), "length") => {
                    Ok(Value::Number(length_as_number(array.len())))
                }
                _ => Err(undefined_property(property, &object)),
            };
        }

        let label = describe(&member.object);
        let array = self.eval_array(&member.object, &label)?;
        let index = self.eval_expr(&member.property)?;
        let slot = resolve_index(&index, &label, array.len())?;
        Ok(array.get(slot).unwrap_or_default())
    }

    /// Evaluate the object of an element access; it must be an array.
    fn eval_array(&mut self, object: &Expr, label: &str) -> EvalResult<SharedArray> {
        let value = match object {
            Expr::Identifier(ident) => self
                .env
                .lookup(&ident.name)
                .ok_or_else(|| undefined_array(&ident.name))?,
            other => self.eval_expr(other)?,
        };
        match value {
            Value::Array(array) => Ok(array),
            _ => Err(undefined_array(label)),
        }
    }

    /// Resolve an assignment or update target without writing to it.
    pub(crate) fn resolve_place<'e>(&mut self, target: &'e Expr) -> EvalResult<Place<'e>> {
        match target {
            Expr::Identifier(ident) => Ok(Place::Variable(&ident.name)),
            Expr::Member(member) if member.computed => {
                let label = describe(&member.object);
                let array = self.eval_array(&member.object, &label)?;
                let index = self.eval_expr(&member.property)?;
                let index = resolve_index(&index, &label, array.len())?;
                Ok(Place::Element {
                    label,
                    array,
                    index,
                })
            }
            other => Err(unsupported_node_type(other.node_type())),
        }
    }

    fn read_place(&self, place: &Place<'_>) -> EvalResult {
        match place {
            Place::Variable(name) => self
                .env
                .lookup(name)
                .ok_or_else(|| undefined_variable(name)),
            Place::Element { array, index, .. } => Ok(array.get(*index).unwrap_or_default()),
        }
    }

    fn write_place(&mut self, place: Place<'_>, value: Value) -> Written {
        match place {
            Place::Variable(name) => {
                self.env.assign(name, value.clone());
                Written::Variable {
                    name: name.to_string(),
                    value,
                }
            }
            Place::Element {
                label,
                array,
                index,
            } => {
                array.set(index, value.clone());
                Written::Element {
                    label,
                    array,
                    index,
                    value,
                }
            }
        }
    }

    /// `target = value` and the arithmetic compound forms.
    ///
    /// The right side is evaluated before the target is resolved.
    pub(crate) fn eval_assignment(&mut self, assign: &AssignmentExpression) -> EvalResult<Written> {
        if !is_supported_assign(assign.operator) {
            return Err(unsupported_operator(assign.operator.as_symbol()));
        }
        let combine = assign.operator.binary_op();

        let rhs = self.eval_expr(&assign.right)?;
        let place = self.resolve_place(&assign.left)?;
        let value = match combine {
            Some(op) => evaluate_binary(&self.read_place(&place)?, &rhs, op)?,
            None => rhs,
        };
        Ok(self.write_place(place, value))
    }

    /// `++`/`--`: returns the expression's result (old value if postfix,
    /// new value if prefix) and the write.
    pub(crate) fn eval_update(&mut self, update: &UpdateExpression) -> EvalResult<(Value, Written)> {
        let place = self.resolve_place(&update.argument)?;
        let old = self.read_place(&place)?;
        let new = apply_update(&old, update.operator);
        let result = if update.prefix {
            new.clone()
        } else {
            Value::Number(old.to_number())
        };
        Ok((result, self.write_place(place, new)))
    }

    fn eval_call(&mut self, call: &CallExpression, line: Option<u32>) -> EvalResult {
        let Some(name) = call.callee.as_identifier() else {
            return Err(unsupported_node_type(call.callee.node_type()));
        };
        match Builtin::lookup(name) {
            Some(Builtin::Swap) => self.call_swap(call, line),
            None => Err(undefined_function(name)),
        }
    }

    /// `swap(arrayName, i, j, line1, line2?)`.
    ///
    /// The array is named, not evaluated: an identifier or a string literal.
    /// Without `line1` the first event takes the call's own line.
    fn call_swap(&mut self, call: &CallExpression, line: Option<u32>) -> EvalResult {
        let array_name = match call.arguments.first() {
            Some(Expr::Identifier(ident)) => ident.name.as_str(),
            Some(Expr::Literal(Literal {
                value: LiteralValue::String(name),
                ..
            })) => name.as_str(),
            Some(other) => return Err(undefined_array(&describe(other))),
            None => return Err(undefined_array("undefined")),
        };

        let mut args: SmallVec<[Value; 4]> = SmallVec::new();
        for arg in call.arguments.iter().skip(1) {
            args.push(self.eval_expr(arg)?);
        }
        let arg = |i: usize| args.get(i).cloned().unwrap_or_default();

        let target = SwapTarget::resolve(&self.env, array_name, &arg(0), &arg(1))?;
        let line1 = args.get(2).and_then(line_argument).or(line);
        let line2 = args.get(3).and_then(line_argument);
        target.perform(line1, line2, &mut self.history);
        Ok(Value::Undefined)
    }
}

fn eval_literal(lit: &Literal) -> EvalResult {
    if lit.regex.is_some() {
        return Err(unsupported_node_type("Literal(regex)"));
    }
    match &lit.value {
        LiteralValue::Number(n) => Ok(Value::Number(*n)),
        LiteralValue::Boolean(b) => Ok(Value::Boolean(*b)),
        LiteralValue::Null => Ok(Value::Undefined),
        LiteralValue::String(_) => Err(unsupported_node_type("Literal(string)")),
        LiteralValue::Other(_) => Err(unsupported_node_type("Literal")),
    }
}

/// Source-like rendering of an expression, used to name arrays in events
/// and errors.
pub(crate) fn describe(expr: &Expr) -> String {
    match expr {
        Expr::Identifier(ident) => ident.name.clone(),
        Expr::Literal(lit) => match &lit.value {
            LiteralValue::Number(n) => format_number(*n),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::String(s) => format!("{s:?}"),
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Other(_) => "Literal".to_string(),
        },
        Expr::Member(member) if member.computed => {
            format!("{}[{}]", describe(&member.object), describe(&member.property))
        }
        Expr::Member(member) => {
            format!("{}.{}", describe(&member.object), describe(&member.property))
        }
        Expr::Binary(binary) => format!(
            "{} {} {}",
            describe(&binary.left),
            binary.operator.as_symbol(),
            describe(&binary.right)
        ),
        Expr::Unary(unary) => format!("{}{}", unary.operator.as_symbol(), describe(&unary.argument)),
        other => other.node_type().to_string(),
    }
}
