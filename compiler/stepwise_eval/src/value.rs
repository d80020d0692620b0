//! Runtime values and their recorded snapshots.
//!
//! `Value` is what the interpreter computes with. Arrays inside it are
//! shared, mutable containers: `let b = a` makes `b` alias `a`, exactly as in
//! the traced language. Anything that leaves the interpreter (history
//! details, the final variables) is a [`Snapshot`] instead: an owned deep
//! copy that later mutation cannot reach.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};

use crate::errors::{index_out_of_bounds, EvalError};

/// A mutable array with reference identity.
///
/// Single-threaded (`Rc`), which keeps live values from ever crossing into
/// another trace run on another thread.
#[derive(Clone, Default)]
pub struct SharedArray(Rc<RefCell<Vec<Value>>>);

impl SharedArray {
    pub fn new(elements: Vec<Value>) -> Self {
        SharedArray(Rc::new(RefCell::new(elements)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Overwrite slot `index`. Returns `false` if it is out of range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Whether both handles refer to the same array.
    pub fn ptr_eq(&self, other: &SharedArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Deep copy of the current contents.
    pub fn snapshot(&self) -> Vec<Snapshot> {
        let mut ancestors = Vec::new();
        self.snapshot_elements(&mut ancestors)
    }

    fn snapshot_elements(&self, ancestors: &mut Vec<*const RefCell<Vec<Value>>>) -> Vec<Snapshot> {
        ancestors.push(Rc::as_ptr(&self.0));
        let elements = self
            .0
            .borrow()
            .iter()
            .map(|element| element.snapshot_in(ancestors))
            .collect();
        ancestors.pop();
        elements
    }
}

impl fmt::Debug for SharedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot()).finish()
    }
}

/// A runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Array(SharedArray),
    #[default]
    Undefined,
}

impl Value {
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(SharedArray::new(elements))
    }

    /// Name of the value's type as the traced language reports it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Undefined => "undefined",
        }
    }

    /// `0`, `NaN`, `false` and `undefined` are falsy; arrays are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Boolean(b) => *b,
            Value::Array(_) => true,
            Value::Undefined => false,
        }
    }

    /// Numeric conversion (`ToNumber`).
    ///
    /// Arrays convert through their string form: `[]` is 0, a one-element
    /// array is its element's number, anything longer is NaN. An array that
    /// reaches itself joins to `""` at the repeat, so it converts to 0.
    pub fn to_number(&self) -> f64 {
        self.to_number_in(&mut Vec::new())
    }

    fn to_number_in(&self, ancestors: &mut Vec<*const RefCell<Vec<Value>>>) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(b) => f64::from(u8::from(*b)),
            Value::Undefined => f64::NAN,
            Value::Array(array) => {
                let ptr = Rc::as_ptr(&array.0);
                if ancestors.contains(&ptr) {
                    return 0.0;
                }
                match array.len() {
                    0 => 0.0,
                    1 => match array.get(0) {
                        Some(Value::Number(n)) => n,
                        Some(Value::Undefined) => 0.0,
                        Some(inner @ Value::Array(_)) => {
                            ancestors.push(ptr);
                            let n = inner.to_number_in(ancestors);
                            ancestors.pop();
                            n
                        }
                        _ => f64::NAN,
                    },
                    _ => f64::NAN,
                }
            }
        }
    }

    pub fn as_array(&self) -> Option<&SharedArray> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Deep copy for recording.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_in(&mut Vec::new())
    }

    fn snapshot_in(&self, ancestors: &mut Vec<*const RefCell<Vec<Value>>>) -> Snapshot {
        match self {
            Value::Number(n) => Snapshot::Number(*n),
            Value::Boolean(b) => Snapshot::Boolean(*b),
            Value::Undefined => Snapshot::Undefined,
            Value::Array(array) => {
                if ancestors.contains(&Rc::as_ptr(&array.0)) {
                    Snapshot::Circular
                } else {
                    Snapshot::Array(array.snapshot_elements(ancestors))
                }
            }
        }
    }
}

/// Structural comparison through snapshots; the interpreter's own equality
/// operators live in `operators`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.snapshot().fmt(f)
    }
}

/// Convert an index value to a slot of an array of `length` elements.
///
/// Only integral numbers in `[0, length)` address a slot.
pub fn resolve_index(index: &Value, array_name: &str, length: usize) -> Result<usize, EvalError> {
    let n = index.to_number();
    let in_range = n.fract() == 0.0 && n >= 0.0 && n < length_as_number(length);
    if in_range {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "checked integral and within [0, length) above"
        )]
        let slot = n as usize;
        Ok(slot)
    } else {
        Err(index_out_of_bounds(array_name, n, length))
    }
}

/// An array length as a traced-language number.
#[expect(
    clippy::cast_precision_loss,
    reason = "array lengths stay far below 2^53"
)]
pub fn length_as_number(length: usize) -> f64 {
    length as f64
}

/// An owned deep copy of a [`Value`], safe to keep after the run ends.
#[derive(Clone, Debug, PartialEq)]
pub enum Snapshot {
    Number(f64),
    Boolean(bool),
    Array(Vec<Snapshot>),
    Undefined,
    /// An array that contains itself, cut at the point of recursion.
    Circular,
}

impl Snapshot {
    pub fn as_array(&self) -> Option<&[Snapshot]> {
        match self {
            Snapshot::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Snapshot::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Snapshot {
    fn from(n: f64) -> Self {
        Snapshot::Number(n)
    }
}

impl From<Vec<f64>> for Snapshot {
    fn from(numbers: Vec<f64>) -> Self {
        Snapshot::Array(numbers.into_iter().map(Snapshot::Number).collect())
    }
}

/// Integral numbers print without a fractional part, the way the traced
/// language prints them (`3`, not `3.0`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Number(n) => f.write_str(&format_number(*n)),
            Snapshot::Boolean(b) => write!(f, "{b}"),
            Snapshot::Undefined => f.write_str("undefined"),
            Snapshot::Circular => f.write_str("[Circular]"),
            Snapshot::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Largest integer a double holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// JSON encoding: integral numbers as integers, non-finite numbers and
/// `undefined` as `null`.
impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Snapshot::Number(n) if !n.is_finite() => serializer.serialize_none(),
            Snapshot::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "integral and within the exactly representable range"
                )]
                let integer = *n as i64;
                serializer.serialize_i64(integer)
            }
            Snapshot::Number(n) => serializer.serialize_f64(*n),
            Snapshot::Boolean(b) => serializer.serialize_bool(*b),
            Snapshot::Array(elements) => elements.serialize(serializer),
            Snapshot::Undefined => serializer.serialize_none(),
            Snapshot::Circular => serializer.serialize_str("[Circular]"),
        }
    }
}
