//! The fixed table of callable built-ins.
//!
//! Only `swap(arrayName, i, j, line1, line2?)` exists. It exchanges two
//! elements in two halves and records a `swap` event after each half, which
//! is also how the swap-idiom detector reports a matched exchange.

use crate::environment::Environment;
use crate::errors::{undefined_array, EvalResult};
use crate::history::{History, Swap};
use crate::value::{resolve_index, SharedArray, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    Swap,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "swap" => Some(Builtin::Swap),
            _ => None,
        }
    }
}

/// A validated exchange: the array exists and both slots are in range.
#[derive(Debug)]
pub(crate) struct SwapTarget<'a> {
    pub array_name: &'a str,
    pub array: SharedArray,
    pub index1: usize,
    pub index2: usize,
}

impl<'a> SwapTarget<'a> {
    /// Validate everything before anything is mutated.
    pub fn resolve(
        env: &Environment,
        array_name: &'a str,
        index1: &Value,
        index2: &Value,
    ) -> EvalResult<Self> {
        let array = env
            .get(array_name)
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| undefined_array(array_name))?;
        let index1 = resolve_index(index1, array_name, array.len())?;
        let index2 = resolve_index(index2, array_name, array.len())?;
        Ok(SwapTarget {
            array_name,
            array,
            index1,
            index2,
        })
    }

    /// Exchange the two slots.
    ///
    /// First half: `a[index1] = a[index2]`, then a `swap` event at `line1`.
    /// Second half: `a[index2] = old a[index1]`, then a `swap` event at
    /// `line2` only if there is one.
    pub fn perform(self, line1: Option<u32>, line2: Option<u32>, history: &mut History) {
        let SwapTarget {
            array_name,
            array,
            index1,
            index2,
        } = self;
        let first = array.get(index1).unwrap_or_default();
        let second = array.get(index2).unwrap_or_default();

        array.set(index1, second);
        history.record(line1, swap_event(array_name, &array, index1, index2));

        array.set(index2, first);
        if line2.is_some() {
            history.record(line2, swap_event(array_name, &array, index1, index2));
        }
    }
}

fn swap_event(array_name: &str, array: &SharedArray, index1: usize, index2: usize) -> Swap {
    Swap {
        array_name: array_name.to_string(),
        index1,
        index2,
        array_state_after: array.snapshot(),
    }
}

/// Read a line-number argument: a positive integral number, else absent.
pub(crate) fn line_argument(value: &Value) -> Option<u32> {
    let n = value.to_number();
    if n.fract() == 0.0 && n >= 1.0 && n <= f64::from(u32::MAX) {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "checked integral and within u32 range above"
        )]
        let line = n as u32;
        Some(line)
    } else {
        None
    }
}
