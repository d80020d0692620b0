//! Whole-program tests for the interpreter.
//!
//! Trees are built with `stepwise_ir::builder`; line numbers in the helpers
//! below match the source shown in their doc comments.

mod exec_tests;

use stepwise_ir::builder::{
    array, assign, binary, block, expr_stmt, for_let, for_loop, ident, if_stmt, index, let_decl,
    num, postfix, program,
};
use stepwise_ir::{BinaryOp, Program, UpdateOp};

use crate::history::{EventDetails, HistoryEvent};
use crate::value::Snapshot;

/// Bubble sort over `values`:
///
/// ```text
///  1  let arr = [..];
///  2  for (let i = 0; i < n - 1; i++) {
///  3    for (let j = 0; j < n - 1 - i; j++) {
///  4      if (arr[j] > arr[j + 1]) {
///  5        let t = arr[j];
///  6        arr[j] = arr[j + 1];
///  7        arr[j + 1] = t;
///  8      }
///  9    }
/// 10  }
/// ```
pub(crate) fn bubble_sort(values: &[f64]) -> Program {
    let n = crate::value::length_as_number(values.len());
    let j1 = || binary(BinaryOp::Add, ident("j"), num(1.0));
    let elem = |i| index(ident("arr"), i);

    let swap_body = block(vec![
        let_decl(5, "t", elem(ident("j"))),
        expr_stmt(6, assign(elem(ident("j")), elem(j1()))),
        expr_stmt(7, assign(elem(j1()), ident("t"))),
    ]);
    let inner = for_loop(
        (3, 9),
        for_let(3, "j", num(0.0)),
        Some(binary(
            BinaryOp::Lt,
            ident("j"),
            binary(BinaryOp::Sub, num(n - 1.0), ident("i")),
        )),
        Some(postfix(UpdateOp::Increment, ident("j"))),
        block(vec![if_stmt(
            4,
            binary(BinaryOp::Gt, elem(ident("j")), elem(j1())),
            swap_body,
            None,
        )]),
    );
    let outer = for_loop(
        (2, 10),
        for_let(2, "i", num(0.0)),
        Some(binary(BinaryOp::Lt, ident("i"), num(n - 1.0))),
        Some(postfix(UpdateOp::Increment, ident("i"))),
        block(vec![inner]),
    );

    program(vec![
        let_decl(1, "arr", array(values.iter().copied().map(num))),
        outer,
    ])
}

pub(crate) fn actions(events: &[HistoryEvent]) -> Vec<&'static str> {
    events.iter().map(|event| event.action.as_str()).collect()
}

/// `arrayStateAfter` of every swap event, in order.
pub(crate) fn swap_states(events: &[HistoryEvent]) -> Vec<Vec<Snapshot>> {
    events
        .iter()
        .filter_map(|event| match &event.details {
            EventDetails::Swap(swap) => Some(swap.array_state_after.clone()),
            _ => None,
        })
        .collect()
}
