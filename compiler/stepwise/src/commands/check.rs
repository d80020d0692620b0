//! The `check` command: list the constructs a tree uses that the tracer
//! cannot run, without running anything.

use std::fmt;

use stepwise_eval::{
    is_supported_assign, is_supported_binary, is_supported_logical, is_supported_unary,
};
use stepwise_ir::visitor::{walk_expr, walk_program, walk_stmt};
use stepwise_ir::{Expr, Located, Program, Stmt, Visitor};

use crate::errors::CliError;
use crate::input::{decode, display_name, read_input};

/// Something the tracer would fail on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Construct {
    Statement(String),
    Expression(String),
    Operator(&'static str),
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Statement(node_type) => write!(f, "unsupported statement {node_type}"),
            Construct::Expression(node_type) => write!(f, "unsupported expression {node_type}"),
            Construct::Operator(symbol) => write!(f, "unsupported operator {symbol}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// Line of the construct, or of the nearest enclosing node with one.
    pub line: Option<u32>,
    pub construct: Construct,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub statements: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

#[derive(Default)]
struct UnsupportedFinder {
    report: CheckReport,
    line: Option<u32>,
}

impl UnsupportedFinder {
    fn found(&mut self, line: Option<u32>, construct: Construct) {
        self.report.findings.push(Finding { line, construct });
    }
}

impl<'ast> Visitor<'ast> for UnsupportedFinder {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        let outer = self.line;
        self.line = stmt.line().or(outer);
        self.report.statements += 1;
        if let Stmt::Unsupported(node) = stmt {
            self.found(self.line, Construct::Statement(node.node_type.clone()));
        }
        walk_stmt(self, stmt);
        self.line = outer;
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        let line = expr.line().or(self.line);
        let construct = match expr {
            Expr::Unsupported(node) => Some(Construct::Expression(node.node_type.clone())),
            Expr::Binary(e) if !is_supported_binary(e.operator) => {
                Some(Construct::Operator(e.operator.as_symbol()))
            }
            Expr::Logical(e) if !is_supported_logical(e.operator) => {
                Some(Construct::Operator(e.operator.as_symbol()))
            }
            Expr::Unary(e) if !is_supported_unary(e.operator) => {
                Some(Construct::Operator(e.operator.as_symbol()))
            }
            Expr::Assignment(e) if !is_supported_assign(e.operator) => {
                Some(Construct::Operator(e.operator.as_symbol()))
            }
            _ => None,
        };
        if let Some(construct) = construct {
            self.found(line, construct);
        }
        walk_expr(self, expr);
    }
}

/// Collect unsupported constructs in source order.
pub fn check_program(program: &Program) -> CheckReport {
    let mut finder = UnsupportedFinder::default();
    walk_program(&mut finder, program);
    finder.report
}

/// Decode `text` and check it.
pub fn check_source(path: &str, text: &str) -> Result<CheckReport, CliError> {
    decode(display_name(path), text).map(|program| check_program(&program))
}

/// Check every input, printing one line per finding.
///
/// Returns `false` if any input could not be read or uses something
/// unsupported.
pub fn check_files(inputs: &[String]) -> bool {
    let mut all_ok = true;
    for path in inputs {
        let name = display_name(path);
        let report = match read_input(path).and_then(|text| check_source(path, &text)) {
            Ok(report) => report,
            Err(err) => {
                eprintln!("error: {err}");
                all_ok = false;
                continue;
            }
        };

        if report.is_clean() {
            println!("OK: {name} ({} statements)", report.statements);
            continue;
        }
        all_ok = false;
        for finding in &report.findings {
            match finding.line {
                Some(line) => println!("{name}:{line}: {}", finding.construct),
                None => println!("{name}: {}", finding.construct),
            }
        }
    }
    all_ok
}
