//! Statement execution and event recording.

use stepwise_ir::{Expr, ForInit, ForStatement, IfStatement, Located, Stmt, VariableDeclaration};
use stepwise_stack::ensure_sufficient_stack;
use tracing::{debug, warn};

use super::expr::Written;
use super::Interpreter;
use crate::builtins::SwapTarget;
use crate::errors::{unsupported_node_type, EvalResult};
use crate::history::{DeclareVariable, IfTest, LoopEnd, LoopEndReason, LoopUpdate};
use crate::swap_pattern::{detect_swap, SwapPlan};
use crate::value::Value;

impl Interpreter {
    /// Execute statements in source order, stopping at the first failure.
    pub(crate) fn exec_block(&mut self, body: &[Stmt]) -> EvalResult<()> {
        for stmt in body {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Execute one statement.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<()> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
            .map_err(|err| err.at_node(stmt.node_type(), stmt.line()))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> EvalResult<()> {
        debug!(node = stmt.node_type(), line = ?stmt.line(), "exec");
        match stmt {
            Stmt::VariableDeclaration(decl) => self.exec_declaration(decl),
            Stmt::For(for_stmt) => self.exec_for(for_stmt, stmt.line(), stmt.end_line()),
            Stmt::If(if_stmt) => self.exec_if(if_stmt, stmt.line()),
            Stmt::Block(block) => self.exec_block(&block.body),
            Stmt::Expression(expr_stmt) => {
                if let Some(written) = self.eval_write(&expr_stmt.expression)? {
                    self.history.record(stmt.line(), written.into_details());
                }
                Ok(())
            }
            Stmt::Empty(_) => Ok(()),
            Stmt::Unsupported(node) => Err(unsupported_node_type(&node.node_type)),
        }
    }

    /// Evaluate an expression, returning the write if it was an assignment
    /// or update.
    fn eval_write(&mut self, expr: &Expr) -> EvalResult<Option<Written>> {
        let written = match expr {
            Expr::Assignment(assign) => self.eval_assignment(assign).map(Some),
            Expr::Update(update) => self.eval_update(update).map(|(_, written)| Some(written)),
            other => return self.eval_expr(other).map(|_| None),
        };
        written.map_err(|err| err.at_node(expr.node_type(), expr.line()))
    }

    /// Bind each declarator and record it with a deep copy of its value.
    fn exec_declaration(&mut self, decl: &VariableDeclaration) -> EvalResult<()> {
        let line = decl.loc.as_ref().map(|loc| loc.start.line);
        for declarator in &decl.declarations {
            let Some(name) = declarator.id.as_identifier() else {
                // Destructuring patterns.
                return Err(unsupported_node_type(declarator.id.node_type())
                    .at_node(declarator.id.node_type(), line));
            };
            let value = match &declarator.init {
                Some(init) => self.eval_expr(init)?,
                None => Value::Undefined,
            };
            self.env.define(name, value.clone());
            self.history.record(
                line,
                DeclareVariable {
                    variable_name: name.to_string(),
                    initial_value: value.snapshot(),
                },
            );
        }
        Ok(())
    }

    /// `for (init; test; update) body` under the iteration cap.
    ///
    /// The test runs before every iteration; once the body has run
    /// `iteration_cap` times a truthy test ends the loop instead of entering
    /// the body again. Either way one `loop-end` is recorded at the closing
    /// line.
    fn exec_for(
        &mut self,
        for_stmt: &ForStatement,
        line: Option<u32>,
        end_line: Option<u32>,
    ) -> EvalResult<()> {
        match &for_stmt.init {
            Some(ForInit::Declaration(decl)) => self.exec_declaration(decl)?,
            Some(ForInit::Expression(init)) => {
                self.eval_expr(init)?;
            }
            None => {}
        }

        let cap = self.config.iteration_cap;
        let mut iterations: u32 = 0;
        let reason = loop {
            let proceed = match &for_stmt.test {
                Some(test) => self.eval_expr(test)?.is_truthy(),
                None => true,
            };
            if !proceed {
                break LoopEndReason::Condition;
            }
            if iterations >= cap {
                warn!(?line, cap, "loop stopped at iteration cap");
                break LoopEndReason::IterationCap;
            }

            self.exec_block(for_stmt.body.as_body())?;
            iterations += 1;

            if let Some(update) = &for_stmt.update {
                self.exec_loop_update(update, line)?;
            }
        };

        debug!(?reason, iterations, "loop ended");
        self.history.record(end_line, LoopEnd { reason, iterations });
        Ok(())
    }

    /// Run the update clause; a write to a plain name is recorded as a
    /// `loop-update` at the update's line.
    fn exec_loop_update(&mut self, update: &Expr, loop_line: Option<u32>) -> EvalResult<()> {
        if let Some(Written::Variable { name, value }) = self.eval_write(update)? {
            self.history.record(
                update.line().or(loop_line),
                LoopUpdate {
                    variable_name: name,
                    new_value: value.snapshot(),
                },
            );
        }
        Ok(())
    }

    fn exec_if(&mut self, if_stmt: &IfStatement, line: Option<u32>) -> EvalResult<()> {
        let test_result = self.eval_expr(&if_stmt.test)?.is_truthy();
        self.history
            .record(if_stmt.test.line().or(line), IfTest { test_result });

        if test_result {
            let plan = if self.config.swap_detection {
                detect_swap(if_stmt)
            } else {
                None
            };
            match plan {
                Some(plan) => self.exec_with_swap(if_stmt.consequent.as_body(), &plan),
                None => self.exec_block(if_stmt.consequent.as_body()),
            }
        } else if let Some(alternate) = &if_stmt.alternate {
            self.exec_block(alternate.as_body())
        } else {
            Ok(())
        }
    }

    /// Execute a consequent whose swap idiom was matched: the first write
    /// becomes the swap primitive, the second is skipped.
    fn exec_with_swap(&mut self, body: &[Stmt], plan: &SwapPlan<'_>) -> EvalResult<()> {
        debug!(array = plan.array_name, "swap idiom matched");
        for (pos, stmt) in body.iter().enumerate() {
            if pos == plan.second_stmt {
                continue;
            }
            if pos == plan.first_stmt {
                self.exec_planned_swap(plan)
                    .map_err(|err| err.at_node(stmt.node_type(), stmt.line()))?;
                continue;
            }
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_planned_swap(&mut self, plan: &SwapPlan<'_>) -> EvalResult<()> {
        let index1 = self.eval_expr(plan.first_index)?;
        let index2 = self.eval_expr(plan.second_index)?;
        SwapTarget::resolve(&self.env, plan.array_name, &index1, &index2)?.perform(
            plan.first_line,
            plan.second_line,
            &mut self.history,
        );
        Ok(())
    }
}
