//! Statement execution.

use std::sync::Arc;

use patch_ir::{Expr, Mutability, Stmt, StmtKind};
use patch_stack::ensure_sufficient_stack;

use super::Flow;
use crate::errors::{apply_target, not_iterable};
use crate::{DefinedFunction, EvalResult, EvaluationContext, PatchFunction, Value};

impl EvaluationContext {
    pub(crate) fn exec_stmt(&self, stmt: &Stmt) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&self, stmt: &Stmt) -> EvalResult<Flow> {
        match &stmt.kind {
            StmtKind::Block(statements) => self.new_scope().exec_block(statements),
            StmtKind::Empty => Ok(Flow::Normal),
            StmtKind::Expr(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }
            StmtKind::Variable {
                name,
                name_span,
                mutability,
                init,
            } => {
                let value = self.evaluate(init)?;
                self.define_variable(name, value, *mutability)
                    .map_err(|error| error.or_span(name_span))?;
                Ok(Flow::Normal)
            }
            StmtKind::Delete(reference) => {
                self.resolve(&reference.kind)?
                    .delete(self, &reference.span)?;
                Ok(Flow::Normal)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            StmtKind::Function {
                name,
                name_span,
                def,
            } => {
                let function = Value::function(PatchFunction::Defined(DefinedFunction {
                    def: Arc::clone(def),
                    captured: self.capture(),
                }));
                self.define_variable(name, function, Mutability::Immutable)
                    .map_err(|error| error.or_span(name_span))?;
                Ok(Flow::Normal)
            }
            StmtKind::If {
                condition,
                then,
                otherwise,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.exec_stmt(then)
                } else if let Some(otherwise) = otherwise {
                    self.exec_stmt(otherwise)
                } else {
                    Ok(Flow::Normal)
                }
            }
            StmtKind::While { condition, body } => self.exec_loop(condition, body, None),
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => {
                let scope = self.new_scope();
                scope.exec_stmt(init)?;
                scope.exec_loop(condition, body, Some(&**update))
            }
            StmtKind::Foreach {
                name,
                name_span,
                iterable,
                body,
            } => {
                let items = match self.evaluate(iterable)? {
                    Value::Array(items) => {
                        let snapshot = items.borrow().clone();
                        snapshot
                    }
                    other => return Err(not_iterable(&other).with_span(iterable.span.clone())),
                };
                for item in items {
                    let scope = self.new_scope();
                    scope
                        .define_variable(name, item, Mutability::Immutable)
                        .map_err(|error| error.or_span(name_span))?;
                    match scope.exec_stmt(body)? {
                        Flow::Normal | Flow::Continue => {}
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::Continue => Ok(Flow::Continue),
            StmtKind::Import {
                library,
                alias,
                alias_span,
            } => {
                let library = self.find_library(library, &stmt.span)?;
                self.define_variable(alias, Value::Object(library), Mutability::Immutable)
                    .map_err(|error| error.or_span(alias_span))?;
                Ok(Flow::Normal)
            }
            StmtKind::Apply { root, body } => match self.evaluate(root)? {
                Value::Object(object) => self.with_root(object).exec_stmt(body),
                other => Err(apply_target(&other).with_span(root.span.clone())),
            },
            StmtKind::Error { message } => {
                unreachable!("executed a statement that failed to parse: {message}")
            }
        }
    }

    /// Statements of a block, stopping at the first that does not finish
    /// normally.
    fn exec_block(&self, statements: &[Stmt]) -> EvalResult<Flow> {
        for stmt in statements {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// `while` and `for`. The body runs in this context; `update` runs
    /// after every iteration that did not break, including `continue`.
    fn exec_loop(&self, condition: &Expr, body: &Stmt, update: Option<&Stmt>) -> EvalResult<Flow> {
        while self.evaluate(condition)?.is_truthy() {
            match self.exec_stmt(body)? {
                Flow::Normal | Flow::Continue => {}
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }
            if let Some(update) = update {
                self.exec_stmt(update)?;
            }
        }
        Ok(Flow::Normal)
    }
}
