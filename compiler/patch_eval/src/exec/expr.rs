//! Expression evaluation.

use std::sync::Arc;

use patch_ir::{BinaryOp, Expr, ExprKind, Literal, LogicalOp, Reference};
use patch_stack::ensure_sufficient_stack;

use crate::errors::not_callable;
use crate::operators::{binary, unary, update};
use crate::{DefinedFunction, EvalResult, EvaluationContext, ObjectMap, PatchFunction, Value};

impl EvaluationContext {
    /// Evaluate `expr` in this context.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr(expr))
    }

    fn eval_expr(&self, expr: &Expr) -> EvalResult {
        let span = &expr.span;
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal_value(literal)),
            ExprKind::Reference(reference) => self.resolve(reference)?.get(self, span),
            ExprKind::Root => Ok(Value::Object(self.root().clone())),

            ExprKind::Call { callee, args } => {
                let function = match self.evaluate(callee)? {
                    Value::Function(function) => function,
                    other => return Err(not_callable(&other).with_span(span.clone())),
                };
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<EvalResult<Vec<_>>>()?;
                self.call_function(&function, args, span)
            }

            ExprKind::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.evaluate(item))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::array(items))
            }
            ExprKind::Object(entries) => {
                let mut map = ObjectMap::new();
                for entry in entries {
                    let value = self.evaluate(&entry.value)?;
                    map.insert(entry.key.as_str(), value);
                }
                Ok(Value::object(map))
            }

            ExprKind::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                unary(*op, &value).map_err(|error| error.or_span(span))
            }
            ExprKind::Update {
                op,
                target,
                postfix,
            } => {
                let place = self.resolve(&target.kind)?;
                let old = place.get(self, &target.span)?;
                let new = update(*op, &old).map_err(|error| error.or_span(span))?;
                place.set(self, new.clone(), &target.span)?;
                Ok(if *postfix { old } else { new })
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(*op, &left, &right).map_err(|error| error.or_span(span))
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.evaluate(left)?;
                let decided = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            ExprKind::Ternary {
                condition,
                then,
                otherwise,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then)
                } else {
                    self.evaluate(otherwise)
                }
            }
            ExprKind::Assign { op, target, value } => self.eval_assign(*op, target, value, expr),
            ExprKind::Is { operand, ty, .. } => Ok(Value::Boolean(self.evaluate(operand)?.matches(*ty))),

            ExprKind::Function(def) => Ok(Value::function(PatchFunction::Defined(
                DefinedFunction {
                    def: Arc::clone(def),
                    captured: self.capture(),
                },
            ))),
        }
    }

    /// `target = value` or `target op= value`. Evaluates to the stored
    /// value, not the right-hand side: with `x == 1`, `x += 2` is `3`.
    fn eval_assign(
        &self,
        op: Option<BinaryOp>,
        target: &Reference,
        value: &Expr,
        expr: &Expr,
    ) -> EvalResult {
        let place = self.resolve(&target.kind)?;
        let value = self.evaluate(value)?;
        let stored = match op {
            None => value,
            Some(op) => {
                let old = place.get(self, &target.span)?;
                binary(op, &old, &value).map_err(|error| error.or_span(&expr.span))?
            }
        };
        place.set(self, stored.clone(), &target.span)?;
        Ok(stored)
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::string(s.as_str()),
    }
}
