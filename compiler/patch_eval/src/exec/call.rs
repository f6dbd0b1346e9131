//! Function calls.

use std::rc::Rc;

use patch_ir::{ParamTarget, SourceSpan};

use super::Flow;
use crate::errors::{arity_mismatch, function_failed, root_argument, Arity};
use crate::library::NativeCall;
use crate::{DefinedFunction, EvalResult, EvaluationContext, PatchFunction, Value};

impl EvaluationContext {
    /// Call `function` with already evaluated arguments. `span` is the call
    /// expression; argument errors are reported there, and errors escaping
    /// the callee are wrapped with it as the outer link of the cause chain.
    pub fn call_function(
        &self,
        function: &Rc<PatchFunction>,
        args: Vec<Value>,
        span: &SourceSpan,
    ) -> EvalResult {
        match &**function {
            PatchFunction::Defined(defined) => self.call_defined(defined, args, span),
            PatchFunction::Native(native) => native.invoke(&NativeCall::new(self, span), &args),
            PatchFunction::Bound { target, receiver } => {
                let mut bound = Vec::with_capacity(args.len() + 1);
                bound.push(receiver.clone());
                bound.extend(args);
                self.call_function(target, bound, span)
            }
        }
    }

    /// Runs in the function's captured context, not the caller's.
    #[tracing::instrument(level = "debug", skip_all, fields(args = args.len()))]
    fn call_defined(
        &self,
        function: &DefinedFunction,
        args: Vec<Value>,
        span: &SourceSpan,
    ) -> EvalResult {
        let params = &function.def.params;
        let required = params.required_count();
        if args.len() < required {
            return Err(arity_mismatch(Arity::AtLeast(required), args.len()).with_span(span.clone()));
        }
        if !params.varargs && args.len() > params.len() {
            return Err(
                arity_mismatch(Arity::AtMost(params.len()), args.len()).with_span(span.clone())
            );
        }

        let _depth = self.enter_call(span)?;
        let mut scope = function
            .captured
            .enter()
            .map_err(|error| error.or_span(span))?;

        let last = params.len().saturating_sub(1);
        let mut args = args.into_iter();
        for (i, param) in params.params.iter().enumerate() {
            let value = if params.varargs && i == last {
                Value::array(args.by_ref().collect())
            } else if let Some(arg) = args.next() {
                arg
            } else if let Some(default) = &param.default {
                scope.evaluate(default)?
            } else {
                Value::Null
            };

            match &param.target {
                ParamTarget::Variable(name) => scope.define_parameter(name, value),
                ParamTarget::Root => match value {
                    Value::Object(root) => scope.set_root(root),
                    other => return Err(root_argument(&other).with_span(span.clone())),
                },
            }
        }

        match scope.exec_stmt(&function.def.body) {
            Ok(Flow::Return(value)) => Ok(value),
            Ok(Flow::Normal) => Ok(Value::Null),
            Ok(Flow::Break | Flow::Continue) => {
                unreachable!("loop control escaped a function body")
            }
            Err(error) => Err(function_failed(span, error)),
        }
    }
}
