//! Scripts run end to end: lex, parse, execute.
//!
//! - `language`: expressions, statements, scoping
//! - `functions`: parameters, closures, call errors
//! - `libraries`: stdlib through scripts, imports and locators
//! - `errors`: messages, spans and cause chains

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod language;

use patch_ir::Program;
use patch_lexer::lex;
use patch_parse::parse;

use crate::{
    buffer_sink, EvalError, EvalResult, EvaluationContext, EvaluationContextBuilder, Execute,
    SharedDebugSink,
};

pub(crate) fn parse_program(source: &str) -> Program {
    let lexed = lex(source, "test.patch");
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    let output = parse(&lexed.tokens);
    assert!(output.errors.is_empty(), "parse errors: {:?}", output.errors);
    output.program
}

/// A finished evaluation.
pub(crate) struct Run {
    pub context: EvaluationContext,
    pub sink: SharedDebugSink,
    pub result: EvalResult<()>,
}

impl Run {
    /// Lines logged through `debug.log`.
    pub fn log(&self) -> Vec<String> {
        self.sink.get_output().lines().map(str::to_string).collect()
    }

    pub fn root_json(&self) -> String {
        crate::Value::Object(self.context.root().clone()).to_json()
    }

    pub fn error(self) -> EvalError {
        match self.result {
            Ok(()) => panic!("script succeeded, log: {:?}", self.log()),
            Err(error) => error,
        }
    }
}

pub(crate) fn run_with(builder: EvaluationContextBuilder, source: &str) -> Run {
    let sink = buffer_sink();
    let context = builder.debug_sink(sink.clone()).build();
    let result = parse_program(source).execute(&context);
    Run {
        context,
        sink,
        result,
    }
}

pub(crate) fn run(source: &str) -> Run {
    run_with(EvaluationContext::builder(), source)
}

/// Run a script that must succeed.
pub(crate) fn run_ok(source: &str) -> Run {
    let run = run(source);
    if let Err(error) = &run.result {
        panic!("script failed: {error:?}\nlog: {:?}", run.log());
    }
    run
}

/// The error of a script that must fail.
pub(crate) fn run_err(source: &str) -> EvalError {
    run(source).error()
}

/// The lines a successful script logs.
pub(crate) fn logged(source: &str) -> Vec<String> {
    run_ok(source).log()
}
