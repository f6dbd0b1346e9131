//! Parameter lists and arrow functions.
//!
//! `(a, b) -> a + b` and `(a, b)` start with the same tokens. The parser
//! first tries to read a parameter list followed by `->`; if that fails it
//! rewinds and reads a grouped expression instead. Only the head is
//! speculative: once `->` has been seen, errors in the body are reported.

use std::sync::Arc;

use patch_ir::{
    Expr, ExprKind, FunctionDef, FunctionParams, Operator, Param, ParamTarget, SourceSpan, Stmt,
    StmtKind, Token,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Arrow function or grouped expression, with `(` already consumed.
    pub(super) fn parse_parenthesized(&mut self, open: &Token) -> Result<Expr, ParseError> {
        let snapshot = self.snapshot();
        match self.parse_arrow_head() {
            Ok((params, arrow)) => self.parse_arrow_body(params, open, arrow),
            Err(_) => {
                self.restore(snapshot);
                let expr = self.parse_expr()?;
                self.cursor.expect_operator(Operator::RParen)?;
                Ok(expr)
            }
        }
    }

    fn parse_arrow_head(&mut self) -> Result<(FunctionParams, SourceSpan), ParseError> {
        let params = self.parse_params()?;
        let arrow = self.cursor.expect_operator(Operator::Arrow)?;
        Ok((params, arrow.span.clone()))
    }

    /// A block body, or an expression body returned from the arrow.
    fn parse_arrow_body(
        &mut self,
        params: FunctionParams,
        open: &Token,
        arrow: SourceSpan,
    ) -> Result<Expr, ParseError> {
        let body = self.in_function_body(|p| {
            if p.cursor.check_operator(Operator::LBrace) {
                p.parse_block()
            } else {
                let value = p.parse_expr()?;
                Ok(Stmt::new(StmtKind::Return(Some(value)), arrow))
            }
        })?;
        let span = self.span_from(&open.span);
        let def = FunctionDef {
            params,
            body,
            span: span.clone(),
        };
        Ok(Expr::new(ExprKind::Function(Arc::new(def)), span))
    }

    /// Parameters up to and including the closing `)`.
    ///
    /// Ill-formed lists are recorded as errors and still returned so that
    /// later errors in the file are found too.
    pub(crate) fn parse_params(&mut self) -> Result<FunctionParams, ParseError> {
        let mut params: Vec<Param> = Vec::new();
        // Star of the varargs parameter while it is the last one seen.
        let mut varargs: Option<SourceSpan> = None;
        let mut optional = false;

        while !self.cursor.check_operator(Operator::RParen) {
            if let Some(star) = varargs.take() {
                self.errors
                    .push(ParseError::new("Varargs parameter must be last in list", star));
            }

            let start = self.cursor.peek()?.span.clone();
            let target = if self.cursor.check_operator(Operator::Dollar) {
                self.cursor.advance()?;
                ParamTarget::Root
            } else {
                ParamTarget::Variable(self.cursor.expect_word()?.0)
            };
            if params.iter().any(|p| p.target == target) {
                let message = match &target {
                    ParamTarget::Variable(name) => format!("Duplicate parameter name: '{name}'"),
                    ParamTarget::Root => "Duplicate root parameter".to_string(),
                };
                self.errors.push(ParseError::new(message, start.clone()));
            }

            let mut default = None;
            if self.cursor.check_operator(Operator::Star) {
                let star = self.cursor.advance()?.span.clone();
                default = Some(Expr::new(ExprKind::Array(Vec::new()), star.clone()));
                optional = true;
                let assign = self
                    .cursor
                    .current()
                    .filter(|t| t.kind.is_operator(Operator::Assign));
                if let Some(assign) = assign {
                    self.errors.push(ParseError::new(
                        "Varargs parameter cannot have default value",
                        assign.span.clone(),
                    ));
                }
                varargs = Some(star);
            }
            if self.cursor.check_operator(Operator::Assign) {
                self.cursor.advance()?;
                let value = self.parse_expr()?;
                if varargs.is_none() {
                    default = Some(value);
                }
                optional = true;
            } else if default.is_none() && optional {
                self.errors.push(ParseError::new(
                    "All required arguments must appear before optional arguments",
                    self.span_from(&start),
                ));
            }

            params.push(Param {
                target,
                default,
                span: self.span_from(&start),
            });
            if self.cursor.check_operator(Operator::Comma) {
                self.cursor.advance()?;
            } else {
                break;
            }
        }
        self.cursor.expect_operator(Operator::RParen)?;

        Ok(FunctionParams {
            params,
            varargs: varargs.is_some(),
        })
    }
}
