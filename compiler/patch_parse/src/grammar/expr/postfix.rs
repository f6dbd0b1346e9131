//! Postfix operators: property access, indexing, calls, `++ -- !!` and `is`.
//!
//! These bind tighter than every infix operator and apply at any level.

use std::ops::ControlFlow;

use patch_ir::{
    Expr, ExprKind, Keyword, Operator, ReferenceKind, Token, TokenKind, TypeTest, UpdateOp,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_postfix(
        &mut self,
        left: Expr,
        op: Operator,
        token: &Token,
    ) -> Result<ControlFlow<Expr, Expr>, ParseError> {
        if let Some(update) = UpdateOp::from_operator(op) {
            return self
                .parse_postfix_update(left, update, token)
                .map(ControlFlow::Continue);
        }

        let expr = match op {
            Operator::Dot => self.parse_property(left, token)?,
            Operator::LBracket => self.parse_index(left, token)?,
            Operator::LParen => self.parse_call(left, token)?,
            Operator::Arrow => {
                self.cursor.advance()?;
                return Err(ParseError::new(
                    "Unexpected arrow, did you mean to put parentheses around your function arguments?",
                    token.span.clone(),
                ));
            }
            _ => return Ok(ControlFlow::Break(left)),
        };
        Ok(ControlFlow::Continue(expr))
    }

    /// `target++`, `target--`, `target!!`
    fn parse_postfix_update(
        &mut self,
        left: Expr,
        op: UpdateOp,
        token: &Token,
    ) -> Result<Expr, ParseError> {
        let target = left.into_reference().map_err(|expr| {
            ParseError::new(format!("Can't modify {}", expr.describe()), token.span.clone())
        })?;
        self.cursor.advance()?;
        Ok(Expr::new(
            ExprKind::Update {
                op,
                target: Box::new(target),
                postfix: true,
            },
            token.span.clone(),
        ))
    }

    /// `object.name`
    fn parse_property(&mut self, object: Expr, dot: &Token) -> Result<Expr, ParseError> {
        self.cursor.advance()?;
        let (name, name_token) = self.cursor.expect_word()?;
        Ok(Expr::new(
            ExprKind::Reference(ReferenceKind::Property {
                object: Box::new(object),
                name,
                name_span: name_token.span.clone(),
            }),
            self.span_from(&dot.span),
        ))
    }

    /// `object[index]`
    fn parse_index(&mut self, object: Expr, open: &Token) -> Result<Expr, ParseError> {
        self.cursor.advance()?;
        let index = self.parse_expr()?;
        self.cursor.expect_operator(Operator::RBracket)?;
        Ok(Expr::new(
            ExprKind::Reference(ReferenceKind::Index {
                object: Box::new(object),
                index: Box::new(index),
            }),
            self.span_from(&open.span),
        ))
    }

    /// `callee(arg, ...)`, trailing comma allowed.
    fn parse_call(&mut self, callee: Expr, open: &Token) -> Result<Expr, ParseError> {
        self.cursor.advance()?;
        let mut args = Vec::new();
        while !self.cursor.check_operator(Operator::RParen) {
            args.push(self.parse_expr()?);
            if self.cursor.check_operator(Operator::Comma) {
                self.cursor.advance()?;
            } else {
                break;
            }
        }
        self.cursor.expect_operator(Operator::RParen)?;
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            self.span_from(&open.span),
        ))
    }

    /// `operand is <type>`, with `is` already consumed.
    pub(super) fn parse_is(&mut self, operand: Expr, is: &Token) -> Result<Expr, ParseError> {
        let ty_token = self.cursor.advance()?;
        let ty = match &ty_token.kind {
            TokenKind::Keyword(Keyword::Null) => Some(TypeTest::Null),
            TokenKind::Keyword(Keyword::Function) => Some(TypeTest::Function),
            TokenKind::Word(word) => TypeTest::from_word(word),
            _ => None,
        };
        let Some(ty) = ty else {
            return Err(ParseError::new(
                format!("Expected type name, got {}", ty_token.kind.explain()),
                is.span.clone(),
            ));
        };
        Ok(Expr::new(
            ExprKind::Is {
                operand: Box::new(operand),
                ty,
                ty_span: ty_token.span.clone(),
            },
            is.span.clone(),
        ))
    }
}
