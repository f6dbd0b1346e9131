//! Prefix productions: everything that can start an expression.

use patch_ir::{
    Expr, ExprKind, Keyword, Literal, ObjectEntry, Operator, ReferenceKind, Token, TokenKind,
    UnaryOp, UpdateOp,
};

use super::Precedence;
use crate::error::expected;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.advance()?;
        let span = token.span.clone();
        let literal = |literal: Literal| -> Result<Expr, ParseError> {
            Ok(Expr::new(ExprKind::Literal(literal), span.clone()))
        };

        match &token.kind {
            TokenKind::String(value) => literal(Literal::String(value.clone())),
            TokenKind::Number(value) => literal(Literal::Number(*value)),
            TokenKind::Word(name) => Ok(Expr::new(
                ExprKind::Reference(ReferenceKind::Variable(name.clone())),
                span.clone(),
            )),
            TokenKind::Keyword(Keyword::True) => literal(Literal::Boolean(true)),
            TokenKind::Keyword(Keyword::False) => literal(Literal::Boolean(false)),
            TokenKind::Keyword(Keyword::Null) => literal(Literal::Null),
            TokenKind::Operator(Operator::Dollar) => self.parse_root(token),
            TokenKind::Operator(Operator::Minus) => self.parse_unary(UnaryOp::Neg, token),
            TokenKind::Operator(Operator::Bang) => self.parse_unary(UnaryOp::Not, token),
            TokenKind::Operator(Operator::Tilde) => self.parse_unary(UnaryOp::BitNot, token),
            TokenKind::Operator(Operator::DoubleMinus) => {
                self.parse_prefix_update(UpdateOp::Decrement, token)
            }
            TokenKind::Operator(Operator::DoublePlus) => {
                self.parse_prefix_update(UpdateOp::Increment, token)
            }
            TokenKind::Operator(Operator::DoubleBang) => {
                self.parse_prefix_update(UpdateOp::Toggle, token)
            }
            TokenKind::Operator(Operator::LBracket) => self.parse_array(token),
            TokenKind::Operator(Operator::LBrace) => self.parse_object(token),
            TokenKind::Operator(Operator::LParen) => self.parse_parenthesized(token),
            other => Err(ParseError::new(
                format!("Unexpected token at start of expression: {other}"),
                span.clone(),
            )),
        }
    }

    /// `$` alone, or `$name` as shorthand for a root property.
    fn parse_root(&mut self, dollar: &Token) -> Result<Expr, ParseError> {
        if let Some(Token {
            kind: TokenKind::Word(name),
            ..
        }) = self.cursor.current()
        {
            self.cursor.advance()?;
            return Ok(Expr::new(
                ExprKind::Reference(ReferenceKind::ImplicitRoot(name.clone())),
                self.span_from(&dollar.span),
            ));
        }
        Ok(Expr::new(ExprKind::Root, dollar.span.clone()))
    }

    fn parse_unary(&mut self, op: UnaryOp, token: &Token) -> Result<Expr, ParseError> {
        let operand = self.parse_expr_at(Precedence::Prefix)?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            token.span.clone(),
        ))
    }

    fn parse_prefix_update(&mut self, op: UpdateOp, token: &Token) -> Result<Expr, ParseError> {
        let operand = self.parse_expr_at(Precedence::Prefix)?;
        let target = operand.into_reference().map_err(|expr| {
            ParseError::new(format!("Can't modify {}", expr.describe()), token.span.clone())
        })?;
        Ok(Expr::new(
            ExprKind::Update {
                op,
                target: Box::new(target),
                postfix: false,
            },
            token.span.clone(),
        ))
    }

    /// `[a, b, c]`, trailing comma allowed.
    fn parse_array(&mut self, open: &Token) -> Result<Expr, ParseError> {
        let mut elements = Vec::new();
        while !self.cursor.check_operator(Operator::RBracket) {
            elements.push(self.parse_expr()?);
            if self.cursor.check_operator(Operator::Comma) {
                self.cursor.advance()?;
            } else {
                break;
            }
        }
        self.cursor.expect_operator(Operator::RBracket)?;
        Ok(Expr::new(ExprKind::Array(elements), self.span_from(&open.span)))
    }

    /// `{key: value, "other key": value}`, trailing comma allowed.
    fn parse_object(&mut self, open: &Token) -> Result<Expr, ParseError> {
        let mut entries = Vec::new();
        while !self.cursor.check_operator(Operator::RBrace) {
            let key = self.parse_object_key()?;
            self.cursor.expect_operator(Operator::Colon)?;
            let value = self.parse_expr()?;
            entries.push(ObjectEntry { key, value });
            if self.cursor.check_operator(Operator::Comma) {
                self.cursor.advance()?;
            } else {
                break;
            }
        }
        self.cursor.expect_operator(Operator::RBrace)?;
        Ok(Expr::new(ExprKind::Object(entries), self.span_from(&open.span)))
    }

    fn parse_object_key(&mut self) -> Result<String, ParseError> {
        let token = self.cursor.peek()?;
        match &token.kind {
            TokenKind::Word(key) | TokenKind::String(key) => {
                self.cursor.advance()?;
                Ok(key.clone())
            }
            _ => Err(expected("identifier or string", token)),
        }
    }
}
