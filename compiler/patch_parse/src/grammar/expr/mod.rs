//! Expression parsing.
//!
//! Precedence climbing: a prefix production builds the left operand, then
//! operators binding at least as tightly as the current level extend it.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point and the binary/assignment operator loop
//! - `primary.rs`: literals, references, unary operators, initializers
//! - `postfix.rs`: property access, indexing, calls, postfix updates, `is`
//! - `function.rs`: parameter lists and arrow functions

mod function;
mod postfix;
mod primary;

use std::ops::ControlFlow;

use patch_ir::{BinaryOp, Expr, ExprKind, Keyword, LogicalOp, Operator, Token, TokenKind};
use patch_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// Binding strength, loosest first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub(crate) enum Precedence {
    Root,
    Assignment,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Comparison,
    Sum,
    Product,
    Exponent,
    Prefix,
    Postfix,
}

impl Precedence {
    /// Level for the right operand of a left-associative operator.
    fn tighter(self) -> Self {
        match self {
            Precedence::Root => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::BitOr,
            Precedence::BitOr => Precedence::BitXor,
            Precedence::BitXor => Precedence::BitAnd,
            Precedence::BitAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Sum,
            Precedence::Sum => Precedence::Product,
            Precedence::Product => Precedence::Exponent,
            Precedence::Exponent => Precedence::Prefix,
            Precedence::Prefix | Precedence::Postfix => Precedence::Postfix,
        }
    }
}

#[derive(Clone, Copy)]
enum Infix {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

/// Operator and level of every binary infix token.
fn infix_binding(op: Operator) -> Option<(Infix, Precedence)> {
    Some(match op {
        Operator::DoubleOr => (Infix::Logical(LogicalOp::Or), Precedence::Or),
        Operator::DoubleAnd => (Infix::Logical(LogicalOp::And), Precedence::And),
        Operator::Or => (Infix::Binary(BinaryOp::BitOr), Precedence::BitOr),
        Operator::Xor => (Infix::Binary(BinaryOp::BitXor), Precedence::BitXor),
        Operator::And => (Infix::Binary(BinaryOp::BitAnd), Precedence::BitAnd),
        Operator::Equals => (Infix::Binary(BinaryOp::Eq), Precedence::Equality),
        Operator::NotEquals => (Infix::Binary(BinaryOp::NotEq), Precedence::Equality),
        Operator::Less => (Infix::Binary(BinaryOp::Lt), Precedence::Comparison),
        Operator::LessEqual => (Infix::Binary(BinaryOp::LtEq), Precedence::Comparison),
        Operator::Greater => (Infix::Binary(BinaryOp::Gt), Precedence::Comparison),
        Operator::GreaterEqual => (Infix::Binary(BinaryOp::GtEq), Precedence::Comparison),
        Operator::Plus => (Infix::Binary(BinaryOp::Add), Precedence::Sum),
        Operator::Minus => (Infix::Binary(BinaryOp::Sub), Precedence::Sum),
        Operator::Star => (Infix::Binary(BinaryOp::Mul), Precedence::Product),
        Operator::Slash => (Infix::Binary(BinaryOp::Div), Precedence::Product),
        Operator::Percent => (Infix::Binary(BinaryOp::Mod), Precedence::Product),
        Operator::DoubleStar => (Infix::Binary(BinaryOp::Pow), Precedence::Exponent),
        _ => return None,
    })
}

impl Parser<'_> {
    /// Parse a full expression, assignments and ternaries included.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_at(Precedence::Root)
    }

    /// Parse an expression whose operators bind at least as tightly as
    /// `precedence`.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow on deeply
    /// nested expressions.
    pub(crate) fn parse_expr_at(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner(precedence))
    }

    fn parse_expr_inner(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        let mut left = self.parse_prefix()?;
        loop {
            match self.parse_infix(precedence, left)? {
                ControlFlow::Continue(extended) => left = extended,
                ControlFlow::Break(done) => return Ok(done),
            }
        }
    }

    /// Extend `left` with the next operator, or hand it back when the next
    /// token does not continue the expression at this level.
    fn parse_infix(
        &mut self,
        precedence: Precedence,
        left: Expr,
    ) -> Result<ControlFlow<Expr, Expr>, ParseError> {
        let Some(token) = self.cursor.current() else {
            return Ok(ControlFlow::Break(left));
        };

        let extended = match &token.kind {
            TokenKind::Keyword(Keyword::Is) if precedence <= Precedence::Comparison => {
                self.cursor.advance()?;
                self.parse_is(left, token)?
            }
            TokenKind::Keyword(Keyword::In) if precedence <= Precedence::Comparison => {
                self.cursor.advance()?;
                let right = self.parse_expr_at(Precedence::Comparison.tighter())?;
                binary(BinaryOp::In, left, right, token)
            }
            TokenKind::Operator(op) => match self.parse_operator(precedence, left, *op, token)? {
                ControlFlow::Continue(expr) => expr,
                done @ ControlFlow::Break(_) => return Ok(done),
            },
            _ => return Ok(ControlFlow::Break(left)),
        };
        Ok(ControlFlow::Continue(extended))
    }

    fn parse_operator(
        &mut self,
        precedence: Precedence,
        left: Expr,
        op: Operator,
        token: &Token,
    ) -> Result<ControlFlow<Expr, Expr>, ParseError> {
        if precedence <= Precedence::Assignment {
            if op == Operator::Assign {
                return self.parse_assignment(left, None, token).map(ControlFlow::Continue);
            }
            if let Some(compound) = BinaryOp::from_compound_assign(op) {
                return self
                    .parse_assignment(left, Some(compound), token)
                    .map(ControlFlow::Continue);
            }
            if op == Operator::Question {
                return self.parse_ternary(left, token).map(ControlFlow::Continue);
            }
        }

        if let Some((infix, level)) = infix_binding(op) {
            if precedence > level {
                return Ok(ControlFlow::Break(left));
            }
            self.cursor.advance()?;
            // `**` is right-associative; everything else associates left.
            let right_level = if op == Operator::DoubleStar {
                level
            } else {
                level.tighter()
            };
            let right = self.parse_expr_at(right_level)?;
            let expr = match infix {
                Infix::Binary(op) => binary(op, left, right, token),
                Infix::Logical(op) => Expr::new(
                    ExprKind::Logical {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    token.span.clone(),
                ),
            };
            return Ok(ControlFlow::Continue(expr));
        }

        self.parse_postfix(left, op, token)
    }

    fn parse_assignment(
        &mut self,
        left: Expr,
        op: Option<BinaryOp>,
        token: &Token,
    ) -> Result<Expr, ParseError> {
        let target = left.into_reference().map_err(|expr| {
            ParseError::new(format!("Can't assign to {}", expr.describe()), token.span.clone())
        })?;
        self.cursor.advance()?;
        let value = self.parse_expr()?;
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            token.span.clone(),
        ))
    }

    fn parse_ternary(&mut self, condition: Expr, token: &Token) -> Result<Expr, ParseError> {
        self.cursor.advance()?;
        let then = self.parse_expr()?;
        self.cursor.expect_operator(Operator::Colon)?;
        let otherwise = self.parse_expr()?;
        Ok(Expr::new(
            ExprKind::Ternary {
                condition: Box::new(condition),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            token.span.clone(),
        ))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr, token: &Token) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        token.span.clone(),
    )
}
