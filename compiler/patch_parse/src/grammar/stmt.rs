//! Statement parsing: metadata headers, keyword dispatch and recovery.

use std::sync::Arc;

use patch_ir::{
    Expr, ExprKind, FunctionDef, Keyword, Literal, Metadata, Mutability, Operator, Program,
    SourceSpan, Stmt, StmtKind, TokenKind,
};
use patch_stack::ensure_sufficient_stack;

use crate::recovery::{synchronize, STMT_RECOVERY};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `@directive;` headers followed by top-level statements.
    pub(crate) fn parse_file(&mut self) -> (Metadata, Program) {
        let mut metadata = Metadata::new();
        while self.cursor.check_operator(Operator::At) {
            if let Err(error) = self.parse_directive(&mut metadata) {
                let eof = error.is_eof();
                self.errors.push(error);
                if eof {
                    return (metadata, Program::default());
                }
            }
        }

        let mut statements = Vec::new();
        while self.cursor.has_next() {
            let start = self.cursor.position();
            match self.parse_stmt() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    let eof = error.is_eof();
                    tracing::warn!(%error, "statement failed");
                    self.errors.push(error);
                    if eof {
                        break;
                    }
                    self.recover_statement(start);
                }
            }
        }
        (metadata, Program::new(statements))
    }

    fn parse_directive(&mut self, metadata: &mut Metadata) -> Result<(), ParseError> {
        self.cursor.expect_operator(Operator::At)?;
        let (name, token) = self.cursor.expect_word()?;
        if !metadata.add(name.as_str(), token.span.clone()) {
            self.errors.push(ParseError::new(
                format!("Duplicate metadata directive: {name}"),
                token.span.clone(),
            ));
        }
        self.cursor.expect_operator(Operator::Semicolon)?;
        Ok(())
    }

    /// Skip past a failed top-level statement that began at token `start`.
    fn recover_statement(&mut self, start: usize) {
        synchronize(&mut self.cursor, STMT_RECOVERY);
        if self.cursor.check_operator(Operator::Semicolon) {
            self.cursor.set_position(self.cursor.position() + 1);
        } else if self.cursor.position() == start {
            self.cursor.set_position(start + 1);
        }
    }

    /// Parse one statement.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow on deeply
    /// nested blocks.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt, ParseError> {
        let token = self.cursor.peek()?;
        match &token.kind {
            TokenKind::Operator(Operator::LBrace) => self.parse_block(),
            TokenKind::Operator(Operator::Semicolon) => {
                self.cursor.advance()?;
                Ok(Stmt::new(StmtKind::Empty, token.span.clone()))
            }
            TokenKind::Keyword(Keyword::Apply) => self.parse_apply(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::Var) => self.parse_variable(Mutability::Mutable),
            TokenKind::Keyword(Keyword::Val) => self.parse_variable(Mutability::Immutable),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return(),
            TokenKind::Keyword(Keyword::Function) => self.parse_function_decl(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::Foreach) => self.parse_foreach(),
            TokenKind::Keyword(Keyword::Break) => self.parse_loop_jump(StmtKind::Break),
            TokenKind::Keyword(Keyword::Continue) => self.parse_loop_jump(StmtKind::Continue),
            TokenKind::Keyword(Keyword::Import) => self.parse_import(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// `{ statements }`
    ///
    /// A statement that fails inside the block is recorded, the rest of the
    /// block is skipped and the whole block becomes an error placeholder.
    pub(crate) fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let open = self.cursor.expect_operator(Operator::LBrace)?;
        let open_pos = self.cursor.position() - 1;
        let mut statements = Vec::new();

        while !self.cursor.check_operator(Operator::RBrace) {
            match self.parse_stmt() {
                Ok(stmt) => statements.push(stmt),
                Err(error) if error.is_eof() => return Err(error),
                Err(error) => {
                    let message = error.message.clone();
                    tracing::warn!(%error, "block abandoned");
                    self.errors.push(error);
                    self.skip_block(open_pos)?;
                    return Ok(Stmt::new(
                        StmtKind::Error { message },
                        self.span_from(&open.span),
                    ));
                }
            }
        }
        self.cursor.advance()?;
        Ok(Stmt::new(
            StmtKind::Block(statements),
            self.span_from(&open.span),
        ))
    }

    /// Consume tokens up to and including the `}` closing the block opened
    /// at `open_pos`.
    fn skip_block(&mut self, open_pos: usize) -> Result<(), ParseError> {
        let mut depth: usize = 0;
        for token in self.cursor.consumed_since(open_pos) {
            match token.kind {
                TokenKind::Operator(Operator::LBrace) => depth += 1,
                TokenKind::Operator(Operator::RBrace) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        while depth > 0 {
            match self.cursor.advance()?.kind {
                TokenKind::Operator(Operator::LBrace) => depth += 1,
                TokenKind::Operator(Operator::RBrace) => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    /// `apply (root) body`
    fn parse_apply(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        self.cursor.expect_operator(Operator::LParen)?;
        let root = self.parse_expr()?;
        self.cursor.expect_operator(Operator::RParen)?;
        let body = self.parse_stmt()?;
        Ok(Stmt::new(
            StmtKind::Apply {
                root,
                body: Box::new(body),
            },
            self.span_from(&start),
        ))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        self.cursor.expect_operator(Operator::LParen)?;
        let condition = self.parse_expr()?;
        self.cursor.expect_operator(Operator::RParen)?;
        let then = self.parse_stmt()?;
        let otherwise = if self.cursor.check_keyword(Keyword::Else) {
            self.cursor.advance()?;
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then: Box::new(then),
                otherwise,
            },
            self.span_from(&start),
        ))
    }

    /// `var name = init;` / `val name = init;`
    fn parse_variable(&mut self, mutability: Mutability) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        let (name, name_token) = self.cursor.expect_word()?;
        self.cursor.expect_operator(Operator::Assign)?;
        let init = self.parse_expr()?;
        self.cursor.expect_operator(Operator::Semicolon)?;
        Ok(Stmt::new(
            StmtKind::Variable {
                name,
                name_span: name_token.span.clone(),
                mutability,
                init,
            },
            self.span_from(&start),
        ))
    }

    fn parse_delete(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        let target = self.parse_expr()?.into_reference().map_err(|expr| {
            ParseError::new(format!("Can't delete {}", expr.describe()), expr.span)
        })?;
        self.cursor.expect_operator(Operator::Semicolon)?;
        Ok(Stmt::new(StmtKind::Delete(target), self.span_from(&start)))
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        let value = if self.cursor.check_operator(Operator::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.cursor.expect_operator(Operator::Semicolon)?;
        Ok(Stmt::new(StmtKind::Return(value), self.span_from(&start)))
    }

    /// `function name(params) { body }`
    fn parse_function_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        let (name, name_token) = self.cursor.expect_word()?;
        self.cursor.expect_operator(Operator::LParen)?;
        let params = self.parse_params()?;
        let body = self.in_function_body(Parser::parse_block)?;
        let span = self.span_from(&start);
        let def = FunctionDef {
            params,
            body,
            span: span.clone(),
        };
        Ok(Stmt::new(
            StmtKind::Function {
                name,
                name_span: name_token.span.clone(),
                def: Arc::new(def),
            },
            span,
        ))
    }

    /// `while (condition) body`. The statement span covers the header only.
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        self.cursor.expect_operator(Operator::LParen)?;
        let condition = self.parse_expr()?;
        self.cursor.expect_operator(Operator::RParen)?;
        let span = self.span_from(&start);
        let body = self.in_loop(Parser::parse_stmt)?;
        Ok(Stmt::new(
            StmtKind::While {
                condition,
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `for (init; condition; update) body`
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        self.cursor.expect_operator(Operator::LParen)?;

        let init = match &self.cursor.peek()?.kind {
            TokenKind::Operator(Operator::Semicolon) => {
                let semicolon = self.cursor.advance()?;
                Stmt::new(StmtKind::Empty, semicolon.span.clone())
            }
            TokenKind::Keyword(Keyword::Var) => self.parse_variable(Mutability::Mutable)?,
            TokenKind::Keyword(Keyword::Val) => self.parse_variable(Mutability::Immutable)?,
            _ => self.parse_expr_stmt()?,
        };

        let next = self.cursor.peek()?;
        let condition = if next.kind.is_operator(Operator::Semicolon) {
            Expr::new(ExprKind::Literal(Literal::Boolean(true)), next.span.clone())
        } else {
            self.parse_expr()?
        };
        self.cursor.expect_operator(Operator::Semicolon)?;

        let next = self.cursor.peek()?;
        let update = if next.kind.is_operator(Operator::RParen) {
            Stmt::new(StmtKind::Empty, next.span.clone())
        } else {
            let update_start = next.span.clone();
            let expr = self.parse_expr()?;
            Stmt::new(StmtKind::Expr(expr), self.span_from(&update_start))
        };
        self.cursor.expect_operator(Operator::RParen)?;
        let span = self.span_from(&start);

        let body = self.in_loop(Parser::parse_stmt)?;
        Ok(Stmt::new(
            StmtKind::For {
                init: Box::new(init),
                condition,
                update: Box::new(update),
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `foreach (name in iterable) body`
    fn parse_foreach(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        self.cursor.expect_operator(Operator::LParen)?;
        let (name, name_token) = self.cursor.expect_word()?;
        self.cursor.expect_keyword(Keyword::In)?;
        let iterable = self.parse_expr()?;
        self.cursor.expect_operator(Operator::RParen)?;
        let span = self.span_from(&start);

        let body = self.in_loop(Parser::parse_stmt)?;
        Ok(Stmt::new(
            StmtKind::Foreach {
                name,
                name_span: name_token.span.clone(),
                iterable,
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `break;` or `continue;`. Outside a loop the statement is replaced by
    /// an error placeholder.
    fn parse_loop_jump(&mut self, kind: StmtKind) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        self.cursor.expect_operator(Operator::Semicolon)?;
        let span = self.span_from(&start);
        if self.loop_depth > 0 {
            return Ok(Stmt::new(kind, span));
        }

        let message = match kind {
            StmtKind::Continue => "Continue outside of loop",
            _ => "Break outside of loop",
        };
        self.errors.push(ParseError::new(message, span.clone()));
        Ok(Stmt::new(
            StmtKind::Error {
                message: message.to_string(),
            },
            span,
        ))
    }

    /// `import "library";` or `import "library" as alias;`
    fn parse_import(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance()?.span.clone();
        let (library, library_token) = self.cursor.expect_string()?;
        let (alias, alias_span) = if self.cursor.check_keyword(Keyword::As) {
            self.cursor.advance()?;
            let (alias, alias_token) = self.cursor.expect_word()?;
            (alias, alias_token.span.clone())
        } else {
            (library.clone(), library_token.span.clone())
        };
        self.cursor.expect_operator(Operator::Semicolon)?;
        Ok(Stmt::new(
            StmtKind::Import {
                library,
                alias,
                alias_span,
            },
            self.span_from(&start),
        ))
    }

    /// `expression;`
    fn parse_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.peek()?.span.clone();
        let expr = self.parse_expr()?;
        if !self.cursor.peek()?.kind.is_operator(Operator::Semicolon) {
            let at: SourceSpan = self.cursor.end_span().unwrap_or_else(|| start.clone());
            return Err(ParseError::new("Semicolon expected", at));
        }
        self.cursor.advance()?;
        Ok(Stmt::new(StmtKind::Expr(expr), self.span_from(&start)))
    }
}
