//! Parser tests.
//!
//! - `expr`: precedence, associativity, postfix chains, arrow functions
//! - `stmt`: statement forms, metadata, parameter lists
//! - `recovery`: error collection and synchronization

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod recovery;

use patch_ir::{Expr, ExprKind, Literal, ParamTarget, Program, ReferenceKind};
use patch_lexer::lex;

use crate::{parse, parse_expression, ParseError, ParseOutput};

fn parse_source(source: &str) -> ParseOutput {
    let lexed = lex(source, "test");
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    parse(&lexed.tokens)
}

fn parse_ok(source: &str) -> Program {
    let output = parse_source(source);
    assert!(output.errors.is_empty(), "parse errors: {:?}", output.errors);
    output.program
}

fn parse_expr(source: &str) -> Expr {
    let lexed = lex(source, "test");
    parse_expression(&lexed.tokens).expect("expression should parse")
}

fn expr_errors(source: &str) -> Vec<ParseError> {
    let lexed = lex(source, "test");
    parse_expression(&lexed.tokens).expect_err("expression should fail")
}

fn messages(errors: &[ParseError]) -> Vec<&str> {
    errors.iter().map(|e| e.message.as_str()).collect()
}

/// Parse `source` and render it as an s-expression.
fn sexpr(source: &str) -> String {
    render(&parse_expr(source))
}

fn render(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(Literal::Null) => "null".to_string(),
        ExprKind::Literal(Literal::Boolean(b)) => b.to_string(),
        ExprKind::Literal(Literal::Number(n)) => n.to_string(),
        ExprKind::Literal(Literal::String(s)) => format!("{s:?}"),
        ExprKind::Reference(reference) => render_reference(reference),
        ExprKind::Root => "$".to_string(),
        ExprKind::Call { callee, args } => {
            let mut out = format!("(call {}", render(callee));
            for arg in args {
                out.push(' ');
                out.push_str(&render(arg));
            }
            out.push(')');
            out
        }
        ExprKind::Array(elements) => {
            let parts: Vec<_> = elements.iter().map(render).collect();
            format!("[{}]", parts.join(" "))
        }
        ExprKind::Object(entries) => {
            let parts: Vec<_> = entries
                .iter()
                .map(|e| format!("{}: {}", e.key, render(&e.value)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), render(operand)),
        ExprKind::Update {
            op,
            target,
            postfix,
        } => {
            let target = render_reference(&target.kind);
            if *postfix {
                format!("({target} {})", op.as_symbol())
            } else {
                format!("({} {target})", op.as_symbol())
            }
        }
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", op.as_symbol(), render(left), render(right))
        }
        ExprKind::Logical { op, left, right } => {
            format!("({} {} {})", op.as_symbol(), render(left), render(right))
        }
        ExprKind::Ternary {
            condition,
            then,
            otherwise,
        } => format!(
            "(? {} {} {})",
            render(condition),
            render(then),
            render(otherwise)
        ),
        ExprKind::Assign { op, target, value } => {
            let symbol = op.map_or("=".to_string(), |op| format!("{}=", op.as_symbol()));
            format!(
                "({symbol} {} {})",
                render_reference(&target.kind),
                render(value)
            )
        }
        ExprKind::Is { operand, ty, .. } => format!("(is {} {})", render(operand), ty.name()),
        ExprKind::Function(def) => {
            let mut out = "(fn".to_string();
            for (i, param) in def.params.params.iter().enumerate() {
                out.push(' ');
                match &param.target {
                    ParamTarget::Variable(name) => out.push_str(name),
                    ParamTarget::Root => out.push('$'),
                }
                let last = i + 1 == def.params.len();
                if last && def.params.varargs {
                    out.push('*');
                } else if let Some(default) = &param.default {
                    out.push('=');
                    out.push_str(&render(default));
                }
            }
            out.push(')');
            out
        }
    }
}

fn render_reference(reference: &ReferenceKind) -> String {
    match reference {
        ReferenceKind::Variable(name) => name.clone(),
        ReferenceKind::ImplicitRoot(name) => format!("${name}"),
        ReferenceKind::Property { object, name, .. } => format!("(. {} {name})", render(object)),
        ReferenceKind::Index { object, index } => {
            format!("([] {} {})", render(object), render(index))
        }
    }
}
