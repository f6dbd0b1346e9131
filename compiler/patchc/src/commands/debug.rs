//! Debug commands: `lex` and `parse` for inspecting the front end.

use patch_diagnostic::{format_location, PositionedError};

use super::read_file;

/// Lex a file and print the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let lexed = patch_lexer::lex(&content, path);

    println!("Tokens for '{}' ({} tokens):", path, lexed.tokens.len());
    for token in &lexed.tokens {
        println!("  {:?} @ {:?}", token.kind, token.span);
    }

    if lexed.has_errors() {
        println!();
        println!("Errors:");
        for error in &lexed.errors {
            println!("  {}", describe(error));
        }
    }
}

/// Parse a file and print its directives and statements.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let lexed = patch_lexer::lex(&content, path);
    let parsed = patch_parse::parse(&lexed.tokens);

    println!("Parse result for '{path}':");
    println!("  Directives: {}", parsed.metadata.len());
    println!("  Statements: {}", parsed.program.statements.len());
    println!("  Errors: {}", lexed.errors.len() + parsed.errors.len());

    if !parsed.metadata.is_empty() {
        println!();
        println!("Directives:");
        for directive in parsed.metadata.iter() {
            println!("  @{} @ {:?}", directive.name, directive.span);
        }
    }

    if !parsed.program.statements.is_empty() {
        println!();
        println!("Statements:");
        for stmt in &parsed.program.statements {
            println!("{stmt:#?}");
        }
    }

    if lexed.has_errors() || parsed.has_errors() {
        println!();
        println!("Errors:");
        for error in &lexed.errors {
            println!("  {}", describe(error));
        }
        for error in &parsed.errors {
            println!("  {}", describe(error));
        }
    }
}

fn describe(error: &dyn PositionedError) -> String {
    format!("{}: {}", format_location(error.span()).text, error.message())
}
