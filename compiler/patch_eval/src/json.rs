//! Reading JSON documents into values.
//!
//! JSON text goes through the patch lexer, so string escapes and number
//! syntax match script literals. Trailing commas are accepted; anything
//! after the top-level value is an error.

use patch_diagnostic::PositionedError;
use patch_ir::{Keyword, Operator, SourceSpan, Token, TokenKind};
use patch_lexer::LexError;
use patch_parse::{Cursor, ParseError};

use crate::{ObjectMap, Value};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum JsonError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PositionedError for JsonError {
    fn base_message(&self) -> &'static str {
        match self {
            JsonError::Lex(error) => error.base_message(),
            JsonError::Parse(error) => error.base_message(),
        }
    }

    fn message(&self) -> &str {
        match self {
            JsonError::Lex(error) => PositionedError::message(error),
            JsonError::Parse(error) => PositionedError::message(error),
        }
    }

    fn span(&self) -> Option<&SourceSpan> {
        match self {
            JsonError::Lex(error) => PositionedError::span(error),
            JsonError::Parse(error) => PositionedError::span(error),
        }
    }
}

/// Parse `text` as a single JSON value. `file_name` appears in error
/// locations.
pub fn parse_json(text: &str, file_name: &str) -> Result<Value, JsonError> {
    let output = patch_lexer::lex(text, file_name);
    if let Some(error) = output.errors.into_iter().next() {
        return Err(error.into());
    }

    let mut reader = JsonReader {
        cursor: Cursor::new(&output.tokens),
    };
    let value = reader.value()?;
    if let Some(token) = reader.cursor.current() {
        return Err(unexpected(token).into());
    }
    Ok(value)
}

struct JsonReader<'a> {
    cursor: Cursor<'a>,
}

impl JsonReader<'_> {
    fn value(&mut self) -> Result<Value, ParseError> {
        patch_stack::ensure_sufficient_stack(|| {
            let token = self.cursor.advance()?;
            match &token.kind {
                TokenKind::Operator(Operator::LBrace) => self.object(),
                TokenKind::Operator(Operator::LBracket) => self.array(),
                TokenKind::Operator(Operator::Minus) => Ok(Value::Number(-self.cursor.expect_number()?)),
                TokenKind::String(text) => Ok(Value::string(text.as_str())),
                TokenKind::Number(n) => Ok(Value::Number(*n)),
                TokenKind::Keyword(Keyword::True) => Ok(Value::Boolean(true)),
                TokenKind::Keyword(Keyword::False) => Ok(Value::Boolean(false)),
                TokenKind::Keyword(Keyword::Null) => Ok(Value::Null),
                _ => Err(unexpected(token)),
            }
        })
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        let mut map = ObjectMap::new();
        while self.cursor.has_next() && !self.cursor.check_operator(Operator::RBrace) {
            let (key, _) = self.cursor.expect_string()?;
            self.cursor.expect_operator(Operator::Colon)?;
            let value = self.value()?;
            map.insert(key, value);
            if !self.separator()? {
                break;
            }
        }
        self.cursor.expect_operator(Operator::RBrace)?;
        Ok(Value::object(map))
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        while self.cursor.has_next() && !self.cursor.check_operator(Operator::RBracket) {
            items.push(self.value()?);
            if !self.separator()? {
                break;
            }
        }
        self.cursor.expect_operator(Operator::RBracket)?;
        Ok(Value::array(items))
    }

    /// Consume a `,` if one follows.
    fn separator(&mut self) -> Result<bool, ParseError> {
        if self.cursor.peek()?.kind.is_operator(Operator::Comma) {
            self.cursor.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cold]
fn unexpected(token: &Token) -> ParseError {
    ParseError::new(
        format!("Unexpected token in json: {}", token.kind),
        token.span.clone(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(text: &str) -> Value {
        parse_json(text, "test.json").unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("null"), Value::Null);
        assert_eq!(parse("true"), Value::Boolean(true));
        assert_eq!(parse("-2.5"), Value::Number(-2.5));
        assert_eq!(parse("\"a\\nb\""), Value::from("a\nb"));
    }

    #[test]
    fn test_nested_document() {
        let value = parse(r#"{"name": "x", "tags": [1, 2, {"deep": false}], "none": null}"#);
        assert_eq!(
            value.to_json(),
            r#"{"name":"x","tags":[1,2,{"deep":false}],"none":null}"#
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let value = parse(r#"{"b": 1, "a": 2, "c": 3}"#);
        let keys: Vec<String> = value
            .as_object()
            .unwrap()
            .borrow()
            .keys()
            .map(str::to_string)
            .collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_trailing_comma_accepted() {
        assert_eq!(parse("[1, 2,]").to_json(), "[1,2]");
    }

    #[test]
    fn test_non_string_key_rejected() {
        let error = parse_json("{a: 1}", "test.json").unwrap_err();
        assert_eq!(
            PositionedError::message(&error),
            "Expected string, but found identifier"
        );
    }

    #[test]
    fn test_unexpected_token() {
        let error = parse_json("[1, ;]", "test.json").unwrap_err();
        assert_eq!(PositionedError::message(&error), "Unexpected token in json: ;");
    }

    #[test]
    fn test_trailing_value_rejected() {
        assert!(parse_json("1 2", "test.json").is_err());
    }

    #[test]
    fn test_lex_error_reported() {
        let error = parse_json("[1, `]", "test.json").unwrap_err();
        assert!(matches!(error, JsonError::Lex(_)));
    }

    #[test]
    fn test_unterminated_array() {
        let error = parse_json("[1, 2", "test.json").unwrap_err();
        assert_eq!(PositionedError::message(&error), "Unexpected end of file");
    }
}
