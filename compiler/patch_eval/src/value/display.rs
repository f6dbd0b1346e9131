//! Text and JSON rendering of values.

use std::fmt::{self, Write as _};
use std::rc::Rc;

use super::Value;

/// Format a number the way scripts print it: always with a fraction
/// (`1.0`), scientific notation outside `[1e-3, 1e7)` (`1.0E10`), and
/// `NaN`/`Infinity` for non-finite values.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = n.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let mut text = n.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => text,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, f, &mut Vec::new())
    }
}

/// `active` holds the containers on the current path; meeting one again
/// prints `[...]` or `{...}`.
fn write_value(value: &Value, f: &mut fmt::Formatter<'_>, active: &mut Vec<usize>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Boolean(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::String(s) => f.write_str(s),
        Value::Function(_) => f.write_str("<function>"),
        Value::Array(items) => {
            let key = Rc::as_ptr(items) as usize;
            if active.contains(&key) {
                return f.write_str("[...]");
            }
            active.push(key);
            f.write_char('[')?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(item, f, active)?;
            }
            active.pop();
            f.write_char(']')
        }
        Value::Object(map) => {
            let key = Rc::as_ptr(map) as usize;
            if active.contains(&key) {
                return f.write_str("{...}");
            }
            active.push(key);
            f.write_char('{')?;
            for (i, (name, item)) in map.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}=")?;
                write_value(item, f, active)?;
            }
            active.pop();
            f.write_char('}')
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(_) => write!(f, "Array({self})"),
            Value::Object(_) => write!(f, "Object({self})"),
            Value::Function(function) => write!(f, "Function({function:?})"),
        }
    }
}

impl Value {
    /// Strict JSON on one line. Functions, non-finite numbers and cyclic
    /// references become `null`.
    pub fn to_json(&self) -> String {
        let mut writer = JsonWriter::new(None);
        writer.value(self);
        writer.out
    }

    /// Strict JSON indented by two spaces per level.
    pub fn to_json_pretty(&self) -> String {
        let mut writer = JsonWriter::new(Some("  "));
        writer.value(self);
        writer.out
    }
}

struct JsonWriter {
    out: String,
    indent: Option<&'static str>,
    depth: usize,
    active: Vec<usize>,
}

impl JsonWriter {
    fn new(indent: Option<&'static str>) -> Self {
        JsonWriter {
            out: String::new(),
            indent,
            depth: 0,
            active: Vec::new(),
        }
    }

    fn value(&mut self, value: &Value) {
        match value {
            Value::Null | Value::Function(_) => self.out.push_str("null"),
            Value::Boolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.number(*n),
            Value::String(s) => self.string(s),
            Value::Array(items) => {
                let key = Rc::as_ptr(items) as usize;
                if self.active.contains(&key) {
                    self.out.push_str("null");
                    return;
                }
                let items = items.borrow();
                if items.is_empty() {
                    self.out.push_str("[]");
                    return;
                }
                self.active.push(key);
                self.open('[');
                for (i, item) in items.iter().enumerate() {
                    self.separator(i);
                    self.value(item);
                }
                self.close(']');
                self.active.pop();
            }
            Value::Object(map) => {
                let key = Rc::as_ptr(map) as usize;
                if self.active.contains(&key) {
                    self.out.push_str("null");
                    return;
                }
                let map = map.borrow();
                if map.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.active.push(key);
                self.open('{');
                for (i, (name, item)) in map.iter().enumerate() {
                    self.separator(i);
                    self.string(name);
                    self.out.push(':');
                    if self.indent.is_some() {
                        self.out.push(' ');
                    }
                    self.value(item);
                }
                self.close('}');
                self.active.pop();
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "only integral values below 2^53 are cast"
    )]
    fn number(&mut self, n: f64) {
        if !n.is_finite() {
            self.out.push_str("null");
        } else if n.fract() == 0.0 && n.abs() < 1e15 {
            let _ = write!(self.out, "{}", n as i64);
        } else {
            let _ = write!(self.out, "{n}");
        }
    }

    fn string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                c if u32::from(c) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", u32::from(c));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn open(&mut self, bracket: char) {
        self.out.push(bracket);
        self.depth += 1;
    }

    fn close(&mut self, bracket: char) {
        self.depth -= 1;
        self.newline();
        self.out.push(bracket);
    }

    fn separator(&mut self, index: usize) {
        if index > 0 {
            self.out.push(',');
        }
        self.newline();
    }

    fn newline(&mut self) {
        if let Some(indent) = self.indent {
            self.out.push('\n');
            for _ in 0..self.depth {
                self.out.push_str(indent);
            }
        }
    }
}
