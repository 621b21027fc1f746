//! Helpers over loosely typed input records.
//!
//! Both input files are read into `serde_json::Value` first. Records only get
//! a typed shape at the point where a field is actually used, so one bad sale
//! line never prevents the rest from being read.

use serde_json::Value;

/// Renders a record the way it appears in error messages.
///
/// Objects keep their input key order (`serde_json` is built with
/// `preserve_order`), strings are single-quoted, and null/booleans print as
/// `None`, `True` and `False`.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    render_into(value, &mut out);
    out
}

fn render_into(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => quote_into(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_into(item, out);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                quote_into(key, out);
                out.push_str(": ");
                render_into(item, out);
            }
            out.push('}');
        }
    }
}

fn quote_into(s: &str, out: &mut String) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Null, `false`, zero and empty strings/containers count as "no value".
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Short type name used in fault messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Types a raw CSV cell. Empty cells yield `None` so the field is left out of
/// the record entirely. Only `numeric` cells are parsed as numbers.
pub fn typed_cell(cell: &str, numeric: bool) -> Option<Value> {
    if cell.is_empty() {
        return None;
    }

    if !numeric {
        return Some(Value::String(cell.to_string()));
    }

    if let Ok(i) = cell.parse::<i64>() {
        return Some(Value::from(i));
    }

    if let Ok(f) = cell.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Some(Value::Number(n));
        }
    }

    Some(Value::String(cell.to_string()))
}
