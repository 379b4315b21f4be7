//! Block-style YAML for report bodies.
//!
//! serde_yaml builds the value tree. Emission happens here so that strings a
//! YAML 1.1 reader would take for another scalar (`1:2:3.0`, `yes`, `""`) are
//! double quoted, and sequences under a key stay indentless.

use crate::error::{Result, StoreCtlError};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

const INDICATORS: [char; 19] = [
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

const RESERVED: &[&str] = &[
    "~", "null", "Null", "NULL", "true", "True", "TRUE", "false", "False", "FALSE", "y", "Y",
    "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "on", "On", "ON", "off", "Off", "OFF",
];

/// Append `value` as the value of a key already written at column `indent`.
///
/// The caller has written `key:`; this writes the rest, newline included.
pub fn write_keyed(out: &mut String, value: &Value, indent: usize) -> Result<()> {
    match value {
        Value::Mapping(m) if !m.is_empty() => {
            out.push('\n');
            write_mapping(out, m, indent + 2, false)
        }
        Value::Sequence(s) if !s.is_empty() => {
            out.push('\n');
            write_sequence(out, s, indent, false)
        }
        Value::Tagged(t) => write_keyed(out, &untag(t), indent),
        scalar => {
            out.push(' ');
            out.push_str(&scalar_text(scalar)?);
            out.push('\n');
            Ok(())
        }
    }
}

fn write_mapping(out: &mut String, m: &Mapping, indent: usize, inline_first: bool) -> Result<()> {
    for (i, (k, v)) in m.iter().enumerate() {
        if i > 0 || !inline_first {
            pad(out, indent);
        }
        out.push_str(&key_text(k)?);
        out.push(':');
        write_keyed(out, v, indent)?;
    }
    Ok(())
}

fn write_sequence(out: &mut String, s: &[Value], indent: usize, inline_first: bool) -> Result<()> {
    for (i, item) in s.iter().enumerate() {
        if i > 0 || !inline_first {
            pad(out, indent);
        }
        out.push('-');
        write_item(out, item, indent + 2)?;
    }
    Ok(())
}

/// Sequence entry after its `-`; nested collections start on the same line
fn write_item(out: &mut String, item: &Value, indent: usize) -> Result<()> {
    match item {
        Value::Mapping(m) if !m.is_empty() => {
            out.push(' ');
            write_mapping(out, m, indent, true)
        }
        Value::Sequence(s) if !s.is_empty() => {
            out.push(' ');
            write_sequence(out, s, indent, true)
        }
        Value::Tagged(t) => write_item(out, &untag(t), indent),
        scalar => {
            out.push(' ');
            out.push_str(&scalar_text(scalar)?);
            out.push('\n');
            Ok(())
        }
    }
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

/// Tagged enum values render as a one-entry mapping, the way serde_json shapes them
fn untag(t: &TaggedValue) -> Value {
    let mut m = Mapping::new();
    let name = t.tag.to_string().trim_start_matches('!').to_string();
    m.insert(Value::String(name), t.value.clone());
    Value::Mapping(m)
}

fn scalar_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(format_str(s)),
        Value::Mapping(_) => Ok("{}".to_string()),
        Value::Sequence(_) => Ok("[]".to_string()),
        Value::Tagged(t) => Err(StoreCtlError::Serialization {
            message: format!("unexpected tagged scalar {}", t.tag),
        }),
    }
}

fn key_text(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(format_str(s)),
        Value::Null | Value::Bool(_) | Value::Number(_) => scalar_text(key),
        _ => Err(StoreCtlError::Serialization {
            message: "complex mapping keys are not supported".into(),
        }),
    }
}

/// Plain when unambiguous, double quoted otherwise
pub fn format_str(s: &str) -> String {
    if needs_quotes(s) {
        double_quoted(s)
    } else {
        s.to_string()
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s != s.trim()
        || RESERVED.contains(&s)
        || looks_numeric(s)
        || s.starts_with(INDICATORS)
        || s.ends_with(':')
        || s.contains(": ")
        || s.contains(" #")
        || s.chars().any(|c| c.is_control())
}

/// True for anything a YAML 1.1 or 1.2 reader resolves to an int or float
fn looks_numeric(s: &str) -> bool {
    let t = s.strip_prefix(['+', '-']).unwrap_or(s);
    let lower = t.to_ascii_lowercase();
    if matches!(lower.as_str(), ".inf" | ".nan") {
        return true;
    }
    if !t.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return false;
    }
    if t.replace('_', "").parse::<f64>().is_ok() {
        return true;
    }
    if let Some(rest) = ["0x", "0o", "0b"]
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
    {
        return !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit() || c == '_');
    }
    is_sexagesimal(t)
}

/// YAML 1.1 base 60: `190:20:30` or `1:2:3.0`
fn is_sexagesimal(t: &str) -> bool {
    let segments: Vec<&str> = t.split(':').collect();
    let Some((last, init)) = segments.split_last() else {
        return false;
    };
    let Some((head, middle)) = init.split_first() else {
        return false;
    };
    let last: &str = last;
    let last = match last.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c.is_ascii_digit() || c == '_') => whole,
        Some(_) => return false,
        None => last,
    };
    is_digits(head) && middle.iter().all(|seg| is_base60(seg)) && is_base60(last)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '_')
}

fn is_base60(s: &str) -> bool {
    matches!(s.len(), 1 | 2)
        && s.chars().all(|c| c.is_ascii_digit())
        && s.parse::<u8>().is_ok_and(|v| v < 60)
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
