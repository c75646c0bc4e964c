use crate::{MasterResponse, Operation};
use std::fmt::{self, Write};
use xmlrpc::Value;

/// Renders an XML-RPC value the way ROS tooling prints master responses.
///
/// A top-level string is written as-is, anything nested is written in its
/// quoted literal form, e.g. `[['/rosout', 'rosgraph_msgs/Log']]`.
#[derive(Copy, Clone, Debug)]
pub struct DisplayValue<'a>(pub &'a Value);

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => f.write_str(s),
            other => write_literal(f, other),
        }
    }
}

/// The line printed for a completed call
pub fn format_result(operation: Operation, response: &MasterResponse) -> String {
    format!(
        "{operation} returned code={}, msg={}, val={}",
        DisplayValue(&response.code),
        DisplayValue(&response.msg),
        DisplayValue(&response.val)
    )
}

/// Short type description used in diagnostics, e.g. `Int (5)` or `Array`
pub fn describe_type(value: &Value) -> String {
    match value {
        Value::Bool(b) => format!("Boolean ({b})"),
        Value::Int(i) => format!("Int ({i})"),
        Value::Int64(i) => format!("Int64 ({i})"),
        Value::Double(d) => format!("Double ({d})"),
        Value::String(s) => format!("String ({s})"),
        Value::DateTime(_) => "DateTime".to_owned(),
        Value::Base64(_) => "Base64".to_owned(),
        Value::Array(_) => "Array".to_owned(),
        Value::Struct(_) => "Struct".to_owned(),
        Value::Nil => "Nil".to_owned(),
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Int(i) => write!(f, "{i}"),
        Value::Int64(i) => write!(f, "{i}"),
        Value::Bool(true) => f.write_str("True"),
        Value::Bool(false) => f.write_str("False"),
        Value::Double(d) => write_double(f, *d),
        Value::String(s) => write_quoted(f, s),
        Value::DateTime(dt) => write!(f, "{dt:?}"),
        Value::Base64(bytes) => write!(f, "<binary {} bytes>", bytes.len()),
        Value::Array(items) => {
            f.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_literal(f, item)?;
            }
            f.write_char(']')
        }
        Value::Struct(members) => {
            f.write_char('{')?;
            for (i, (key, member)) in members.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_quoted(f, key)?;
                f.write_str(": ")?;
                write_literal(f, member)?;
            }
            f.write_char('}')
        }
        Value::Nil => f.write_str("None"),
    }
}

fn write_double(f: &mut fmt::Formatter<'_>, d: f64) -> fmt::Result {
    if d.is_nan() {
        return f.write_str("nan");
    }
    // Debug keeps the trailing `.0` on integral values
    let text = format!("{d:?}");
    match text.split_once('e') {
        // exponents are signed and at least two digits, `1e+16`, `1e-05`
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&text),
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}
