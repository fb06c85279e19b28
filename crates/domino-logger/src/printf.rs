//! Printf-style message rendering
//!
//! Mirrors the conventional `util.format` behaviour: the first argument, when it
//! is a string, is a template whose placeholders consume the following
//! arguments in order. Whatever is left over is appended, space separated.
//!
//! | token | rendering |
//! |-------|-----------|
//! | `%s`  | string coercion |
//! | `%d`  | numeric coercion (`NaN` when not numeric) |
//! | `%i`  | integer coercion (truncates) |
//! | `%f`  | float coercion |
//! | `%j`  | JSON |
//! | `%o` / `%O` | inspected value |
//! | `%c`  | consumes an argument, renders nothing |
//! | `%%`  | literal `%` |
//!
//! A placeholder without a matching argument, or an unknown `%x` sequence, is
//! kept literally.

use serde_json::{Number, Value};

/// Render call arguments into a single message string.
pub fn format_args(args: &[Value]) -> String {
    match args {
        [] => String::new(),
        [Value::String(single)] => single.clone(),
        [single] => inspect(single),
        [Value::String(template), rest @ ..] => substitute(template, rest),
        _ => args.iter().map(display).collect::<Vec<_>>().join(" "),
    }
}

fn substitute(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(token @ ('s' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O' | 'c')) => {
                let Some(arg) = remaining.next() else {
                    out.push('%');
                    continue;
                };
                chars.next();
                match token {
                    's' => out.push_str(&display(arg)),
                    'd' => out.push_str(&number_to_string(to_number(arg))),
                    'i' => out.push_str(&number_to_string(to_integer(arg))),
                    'f' => out.push_str(&number_to_string(to_float(arg))),
                    'j' => out.push_str(&to_json(arg)),
                    'o' | 'O' => out.push_str(&inspect(arg)),
                    _ => {}
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&display(arg));
    }

    out
}

/// String coercion: strings verbatim, everything else inspected.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inspect(other),
    }
}

/// Debug-style rendering of a value.
///
/// Scalars render the way a script console prints them; arrays and objects
/// render as compact JSON.
pub fn inspect(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => json_number_to_string(n),
        Value::String(s) => format!("'{}'", s),
        Value::Array(_) | Value::Object(_) => to_json(value),
    }
}

fn to_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn json_number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        n.to_string()
    } else {
        number_to_string(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Render a float the way a script runtime displays numbers: integral values
/// have no fractional part, non-finite values are spelled out, and magnitudes
/// of at least 1e21 or below 1e-6 use exponent form (`1e+21`, `1.5e-7`).
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let spelled = if n > 0.0 { "Infinity" } else { "-Infinity" };
        spelled.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Shortest exponent notation with an explicitly signed exponent
fn exponent_form(n: f64) -> String {
    let plain = format!("{:e}", n);
    match plain.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => plain,
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn to_integer(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(f64::trunc).unwrap_or(f64::NAN),
        Value::String(s) => parse_int_prefix(s),
        _ => f64::NAN,
    }
}

fn to_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(s),
        _ => f64::NAN,
    }
}

/// Whole-string numeric conversion. Blank strings are zero.
fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Radix prefixes are only valid without a sign.
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }

    let well_formed = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !well_formed {
        return f64::NAN;
    }

    unsigned.parse::<f64>().map(|v| sign * v).unwrap_or(f64::NAN)
}

fn parse_int_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    if end == 0 {
        return f64::NAN;
    }

    digits[..end]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
        * sign
}

fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    // Longest prefix that still parses as a float wins.
    let mut best = None;
    let ends = rest
        .char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .chain(std::iter::once(rest.len()));
    for end in ends {
        let candidate = &rest[..end];
        let numeric = candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
        if !numeric {
            break;
        }
        if let Ok(v) = candidate.parse::<f64>() {
            best = Some(v);
        }
    }

    best.map(|v| sign * v).unwrap_or(f64::NAN)
}
