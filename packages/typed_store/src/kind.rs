//! Value kinds and the coercions between them.
//!
//! Every stored record has one of five kinds. A value's kind is derived from
//! its shape with [`classify`]; a caller can also ask for a value to be
//! coerced into a specific kind, which follows loose scripting-language rules
//! (`"12"` is the number 12, `""` is false, and so on).

use std::fmt;
use std::str::FromStr;

use serde_json::value::{Map, Number, Value as JsonValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Boolean,
    Array,
    Object,
    String,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Number,
        Kind::Boolean,
        Kind::Array,
        Kind::Object,
        Kind::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::String => "string",
        }
    }

    /// Whether values of this kind are written inside a tagged envelope.
    ///
    /// Strings are the only kind stored as bare text.
    pub fn is_tagged(&self) -> bool {
        !matches!(self, Kind::String)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Determine the kind of a value.
///
/// `null` has no kind of its own and falls through to [`Kind::String`].
pub fn classify(value: &JsonValue) -> Kind {
    match value {
        JsonValue::Array(_) => Kind::Array,
        JsonValue::Object(_) => Kind::Object,
        JsonValue::Number(_) => Kind::Number,
        JsonValue::Bool(_) => Kind::Boolean,
        JsonValue::String(_) | JsonValue::Null => Kind::String,
    }
}

/// Coerce `value` into `kind`.
pub fn coerce(kind: Kind, value: &JsonValue) -> JsonValue {
    match kind {
        Kind::Number => number_value(to_number(value)),
        Kind::Boolean => JsonValue::Bool(to_boolean(value)),
        Kind::String => JsonValue::String(to_text(value)),
        Kind::Array | Kind::Object => to_structured(kind, value),
    }
}

/// Numeric reading of a value. NaN stands in for "not a number".
pub fn to_number(value: &JsonValue) -> f64 {
    match value {
        JsonValue::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        JsonValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        JsonValue::Null => 0.0,
        JsonValue::String(s) => parse_number(s),
        JsonValue::Array(arr) => match arr.as_slice() {
            [] => 0.0,
            [single] => parse_number(&to_text(single)),
            _ => f64::NAN,
        },
        JsonValue::Object(_) => f64::NAN,
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(n) = parse_radix_literal(trimmed) {
        return n;
    }
    // Rust accepts "inf"/"nan" spellings that are not numbers here.
    if trimmed
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_alphabetic())
    {
        return match trimmed {
            "Infinity" | "+Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            _ => f64::NAN,
        };
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x`, `0o` and `0b` integer literals. Signs are not allowed with a prefix.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.starts_with('+') {
        return Some(f64::NAN);
    }
    Some(
        u64::from_str_radix(digits, radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN),
    )
}

/// Represent a float as a JSON number, preferring integers.
///
/// Non-finite values cannot be written as JSON and become `null`.
pub fn number_value(n: f64) -> JsonValue {
    if !n.is_finite() {
        return JsonValue::Null;
    }
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        return JsonValue::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

pub fn to_boolean(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Text form of a value. Structured values are rendered as compact JSON.
pub fn to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
    }
}

/// Structured reading of a value as `kind` (array or object).
///
/// Text is parsed as JSON. Anything that does not produce the requested shape
/// yields an empty container of that shape.
pub fn to_structured(kind: Kind, value: &JsonValue) -> JsonValue {
    let parsed = match value {
        JsonValue::String(s) => serde_json::from_str::<JsonValue>(s).ok(),
        other => Some(other.clone()),
    };

    match (kind, parsed) {
        (Kind::Array, Some(arr @ JsonValue::Array(_))) => arr,
        (Kind::Object, Some(obj @ JsonValue::Object(_))) => obj,
        (Kind::Array, _) => JsonValue::Array(Vec::new()),
        _ => JsonValue::Object(Map::new()),
    }
}
