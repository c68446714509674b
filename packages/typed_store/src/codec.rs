//! Text encoding for typed records.
//!
//! Non-string values are written as a JSON envelope carrying the kind next to
//! the value:
//!
//! ```text
//! {"type":"array","value":[1,2,3]}
//! ```
//!
//! Strings are written as-is so that records stay readable as plain text.
//! Decoding therefore cannot tell a string that happens to look like an
//! envelope apart from a real one; such text decodes as tagged.

use serde_json::json;
use serde_json::value::Value as JsonValue;

use crate::kind::{self, Kind};

const TYPE_FIELD: &str = "type";
const VALUE_FIELD: &str = "value";

/// The result of decoding a record's text.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Tagged(Kind, JsonValue),
    Bare(String),
}

impl Decoded {
    pub fn kind(&self) -> Kind {
        match self {
            Decoded::Tagged(kind, _) => *kind,
            Decoded::Bare(_) => Kind::String,
        }
    }

    pub fn into_value(self) -> JsonValue {
        match self {
            Decoded::Tagged(_, value) => value,
            Decoded::Bare(text) => JsonValue::String(text),
        }
    }
}

pub fn encode(kind: Kind, value: &JsonValue) -> Result<String, serde_json::Error> {
    if kind.is_tagged() {
        serde_json::to_string(&json!({
            TYPE_FIELD: kind.as_str(),
            VALUE_FIELD: value,
        }))
    } else {
        Ok(kind::to_text(value))
    }
}

pub fn decode(text: &str) -> Decoded {
    if let Ok(JsonValue::Object(mut envelope)) = serde_json::from_str::<JsonValue>(text) {
        let tag = envelope
            .get(TYPE_FIELD)
            .and_then(JsonValue::as_str)
            .and_then(|tag| tag.parse::<Kind>().ok());
        if let (Some(kind), Some(value)) = (tag, envelope.remove(VALUE_FIELD)) {
            return Decoded::Tagged(kind, value);
        }
    }

    Decoded::Bare(text.to_string())
}
