use crate::error::Result;
use crate::parser::Parser;
use crate::value::{Mapping, Value};

/// A strict JSON parser.
///
/// Numbers keep their literal text (`1.50` stays `1.50`) and object key order
/// is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl JsonParser {
    pub fn new() -> Self {
        JsonParser
    }
}

impl Parser for JsonParser {
    fn parse(&self, input: &str) -> Result<Value> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        Ok(from_json(json))
    }
}

/// Converts a `serde_json::Value` into the value model.
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::number(n.to_string()),
        serde_json::Value::String(s) => Value::text(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(object) => {
            let mut map = Mapping::with_capacity(object.len());
            for (key, value) in object {
                map.insert(key, from_json(value));
            }
            Value::Mapping(map)
        }
    }
}
