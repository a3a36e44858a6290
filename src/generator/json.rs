use std::str::FromStr;

use crate::error::Result;
use crate::generator::base::Generator;
use crate::value::Value;

/// Emits pretty-printed JSON with two-space indentation.
///
/// Object-like values (mappings, sequences, null) are written as they are;
/// a lone scalar or boolean is wrapped as `{"content": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGenerator;

impl JsonGenerator {
    pub fn new() -> Self {
        JsonGenerator
    }
}

impl Generator for JsonGenerator {
    fn generate(&self, data: &Value, _source_name: &str) -> Result<String> {
        if data.is_object_like() {
            return to_pretty_json(data);
        }
        let mut wrapper = serde_json::Map::new();
        wrapper.insert("content".to_string(), to_json(data));
        Ok(serde_json::to_string_pretty(&serde_json::Value::Object(wrapper))?)
    }
}

/// Converts the value model into `serde_json::Value`.
///
/// Numeric scalars become JSON numbers with their original text; a numeric
/// scalar whose text is not a valid JSON number falls back to a string.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Scalar(scalar) if scalar.is_numeric() => {
            match serde_json::Number::from_str(scalar.as_str()) {
                Ok(number) => serde_json::Value::Number(number),
                Err(_) => serde_json::Value::String(scalar.as_str().to_string()),
            }
        }
        Value::Scalar(scalar) => serde_json::Value::String(scalar.as_str().to_string()),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Mapping(map) => serde_json::Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect(),
        ),
    }
}

pub fn to_pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json(value))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::json::JsonParser;
    use crate::parser::Parser;

    #[test]
    fn test_json_pretty_number() -> Result<()> {
        let value = JsonParser::new().parse(r#"{"x":1}"#)?;
        assert_eq!(JsonGenerator::new().generate(&value, "a.json")?, "{\n  \"x\": 1\n}");
        Ok(())
    }

    #[test]
    fn test_json_round_trip_keeps_shape_and_order() -> Result<()> {
        let input = r#"{"b":[1,"two",false,null,{"c":1.250}],"a":{"z":"y"}}"#;
        let value = JsonParser::new().parse(input)?;
        let output = JsonGenerator::new().generate(&value, "x.json")?;

        assert!(output.find("\"b\"").unwrap() < output.find("\"a\"").unwrap());
        assert!(output.contains("1.250"));
        assert_eq!(JsonParser::new().parse(&output)?, value);
        Ok(())
    }

    #[test]
    fn test_json_text_scalars_are_quoted() -> Result<()> {
        let value = Value::mapping([("a", Value::text("1"))]);
        assert_eq!(JsonGenerator::new().generate(&value, "a.csv")?, "{\n  \"a\": \"1\"\n}");
        Ok(())
    }

    #[test]
    fn test_json_wraps_plain_text() -> Result<()> {
        let output = JsonGenerator::new().generate(&Value::text("hello\nworld"), "notes.txt")?;
        assert_eq!(output, "{\n  \"content\": \"hello\\nworld\"\n}");
        Ok(())
    }

    #[test]
    fn test_json_null_and_empty() -> Result<()> {
        assert_eq!(JsonGenerator::new().generate(&Value::Null, "a")?, "null");
        assert_eq!(JsonGenerator::new().generate(&Value::Sequence(vec![]), "a")?, "[]");
        Ok(())
    }

    #[test]
    fn test_invalid_numeric_text_falls_back_to_string() {
        assert_eq!(
            to_json(&Value::number("1e")),
            serde_json::Value::String("1e".to_string())
        );
    }
}
