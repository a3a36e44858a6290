//! Output generators for the structured-text targets.
//!
//! This module contains generators that render the value model as CSV, JSON,
//! XML, YAML, Markdown, HTML or plain text.

pub mod base;
pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;
pub mod plain_text;
pub mod xml;
pub mod yaml;

use crate::value::Value;

/// Renders a value on a single line: leaves as their text, structures as compact JSON.
pub(crate) fn inline_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Scalar(scalar) => scalar.as_str().to_string(),
        Value::Sequence(_) | Value::Mapping(_) => json::to_json(value).to_string(),
    }
}

/// Renders object-like values as pretty JSON and anything else as its raw text.
pub(crate) fn textual(value: &Value) -> crate::error::Result<String> {
    if value.is_object_like() {
        json::to_pretty_json(value)
    } else {
        Ok(inline_text(value))
    }
}
