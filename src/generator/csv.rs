use crate::error::Result;
use crate::generator::base::Generator;
use crate::generator::{inline_text, json};
use crate::value::Value;

/// Emits comma-separated text from a `Sequence` of `Mapping`s, one
/// newline-terminated record per line.
///
/// The header row is taken from the keys of the first element, and each row
/// reads those keys in order (missing keys become empty fields). A field that
/// contains a comma is wrapped in double quotes; embedded quotes are left as is.
///
/// Anything other than a non-empty sequence of mappings falls back to the raw
/// scalar text or compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvGenerator;

impl CsvGenerator {
    pub fn new() -> Self {
        CsvGenerator
    }
}

impl Generator for CsvGenerator {
    fn generate(&self, data: &Value, _source_name: &str) -> Result<String> {
        let rows = match data {
            Value::Scalar(scalar) => return Ok(scalar.as_str().to_string()),
            Value::Sequence(rows) => rows,
            _ => return Ok(json::to_json(data).to_string()),
        };
        let headers: Vec<&String> = match rows.first().and_then(Value::as_mapping) {
            Some(first) => first.keys().collect(),
            None => return Ok(json::to_json(data).to_string()),
        };

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(
            headers
                .iter()
                .map(|header| header.as_str())
                .collect::<Vec<_>>()
                .join(","),
        );

        for row in rows {
            let fields: Vec<String> = headers
                .iter()
                .map(|header| match row.get(header) {
                    None | Some(Value::Null) => String::new(),
                    Some(value) => quote_field(inline_text(value)),
                })
                .collect();
            lines.push(fields.join(","));
        }

        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}

fn quote_field(field: String) -> String {
    if field.contains(',') {
        format!("\"{}\"", field)
    } else {
        field
    }
}
