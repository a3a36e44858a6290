use crate::error::Result;
use crate::generator::base::Generator;
use crate::generator::textual;
use crate::value::Value;

/// Emits pretty JSON for structures and the raw text for leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextGenerator;

impl PlainTextGenerator {
    pub fn new() -> Self {
        PlainTextGenerator
    }
}

impl Generator for PlainTextGenerator {
    fn generate(&self, data: &Value, _source_name: &str) -> Result<String> {
        textual(data)
    }
}
