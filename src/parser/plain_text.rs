use crate::error::Result;
use crate::parser::Parser;
use crate::value::Value;

/// Wraps the whole input as a single textual leaf.
///
/// Used for `txt`, and for any structured-text extension without a dedicated parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        PlainTextParser
    }
}

impl Parser for PlainTextParser {
    fn parse(&self, input: &str) -> Result<Value> {
        Ok(Value::text(input))
    }
}
