//! Input parsers for the structured-text formats.
//!
//! Every parser turns the whole input text into a single `Value` tree.

pub mod csv;
pub mod json;
pub mod plain_text;
pub mod xml;
pub mod yaml;

use crate::error::Result;
use crate::value::Value;

pub trait Parser {
    fn parse(&self, input: &str) -> Result<Value>;
}
