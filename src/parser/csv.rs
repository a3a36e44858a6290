use crate::error::Result;
use crate::parser::Parser;
use crate::value::{Mapping, Value};

/// A parser for comma-separated text.
///
/// The first non-blank line is the header row. Every following line, blank
/// ones included, becomes a `Mapping` keyed by those headers, and the result
/// is a `Sequence` of such rows. A single final line terminator is not a row.
///
/// Fields are split on every comma: quoted fields and embedded commas are not
/// recognised.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        CsvParser
    }
}

impl Parser for CsvParser {
    /// Parses `input` into a `Sequence` of row `Mapping`s.
    ///
    /// Missing trailing fields become empty strings; surplus fields are dropped.
    fn parse(&self, input: &str) -> Result<Value> {
        let body = input.strip_suffix('\n').unwrap_or(input);
        let mut lines = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .skip_while(|line| line.trim().is_empty());

        let headers: Vec<&str> = match lines.next() {
            Some(header_line) => split_fields(header_line),
            None => return Ok(Value::Sequence(Vec::new())),
        };

        let mut rows = Vec::new();
        for (line_index, line) in lines.enumerate() {
            let fields = split_fields(line);
            if fields.len() > headers.len() {
                tracing::warn!(
                    "CSV row {} has {} fields but only {} headers; extra fields ignored",
                    line_index + 2,
                    fields.len(),
                    headers.len()
                );
            }

            let mut row = Mapping::new();
            for (index, header) in headers.iter().enumerate() {
                let field = fields.get(index).copied().unwrap_or("");
                row.insert(header.to_string(), Value::text(field));
            }
            rows.push(Value::Mapping(row));
        }

        Ok(Value::Sequence(rows))
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_parse_rows() -> Result<()> {
        let value = CsvParser::new().parse("a,b\n1,2\n3,4\n")?;
        let expected = Value::Sequence(vec![
            Value::mapping([("a", Value::text("1")), ("b", Value::text("2"))]),
            Value::mapping([("a", Value::text("3")), ("b", Value::text("4"))]),
        ]);
        assert_eq!(value, expected);
        Ok(())
    }

    #[test]
    fn test_csv_parse_trims_and_pads() -> Result<()> {
        let value = CsvParser::new().parse("\n  name , age ,city\r\n Ada ,36\r\n")?;
        let rows = value.as_sequence().unwrap();
        assert_eq!(rows.len(), 1);

        let row = rows[0].as_mapping().unwrap();
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "age", "city"]);
        assert_eq!(row["name"], Value::text("Ada"));
        assert_eq!(row["age"], Value::text("36"));
        assert_eq!(row["city"], Value::text(""));
        Ok(())
    }

    #[test]
    fn test_csv_parse_quotes_are_not_special() -> Result<()> {
        let value = CsvParser::new().parse("a,b\n\"x,y\",z")?;
        let row = &value.as_sequence().unwrap()[0];
        assert_eq!(row.get("a"), Some(&Value::text("\"x")));
        assert_eq!(row.get("b"), Some(&Value::text("y\"")));
        Ok(())
    }

    #[test]
    fn test_csv_parse_keeps_blank_rows() -> Result<()> {
        let value = CsvParser::new().parse("a\n\nx\n\n")?;
        let expected = Value::Sequence(vec![
            Value::mapping([("a", Value::text(""))]),
            Value::mapping([("a", Value::text("x"))]),
            Value::mapping([("a", Value::text(""))]),
        ]);
        assert_eq!(value, expected);
        Ok(())
    }

    #[test]
    fn test_csv_parse_header_only_and_empty() -> Result<()> {
        assert_eq!(CsvParser::new().parse("a,b")?, Value::Sequence(vec![]));
        assert_eq!(CsvParser::new().parse("")?, Value::Sequence(vec![]));
        assert_eq!(CsvParser::new().parse("  \n\n")?, Value::Sequence(vec![]));
        Ok(())
    }

    #[test]
    fn test_csv_parse_duplicate_header_overwrites() -> Result<()> {
        let value = CsvParser::new().parse("a,a\n1,2")?;
        let row = value.as_sequence().unwrap()[0].as_mapping().unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row["a"], Value::text("2"));
        Ok(())
    }
}
