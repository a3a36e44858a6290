use crate::error::Result;
use crate::parser::Parser;
use crate::value::{Mapping, Value};

/// A parser for a flat, line-oriented YAML subset.
///
/// Recognised lines (after trimming):
/// - `# comment` and blank lines are skipped,
/// - `- item` appends `item` to the list opened by the last `key:` / `key: []`,
/// - `key: value` binds a textual scalar and closes any open list.
///
/// There are no nested mappings, quoted-scalar unescaping or multi-document
/// streams. Lines matching none of the above are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    pub fn new() -> Self {
        YamlParser
    }
}

impl Parser for YamlParser {
    fn parse(&self, input: &str) -> Result<Value> {
        let mut result = Mapping::new();
        let mut current_list: Option<String> = None;

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(item) = line.strip_prefix("- ") {
                match current_list
                    .as_ref()
                    .and_then(|key| result.get_mut(key))
                {
                    Some(Value::Sequence(items)) => items.push(Value::text(item.trim())),
                    _ => tracing::debug!("YAML list item outside of a list ignored: {}", line),
                }
            } else if let Some((key, value)) = line.split_once(':') {
                let key = key.trim().to_string();
                let value = value.trim();

                if value.is_empty() || value == "[]" {
                    result.insert(key.clone(), Value::Sequence(Vec::new()));
                    current_list = Some(key);
                } else {
                    result.insert(key, Value::text(value));
                    current_list = None;
                }
            }
        }

        Ok(Value::Mapping(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_list_and_scalar() -> Result<()> {
        let value = YamlParser::new().parse("tags:\n  - a\n  - b\nname: x")?;
        let expected = Value::mapping([
            ("tags", Value::Sequence(vec![Value::text("a"), Value::text("b")])),
            ("name", Value::text("x")),
        ]);
        assert_eq!(value, expected);

        let keys: Vec<&str> = value.as_mapping().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["tags", "name"]);
        Ok(())
    }

    #[test]
    fn test_yaml_comments_blank_lines_and_empty_list() -> Result<()> {
        let input = r#"
# header comment
title: Report: Q3
empty: []

items:
  # comment inside list
  - one
  -   two
"#;
        let value = YamlParser::new().parse(input)?;
        assert_eq!(value.get("title"), Some(&Value::text("Report: Q3")));
        assert_eq!(value.get("empty"), Some(&Value::Sequence(vec![])));
        assert_eq!(
            value.get("items"),
            Some(&Value::Sequence(vec![Value::text("one"), Value::text("two")]))
        );
        Ok(())
    }

    #[test]
    fn test_yaml_scalar_closes_list() -> Result<()> {
        let value = YamlParser::new().parse("a:\n- 1\nb: 2\n- 3\n")?;
        assert_eq!(value.get("a"), Some(&Value::Sequence(vec![Value::text("1")])));
        assert_eq!(value.get("b"), Some(&Value::text("2")));
        Ok(())
    }

    #[test]
    fn test_yaml_nested_keys_are_flattened() -> Result<()> {
        let value = YamlParser::new().parse("server:\n  host: localhost\n  port: 80\n")?;
        assert_eq!(value.get("server"), Some(&Value::Sequence(vec![])));
        assert_eq!(value.get("host"), Some(&Value::text("localhost")));
        assert_eq!(value.get("port"), Some(&Value::text("80")));
        Ok(())
    }

    #[test]
    fn test_yaml_empty_document() -> Result<()> {
        assert_eq!(YamlParser::new().parse("")?, Value::Mapping(Mapping::new()));
        Ok(())
    }
}
