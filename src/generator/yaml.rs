use crate::error::Result;
use crate::generator::base::Generator;
use crate::generator::inline_text;
use crate::value::{Mapping, Value};

/// Emits the flat YAML dialect read by `YamlParser`, plus one level of nesting.
///
/// - sequences: `key:` followed by `  - item` lines,
/// - mappings: `key:` followed by `  subkey: value` lines (one level only),
/// - leaves: `key: value`.
///
/// A lone scalar becomes `content: <text>`; a top-level sequence becomes a
/// list of `- ` items.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlGenerator;

impl YamlGenerator {
    pub fn new() -> Self {
        YamlGenerator
    }
}

impl Generator for YamlGenerator {
    fn generate(&self, data: &Value, _source_name: &str) -> Result<String> {
        let mut out = String::new();
        match data {
            Value::Mapping(map) => write_mapping(&mut out, map),
            Value::Sequence(items) => write_list(&mut out, items),
            leaf => out.push_str(&format!("content: {}", inline_text(leaf))),
        }
        Ok(out)
    }
}

fn write_mapping(out: &mut String, map: &Mapping) {
    for (key, value) in map {
        match value {
            Value::Sequence(items) => {
                out.push_str(&format!("{}:\n", key));
                for item in items {
                    out.push_str(&format!("  - {}\n", inline_text(item)));
                }
            }
            Value::Mapping(entries) => {
                out.push_str(&format!("{}:\n", key));
                for (sub_key, sub_value) in entries {
                    out.push_str(&format!("  {}: {}\n", sub_key, inline_text(sub_value)));
                }
            }
            leaf => out.push_str(&format!("{}: {}\n", key, inline_text(leaf))),
        }
    }
}

fn write_list(out: &mut String, items: &[Value]) {
    for item in items {
        match item {
            Value::Mapping(entries) if !entries.is_empty() => {
                for (index, (key, value)) in entries.iter().enumerate() {
                    let marker = if index == 0 { "- " } else { "  " };
                    out.push_str(&format!("{}{}: {}\n", marker, key, inline_text(value)));
                }
            }
            other => out.push_str(&format!("- {}\n", inline_text(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::yaml::YamlParser;
    use crate::parser::Parser;

    #[test]
    fn test_yaml_mapping_output() -> Result<()> {
        let data = Value::mapping([
            ("name", Value::text("x")),
            ("tags", Value::Sequence(vec![Value::text("a"), Value::text("b")])),
            (
                "owner",
                Value::mapping([("id", Value::number("7")), ("admin", Value::Bool(true))]),
            ),
        ]);
        let output = YamlGenerator::new().generate(&data, "x.json")?;
        assert_eq!(
            output,
            "name: x\ntags:\n  - a\n  - b\nowner:\n  id: 7\n  admin: true\n"
        );
        Ok(())
    }

    #[test]
    fn test_yaml_round_trip_flat_dialect() -> Result<()> {
        let input = "tags:\n  - a\n  - b\nname: x\n";
        let value = YamlParser::new().parse(input)?;
        assert_eq!(YamlGenerator::new().generate(&value, "x.yaml")?, input);
        Ok(())
    }

    #[test]
    fn test_yaml_scalar_and_sequence() -> Result<()> {
        let generator = YamlGenerator::new();
        assert_eq!(generator.generate(&Value::text("hi"), "a.txt")?, "content: hi");

        let rows = Value::Sequence(vec![
            Value::mapping([("a", Value::text("1")), ("b", Value::text("2"))]),
            Value::text("solo"),
        ]);
        assert_eq!(generator.generate(&rows, "a.csv")?, "- a: 1\n  b: 2\n- solo\n");
        Ok(())
    }
}
