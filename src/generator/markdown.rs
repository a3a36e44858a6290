use crate::error::Result;
use crate::generator::base::Generator;
use crate::generator::inline_text;
use crate::value::Value;

/// Emits a Markdown document titled with the source file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownGenerator;

impl MarkdownGenerator {
    pub fn new() -> Self {
        MarkdownGenerator
    }
}

impl Generator for MarkdownGenerator {
    fn generate(&self, data: &Value, source_name: &str) -> Result<String> {
        let mut markdown = format!("# {}\n\n", source_name);

        match data {
            // Each row gets its own section.
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    markdown.push_str(&format!("## Item {}\n\n", index + 1));
                    match item {
                        Value::Mapping(map) => {
                            for (key, value) in map {
                                push_label(&mut markdown, key, value);
                            }
                        }
                        other => markdown.push_str(&format!("{}\n\n", inline_text(other))),
                    }
                }
            }
            Value::Mapping(map) => {
                for (key, value) in map {
                    markdown.push_str(&format!("## {}\n\n", key));
                    match value {
                        Value::Sequence(items) => {
                            for item in items {
                                markdown.push_str(&format!("- {}\n", inline_text(item)));
                            }
                            markdown.push('\n');
                        }
                        Value::Mapping(entries) => {
                            for (sub_key, sub_value) in entries {
                                push_label(&mut markdown, sub_key, sub_value);
                            }
                        }
                        leaf => markdown.push_str(&format!("{}\n\n", inline_text(leaf))),
                    }
                }
            }
            leaf => markdown.push_str(&inline_text(leaf)),
        }

        Ok(markdown)
    }
}

fn push_label(markdown: &mut String, key: &str, value: &Value) {
    markdown.push_str(&format!("**{}**: {}\n\n", key, inline_text(value)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_text() -> Result<()> {
        let output = MarkdownGenerator::new().generate(&Value::text("Hello"), "notes.txt")?;
        assert_eq!(output, "# notes.txt\n\nHello");
        Ok(())
    }

    #[test]
    fn test_markdown_sequence() -> Result<()> {
        let data = Value::Sequence(vec![
            Value::mapping([("a", Value::text("1")), ("b", Value::text("2"))]),
            Value::text("loose"),
        ]);
        let output = MarkdownGenerator::new().generate(&data, "data.csv")?;
        assert_eq!(
            output,
            "# data.csv\n\n## Item 1\n\n**a**: 1\n\n**b**: 2\n\n## Item 2\n\nloose\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_markdown_mapping() -> Result<()> {
        let data = Value::mapping([
            ("tags", Value::Sequence(vec![Value::text("a"), Value::text("b")])),
            ("meta", Value::mapping([("k", Value::text("v"))])),
            ("name", Value::text("x")),
        ]);
        let output = MarkdownGenerator::new().generate(&data, "conf.yaml")?;
        assert_eq!(
            output,
            "# conf.yaml\n\n## tags\n\n- a\n- b\n\n## meta\n\n**k**: v\n\n## name\n\nx\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_markdown_always_starts_with_title() -> Result<()> {
        let shapes = [
            Value::Null,
            Value::Sequence(vec![]),
            Value::mapping([("k", Value::Null)]),
        ];
        for shape in &shapes {
            let output = MarkdownGenerator::new().generate(shape, "report.json")?;
            assert!(output.starts_with("# report.json\n"));
        }
        Ok(())
    }
}
