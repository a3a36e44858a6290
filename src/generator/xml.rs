use crate::error::Result;
use crate::generator::base::Generator;
use crate::generator::inline_text;
use crate::value::{is_reserved_key, Mapping, Value};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Element name used for the items of a top-level sequence.
const SEQUENCE_ITEM_NAME: &str = "item";

#[derive(Debug, Clone)]
pub struct XmlGeneratorOptions {
    /// Name of the document element wrapping the output.
    pub root_name: String,
}

impl Default for XmlGeneratorOptions {
    fn default() -> Self {
        XmlGeneratorOptions {
            root_name: "root".to_string(),
        }
    }
}

/// Emits an indented XML document (two spaces per level).
///
/// Mapping entries become child elements, a sequence under a key repeats that
/// key once per item, and leaves render on one line as `<key>text</key>`.
/// The `@attributes` and `#text` keys are skipped. Text and names are written
/// verbatim, without entity escaping.
#[derive(Debug, Clone, Default)]
pub struct XmlGenerator {
    options: XmlGeneratorOptions,
}

impl XmlGenerator {
    pub fn new(options: XmlGeneratorOptions) -> Self {
        XmlGenerator { options }
    }
}

impl Generator for XmlGenerator {
    fn generate(&self, data: &Value, _source_name: &str) -> Result<String> {
        let root = &self.options.root_name;
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push('\n');

        match data {
            Value::Mapping(map) => {
                out.push_str(&format!("<{}>\n", root));
                write_children(&mut out, map, 1);
                out.push_str(&format!("</{}>", root));
            }
            Value::Sequence(items) => {
                out.push_str(&format!("<{}>\n", root));
                for item in items {
                    write_element(&mut out, SEQUENCE_ITEM_NAME, item, 1);
                }
                out.push_str(&format!("</{}>", root));
            }
            leaf => {
                out.push_str(&format!("<{}>{}</{}>", root, leaf_text(leaf), root));
            }
        }

        Ok(out)
    }
}

fn write_children(out: &mut String, map: &Mapping, depth: usize) {
    for (key, value) in map.iter().filter(|(key, _)| !is_reserved_key(key)) {
        write_element(out, key, value, depth);
    }
}

fn write_element(out: &mut String, name: &str, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Sequence(items) => {
            for item in items {
                write_element(out, name, item, depth);
            }
        }
        Value::Mapping(map) => {
            out.push_str(&format!("{}<{}>\n", indent, name));
            write_children(out, map, depth + 1);
            out.push_str(&format!("{}</{}>\n", indent, name));
        }
        leaf => {
            out.push_str(&format!("{}<{}>{}</{}>\n", indent, name, leaf_text(leaf), name));
        }
    }
}

fn leaf_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => inline_text(other),
    }
}
