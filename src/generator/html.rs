use crate::error::Result;
use crate::generator::base::Generator;
use crate::generator::textual;
use crate::value::Value;

/// Emits a standalone HTML page showing the textual rendering inside `<pre>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlGenerator;

impl HtmlGenerator {
    pub fn new() -> Self {
        HtmlGenerator
    }
}

impl Generator for HtmlGenerator {
    fn generate(&self, data: &Value, source_name: &str) -> Result<String> {
        let content = textual(data)?;
        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }}
        pre {{
            background: #f4f4f4;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
        }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <pre>{content}</pre>
</body>
</html>"#,
            title = source_name,
            content = escape_html(&content)
        ))
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html_document() -> Result<()> {
        let data = Value::mapping([("k", Value::text("<v>"))]);
        let output = HtmlGenerator::new().generate(&data, "data.json")?;

        assert!(output.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(output.contains("<title>data.json</title>"));
        assert!(output.contains("<h1>data.json</h1>"));
        assert!(output.contains("<pre>{\n  &quot;k&quot;: &quot;&lt;v&gt;&quot;\n}</pre>"));
        assert!(output.ends_with("</html>"));
        Ok(())
    }

    #[test]
    fn test_html_plain_text() -> Result<()> {
        let output = HtmlGenerator::new().generate(&Value::text("a & b"), "n.txt")?;
        assert!(output.contains("<pre>a &amp; b</pre>"));
        Ok(())
    }
}
