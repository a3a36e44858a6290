use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ConvertError, Result};
use crate::parser::Parser;
use crate::value::{Mapping, Value, ATTRIBUTES_KEY, TEXT_KEY};

/// A parser that maps an XML element tree onto the value model.
///
/// The root element's own name is dropped; its content becomes the result.
/// For every element:
/// - attributes are collected under `@attributes`,
/// - non-blank direct text goes under `#text` (or becomes the whole value when
///   the element has neither attributes nor children),
/// - child elements are keyed by tag name, and a tag seen more than once turns
///   into a `Sequence` of all occurrences in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        XmlParser
    }
}

impl Parser for XmlParser {
    fn parse(&self, input: &str) -> Result<Value> {
        let mut reader = Reader::from_str(input);

        let mut buf = Vec::new();
        let mut stack: Vec<ElementFrame> = Vec::new();
        let mut root: Option<Value> = None;

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|e| {
                ConvertError::Parse(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(ref e) => {
                    open_element(&mut stack, &root)?;
                    stack.push(ElementFrame::new(e)?);
                }
                Event::Empty(ref e) => {
                    open_element(&mut stack, &root)?;
                    let frame = ElementFrame::new(e)?;
                    close_element(frame, &mut stack, &mut root);
                }
                Event::End(_) => {
                    let frame = stack.pop().ok_or_else(|| {
                        ConvertError::Parse("unexpected closing tag".to_string())
                    })?;
                    close_element(frame, &mut stack, &mut root);
                }
                Event::Text(ref e) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.pending.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Event::CData(ref e) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.pending.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Event::GeneralRef(ref e) => {
                    if let Some(frame) = stack.last_mut() {
                        let resolved = resolve_entity(e)?;
                        frame.pending.push_str(&resolved);
                    }
                }
                Event::Eof => break,
                _ => (),
            }
            buf.clear();
        }

        if let Some(frame) = stack.last() {
            return Err(ConvertError::Parse(format!(
                "unclosed element <{}>",
                frame.name
            )));
        }

        root.ok_or_else(|| ConvertError::Parse("document has no root element".to_string()))
    }
}

/// An element whose end tag has not been seen yet.
struct ElementFrame {
    name: String,
    attributes: Mapping,
    text: Vec<String>,
    pending: String,
    children: Mapping,
}

impl ElementFrame {
    fn new(start: &BytesStart) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Mapping::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| {
                ConvertError::Parse(format!("invalid attribute on <{}>: {}", name, e))
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| {
                ConvertError::Parse(format!("invalid attribute value on <{}>: {}", name, e))
            })?;
            attributes.insert(key, Value::text(value.into_owned()));
        }

        Ok(ElementFrame {
            name,
            attributes,
            text: Vec::new(),
            pending: String::new(),
            children: Mapping::new(),
        })
    }

    /// Moves the text gathered since the last child boundary into `text`.
    fn flush_text(&mut self) {
        let trimmed = self.pending.trim();
        if !trimmed.is_empty() {
            self.text.push(trimmed.to_string());
        }
        self.pending.clear();
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            None => {
                self.children.insert(name, value);
            }
            Some(Value::Sequence(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Value::Sequence(vec![first, value]);
            }
        }
    }

    fn finish(mut self) -> (String, Value) {
        self.flush_text();
        let text = self.text.join(" ");

        if self.attributes.is_empty() && self.children.is_empty() && !text.is_empty() {
            return (self.name, Value::text(text));
        }

        let mut map = Mapping::new();
        if !self.attributes.is_empty() {
            map.insert(ATTRIBUTES_KEY.to_string(), Value::Mapping(self.attributes));
        }
        if !text.is_empty() {
            map.insert(TEXT_KEY.to_string(), Value::text(text));
        }
        map.extend(self.children);
        (self.name, Value::Mapping(map))
    }
}

fn open_element(stack: &mut [ElementFrame], root: &Option<Value>) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.flush_text();
    } else if root.is_some() {
        return Err(ConvertError::Parse(
            "document has more than one root element".to_string(),
        ));
    }
    Ok(())
}

fn close_element(frame: ElementFrame, stack: &mut [ElementFrame], root: &mut Option<Value>) {
    let (name, value) = frame.finish();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *root = Some(value),
    }
}

fn resolve_entity(entity: &BytesRef) -> Result<String> {
    let name = String::from_utf8_lossy(entity).into_owned();

    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        return parsed
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| ConvertError::Parse(format!("invalid character reference &{};", name)));
    }

    Ok(match quick_xml::escape::resolve_predefined_entity(&name) {
        Some(resolved) => resolved.to_string(),
        None => format!("&{};", name),
    })
}
