use indexmap::IndexMap;

/// Key under which the XML parser stores an element's attributes.
pub const ATTRIBUTES_KEY: &str = "@attributes";
/// Key under which the XML parser stores the direct text of an element that also has children.
pub const TEXT_KEY: &str = "#text";

/// An ordered, string-keyed node of a `Value` tree.
///
/// Re-inserting an existing key replaces the value in place and keeps the
/// original position. Equality ignores key order.
pub type Mapping = IndexMap<String, Value>;

/// A leaf of a `Value` tree.
///
/// Leaves keep their source text verbatim so numbers are never reformatted.
/// `numeric` records that the text came from a JSON number, which lets the
/// JSON generator emit it unquoted. It takes no part in equality: `"1"` and
/// `1` are the same leaf.
#[derive(Debug, Clone, Default)]
pub struct Scalar {
    text: String,
    numeric: bool,
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Scalar {}

impl Scalar {
    /// Creates a textual leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Scalar {
            text: text.into(),
            numeric: false,
        }
    }

    /// Creates a leaf holding the literal text of a number.
    pub fn number(text: impl Into<String>) -> Self {
        Scalar {
            text: text.into(),
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// The canonical tree every parser produces and every generator consumes.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Shorthand for a textual `Scalar` value.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Scalar(Scalar::text(text))
    }

    /// Shorthand for a numeric `Scalar` value.
    pub fn number(text: impl Into<String>) -> Self {
        Value::Scalar(Scalar::number(text))
    }

    /// Builds a `Mapping` value from ordered pairs. Later duplicates overwrite earlier ones.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Whether the value renders as a structure (JSON object/array/null) rather than raw text.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Null | Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(scalar) => Some(scalar.as_str()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a `Mapping`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

/// Whether `key` is one of the structural keys added by the XML parser.
pub fn is_reserved_key(key: &str) -> bool {
    key == ATTRIBUTES_KEY || key == TEXT_KEY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_reinsert_keeps_position() {
        let mut map = Mapping::new();
        map.insert("a".to_string(), Value::text("1"));
        map.insert("b".to_string(), Value::text("2"));
        map.insert("a".to_string(), Value::text("3"));

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::text("3")));
    }

    #[test]
    fn test_mapping_helper_overwrites_duplicates() {
        let value = Value::mapping([("x", Value::text("1")), ("x", Value::text("2"))]);
        let map = value.as_mapping().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(value.get("x"), Some(&Value::text("2")));
    }

    #[test]
    fn test_scalar_equality_ignores_numeric_flag() {
        assert_eq!(Value::text("1"), Value::number("1"));
        assert_ne!(Value::number("1.50"), Value::number("1.5"));
        assert!(Scalar::number("7").is_numeric());
        assert!(!Scalar::text("7").is_numeric());
    }

    #[test]
    fn test_structural_equality_ignores_key_order() {
        let left = Value::mapping([
            (ATTRIBUTES_KEY, Value::mapping([("id", Value::text("1"))])),
            (TEXT_KEY, Value::text("hello")),
        ]);
        let right = Value::mapping([
            (TEXT_KEY, Value::text("hello")),
            (ATTRIBUTES_KEY, Value::mapping([("id", Value::text("1"))])),
        ]);
        assert_eq!(left, right);
    }

    #[test]
    fn test_object_like() {
        assert!(Value::Null.is_object_like());
        assert!(Value::Sequence(vec![]).is_object_like());
        assert!(Value::Mapping(Mapping::new()).is_object_like());
        assert!(!Value::text("x").is_object_like());
        assert!(!Value::Bool(true).is_object_like());
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved_key("@attributes"));
        assert!(is_reserved_key("#text"));
        assert!(!is_reserved_key("text"));
    }
}
