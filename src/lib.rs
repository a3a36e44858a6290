pub mod cli;
pub mod converter;
pub mod error;
pub mod format;
pub mod generator;
pub mod media;
pub mod parser;
pub mod value;

pub use converter::{ConvertedDocument, Converter, FormatRegistry, Session, SourceDocument};
pub use error::{ConvertError, Result};
pub use value::{Mapping, Scalar, Value};

/// Extensions that can be converted from. `svg` belongs to the image family
/// but has no raster decoder, so it is not listed.
pub fn get_source_types() -> Vec<String> {
    format::TEXT_EXTENSIONS
        .iter()
        .chain(format::IMAGE_EXTENSIONS)
        .chain(format::AUDIO_EXTENSIONS)
        .filter(|ext| **ext != "svg")
        .map(|ext| ext.to_string())
        .collect()
}

pub fn get_target_types() -> Vec<String> {
    get_source_types()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_types_skip_svg() {
        let sources = get_source_types();
        assert!(sources.contains(&"png".to_string()));
        assert!(sources.contains(&"yml".to_string()));
        assert!(!sources.contains(&"svg".to_string()));
        assert_eq!(get_target_types(), sources);
    }
}
