//! Conversion orchestration.
//!
//! A `FormatRegistry` maps each structured-text format to its parser and
//! generator once, up front. A `Converter` resolves a source/target pair
//! against the registry and the codec collaborators, then runs the pipeline.
//! A `Session` holds the current input and output of an interactive run.

use std::collections::HashMap;

use crate::error::{ConvertError, Result};
use crate::format::{self, Family, ImageFormat, TextFormat};
use crate::generator::base::Generator;
use crate::generator::csv::CsvGenerator;
use crate::generator::html::HtmlGenerator;
use crate::generator::json::JsonGenerator;
use crate::generator::markdown::MarkdownGenerator;
use crate::generator::plain_text::PlainTextGenerator;
use crate::generator::xml::XmlGenerator;
use crate::generator::yaml::YamlGenerator;
use crate::media::{encode_wav, AudioDecoder, ImageCodec, RasterCodec, SymphoniaDecoder, IMAGE_QUALITY};
use crate::parser::csv::CsvParser;
use crate::parser::json::JsonParser;
use crate::parser::plain_text::PlainTextParser;
use crate::parser::xml::XmlParser;
use crate::parser::yaml::YamlParser;
use crate::parser::Parser;

/// MIME label of every audio output; the container is always WAV.
const WAV_MIME_TYPE: &str = "audio/wav";

/// Receives coarse progress checkpoints (0-100).
pub trait ProgressObserver {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressObserver for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// Observer that discards every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// A named input blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceDocument {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, naming the document after the file.
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(SourceDocument { name, bytes })
    }

    pub fn extension(&self) -> String {
        format::extension_of(&self.name)
    }
}

/// A finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// The parse/generate capability pair registered for one text format.
struct TextCodec {
    parser: Option<Box<dyn Parser>>,
    generator: Box<dyn Generator>,
}

/// Format tag to parser/generator table.
pub struct FormatRegistry {
    codecs: HashMap<TextFormat, TextCodec>,
    fallback_parser: Box<dyn Parser>,
}

impl FormatRegistry {
    /// An empty registry; unparsed sources fall back to the plain-text parser.
    pub fn new() -> Self {
        FormatRegistry {
            codecs: HashMap::new(),
            fallback_parser: Box::new(PlainTextParser::new()),
        }
    }

    /// The registry with every built-in parser and generator.
    pub fn standard() -> Self {
        let mut registry = FormatRegistry::new();
        registry.register(
            TextFormat::PlainText,
            Some(Box::new(PlainTextParser::new())),
            Box::new(PlainTextGenerator::new()),
        );
        registry.register(
            TextFormat::Json,
            Some(Box::new(JsonParser::new())),
            Box::new(JsonGenerator::new()),
        );
        registry.register(
            TextFormat::Csv,
            Some(Box::new(CsvParser::new())),
            Box::new(CsvGenerator::new()),
        );
        registry.register(
            TextFormat::Xml,
            Some(Box::new(XmlParser::new())),
            Box::new(XmlGenerator::default()),
        );
        registry.register(
            TextFormat::Yaml,
            Some(Box::new(YamlParser::new())),
            Box::new(YamlGenerator::new()),
        );
        registry.register(TextFormat::Html, None, Box::new(HtmlGenerator::new()));
        registry.register(TextFormat::Markdown, None, Box::new(MarkdownGenerator::new()));
        registry
    }

    /// Registers (or replaces) the codec pair for `format`.
    pub fn register(
        &mut self,
        format: TextFormat,
        parser: Option<Box<dyn Parser>>,
        generator: Box<dyn Generator>,
    ) {
        self.codecs.insert(format, TextCodec { parser, generator });
    }

    /// Replaces only the generator for `format`, keeping any registered parser.
    pub fn register_generator(&mut self, format: TextFormat, generator: Box<dyn Generator>) {
        match self.codecs.get_mut(&format) {
            Some(codec) => codec.generator = generator,
            None => self.register(format, None, generator),
        }
    }

    pub fn has_generator(&self, format: TextFormat) -> bool {
        self.codecs.contains_key(&format)
    }

    /// The parser for `format`, defaulting to plain text.
    fn parser(&self, format: Option<TextFormat>) -> &dyn Parser {
        format
            .and_then(|format| self.codecs.get(&format))
            .and_then(|codec| codec.parser.as_deref())
            .unwrap_or(self.fallback_parser.as_ref())
    }

    fn generator(&self, format: TextFormat) -> Option<&dyn Generator> {
        self.codecs.get(&format).map(|codec| codec.generator.as_ref())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistry::standard()
    }
}

/// The pipeline chosen for a source/target pair, resolved before any input is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionPlan {
    Text {
        source: Option<TextFormat>,
        target: TextFormat,
    },
    Image {
        target: ImageFormat,
    },
    Audio,
}

/// Runs one conversion at a time against a fixed registry and codec set.
pub struct Converter {
    registry: FormatRegistry,
    image_codec: Box<dyn ImageCodec>,
    audio_decoder: Box<dyn AudioDecoder>,
}

impl Converter {
    pub fn new(registry: FormatRegistry) -> Self {
        Converter {
            registry,
            image_codec: Box::new(RasterCodec),
            audio_decoder: Box::new(SymphoniaDecoder),
        }
    }

    pub fn with_image_codec(mut self, codec: Box<dyn ImageCodec>) -> Self {
        self.image_codec = codec;
        self
    }

    pub fn with_audio_decoder(mut self, decoder: Box<dyn AudioDecoder>) -> Self {
        self.audio_decoder = decoder;
        self
    }

    /// Resolves the pipeline for converting `source_name` to `target_extension`.
    ///
    /// This is a pure table lookup; it fails with `UnsupportedFormat` when the
    /// source family is unknown, the target belongs to another family, or no
    /// generator/codec target is registered for it.
    pub fn plan(&self, source_name: &str, target_extension: &str) -> Result<ConversionPlan> {
        let source_extension = format::extension_of(source_name);
        let target_extension = target_extension.trim_start_matches('.').to_lowercase();

        let family = Family::of(&source_extension).ok_or_else(|| {
            ConvertError::UnsupportedFormat(format!("unknown source type '.{}'", source_extension))
        })?;
        if Family::of(&target_extension) != Some(family) {
            return Err(ConvertError::UnsupportedFormat(format!(
                "cannot convert '.{}' to '.{}'",
                source_extension, target_extension
            )));
        }

        match family {
            Family::Text => {
                let target = TextFormat::from_extension(&target_extension)
                    .filter(|target| self.registry.has_generator(*target))
                    .ok_or_else(|| {
                        ConvertError::UnsupportedFormat(format!(
                            "no generator registered for '.{}'",
                            target_extension
                        ))
                    })?;
                Ok(ConversionPlan::Text {
                    source: TextFormat::from_extension(&source_extension),
                    target,
                })
            }
            Family::Image => {
                if ImageFormat::from_extension(&source_extension).is_none() {
                    return Err(ConvertError::UnsupportedFormat(format!(
                        "cannot decode '.{}' images",
                        source_extension
                    )));
                }
                let target = ImageFormat::from_extension(&target_extension).ok_or_else(|| {
                    ConvertError::UnsupportedFormat(format!(
                        "cannot encode images as '.{}'",
                        target_extension
                    ))
                })?;
                Ok(ConversionPlan::Image { target })
            }
            Family::Audio => Ok(ConversionPlan::Audio),
        }
    }

    /// Target extensions offered for `source_name`: its family minus its own extension.
    pub fn target_options(&self, source_name: &str) -> Vec<&'static str> {
        let extension = format::extension_of(source_name);
        match Family::of(&extension) {
            Some(family) => family
                .extensions()
                .iter()
                .copied()
                .filter(|candidate| *candidate != extension)
                .filter(|candidate| self.plan(source_name, candidate).is_ok())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Converts `source` to `target_extension`, reporting progress checkpoints.
    pub fn convert(
        &self,
        source: &SourceDocument,
        target_extension: &str,
        progress: &mut dyn ProgressObserver,
    ) -> Result<ConvertedDocument> {
        let plan = self.plan(&source.name, target_extension)?;
        tracing::debug!("Conversion plan for {}: {:?}", source.name, plan);

        let target_extension = target_extension.trim_start_matches('.').to_lowercase();
        let (mime_type, bytes) = match plan {
            ConversionPlan::Text {
                source: source_format,
                target,
            } => {
                let output = self.convert_text(source, source_format, target, progress)?;
                (format::mime_type(&target_extension).to_string(), output.into_bytes())
            }
            ConversionPlan::Image { target } => {
                let output = self.convert_image(source, target, progress)?;
                (target.mime_type().to_string(), output)
            }
            ConversionPlan::Audio => {
                let output = self.convert_audio(source, progress)?;
                (WAV_MIME_TYPE.to_string(), output)
            }
        };
        progress.report(100);

        let converted = ConvertedDocument {
            file_name: format::output_file_name(&source.name, &target_extension),
            mime_type,
            bytes,
        };
        tracing::info!(
            "Converted {} -> {} ({})",
            source.name,
            converted.file_name,
            format::format_file_size(converted.bytes.len() as u64)
        );
        Ok(converted)
    }

    fn convert_text(
        &self,
        source: &SourceDocument,
        source_format: Option<TextFormat>,
        target: TextFormat,
        progress: &mut dyn ProgressObserver,
    ) -> Result<String> {
        let content = String::from_utf8_lossy(&source.bytes);

        let value = self.registry.parser(source_format).parse(&content)?;
        tracing::debug!("Parsed {} as {:?}", source.name, source_format);
        progress.report(30);

        let generator = self.registry.generator(target).ok_or_else(|| {
            ConvertError::UnsupportedFormat(format!("no generator registered for {:?}", target))
        })?;
        progress.report(60);

        let output = generator.generate(&value, &source.name)?;
        tracing::debug!("Generated {} bytes of {:?}", output.len(), target);
        progress.report(90);

        Ok(output)
    }

    fn convert_image(
        &self,
        source: &SourceDocument,
        target: ImageFormat,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Vec<u8>> {
        let pixels = self.image_codec.decode(&source.bytes)?;
        tracing::debug!("Decoded {}x{} image", pixels.width, pixels.height);
        progress.report(30);

        let encoded = self.image_codec.encode(&pixels, target, IMAGE_QUALITY)?;
        progress.report(90);
        Ok(encoded)
    }

    fn convert_audio(
        &self,
        source: &SourceDocument,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Vec<u8>> {
        progress.report(20);
        let audio = self.audio_decoder.decode(&source.bytes)?;
        tracing::debug!(
            "Decoded {} channel(s), {} frames at {} Hz",
            audio.channels.len(),
            audio.frame_count(),
            audio.sample_rate
        );
        progress.report(60);

        let wav = encode_wav(&audio)?;
        progress.report(90);
        Ok(wav)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new(FormatRegistry::standard())
    }
}

/// The input and output slots of one interactive conversion session.
#[derive(Debug, Default)]
pub struct Session {
    input: Option<SourceDocument>,
    output: Option<ConvertedDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current input and discards any previous output.
    pub fn load(&mut self, document: SourceDocument) {
        self.input = Some(document);
        self.output = None;
    }

    pub fn input(&self) -> Option<&SourceDocument> {
        self.input.as_ref()
    }

    pub fn output(&self) -> Option<&ConvertedDocument> {
        self.output.as_ref()
    }

    /// Converts the loaded input. The output slot is only filled on success.
    pub fn convert(
        &mut self,
        converter: &Converter,
        target_extension: &str,
        progress: &mut dyn ProgressObserver,
    ) -> Result<&ConvertedDocument> {
        self.output = None;
        let input = self.input.as_ref().ok_or_else(|| {
            ConvertError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no input document loaded",
            ))
        })?;
        let converted = converter.convert(input, target_extension, progress)?;
        let stored: &ConvertedDocument = self.output.insert(converted);
        Ok(stored)
    }

    /// Clears both slots.
    pub fn reset(&mut self) {
        self.input = None;
        self.output = None;
    }
}
