use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::converter::{ConvertedDocument, Converter, ProgressObserver, SourceDocument};
use crate::format;

/// Reads the input named by `input_path` (or stdin), converts it and writes
/// the result to `output_writer`.
///
/// `from_type` overrides the source extension; it is required for stdin,
/// where there is no file name to take it from.
pub fn run_conversion(
    converter: &Converter,
    input_path: &Option<String>,
    from_type: Option<&str>,
    to_type: &str,
    output_writer: &mut dyn Write,
    progress: &mut dyn ProgressObserver,
) -> Result<ConvertedDocument> {
    let source = read_source(input_path, from_type)?;
    tracing::debug!(
        "Read {} ({})",
        source.name,
        format::format_file_size(source.bytes.len() as u64)
    );

    let converted = converter
        .convert(&source, to_type, progress)
        .with_context(|| format!("Conversion failed for {}", source.name))?;

    output_writer.write_all(&converted.bytes)?;
    output_writer.flush()?;
    Ok(converted)
}

fn read_source(input_path: &Option<String>, from_type: Option<&str>) -> Result<SourceDocument> {
    match input_path.as_deref() {
        Some(path) if path != "-" => {
            let mut source = SourceDocument::open(Path::new(path))
                .with_context(|| format!("Failed to read {}", path))?;
            if let Some(ext) = from_type {
                source.name = format::output_file_name(&source.name, ext);
            }
            Ok(source)
        }
        _ => {
            let ext = from_type.context("--from is required when reading from stdin")?;
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            Ok(SourceDocument::new(format!("stdin.{}", ext), bytes))
        }
    }
}
