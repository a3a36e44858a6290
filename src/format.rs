//! Static format tables: extension families, MIME labels and format tags.

/// Extensions per family, in the order targets are offered.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "svg"];
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "json", "csv", "html", "md", "xml", "yaml", "yml"];
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Image,
    Text,
    Audio,
}

impl Family {
    pub fn of(extension: &str) -> Option<Family> {
        let extension = extension.to_lowercase();
        let extension = extension.as_str();
        if IMAGE_EXTENSIONS.contains(&extension) {
            Some(Family::Image)
        } else if TEXT_EXTENSIONS.contains(&extension) {
            Some(Family::Text)
        } else if AUDIO_EXTENSIONS.contains(&extension) {
            Some(Family::Audio)
        } else {
            None
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Family::Image => IMAGE_EXTENSIONS,
            Family::Text => TEXT_EXTENSIONS,
            Family::Audio => AUDIO_EXTENSIONS,
        }
    }
}

/// Structured-text formats, each backed by a generator and possibly a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextFormat {
    PlainText,
    Json,
    Csv,
    Html,
    Markdown,
    Xml,
    Yaml,
}

impl TextFormat {
    pub fn from_extension(extension: &str) -> Option<TextFormat> {
        match extension.to_lowercase().as_str() {
            "txt" => Some(TextFormat::PlainText),
            "json" => Some(TextFormat::Json),
            "csv" => Some(TextFormat::Csv),
            "html" => Some(TextFormat::Html),
            "md" => Some(TextFormat::Markdown),
            "xml" => Some(TextFormat::Xml),
            "yaml" | "yml" => Some(TextFormat::Yaml),
            _ => None,
        }
    }
}

/// Raster targets understood by the image codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Bmp,
    Gif,
}

impl ImageFormat {
    pub fn from_extension(extension: &str) -> Option<ImageFormat> {
        match extension.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            "bmp" => Some(ImageFormat::Bmp),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Gif => "image/gif",
        }
    }
}

/// MIME label for a text or audio extension; anything unknown is `text/plain`.
pub fn mime_type(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "txt" => "text/plain",
        "json" => "application/json",
        "csv" => "text/csv",
        "html" => "text/html",
        "md" => "text/markdown",
        "xml" => "application/xml",
        "yaml" | "yml" => "text/yaml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        _ => "text/plain",
    }
}

/// Lower-cased text after the last `.` of `file_name`, or the whole name when there is no dot.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, extension)) => extension.to_lowercase(),
        None => file_name.to_lowercase(),
    }
}

/// Replaces the last extension of `file_name` with `target_extension`.
pub fn output_file_name(file_name: &str, target_extension: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    format!("{}.{}", stem, target_extension)
}

/// Human-readable size, e.g. `0 Bytes`, `512 Bytes`, `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0;
    let mut remaining = bytes;
    while remaining >= 1024 && exponent < UNITS.len() - 1 {
        remaining /= 1024;
        exponent += 1;
    }
    let scaled = (bytes as f64 / 1024f64.powi(exponent as i32) * 100.0).round() / 100.0;
    format!("{} {}", scaled, UNITS[exponent])
}
