/// Bundle format detection and decoding
/// Twelve decoders, each reading a whole document into a normalized unit stream
pub mod json;
pub mod po;
pub mod properties;
pub mod resx;
pub mod strings;
pub mod tabular;
pub mod tmx;
pub mod xliff;
pub mod xml;
pub mod yaml;

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::encoding;
use crate::error::{DecodeError, ParseError};
use crate::model::{new_id, TranslationFile, TranslationUnit};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Json,
    Xliff,
    Sdlxliff,
    Xml,
    Po,
    Pot,
    Strings,
    Yaml,
    Properties,
    Resx,
    Csv,
    Tsv,
    Tmx,
}

impl FileFormat {
    /// Detect format from a file extension (already stripped of the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xliff" | "xlf" => Some(Self::Xliff),
            "sdlxliff" => Some(Self::Sdlxliff),
            "xml" => Some(Self::Xml),
            "po" => Some(Self::Po),
            "pot" => Some(Self::Pot),
            "strings" => Some(Self::Strings),
            "yaml" | "yml" => Some(Self::Yaml),
            "properties" => Some(Self::Properties),
            "resx" => Some(Self::Resx),
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "tmx" => Some(Self::Tmx),
            _ => None,
        }
    }

    /// Detect format from a filename. Only the lowercased final extension
    /// participates in the decision.
    pub fn from_name(name: &str) -> Option<Self> {
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Self::from_extension(ext)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::from_name)
    }
}

/// Raw unit produced by a decoder, before ids and indexes are stamped.
#[derive(Debug, Default)]
pub struct UnitSeed {
    pub key: String,
    pub source: String,
    pub target: String,
    pub context: Option<String>,
    pub notes: Option<String>,
    pub line: Option<usize>,
}

/// Decoder output: units in document order plus any language tags the
/// format declares.
#[derive(Debug, Default)]
pub struct DecodedBundle {
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub units: Vec<UnitSeed>,
}

/// Trait for format-specific decoders.
pub trait Decoder: Send + Sync {
    /// Extract the unit stream from complete file content.
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError>;
}

/// Get the decoder for a detected format.
pub fn decoder_for(format: FileFormat) -> Box<dyn Decoder> {
    match format {
        FileFormat::Json => Box::new(json::JsonDecoder),
        FileFormat::Xliff | FileFormat::Sdlxliff => Box::new(xliff::XliffDecoder),
        FileFormat::Xml => Box::new(xml::AndroidXmlDecoder),
        FileFormat::Po | FileFormat::Pot => Box::new(po::PoDecoder),
        FileFormat::Strings => Box::new(strings::StringsDecoder),
        FileFormat::Yaml => Box::new(yaml::YamlDecoder),
        FileFormat::Properties => Box::new(properties::PropertiesDecoder),
        FileFormat::Csv => Box::new(tabular::TabularDecoder::csv()),
        FileFormat::Tsv => Box::new(tabular::TabularDecoder::tsv()),
        FileFormat::Resx => Box::new(resx::ResxDecoder),
        FileFormat::Tmx => Box::new(tmx::TmxDecoder),
    }
}

/// Parse raw bytes into a `TranslationFile`. The filename drives format
/// detection and is carried into any error; no partial file is returned.
pub fn parse_bytes(file_name: &str, bytes: &[u8]) -> Result<TranslationFile, ParseError> {
    let format = FileFormat::from_name(file_name).ok_or_else(|| ParseError::UnsupportedFormat {
        file: file_name.to_string(),
    })?;
    let text = encoding::decode_text(bytes).ok_or_else(|| ParseError::Encoding {
        file: file_name.to_string(),
    })?;
    let bundle = decoder_for(format)
        .decode(&text)
        .map_err(|source| ParseError::Decode {
            file: file_name.to_string(),
            source,
        })?;
    log::debug!(
        "parsed {} as {:?}: {} units",
        file_name,
        format,
        bundle.units.len()
    );
    Ok(assemble(file_name, format, bytes.len(), bundle))
}

/// Read a file from disk and parse it.
pub fn parse_path(path: &Path) -> Result<TranslationFile, ParseError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        file: file_name.clone(),
        source,
    })?;
    parse_bytes(&file_name, &bytes)
}

fn assemble(
    file_name: &str,
    format: FileFormat,
    size: usize,
    bundle: DecodedBundle,
) -> TranslationFile {
    let units = bundle
        .units
        .into_iter()
        .enumerate()
        .map(|(i, seed)| {
            let index = i + 1;
            let key = if seed.key.is_empty() {
                format!("unit_{}", index)
            } else {
                seed.key
            };
            TranslationUnit {
                id: new_id(),
                key,
                source: seed.source,
                target: seed.target,
                context: seed.context,
                notes: seed.notes,
                line: seed.line,
                index,
            }
        })
        .collect();
    TranslationFile {
        id: new_id(),
        name: file_name.to_string(),
        format,
        source_lang: bundle
            .source_lang
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| "en".to_string()),
        target_lang: bundle.target_lang.unwrap_or_default(),
        size,
        uploaded_at: chrono::Utc::now(),
        units,
    }
}

/// Text and CDATA of the element whose start tag was just consumed,
/// descendants included, with inline markup dropped.
pub(crate) fn flatten_text(reader: &mut Reader<&[u8]>) -> Result<String, DecodeError> {
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => {
                let raw = std::str::from_utf8(c.as_ref())
                    .map_err(|_| DecodeError::syntax("CDATA section is not valid UTF-8"))?;
                text.push_str(raw);
            }
            Event::Eof => return Err(DecodeError::syntax("unexpected end of document")),
            _ => {}
        }
    }
    Ok(text)
}

/// Look up an attribute by local name (namespace prefixes ignored), with
/// entity references decoded.
pub(crate) fn attr_value(
    start: &BytesStart<'_>,
    name: &[u8],
) -> Result<Option<String>, DecodeError> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
