/// Error types for parsing and configuration
use thiserror::Error;

/// Decoder-internal failure, without file context.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Syntax(String),
}

impl DecodeError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }
}

/// Failure to turn a named file into a `TranslationFile` or glossary.
/// Always carries the originating filename; no partial result is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{file}: unsupported file extension")]
    UnsupportedFormat { file: String },

    #[error("{file}: {source}")]
    Decode {
        file: String,
        #[source]
        source: DecodeError,
    },

    #[error("{file}: content is not valid UTF-8 or UTF-16 text")]
    Encoding { file: String },

    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn file(&self) -> &str {
        match self {
            Self::UnsupportedFormat { file }
            | Self::Decode { file, .. }
            | Self::Encoding { file }
            | Self::Io { file, .. } => file,
        }
    }
}

/// Invalid analysis configuration. Defaults substitute only for absent
/// fields, never for present-but-invalid ones.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("maxLengthRatio {0} is outside the accepted range 1.0..=3.0")]
    LengthRatioOutOfRange(f32),

    #[error("unknown rule tag: {0}")]
    UnknownRule(String),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
