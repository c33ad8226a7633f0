pub mod analyzer;
pub mod config;
pub mod encoding;
pub mod error;
pub mod formats;
pub mod glossary;
pub mod model;
pub mod rules;

pub use analyzer::analyze;
pub use config::QaConfig;
pub use error::{ConfigError, DecodeError, ParseError};
pub use formats::{parse_bytes, parse_path, FileFormat};
pub use glossary::load_glossary;
pub use model::{
    GlossaryTerm, IssueKind, QaIssue, QaResult, QaStats, Severity, TranslationFile,
    TranslationUnit,
};
