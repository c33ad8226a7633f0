/// Core data model: translation units, analysis issues and statistics
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::formats::FileFormat;

/// Opaque identifier, unique within one process run.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// One translatable segment extracted from a bundle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUnit {
    pub id: String,
    /// Format-specific key: dotted path, msgid, XML `name` attribute or a
    /// synthetic `row_<n>`-style fallback. Never empty.
    pub key: String,
    pub source: String,
    /// Empty string when the format carries no target side.
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based document order, dense within a file.
    pub index: usize,
}

/// An ordered collection of units decoded from one input document.
/// Immutable once returned by the parser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationFile {
    pub id: String,
    pub name: String,
    pub format: FileFormat,
    pub source_lang: String,
    pub target_lang: String,
    pub size: usize,
    pub uploaded_at: DateTime<Utc>,
    pub units: Vec<TranslationUnit>,
}

/// A term pair that must be translated consistently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Closed enumeration of issue kinds. The serialized tags are stable and
/// appear in machine-readable exports; renaming one is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingTranslation,
    EmptyTranslation,
    LeadingTrailingSpaces,
    InconsistentBrackets,
    InconsistentPlaceholders,
    InconsistentPunctuation,
    InconsistentNumbers,
    InconsistentUrls,
    InconsistentEmails,
    TooLongTranslation,
    DuplicateTranslation,
    InvalidHtmlTags,
    InvalidXmlTags,
    SpecialCharactersMismatch,
    FormattingIssues,
    UntranslatedText,
    TargetSameAsSource,
    KeyTermMismatch,
    AlphanumericMismatch,
    InconsistentSource,
    InconsistentTarget,
    // Declared on the configuration surface but not implemented; the
    // analyzer accepts their flags without emitting issues.
    InconsistentCase,
    PotentiallyIncorrectTranslation,
}

impl IssueKind {
    /// Every kind, in canonical declaration order.
    pub const ALL: [IssueKind; 23] = [
        Self::MissingTranslation,
        Self::EmptyTranslation,
        Self::LeadingTrailingSpaces,
        Self::InconsistentBrackets,
        Self::InconsistentPlaceholders,
        Self::InconsistentPunctuation,
        Self::InconsistentNumbers,
        Self::InconsistentUrls,
        Self::InconsistentEmails,
        Self::TooLongTranslation,
        Self::DuplicateTranslation,
        Self::InvalidHtmlTags,
        Self::InvalidXmlTags,
        Self::SpecialCharactersMismatch,
        Self::FormattingIssues,
        Self::UntranslatedText,
        Self::TargetSameAsSource,
        Self::KeyTermMismatch,
        Self::AlphanumericMismatch,
        Self::InconsistentSource,
        Self::InconsistentTarget,
        Self::InconsistentCase,
        Self::PotentiallyIncorrectTranslation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingTranslation => "missing_translation",
            Self::EmptyTranslation => "empty_translation",
            Self::LeadingTrailingSpaces => "leading_trailing_spaces",
            Self::InconsistentBrackets => "inconsistent_brackets",
            Self::InconsistentPlaceholders => "inconsistent_placeholders",
            Self::InconsistentPunctuation => "inconsistent_punctuation",
            Self::InconsistentNumbers => "inconsistent_numbers",
            Self::InconsistentUrls => "inconsistent_urls",
            Self::InconsistentEmails => "inconsistent_emails",
            Self::TooLongTranslation => "too_long_translation",
            Self::DuplicateTranslation => "duplicate_translation",
            Self::InvalidHtmlTags => "invalid_html_tags",
            Self::InvalidXmlTags => "invalid_xml_tags",
            Self::SpecialCharactersMismatch => "special_characters_mismatch",
            Self::FormattingIssues => "formatting_issues",
            Self::UntranslatedText => "untranslated_text",
            Self::TargetSameAsSource => "target_same_as_source",
            Self::KeyTermMismatch => "key_term_mismatch",
            Self::AlphanumericMismatch => "alphanumeric_mismatch",
            Self::InconsistentSource => "inconsistent_source",
            Self::InconsistentTarget => "inconsistent_target",
            Self::InconsistentCase => "inconsistent_case",
            Self::PotentiallyIncorrectTranslation => "potentially_incorrect_translation",
        }
    }

    /// Parse a stable tag back into a kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::MissingTranslation
            | Self::EmptyTranslation
            | Self::InconsistentBrackets
            | Self::InconsistentPlaceholders
            | Self::InvalidHtmlTags => Severity::Error,
            Self::DuplicateTranslation
            | Self::FormattingIssues
            | Self::TargetSameAsSource => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding from one rule on one unit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QaIssue {
    pub id: String,
    pub unit_id: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    pub source: String,
    pub target: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub index: usize,
}

/// Aggregate counters over an issue list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QaStats {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub by_type: BTreeMap<String, usize>,
}

impl QaStats {
    pub fn from_issues(issues: &[QaIssue]) -> Self {
        let mut stats = Self {
            total: issues.len(),
            ..Self::default()
        };
        for issue in issues {
            match issue.severity {
                Severity::Error => stats.errors += 1,
                Severity::Warning => stats.warnings += 1,
                Severity::Info => stats.info += 1,
            }
            *stats.by_type.entry(issue.kind.as_str().to_string()).or_insert(0) += 1;
        }
        stats
    }
}

/// Result of analyzing one file: issues in (unit order, rule order) plus
/// aggregate statistics. A pure function of its inputs apart from ids.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QaResult {
    pub file_id: String,
    pub file_name: String,
    pub unit_count: usize,
    pub issues: Vec<QaIssue>,
    pub stats: QaStats,
}
