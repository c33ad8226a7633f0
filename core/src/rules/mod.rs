/// Rule library: pure checks, each producing at most one issue per unit
pub mod completeness;
pub mod content;
pub mod glossary;
pub mod markup;
pub mod placeholders;
pub mod punctuation;
pub mod relational;

use std::collections::HashMap;

use regex::Regex;

use crate::config::QaConfig;
use crate::model::{IssueKind, TranslationFile, TranslationUnit};

/// Canonical evaluation order. The driver walks this list per unit; the
/// two declared-but-unimplemented kinds are absent because they never
/// produce issues.
pub const RULE_ORDER: [IssueKind; 21] = [
    IssueKind::MissingTranslation,
    IssueKind::EmptyTranslation,
    IssueKind::LeadingTrailingSpaces,
    IssueKind::InconsistentBrackets,
    IssueKind::InconsistentPlaceholders,
    IssueKind::InconsistentPunctuation,
    IssueKind::InconsistentNumbers,
    IssueKind::InconsistentUrls,
    IssueKind::InconsistentEmails,
    IssueKind::TooLongTranslation,
    IssueKind::DuplicateTranslation,
    IssueKind::InvalidHtmlTags,
    IssueKind::InvalidXmlTags,
    IssueKind::SpecialCharactersMismatch,
    IssueKind::FormattingIssues,
    IssueKind::UntranslatedText,
    IssueKind::TargetSameAsSource,
    IssueKind::KeyTermMismatch,
    IssueKind::AlphanumericMismatch,
    IssueKind::InconsistentSource,
    IssueKind::InconsistentTarget,
];

/// A finding before it is stamped with unit fields and an identifier.
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub kind: IssueKind,
    pub message: String,
    pub suggestion: Option<String>,
}

impl IssueDraft {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A glossary term with word-bounded, case-insensitive matchers compiled
/// once per analysis.
pub struct CompiledTerm {
    pub source: String,
    pub target: String,
    pub source_re: Regex,
    pub target_re: Regex,
}

/// Shared read-only state for one analysis run.
pub struct RuleContext<'a> {
    pub units: &'a [TranslationUnit],
    pub max_length_ratio: f32,
    /// source text -> positions; only units with both sides non-blank are
    /// indexed.
    pub source_index: HashMap<&'a str, Vec<usize>>,
    /// target text -> positions, same admission rule.
    pub target_index: HashMap<&'a str, Vec<usize>>,
    pub glossary: Vec<CompiledTerm>,
}

impl<'a> RuleContext<'a> {
    pub fn new(file: &'a TranslationFile, config: &QaConfig) -> Self {
        let mut source_index: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut target_index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (pos, unit) in file.units.iter().enumerate() {
            if unit.source.is_empty() || unit.target.trim().is_empty() {
                continue;
            }
            source_index.entry(unit.source.as_str()).or_default().push(pos);
            target_index.entry(unit.target.as_str()).or_default().push(pos);
        }

        let glossary = config
            .glossary
            .iter()
            .flatten()
            .filter_map(compile_term)
            .collect();

        Self {
            units: &file.units,
            max_length_ratio: config.max_length_ratio,
            source_index,
            target_index,
            glossary,
        }
    }
}

fn compile_term(term: &crate::model::GlossaryTerm) -> Option<CompiledTerm> {
    let source = term.source.trim();
    let target = term.target.trim();
    if source.is_empty() || target.is_empty() {
        return None;
    }
    let compile = |text: &str| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(text))).ok();
    Some(CompiledTerm {
        source: source.to_string(),
        target: target.to_string(),
        source_re: compile(source)?,
        target_re: compile(target)?,
    })
}

/// Units with a blank target are handled by the completeness rules alone;
/// every comparison rule bails out on them.
pub(crate) fn is_translated(unit: &TranslationUnit) -> bool {
    !unit.target.trim().is_empty()
}

/// Evaluate one rule against one unit.
pub fn run(kind: IssueKind, unit: &TranslationUnit, ctx: &RuleContext<'_>) -> Option<IssueDraft> {
    match kind {
        IssueKind::MissingTranslation => completeness::check_missing_translation(unit),
        IssueKind::EmptyTranslation => completeness::check_empty_translation(unit),
        IssueKind::LeadingTrailingSpaces => punctuation::check_leading_trailing_spaces(unit),
        IssueKind::InconsistentBrackets => placeholders::check_inconsistent_brackets(unit),
        IssueKind::InconsistentPlaceholders => placeholders::check_inconsistent_placeholders(unit),
        IssueKind::InconsistentPunctuation => punctuation::check_inconsistent_punctuation(unit),
        IssueKind::InconsistentNumbers => content::check_inconsistent_numbers(unit),
        IssueKind::InconsistentUrls => content::check_inconsistent_urls(unit),
        IssueKind::InconsistentEmails => content::check_inconsistent_emails(unit),
        IssueKind::TooLongTranslation => completeness::check_too_long_translation(unit, ctx),
        IssueKind::DuplicateTranslation => relational::check_duplicate_translation(unit, ctx),
        IssueKind::InvalidHtmlTags => markup::check_invalid_html_tags(unit),
        IssueKind::InvalidXmlTags => markup::check_invalid_xml_tags(unit),
        IssueKind::SpecialCharactersMismatch => {
            punctuation::check_special_characters_mismatch(unit)
        }
        IssueKind::FormattingIssues => punctuation::check_formatting_issues(unit),
        IssueKind::UntranslatedText => completeness::check_untranslated_text(unit),
        IssueKind::TargetSameAsSource => completeness::check_target_same_as_source(unit),
        IssueKind::KeyTermMismatch => glossary::check_key_term_mismatch(unit, ctx),
        IssueKind::AlphanumericMismatch => content::check_alphanumeric_mismatch(unit),
        IssueKind::InconsistentSource => relational::check_inconsistent_source(unit, ctx),
        IssueKind::InconsistentTarget => relational::check_inconsistent_target(unit, ctx),
        IssueKind::InconsistentCase | IssueKind::PotentiallyIncorrectTranslation => None,
    }
}
