/// Punctuation, whitespace and formatting parity checks.
use once_cell::sync::Lazy;
use regex::Regex;

use super::{is_translated, IssueDraft};
use crate::model::{IssueKind, TranslationUnit};

/// Terminal punctuation marks whose presence must carry over.
const TERMINAL_MARKS: [char; 6] = ['.', '!', '?', ':', ';', ','];

/// Characters whose per-unit counts must match between the sides.
const SPECIAL_CHARS: [(char, &str); 5] = [
    ('\n', "\\n"),
    ('\t', "\\t"),
    ('\\', "\\"),
    ('"', "\""),
    ('\'', "'"),
];

static MULTI_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("valid whitespace run regex"));

pub fn check_leading_trailing_spaces(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let source_leading = leading_whitespace(&unit.source);
    let source_trailing = trailing_whitespace(&unit.source);
    let leading_differs =
        source_leading.is_empty() != leading_whitespace(&unit.target).is_empty();
    let trailing_differs =
        source_trailing.is_empty() != trailing_whitespace(&unit.target).is_empty();
    if !leading_differs && !trailing_differs {
        return None;
    }
    let edge = match (leading_differs, trailing_differs) {
        (true, true) => "leading and trailing",
        (true, false) => "leading",
        _ => "trailing",
    };
    let suggestion = format!("{}{}{}", source_leading, unit.target.trim(), source_trailing);
    Some(
        IssueDraft::new(
            IssueKind::LeadingTrailingSpaces,
            format!("Source and target disagree on {} whitespace", edge),
        )
        .with_suggestion(suggestion),
    )
}

pub fn check_inconsistent_punctuation(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let mark = unit.source.chars().last().filter(|c| TERMINAL_MARKS.contains(c))?;
    if unit.target.chars().last() == Some(mark) {
        return None;
    }
    Some(
        IssueDraft::new(
            IssueKind::InconsistentPunctuation,
            format!("Source ends with '{}' but target does not", mark),
        )
        .with_suggestion(format!("{}{}", unit.target, mark)),
    )
}

pub fn check_special_characters_mismatch(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    for (c, label) in SPECIAL_CHARS {
        let in_source = unit.source.matches(c).count();
        let in_target = unit.target.matches(c).count();
        if in_source != in_target {
            return Some(IssueDraft::new(
                IssueKind::SpecialCharactersMismatch,
                format!(
                    "Occurrences of {} differ: {} in source, {} in target",
                    label, in_source, in_target
                ),
            ));
        }
    }
    None
}

pub fn check_formatting_issues(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    if MULTI_WHITESPACE.is_match(&unit.target) && !MULTI_WHITESPACE.is_match(&unit.source) {
        return Some(IssueDraft::new(
            IssueKind::FormattingIssues,
            "Translation contains multiple consecutive spaces",
        ));
    }
    if unit.target.contains("\r\n") && !unit.source.contains("\r\n") {
        return Some(IssueDraft::new(
            IssueKind::FormattingIssues,
            "Translation contains mixed line endings",
        ));
    }
    None
}

fn leading_whitespace(text: &str) -> String {
    text.chars().take_while(|c| c.is_whitespace()).collect()
}

fn trailing_whitespace(text: &str) -> String {
    let trimmed_len = text.trim_end().len();
    text[trimmed_len..].to_string()
}
