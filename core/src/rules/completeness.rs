/// Completeness checks: missing, blank, leaked or echoed translations and
/// length explosions.
use super::{is_translated, IssueDraft, RuleContext};
use crate::model::{IssueKind, TranslationUnit};

/// Minimum source length before the leakage heuristic applies.
const UNTRANSLATED_MIN_SOURCE_CHARS: usize = 5;
/// Source words longer than this participate in the leakage ratio.
const UNTRANSLATED_MIN_WORD_CHARS: usize = 3;
/// Leakage ratio above which the unit is flagged.
const UNTRANSLATED_RATIO: f64 = 0.5;

pub fn check_missing_translation(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !unit.target.is_empty() {
        return None;
    }
    Some(
        IssueDraft::new(IssueKind::MissingTranslation, "Translation is missing")
            .with_suggestion(unit.source.clone()),
    )
}

pub fn check_empty_translation(unit: &TranslationUnit) -> Option<IssueDraft> {
    if unit.target.is_empty() || !unit.target.trim().is_empty() {
        return None;
    }
    Some(IssueDraft::new(
        IssueKind::EmptyTranslation,
        "Translation contains only whitespace",
    ))
}

pub fn check_too_long_translation(
    unit: &TranslationUnit,
    ctx: &RuleContext<'_>,
) -> Option<IssueDraft> {
    if !is_translated(unit) || unit.source.is_empty() {
        return None;
    }
    let source_len = unit.source.chars().count();
    let target_len = unit.target.chars().count();
    let ratio = target_len as f32 / source_len as f32;
    if ratio <= ctx.max_length_ratio {
        return None;
    }
    Some(IssueDraft::new(
        IssueKind::TooLongTranslation,
        format!(
            "Translation is {:.0}% of the source length (limit {:.0}%)",
            ratio * 100.0,
            ctx.max_length_ratio * 100.0
        ),
    ))
}

pub fn check_untranslated_text(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let source = unit.source.as_str();
    if source.chars().count() < UNTRANSLATED_MIN_SOURCE_CHARS {
        return None;
    }
    if source.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let target_lower = unit.target.to_lowercase();
    let words: Vec<&str> = source
        .split_whitespace()
        .filter(|word| word.chars().count() > UNTRANSLATED_MIN_WORD_CHARS)
        .collect();
    if words.is_empty() {
        return None;
    }
    let carried = words
        .iter()
        .filter(|word| target_lower.contains(&word.to_lowercase()))
        .count();
    let ratio = carried as f64 / words.len() as f64;
    if ratio <= UNTRANSLATED_RATIO {
        return None;
    }
    Some(IssueDraft::new(
        IssueKind::UntranslatedText,
        format!(
            "Target looks untranslated: {} of {} source words carried over",
            carried,
            words.len()
        ),
    ))
}

pub fn check_target_same_as_source(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let source = unit.source.trim();
    if source.chars().count() < 2 || !source.chars().any(char::is_alphabetic) {
        return None;
    }
    if source.to_lowercase() != unit.target.trim().to_lowercase() {
        return None;
    }
    Some(IssueDraft::new(
        IssueKind::TargetSameAsSource,
        "Translation is identical to the source text",
    ))
}
