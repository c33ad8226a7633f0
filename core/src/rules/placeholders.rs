/// Placeholder and bracket parity checks.
use once_cell::sync::Lazy;
use regex::Regex;

use super::{is_translated, IssueDraft};
use crate::model::{IssueKind, TranslationUnit};

/// Placeholder families checked for count parity, in evaluation order.
/// The patterns stay free of lookaround so they port across regex flavors.
static PLACEHOLDER_FAMILIES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "printf",
            Regex::new(r"%(?:\d+\$)?[sdif]").expect("valid printf regex"),
        ),
        (
            "double-brace",
            Regex::new(r"\{\{\s*\w+\s*\}\}").expect("valid double-brace regex"),
        ),
        (
            "shell",
            Regex::new(r"\$\{\w+\}").expect("valid shell regex"),
        ),
        (
            "colon-symbol",
            Regex::new(r":[A-Za-z_]\w*").expect("valid colon-symbol regex"),
        ),
        (
            "python",
            Regex::new(r"%\(\w+\)s").expect("valid python regex"),
        ),
        (
            "single-brace",
            Regex::new(r"\{\w+\}").expect("valid single-brace regex"),
        ),
    ]
});

const BRACKET_PAIRS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

pub fn check_inconsistent_placeholders(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    for (family, pattern) in PLACEHOLDER_FAMILIES.iter() {
        let in_source: Vec<&str> = pattern.find_iter(&unit.source).map(|m| m.as_str()).collect();
        let in_target: Vec<&str> = pattern.find_iter(&unit.target).map(|m| m.as_str()).collect();
        if in_source.len() != in_target.len() {
            return Some(IssueDraft::new(
                IssueKind::InconsistentPlaceholders,
                format!(
                    "{} placeholder count differs: source has {} [{}], target has {} [{}]",
                    family,
                    in_source.len(),
                    in_source.join(", "),
                    in_target.len(),
                    in_target.join(", ")
                ),
            ));
        }
    }
    None
}

pub fn check_inconsistent_brackets(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    for (open, close) in BRACKET_PAIRS {
        let source_open = unit.source.matches(open).count();
        let source_close = unit.source.matches(close).count();
        let target_open = unit.target.matches(open).count();
        let target_close = unit.target.matches(close).count();
        if source_open != target_open || source_close != target_close {
            return Some(IssueDraft::new(
                IssueKind::InconsistentBrackets,
                format!(
                    "Bracket mismatch for {}{}: source has {}/{}, target has {}/{}",
                    open, close, source_open, source_close, target_open, target_close
                ),
            ));
        }
    }
    None
}
