/// Count parity checks for content that must survive translation verbatim:
/// numbers, URLs, email addresses and digit-bearing identifiers.
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{is_translated, IssueDraft};
use crate::model::{IssueKind, TranslationUnit};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit run regex"));

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("valid email regex"));

static ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+").expect("valid alphanumeric run regex"));

pub fn check_inconsistent_numbers(unit: &TranslationUnit) -> Option<IssueDraft> {
    count_parity(
        unit,
        &DIGIT_RUN,
        IssueKind::InconsistentNumbers,
        "number",
    )
}

pub fn check_inconsistent_urls(unit: &TranslationUnit) -> Option<IssueDraft> {
    count_parity(unit, &URL, IssueKind::InconsistentUrls, "URL")
}

pub fn check_inconsistent_emails(unit: &TranslationUnit) -> Option<IssueDraft> {
    count_parity(unit, &EMAIL, IssueKind::InconsistentEmails, "email address")
}

fn count_parity(
    unit: &TranslationUnit,
    pattern: &Regex,
    kind: IssueKind,
    what: &str,
) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let in_source = pattern.find_iter(&unit.source).count();
    let in_target = pattern.find_iter(&unit.target).count();
    if in_source == in_target {
        return None;
    }
    Some(IssueDraft::new(
        kind,
        format!(
            "{} count differs: {} in source, {} in target",
            what, in_source, in_target
        ),
    ))
}

/// Alphanumeric runs that contain a digit (codes, versions, part numbers)
/// must appear in the target with the same multiplicities.
pub fn check_alphanumeric_mismatch(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let source_runs = digit_bearing_runs(&unit.source);
    let target_runs = digit_bearing_runs(&unit.target);
    if source_runs == target_runs {
        return None;
    }

    let missing = multiset_diff(&source_runs, &target_runs);
    let extra = multiset_diff(&target_runs, &source_runs);
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing in target: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        parts.push(format!("extra in target: {}", extra.join(", ")));
    }
    Some(IssueDraft::new(
        IssueKind::AlphanumericMismatch,
        format!("Alphanumeric tokens differ ({})", parts.join("; ")),
    ))
}

fn digit_bearing_runs(text: &str) -> BTreeMap<String, usize> {
    let mut runs = BTreeMap::new();
    for run in ALNUM_RUN.find_iter(text) {
        let run = run.as_str();
        if run.chars().any(|c| c.is_ascii_digit()) {
            *runs.entry(run.to_string()).or_insert(0) += 1;
        }
    }
    runs
}

fn multiset_diff(left: &BTreeMap<String, usize>, right: &BTreeMap<String, usize>) -> Vec<String> {
    left.iter()
        .filter(|(run, count)| right.get(run.as_str()).unwrap_or(&0) < count)
        .map(|(run, _)| run.clone())
        .collect()
}
