/// HTML/XML tag integrity checks on the target side.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{is_translated, IssueDraft};
use crate::model::{IssueKind, TranslationUnit};

static TAG_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag token regex"));

static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^</?\s*([a-zA-Z][a-zA-Z0-9-]*)").expect("valid tag name regex"));

/// Elements that never take a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

pub fn check_invalid_html_tags(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let mut stack: Vec<String> = Vec::new();
    for token in TAG_TOKEN.find_iter(&unit.target) {
        let token = token.as_str();
        let Some(caps) = TAG_NAME.captures(token) else {
            // Comments, doctypes and stray angle brackets are not tags.
            continue;
        };
        let name = caps[1].to_lowercase();
        let closing = token.starts_with("</");
        let self_closing = token.ends_with("/>");

        if closing {
            if stack.last().map(String::as_str) == Some(name.as_str()) {
                stack.pop();
            } else {
                return Some(IssueDraft::new(
                    IssueKind::InvalidHtmlTags,
                    format!("Unmatched closing tag </{}> in translation", name),
                ));
            }
        } else if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
            stack.push(name);
        }
    }
    stack.pop().map(|name| {
        IssueDraft::new(
            IssueKind::InvalidHtmlTags,
            format!("Unclosed tag <{}> in translation", name),
        )
    })
}

pub fn check_invalid_xml_tags(unit: &TranslationUnit) -> Option<IssueDraft> {
    if !is_translated(unit) {
        return None;
    }
    let source_names = tag_names(&unit.source);
    let target_names = tag_names(&unit.target);
    let mut unexpected: Vec<&str> = target_names
        .iter()
        .filter(|name| !source_names.contains(*name))
        .map(String::as_str)
        .collect();
    if unexpected.is_empty() {
        return None;
    }
    unexpected.sort_unstable();
    Some(IssueDraft::new(
        IssueKind::InvalidXmlTags,
        format!("Tags in target but not in source: {}", unexpected.join(", ")),
    ))
}

/// Tag names appearing in the text, case preserved.
fn tag_names(text: &str) -> HashSet<String> {
    TAG_TOKEN
        .find_iter(text)
        .filter_map(|token| {
            TAG_NAME
                .captures(token.as_str())
                .map(|caps| caps[1].to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testutil::unit;

    #[test]
    fn unclosed_tag_is_reported() {
        let u = unit(1, "Click <b>here</b>", "Cliquez <b>ici");
        let draft = check_invalid_html_tags(&u).unwrap();
        assert_eq!(draft.kind, IssueKind::InvalidHtmlTags);
        assert!(draft.message.contains("Unclosed tag <b>"));
    }

    #[test]
    fn unmatched_close_is_reported() {
        let u = unit(1, "Plain", "Texte</i>");
        let draft = check_invalid_html_tags(&u).unwrap();
        assert!(draft.message.contains("Unmatched closing tag </i>"));

        let u = unit(1, "<b><i>x</i></b>", "<b><i>x</b></i>");
        assert!(check_invalid_html_tags(&u).is_some());
    }

    #[test]
    fn void_and_self_closing_tags_need_no_close() {
        let u = unit(1, "a<br>b", "a<br>b");
        assert!(check_invalid_html_tags(&u).is_none());
        let u = unit(1, "a<br/>b", "a<br/>b");
        assert!(check_invalid_html_tags(&u).is_none());
        let u = unit(1, "<img src=\"x\">done", "<img src=\"x\">fini");
        assert!(check_invalid_html_tags(&u).is_none());
    }

    #[test]
    fn well_nested_markup_passes() {
        let u = unit(1, "<p><b>Hi</b></p>", "<p><b>Salut</b></p>");
        assert!(check_invalid_html_tags(&u).is_none());
    }

    #[test]
    fn non_tag_angle_text_is_ignored() {
        let u = unit(1, "1 < 2 and 3 > 2", "1 < 2 et 3 > 2");
        assert!(check_invalid_html_tags(&u).is_none());
    }

    #[test]
    fn tags_only_in_target_are_flagged() {
        let u = unit(1, "Bold text", "<b>Texte gras</b>");
        let draft = check_invalid_xml_tags(&u).unwrap();
        assert_eq!(draft.kind, IssueKind::InvalidXmlTags);
        assert!(draft.message.contains('b'));
    }

    #[test]
    fn xml_tag_comparison_is_case_sensitive() {
        let u = unit(1, "<Note>text</Note>", "<note>texte</note>");
        assert!(check_invalid_xml_tags(&u).is_some());
        let u = unit(1, "<Note>text</Note>", "<Note>texte</Note>");
        assert!(check_invalid_xml_tags(&u).is_none());
    }

    #[test]
    fn source_tags_missing_from_target_are_not_this_rules_business() {
        let u = unit(1, "<b>Bold</b>", "Gras");
        assert!(check_invalid_xml_tags(&u).is_none());
    }
}
