/// Glossary term enforcement
use super::{is_translated, IssueDraft, RuleContext};
use crate::model::{IssueKind, TranslationUnit};

pub fn check_key_term_mismatch(
    unit: &TranslationUnit,
    ctx: &RuleContext<'_>,
) -> Option<IssueDraft> {
    if !is_translated(unit) || ctx.glossary.is_empty() {
        return None;
    }
    let violated: Vec<_> = ctx
        .glossary
        .iter()
        .filter(|term| {
            term.source_re.is_match(&unit.source) && !term.target_re.is_match(&unit.target)
        })
        .collect();
    if violated.is_empty() {
        return None;
    }
    let listed: Vec<String> = violated
        .iter()
        .map(|term| format!("'{}' -> '{}'", term.source, term.target))
        .collect();
    let suggestion: Vec<&str> = violated.iter().map(|term| term.target.as_str()).collect();
    Some(
        IssueDraft::new(
            IssueKind::KeyTermMismatch,
            format!("Glossary terms not respected: {}", listed.join("; ")),
        )
        .with_suggestion(suggestion.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QaConfig;
    use crate::formats::parse_bytes;
    use crate::model::GlossaryTerm;

    fn config_with_terms(terms: &[(&str, &str)]) -> QaConfig {
        let mut config = QaConfig::default();
        config.glossary = Some(
            terms
                .iter()
                .map(|(source, target)| GlossaryTerm {
                    source: source.to_string(),
                    target: target.to_string(),
                    context: None,
                })
                .collect(),
        );
        config
    }

    #[test]
    fn missing_term_translation_is_flagged_with_suggestion() {
        let file = parse_bytes("f.csv", b"key,source,target\nk,Open file,Ouvrir document\n")
            .unwrap();
        let config = config_with_terms(&[("file", "fichier")]);
        let ctx = RuleContext::new(&file, &config);
        let draft = check_key_term_mismatch(&file.units[0], &ctx).unwrap();
        assert_eq!(draft.kind, IssueKind::KeyTermMismatch);
        assert_eq!(draft.suggestion.as_deref(), Some("fichier"));
    }

    #[test]
    fn respected_terms_pass() {
        let file = parse_bytes("f.csv", b"key,source,target\nk,Open file,Ouvrir le fichier\n")
            .unwrap();
        let config = config_with_terms(&[("file", "fichier")]);
        let ctx = RuleContext::new(&file, &config);
        assert!(check_key_term_mismatch(&file.units[0], &ctx).is_none());
    }

    #[test]
    fn matching_is_word_bounded_and_case_insensitive() {
        // "file" inside "profile" must not trigger the term.
        let file = parse_bytes("f.csv", b"key,source,target\nk,Update profile,Modifier le profil\n")
            .unwrap();
        let config = config_with_terms(&[("file", "fichier")]);
        let ctx = RuleContext::new(&file, &config);
        assert!(check_key_term_mismatch(&file.units[0], &ctx).is_none());

        let file = parse_bytes("f.csv", b"key,source,target\nk,Open FILE,Ouvrir le Fichier\n")
            .unwrap();
        let ctx = RuleContext::new(&file, &config);
        assert!(check_key_term_mismatch(&file.units[0], &ctx).is_none());
    }

    #[test]
    fn all_violations_are_collected_into_one_finding() {
        let file = parse_bytes(
            "f.csv",
            b"key,source,target\nk,Save the file to a folder,Conserver le document au dossier\n",
        )
        .unwrap();
        let config = config_with_terms(&[("file", "fichier"), ("folder", "dossier"), ("save", "enregistrer")]);
        let ctx = RuleContext::new(&file, &config);
        let draft = check_key_term_mismatch(&file.units[0], &ctx).unwrap();
        assert!(draft.message.contains("'file' -> 'fichier'"));
        assert!(draft.message.contains("'save' -> 'enregistrer'"));
        assert!(!draft.message.contains("'folder'"));
        assert_eq!(draft.suggestion.as_deref(), Some("fichier, enregistrer"));
    }
}
