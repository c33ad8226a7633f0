//! End-to-end tests for the QA pipeline
//!
//! These tests drive the complete workflow over real fixture files:
//! 1. Format detection and decoding into a `TranslationFile`
//! 2. Glossary loading
//! 3. Analysis with the rule library
//! 4. Result shape, statistics and determinism guarantees

use locqa_core::{
    analyze, load_glossary, parse_bytes, parse_path, FileFormat, IssueKind, QaConfig, QaResult,
    Severity,
};

const FIXTURE_JSON: &str = include_str!("fixtures/sample.json");
const FIXTURE_XLIFF: &str = include_str!("fixtures/sample.xliff");
const FIXTURE_PO: &str = include_str!("fixtures/sample.po");
const FIXTURE_STRINGS: &str = include_str!("fixtures/sample.strings");
const FIXTURE_YAML: &str = include_str!("fixtures/sample.yaml");
const FIXTURE_PROPERTIES: &str = include_str!("fixtures/sample.properties");
const FIXTURE_XML: &str = include_str!("fixtures/sample.xml");
const FIXTURE_RESX: &str = include_str!("fixtures/sample.resx");
const FIXTURE_CSV: &str = include_str!("fixtures/sample.csv");
const FIXTURE_TSV: &str = include_str!("fixtures/sample.tsv");
const FIXTURE_TMX: &str = include_str!("fixtures/sample.tmx");
const FIXTURE_GLOSSARY: &str = include_str!("fixtures/glossary.csv");

fn kinds_for_key(result: &QaResult, key: &str) -> Vec<IssueKind> {
    result
        .issues
        .iter()
        .filter(|issue| issue.key == key)
        .map(|issue| issue.kind)
        .collect()
}

#[test]
fn every_format_decodes_to_expected_units() {
    let cases: [(&str, &str, FileFormat, usize); 11] = [
        ("sample.json", FIXTURE_JSON, FileFormat::Json, 2),
        ("sample.xliff", FIXTURE_XLIFF, FileFormat::Xliff, 5),
        ("sample.po", FIXTURE_PO, FileFormat::Po, 3),
        ("sample.strings", FIXTURE_STRINGS, FileFormat::Strings, 3),
        ("sample.yaml", FIXTURE_YAML, FileFormat::Yaml, 3),
        (
            "sample.properties",
            FIXTURE_PROPERTIES,
            FileFormat::Properties,
            3,
        ),
        ("sample.xml", FIXTURE_XML, FileFormat::Xml, 4),
        ("sample.resx", FIXTURE_RESX, FileFormat::Resx, 2),
        ("sample.csv", FIXTURE_CSV, FileFormat::Csv, 3),
        ("sample.tsv", FIXTURE_TSV, FileFormat::Tsv, 2),
        ("sample.tmx", FIXTURE_TMX, FileFormat::Tmx, 2),
    ];
    for (name, content, format, unit_count) in cases {
        let file = parse_bytes(name, content.as_bytes())
            .unwrap_or_else(|e| panic!("{} should parse: {}", name, e));
        assert_eq!(file.format, format, "{}", name);
        assert_eq!(file.units.len(), unit_count, "{}", name);
        // Indexes are dense and 1-based, ids and keys are populated.
        for (i, unit) in file.units.iter().enumerate() {
            assert_eq!(unit.index, i + 1, "{}", name);
            assert!(!unit.key.is_empty(), "{}", name);
            assert!(!unit.id.is_empty(), "{}", name);
        }
    }
}

#[test]
fn xliff_carries_languages_and_notes() {
    let file = parse_bytes("sample.xliff", FIXTURE_XLIFF.as_bytes()).unwrap();
    assert_eq!(file.source_lang, "en");
    assert_eq!(file.target_lang, "fr");
    let confirm = &file.units[1];
    assert_eq!(confirm.key, "confirm");
    assert_eq!(confirm.notes.as_deref(), Some("Shown before deleting"));
    // Flattened inline markup stays textual.
    assert_eq!(file.units[3].source, "Click <b>here</b>");
}

#[test]
fn formats_without_language_declarations_use_defaults() {
    let file = parse_bytes("sample.json", FIXTURE_JSON.as_bytes()).unwrap();
    assert_eq!(file.source_lang, "en");
    assert_eq!(file.target_lang, "");
    let file = parse_bytes("sample.tmx", FIXTURE_TMX.as_bytes()).unwrap();
    assert_eq!(file.source_lang, "en-US");
}

#[test]
fn tmx_assigns_english_variant_to_source() {
    let file = parse_bytes("sample.tmx", FIXTURE_TMX.as_bytes()).unwrap();
    assert_eq!(file.units[0].key, "greeting");
    assert_eq!(file.units[0].source, "Good morning");
    assert_eq!(file.units[0].target, "Bonjour");
    // English wins even when it is not the first variant.
    assert_eq!(file.units[1].key, "tu_2");
    assert_eq!(file.units[1].source, "Good night");
    assert_eq!(file.units[1].target, "Bonne nuit");
}

#[test]
fn untranslated_json_bundle_yields_only_missing_translations() {
    let file = parse_bytes("sample.json", FIXTURE_JSON.as_bytes()).unwrap();
    let keys: Vec<&str> = file.units.iter().map(|u| u.key.as_str()).collect();
    assert_eq!(keys, vec!["a.b", "a.c"]);

    let result = analyze(&file, &QaConfig::default());
    assert_eq!(result.issues.len(), 2);
    for issue in &result.issues {
        assert_eq!(issue.kind, IssueKind::MissingTranslation);
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.suggestion.as_deref(), Some(issue.source.as_str()));
    }
}

#[test]
fn xliff_corpus_triggers_the_expected_rules() {
    let file = parse_bytes("sample.xliff", FIXTURE_XLIFF.as_bytes()).unwrap();
    let result = analyze(&file, &QaConfig::default());

    // "Save file" -> "Sauver le fichier ": trailing whitespace (and a
    // length explosion), but no punctuation finding.
    let save = kinds_for_key(&result, "save_file");
    assert!(save.contains(&IssueKind::LeadingTrailingSpaces));
    assert!(save.contains(&IssueKind::TooLongTranslation));
    assert!(!save.contains(&IssueKind::InconsistentPunctuation));
    let trailing = result
        .issues
        .iter()
        .find(|i| i.key == "save_file" && i.kind == IssueKind::LeadingTrailingSpaces)
        .unwrap();
    assert_eq!(trailing.suggestion.as_deref(), Some("Sauver le fichier"));

    // "Are you sure?" -> "Êtes-vous sûr": missing question mark.
    let punctuation = result
        .issues
        .iter()
        .find(|i| i.key == "confirm" && i.kind == IssueKind::InconsistentPunctuation)
        .unwrap();
    assert_eq!(punctuation.suggestion.as_deref(), Some("Êtes-vous sûr?"));

    // Dropped %d placeholder.
    let placeholders = result
        .issues
        .iter()
        .find(|i| i.key == "messages" && i.kind == IssueKind::InconsistentPlaceholders)
        .unwrap();
    assert!(placeholders.message.contains("source has 2"));
    assert!(placeholders.message.contains("target has 1"));

    // Unclosed <b> (and with it an angle-bracket count mismatch).
    let click = kinds_for_key(&result, "click_here");
    assert!(click.contains(&IssueKind::InvalidHtmlTags));
    assert!(click.contains(&IssueKind::InconsistentBrackets));

    // Untranslated unit only gets the missing-translation finding.
    assert_eq!(
        kinds_for_key(&result, "pending"),
        vec![IssueKind::MissingTranslation]
    );
}

#[test]
fn duplicate_sources_with_diverging_targets_are_cross_flagged() {
    let file = parse_bytes("sample.csv", FIXTURE_CSV.as_bytes()).unwrap();
    let result = analyze(&file, &QaConfig::default());

    assert_eq!(
        kinds_for_key(&result, "ok.accept"),
        vec![IssueKind::TargetSameAsSource, IssueKind::InconsistentTarget]
    );
    assert_eq!(
        kinds_for_key(&result, "ok.confirm"),
        vec![IssueKind::InconsistentTarget]
    );
    assert!(kinds_for_key(&result, "quote.greet").is_empty());
    assert_eq!(result.issues.len(), 3);
}

#[test]
fn glossary_terms_are_enforced_word_bounded() {
    let mut config = QaConfig::default();
    config.glossary = Some(load_glossary("glossary.csv", FIXTURE_GLOSSARY.as_bytes()).unwrap());

    let file = parse_bytes("sample.tsv", FIXTURE_TSV.as_bytes()).unwrap();
    let result = analyze(&file, &config);

    let term_issue = result
        .issues
        .iter()
        .find(|i| i.key == "open" && i.kind == IssueKind::KeyTermMismatch)
        .expect("'file' must be translated as 'fichier'");
    assert_eq!(term_issue.severity, Severity::Warning);
    assert_eq!(term_issue.suggestion.as_deref(), Some("fichier"));

    // "Save" contains no glossary term.
    assert!(!kinds_for_key(&result, "save").contains(&IssueKind::KeyTermMismatch));
}

#[test]
fn analysis_is_deterministic_and_statistics_close() {
    let file = parse_bytes("sample.xliff", FIXTURE_XLIFF.as_bytes()).unwrap();
    let config = QaConfig::default();
    let first = analyze(&file, &config);
    let second = analyze(&file, &config);

    let shape = |result: &QaResult| -> Vec<(usize, IssueKind, Severity, String)> {
        result
            .issues
            .iter()
            .map(|i| (i.index, i.kind, i.severity, i.message.clone()))
            .collect()
    };
    assert_eq!(shape(&first), shape(&second));

    let stats = &first.stats;
    assert_eq!(stats.total, first.issues.len());
    assert_eq!(stats.errors + stats.warnings + stats.info, stats.total);
    assert_eq!(stats.by_type.values().sum::<usize>(), stats.total);

    // Every issue points at a real unit with a matching index.
    for issue in &first.issues {
        let unit = &file.units[issue.index - 1];
        assert_eq!(unit.id, issue.unit_id);
        assert_eq!(unit.key, issue.key);
    }
}

#[test]
fn disabling_one_rule_subtracts_exactly_its_issues() {
    let file = parse_bytes("sample.xliff", FIXTURE_XLIFF.as_bytes()).unwrap();
    let full = analyze(&file, &QaConfig::default());

    let mut config = QaConfig::default();
    config
        .rules
        .insert("leading_trailing_spaces".to_string(), false);
    let reduced = analyze(&file, &config);

    let expected: Vec<_> = full
        .issues
        .iter()
        .filter(|i| i.kind != IssueKind::LeadingTrailingSpaces)
        .map(|i| (i.index, i.kind, i.message.clone()))
        .collect();
    let actual: Vec<_> = reduced
        .issues
        .iter()
        .map(|i| (i.index, i.kind, i.message.clone()))
        .collect();
    assert_eq!(actual, expected);
    assert!(full.issues.len() > reduced.issues.len());
}

#[test]
fn unit_count_is_a_pure_function_of_the_bytes() {
    let a = parse_bytes("x.json", FIXTURE_JSON.as_bytes()).unwrap();
    let b = parse_bytes("x.json", FIXTURE_JSON.as_bytes()).unwrap();
    assert_eq!(a.units.len(), b.units.len());
    // Identifiers are the only thing allowed to differ.
    assert_ne!(a.id, b.id);

    let a = parse_bytes("x.po", FIXTURE_PO.as_bytes()).unwrap();
    let b = parse_bytes("x.po", FIXTURE_PO.as_bytes()).unwrap();
    assert_eq!(a.units.len(), b.units.len());
}

#[test]
fn parse_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drop.properties");
    std::fs::write(&path, FIXTURE_PROPERTIES).unwrap();

    let file = parse_path(&path).unwrap();
    assert_eq!(file.name, "drop.properties");
    assert_eq!(file.format, FileFormat::Properties);
    assert_eq!(file.units.len(), 3);
    assert_eq!(file.size, FIXTURE_PROPERTIES.len());

    let missing = dir.path().join("absent.po");
    assert!(parse_path(&missing).is_err());
}

#[test]
fn result_serializes_with_stable_tags() {
    let file = parse_bytes("sample.json", FIXTURE_JSON.as_bytes()).unwrap();
    let result = analyze(&file, &QaConfig::default());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["fileName"], "sample.json");
    assert_eq!(json["unitCount"], 2);
    assert_eq!(json["issues"][0]["type"], "missing_translation");
    assert_eq!(json["issues"][0]["severity"], "error");
    assert_eq!(json["stats"]["byType"]["missing_translation"], 2);
}

#[test]
fn po_state_machine_round_trips_context_and_notes() {
    let file = parse_bytes("sample.po", FIXTURE_PO.as_bytes()).unwrap();
    assert_eq!(file.units[0].key, "Open");
    assert_eq!(file.units[0].notes.as_deref(), Some("Toolbar button"));
    assert_eq!(file.units[1].key, format!("verb{}Close", '\u{0004}'));
    assert_eq!(file.units[1].context.as_deref(), Some("verb"));
    // The header entry is not a unit; the untranslated tail entry is.
    assert_eq!(file.units[2].source, "Quit without saving?");
    assert_eq!(file.units[2].target, "");
}
