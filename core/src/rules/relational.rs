/// Whole-corpus relational checks: duplicates and cross-unit
/// inconsistencies, answered from the indexes built once per analysis.
use super::{is_translated, IssueDraft, RuleContext};
use crate::model::{IssueKind, TranslationUnit};

pub fn check_duplicate_translation(
    unit: &TranslationUnit,
    ctx: &RuleContext<'_>,
) -> Option<IssueDraft> {
    if !is_translated(unit) || unit.source.is_empty() {
        return None;
    }
    let positions = ctx.source_index.get(unit.source.as_str())?;
    let twin = other_units(unit.index - 1, positions, ctx.units)
        .find(|other| other.target == unit.target)?;
    Some(IssueDraft::new(
        IssueKind::DuplicateTranslation,
        format!(
            "Same source and translation as unit '{}'",
            twin.key
        ),
    ))
}

pub fn check_inconsistent_source(
    unit: &TranslationUnit,
    ctx: &RuleContext<'_>,
) -> Option<IssueDraft> {
    if !is_translated(unit) || unit.source.is_empty() {
        return None;
    }
    let positions = ctx.target_index.get(unit.target.as_str())?;
    let other = other_units(unit.index - 1, positions, ctx.units)
        .find(|other| other.source != unit.source)?;
    Some(IssueDraft::new(
        IssueKind::InconsistentSource,
        format!(
            "Unit '{}' has the same translation for a different source text",
            other.key
        ),
    ))
}

pub fn check_inconsistent_target(
    unit: &TranslationUnit,
    ctx: &RuleContext<'_>,
) -> Option<IssueDraft> {
    if !is_translated(unit) || unit.source.is_empty() {
        return None;
    }
    let positions = ctx.source_index.get(unit.source.as_str())?;
    let other = other_units(unit.index - 1, positions, ctx.units)
        .find(|other| other.target != unit.target)?;
    Some(IssueDraft::new(
        IssueKind::InconsistentTarget,
        format!(
            "Unit '{}' translates the same source differently",
            other.key
        ),
    ))
}

/// The indexed units at `positions`, excluding the one under analysis.
fn other_units<'a>(
    own: usize,
    positions: &'a [usize],
    units: &'a [TranslationUnit],
) -> impl Iterator<Item = &'a TranslationUnit> + 'a {
    positions
        .iter()
        .filter(move |pos| **pos != own)
        .map(move |pos| &units[*pos])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QaConfig;
    use crate::formats::parse_bytes;

    fn file_from_csv(rows: &str) -> crate::model::TranslationFile {
        parse_bytes("corpus.csv", format!("key,source,target\n{}", rows).as_bytes()).unwrap()
    }

    #[test]
    fn duplicate_pairs_flag_each_other() {
        let file = file_from_csv("a,OK,D'accord\nb,OK,D'accord\nc,No,Non\n");
        let config = QaConfig::default();
        let ctx = RuleContext::new(&file, &config);
        let draft = check_duplicate_translation(&file.units[0], &ctx).unwrap();
        assert!(draft.message.contains('b'));
        assert!(check_duplicate_translation(&file.units[1], &ctx).is_some());
        assert!(check_duplicate_translation(&file.units[2], &ctx).is_none());
    }

    #[test]
    fn same_target_different_source_is_inconsistent_source() {
        let file = file_from_csv("a,Save,Enregistrer\nb,Store,Enregistrer\n");
        let config = QaConfig::default();
        let ctx = RuleContext::new(&file, &config);
        assert!(check_inconsistent_source(&file.units[0], &ctx).is_some());
        assert!(check_inconsistent_source(&file.units[1], &ctx).is_some());
        // Not a duplicate: the sources differ.
        assert!(check_duplicate_translation(&file.units[0], &ctx).is_none());
    }

    #[test]
    fn same_source_different_target_is_inconsistent_target() {
        let file = file_from_csv("a,OK,OK\nb,OK,Oui\n");
        let config = QaConfig::default();
        let ctx = RuleContext::new(&file, &config);
        assert!(check_inconsistent_target(&file.units[0], &ctx).is_some());
        assert!(check_inconsistent_target(&file.units[1], &ctx).is_some());
        assert!(check_inconsistent_source(&file.units[0], &ctx).is_none());
    }

    #[test]
    fn untranslated_units_do_not_participate() {
        let file = file_from_csv("a,OK,Oui\nb,OK\n");
        let config = QaConfig::default();
        let ctx = RuleContext::new(&file, &config);
        assert!(check_inconsistent_target(&file.units[0], &ctx).is_none());
        assert!(check_inconsistent_target(&file.units[1], &ctx).is_none());
        assert!(check_duplicate_translation(&file.units[1], &ctx).is_none());
    }
}
