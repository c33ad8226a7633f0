use crate::config::QaConfig;
use crate::model::{new_id, QaIssue, QaResult, QaStats, TranslationFile, TranslationUnit};
use crate::rules::{self, IssueDraft, RuleContext, RULE_ORDER};

pub fn analyze(file: &TranslationFile, config: &QaConfig) -> QaResult {
    let ctx = RuleContext::new(file, config);
    let mut issues = Vec::new();

    for unit in &file.units {
        for kind in RULE_ORDER {
            if !config.rule_enabled(kind) {
                continue;
            }
            if let Some(draft) = rules::run(kind, unit, &ctx) {
                issues.push(stamp(draft, unit));
            }
        }
    }

    let stats = QaStats::from_issues(&issues);
    log::debug!(
        "analyzed {}: {} units, {} issues ({} errors, {} warnings, {} info)",
        file.name,
        file.units.len(),
        stats.total,
        stats.errors,
        stats.warnings,
        stats.info
    );

    QaResult {
        file_id: file.id.clone(),
        file_name: file.name.clone(),
        unit_count: file.units.len(),
        issues,
        stats,
    }
}

fn stamp(draft: IssueDraft, unit: &TranslationUnit) -> QaIssue {
    QaIssue {
        id: new_id(),
        unit_id: unit.id.clone(),
        kind: draft.kind,
        severity: draft.kind.severity(),
        message: draft.message,
        source: unit.source.clone(),
        target: unit.target.clone(),
        key: unit.key.clone(),
        suggestion: draft.suggestion,
        index: unit.index,
    }
}
