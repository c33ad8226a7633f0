/// Analysis configuration
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{GlossaryTerm, IssueKind};

pub const DEFAULT_MAX_LENGTH_RATIO: f32 = 1.5;
pub const MIN_LENGTH_RATIO: f32 = 1.0;
pub const MAX_LENGTH_RATIO: f32 = 3.0;

/// Rule flags, length ratio, glossary and the advisory toggles consumed by
/// the settings surface. Defaults enable every rule except the two
/// declared-but-unimplemented ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QaConfig {
    pub rules: BTreeMap<String, bool>,
    pub max_length_ratio: f32,
    /// Reserved.
    pub ignore_patterns: Vec<String>,
    /// Reserved.
    pub custom_placeholders: Vec<String>,
    pub check_html_tags: bool,
    pub check_xml_tags: bool,
    pub check_placeholders: bool,
    pub case_sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glossary: Option<Vec<GlossaryTerm>>,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            rules: default_rule_flags(),
            max_length_ratio: DEFAULT_MAX_LENGTH_RATIO,
            ignore_patterns: Vec::new(),
            custom_placeholders: Vec::new(),
            check_html_tags: true,
            check_xml_tags: true,
            check_placeholders: true,
            case_sensitive: false,
            glossary: None,
        }
    }
}

fn default_rule_flags() -> BTreeMap<String, bool> {
    IssueKind::ALL
        .into_iter()
        .map(|kind| (kind.as_str().to_string(), default_flag(kind)))
        .collect()
}

fn default_flag(kind: IssueKind) -> bool {
    !matches!(
        kind,
        IssueKind::InconsistentCase | IssueKind::PotentiallyIncorrectTranslation
    )
}

impl QaConfig {
    /// Merged view of the rule flags: enabled unless explicitly disabled,
    /// with the unimplemented kinds off by default.
    pub fn rule_enabled(&self, kind: IssueKind) -> bool {
        self.rules
            .get(kind.as_str())
            .copied()
            .unwrap_or_else(|| default_flag(kind))
    }

    /// Reject out-of-range ratios and unknown rule tags. Absent fields fall
    /// back to defaults; present-but-invalid ones never do.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_length_ratio.is_finite()
            || self.max_length_ratio < MIN_LENGTH_RATIO
            || self.max_length_ratio > MAX_LENGTH_RATIO
        {
            return Err(ConfigError::LengthRatioOutOfRange(self.max_length_ratio));
        }
        for tag in self.rules.keys() {
            if IssueKind::from_tag(tag).is_none() {
                return Err(ConfigError::UnknownRule(tag.clone()));
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from JSON (for UI integration).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON (for UI integration).
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
