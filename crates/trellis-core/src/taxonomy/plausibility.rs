use serde::{Deserialize, Serialize};

use crate::error::{Result, TrellisError};

/// One advisory rule: when the lowercased parent label contains
/// `parent_contains`, the lowercased child label must contain at least one of
/// `child_any`. First matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HintRule {
    pub parent_contains: String,
    pub child_any: Vec<String>,
}

/// Keyword-overlap hint table for adjacent-level transitions. Advisory only:
/// a parent matching no rule is plausible by default, and a failed check
/// never excludes a path from output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HintRules {
    #[serde(default)]
    pub rules: Vec<HintRule>,
}

impl Default for HintRules {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HintRules {
    #[must_use]
    pub fn builtin() -> Self {
        let rule = |parent: &str, children: &[&str]| HintRule {
            parent_contains: parent.to_string(),
            child_any: children.iter().map(ToString::to_string).collect(),
        };
        Self {
            rules: vec![
                rule(
                    "machine learning",
                    &[
                        "model",
                        "product",
                        "deployment",
                        "training",
                        "development",
                        "research",
                    ],
                ),
                rule(
                    "data",
                    &[
                        "analytics",
                        "collection",
                        "processing",
                        "governance",
                        "pipeline",
                        "strategy",
                    ],
                ),
            ],
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str::<Self>(raw)
            .map_err(|err| TrellisError::Parse(format!("hint rules document parse failed: {err}")))
    }

    #[must_use]
    pub fn plausible(&self, parent: &str, child: &str) -> bool {
        let parent_lower = parent.to_lowercase();
        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| parent_lower.contains(&rule.parent_contains.to_lowercase()))
        else {
            return true;
        };
        let child_lower = child.to_lowercase();
        rule.child_any
            .iter()
            .any(|keyword| child_lower.contains(&keyword.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_accept_known_machine_learning_children() {
        let rules = HintRules::builtin();
        assert!(rules.plausible("Machine Learning", "Product Development"));
        assert!(rules.plausible("Machine Learning", "Model Deployment"));
        assert!(!rules.plausible("Machine Learning", "Cooking Recipes"));
    }

    #[test]
    fn builtin_rules_accept_known_data_children() {
        let rules = HintRules::builtin();
        assert!(rules.plausible("Data Strategy", "Analytics Framework"));
        assert!(rules.plausible("Data Strategy", "Data Governance"));
        assert!(!rules.plausible("Data Strategy", "Gardening"));
    }

    #[test]
    fn unmatched_parent_is_plausible_by_default() {
        let rules = HintRules::builtin();
        assert!(rules.plausible("Quantum Computing", "Anything At All"));
    }

    #[test]
    fn matching_is_case_insensitive_on_both_sides() {
        let rules = HintRules::builtin();
        assert!(rules.plausible("MACHINE LEARNING", "MODEL TRAINING"));
    }

    #[test]
    fn first_matching_rule_wins() {
        // "Data Machine Learning" matches the machine-learning rule before
        // the data rule, so only machine-learning children pass.
        let rules = HintRules::builtin();
        assert!(rules.plausible("Data Machine Learning", "Model Serving"));
        assert!(!rules.plausible("Data Machine Learning", "Analytics Framework"));
    }

    #[test]
    fn from_toml_str_parses_a_rules_document() {
        let raw = r#"
            [[rules]]
            parent_contains = "security"
            child_any = ["audit", "threat", "hardening"]
        "#;
        let rules = HintRules::from_toml_str(raw).expect("parse rules");
        assert!(rules.plausible("Security Engineering", "Threat Modeling"));
        assert!(!rules.plausible("Security Engineering", "Cooking"));
    }

    #[test]
    fn from_toml_str_rejects_unknown_fields() {
        let raw = r#"
            unknown = true
            [[rules]]
            parent_contains = "x"
            child_any = []
        "#;
        let err = HintRules::from_toml_str(raw).expect_err("unknown fields must fail");
        assert!(matches!(err, TrellisError::Parse(_)));
    }

    #[test]
    fn empty_rules_document_treats_everything_as_plausible() {
        let rules = HintRules::from_toml_str("").expect("parse empty document");
        assert!(rules.rules.is_empty());
        assert!(rules.plausible("Machine Learning", "Cooking Recipes"));
    }
}
