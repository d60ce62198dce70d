use serde::{Deserialize, Serialize};

use crate::config::{parse_enabled_default_true, read_raw_env};

use super::plausibility::HintRules;
use super::relationships::RelationshipIndex;

/// Candidate paths carry at most four specificity labels (L3 through L6).
pub const MAX_SPECIFIC_LEVELS: usize = 4;

pub const PLAUSIBILITY_ENV: &str = "TRELLIS_PLAUSIBILITY";

/// The two caller-supplied coarse labels shared by every path in one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelPrefix {
    pub l1: String,
    pub l2: String,
}

impl LevelPrefix {
    #[must_use]
    pub fn new(l1: impl Into<String>, l2: impl Into<String>) -> Self {
        Self {
            l1: l1.into(),
            l2: l2.into(),
        }
    }
}

/// One candidate from the upstream producer, normalized at the ingest
/// boundary. The aggregator only ever sees label sequences; `Invalid` stands
/// in for a non-sequence value so the rejection keeps its ordinal index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateInput {
    Sequence(Vec<String>),
    Invalid,
}

impl CandidateInput {
    #[must_use]
    pub fn labels(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Sequence(labels.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Not a sequence, or an empty sequence. The candidate is excluded.
    InvalidFormat,
    /// Longer than four labels; clipped, candidate kept.
    Truncated,
    /// Advisory heuristic flag on the L3->L4 transition; candidate kept.
    ImplausibleTransition,
}

impl IssueKind {
    /// Hard issues exclude the candidate from every output; advisory issues
    /// only annotate the report.
    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::InvalidFormat)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathIssue {
    pub path_index: usize,
    pub kind: IssueKind,
    pub message: String,
}

impl PathIssue {
    #[must_use]
    pub(crate) fn invalid_format(path_index: usize) -> Self {
        Self {
            path_index,
            kind: IssueKind::InvalidFormat,
            message: format!("path {path_index}: invalid format or empty"),
        }
    }

    #[must_use]
    pub(crate) fn truncated(path_index: usize, original_len: usize) -> Self {
        Self {
            path_index,
            kind: IssueKind::Truncated,
            message: format!(
                "path {path_index}: too long ({original_len} levels), truncating to {MAX_SPECIFIC_LEVELS}"
            ),
        }
    }

    #[must_use]
    pub(crate) fn implausible(path_index: usize, parent: &str, child: &str) -> Self {
        Self {
            path_index,
            kind: IssueKind::ImplausibleTransition,
            message: format!(
                "path {path_index}: questionable L3->L4 progression: '{parent}' -> '{child}'"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelTagCounts {
    pub l3: usize,
    pub l4: usize,
    pub l5: usize,
    pub l6: usize,
}

/// Distinct labels observed at each ordinal position, sorted lexicographically
/// (ordinal, case-sensitive) for stable rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelSets {
    pub l3: Vec<String>,
    pub l4: Vec<String>,
    pub l5: Vec<String>,
    pub l6: Vec<String>,
}

impl LevelSets {
    #[must_use]
    pub fn counts(&self) -> LevelTagCounts {
        LevelTagCounts {
            l3: self.l3.len(),
            l4: self.l4.len(),
            l5: self.l5.len(),
            l6: self.l6.len(),
        }
    }
}

/// Fail-soft batch summary. `valid` flips on ANY recorded issue, advisory
/// ones included; `structurally_valid` ignores advisory issues so callers can
/// gate on hard rejections alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub structurally_valid: bool,
    pub issues: Vec<PathIssue>,
    pub paths_processed: usize,
    pub tags_extracted: LevelTagCounts,
}

impl ValidationReport {
    #[must_use]
    pub(crate) fn compose(
        issues: Vec<PathIssue>,
        paths_processed: usize,
        tags_extracted: LevelTagCounts,
    ) -> Self {
        let structurally_valid = !issues.iter().any(|issue| issue.kind.is_hard());
        Self {
            valid: issues.is_empty(),
            structurally_valid,
            issues,
            paths_processed,
            tags_extracted,
        }
    }

    #[must_use]
    pub fn empty_batch() -> Self {
        Self::compose(Vec::new(), 0, LevelTagCounts::default())
    }
}

/// Everything one invocation returns. Freshly allocated per call; the engine
/// keeps no state between invocations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateOutcome {
    pub complete_paths: Vec<Vec<String>>,
    pub levels: LevelSets,
    pub relationships: RelationshipIndex,
    pub report: ValidationReport,
}

impl AggregateOutcome {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            complete_paths: Vec::new(),
            levels: LevelSets::default(),
            relationships: RelationshipIndex::default(),
            report: ValidationReport::empty_batch(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub check_plausibility: bool,
    pub hints: HintRules,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            check_plausibility: true,
            hints: HintRules::builtin(),
        }
    }
}

impl AggregateOptions {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            check_plausibility: parse_enabled_default_true(
                read_raw_env(PLAUSIBILITY_ENV).as_deref(),
            ),
            hints: HintRules::builtin(),
        }
    }

    #[must_use]
    pub fn without_plausibility() -> Self {
        Self {
            check_plausibility: false,
            hints: HintRules::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_compose_distinguishes_hard_and_advisory_issues() {
        let advisory_only = ValidationReport::compose(
            vec![PathIssue::truncated(0, 6)],
            1,
            LevelTagCounts::default(),
        );
        assert!(!advisory_only.valid);
        assert!(advisory_only.structurally_valid);

        let with_rejection = ValidationReport::compose(
            vec![PathIssue::invalid_format(2)],
            0,
            LevelTagCounts::default(),
        );
        assert!(!with_rejection.valid);
        assert!(!with_rejection.structurally_valid);
    }

    #[test]
    fn empty_batch_report_is_valid() {
        let report = ValidationReport::empty_batch();
        assert!(report.valid);
        assert!(report.structurally_valid);
        assert_eq!(report.paths_processed, 0);
    }

    #[test]
    fn issue_messages_carry_path_ordinal() {
        assert_eq!(
            PathIssue::invalid_format(3).message,
            "path 3: invalid format or empty"
        );
        assert_eq!(
            PathIssue::truncated(4, 6).message,
            "path 4: too long (6 levels), truncating to 4"
        );
    }
}
