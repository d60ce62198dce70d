use std::collections::BTreeSet;

use super::model::{
    AggregateOptions, AggregateOutcome, CandidateInput, LevelPrefix, LevelSets, PathIssue,
    ValidationReport,
};
use super::relationships::RelationshipIndex;
use super::validate::{CandidateCheck, check_candidate};

/// Merges one batch of candidate paths under a fixed two-level prefix into
/// complete paths, per-level tag sets, a relationship index, and a fail-soft
/// validation report.
///
/// Candidates are processed in input order; rejected candidates are excluded
/// from every output but recorded in the report. Duplicate complete paths are
/// preserved; dedup across paths is the caller's concern. The function is
/// pure: no shared state, no I/O, identical input yields identical output.
#[must_use]
pub fn aggregate(
    prefix: &LevelPrefix,
    candidates: &[CandidateInput],
    options: &AggregateOptions,
) -> AggregateOutcome {
    if candidates.is_empty() {
        return AggregateOutcome::empty();
    }

    let mut issues = Vec::<PathIssue>::new();
    let mut complete_paths = Vec::<Vec<String>>::with_capacity(candidates.len());
    let mut accepted = Vec::<Vec<String>>::with_capacity(candidates.len());
    let mut level_sets: [BTreeSet<String>; 4] = Default::default();

    for (path_index, candidate) in candidates.iter().enumerate() {
        let (labels, truncation_issue) = match check_candidate(path_index, candidate) {
            CandidateCheck::Rejected { issue } => {
                issues.push(issue);
                continue;
            }
            CandidateCheck::Accepted { labels, issue } => (labels, issue),
        };
        if let Some(issue) = truncation_issue {
            issues.push(issue);
        }

        let mut complete = Vec::with_capacity(2 + labels.len());
        complete.push(prefix.l1.clone());
        complete.push(prefix.l2.clone());
        complete.extend(labels.iter().cloned());

        for (position, label) in labels.iter().enumerate() {
            level_sets[position].insert(label.clone());
        }

        if options.check_plausibility
            && labels.len() >= 2
            && !options.hints.plausible(&labels[0], &labels[1])
        {
            issues.push(PathIssue::implausible(path_index, &labels[0], &labels[1]));
        }

        complete_paths.push(complete);
        accepted.push(labels);
    }

    let relationships = RelationshipIndex::build(&accepted);
    let [l3, l4, l5, l6] =
        level_sets.map(|level| level.into_iter().collect::<Vec<String>>());
    let levels = LevelSets { l3, l4, l5, l6 };

    let report = ValidationReport::compose(issues, accepted.len(), levels.counts());

    AggregateOutcome {
        complete_paths,
        levels,
        relationships,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::IssueKind;
    use super::super::relationships::LevelBoundary;
    use super::*;

    fn prefix() -> LevelPrefix {
        LevelPrefix::new("Tech", "Product Management")
    }

    fn ml_batch() -> Vec<CandidateInput> {
        vec![
            CandidateInput::labels([
                "Machine Learning",
                "Product Development",
                "Data Collection",
                "Feature Engineering",
            ]),
            CandidateInput::labels([
                "Machine Learning",
                "Model Deployment",
                "Model Training",
                "Model Evaluation",
            ]),
        ]
    }

    #[test]
    fn every_complete_path_starts_with_the_supplied_prefix() {
        let outcome = aggregate(&prefix(), &ml_batch(), &AggregateOptions::default());
        assert_eq!(outcome.complete_paths.len(), 2);
        for path in &outcome.complete_paths {
            assert_eq!(&path[..2], ["Tech", "Product Management"]);
            assert!(path.len() >= 3 && path.len() <= 6);
        }
    }

    #[test]
    fn level_sets_are_distinct_and_sorted() {
        let outcome = aggregate(&prefix(), &ml_batch(), &AggregateOptions::default());
        assert_eq!(outcome.levels.l3, ["Machine Learning"]);
        assert_eq!(
            outcome.levels.l4,
            ["Model Deployment", "Product Development"]
        );
        assert_eq!(outcome.levels.l5, ["Data Collection", "Model Training"]);
        assert_eq!(
            outcome.levels.l6,
            ["Feature Engineering", "Model Evaluation"]
        );
        assert_eq!(outcome.report.tags_extracted.l3, 1);
        assert_eq!(outcome.report.tags_extracted.l4, 2);
    }

    #[test]
    fn relationships_connect_adjacent_levels_of_accepted_paths() {
        let outcome = aggregate(&prefix(), &ml_batch(), &AggregateOptions::default());
        let children = outcome
            .relationships
            .children_of(LevelBoundary::L3ToL4, "Machine Learning")
            .expect("machine learning children");
        assert!(children.contains(&"Product Development".to_string()));
        assert!(children.contains(&"Model Deployment".to_string()));
        assert!(outcome.relationships.contains(
            LevelBoundary::L4ToL5,
            "Product Development",
            "Data Collection"
        ));
    }

    #[test]
    fn oversized_candidate_is_truncated_before_prefixing() {
        let candidates = vec![CandidateInput::labels(["A", "B", "C", "D", "E", "F"])];
        let outcome = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        assert_eq!(
            outcome.complete_paths,
            vec![vec![
                "Tech".to_string(),
                "Product Management".to_string(),
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ]]
        );
        assert!(!outcome.report.valid);
        assert!(outcome.report.structurally_valid);
        assert_eq!(outcome.report.issues.len(), 1);
        assert_eq!(outcome.report.issues[0].kind, IssueKind::Truncated);
        assert!(outcome.report.issues[0].message.contains("truncating to 4"));
    }

    #[test]
    fn empty_and_non_sequence_candidates_are_excluded_and_reported() {
        let candidates = vec![
            CandidateInput::labels(["Machine Learning", "Product Development"]),
            CandidateInput::Sequence(Vec::new()),
            CandidateInput::Invalid,
        ];
        let outcome = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        assert_eq!(outcome.complete_paths.len(), 1);
        assert_eq!(outcome.report.paths_processed, 1);
        assert!(!outcome.report.valid);
        assert!(!outcome.report.structurally_valid);
        let rejection_indices: Vec<usize> = outcome
            .report
            .issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::InvalidFormat)
            .map(|issue| issue.path_index)
            .collect();
        assert_eq!(rejection_indices, [1, 2]);
    }

    #[test]
    fn advisory_plausibility_issue_keeps_the_path_but_flips_valid() {
        let candidates = vec![CandidateInput::labels([
            "Machine Learning",
            "Cooking Recipes",
        ])];
        let outcome = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        assert_eq!(outcome.complete_paths.len(), 1);
        assert!(!outcome.report.valid);
        assert!(outcome.report.structurally_valid);
        assert_eq!(
            outcome.report.issues[0].kind,
            IssueKind::ImplausibleTransition
        );
        assert!(
            outcome.report.issues[0]
                .message
                .contains("'Machine Learning' -> 'Cooking Recipes'")
        );
    }

    #[test]
    fn plausibility_check_can_be_disabled() {
        let candidates = vec![CandidateInput::labels([
            "Machine Learning",
            "Cooking Recipes",
        ])];
        let outcome = aggregate(&prefix(), &candidates, &AggregateOptions::without_plausibility());
        assert!(outcome.report.valid);
        assert!(outcome.report.issues.is_empty());
    }

    #[test]
    fn empty_batch_returns_empty_valid_outcome() {
        let outcome = aggregate(&prefix(), &[], &AggregateOptions::default());
        assert!(outcome.complete_paths.is_empty());
        assert!(outcome.levels.l3.is_empty());
        assert!(outcome.relationships.is_empty());
        assert!(outcome.report.valid);
        assert_eq!(outcome.report.paths_processed, 0);
    }

    #[test]
    fn duplicate_candidates_are_preserved_not_merged() {
        let candidates = vec![
            CandidateInput::labels(["Machine Learning", "Model Deployment"]),
            CandidateInput::labels(["Machine Learning", "Model Deployment"]),
        ];
        let outcome = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        assert_eq!(outcome.complete_paths.len(), 2);
        assert_eq!(outcome.complete_paths[0], outcome.complete_paths[1]);
        assert_eq!(outcome.levels.l3, ["Machine Learning"]);
    }

    #[test]
    fn identical_input_yields_identical_output() {
        let candidates = ml_batch();
        let first = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        let second = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        assert_eq!(first, second);
        let first_json = serde_json::to_string(&first).expect("serialize outcome");
        let second_json = serde_json::to_string(&second).expect("serialize outcome");
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn single_label_candidates_contribute_no_relationships() {
        let candidates = vec![CandidateInput::labels(["Invalid"])];
        let outcome = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        assert_eq!(outcome.complete_paths.len(), 1);
        assert_eq!(outcome.complete_paths[0].len(), 3);
        assert!(outcome.relationships.is_empty());
        assert!(outcome.report.valid);
    }

    #[test]
    fn mixed_fixture_matches_expected_counts() {
        // Good, good, short, single, oversized, empty.
        let candidates = vec![
            CandidateInput::labels([
                "Machine Learning",
                "Product Development",
                "Data Collection",
                "Feature Engineering",
            ]),
            CandidateInput::labels([
                "Machine Learning",
                "Model Deployment",
                "Model Training",
                "Model Evaluation",
            ]),
            CandidateInput::labels(["Data Strategy", "Analytics Framework", "Metrics Design"]),
            CandidateInput::labels(["Invalid"]),
            CandidateInput::labels(["A", "B", "C", "D", "E", "F"]),
            CandidateInput::Sequence(Vec::new()),
        ];
        let outcome = aggregate(&prefix(), &candidates, &AggregateOptions::default());
        assert_eq!(outcome.report.paths_processed, 5);
        assert_eq!(outcome.complete_paths.len(), 5);
        // Truncation (index 4) and rejection (index 5).
        assert_eq!(outcome.report.issues.len(), 2);
        assert!(!outcome.report.valid);
        assert!(!outcome.report.structurally_valid);
        assert_eq!(outcome.levels.l3.len(), 4);
    }
}
