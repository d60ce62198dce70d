mod aggregate;
mod branching;
mod model;
mod plausibility;
mod relationships;
mod validate;

pub use aggregate::aggregate;
pub use branching::{
    BranchingTagsV1, LevelFiveBranch, LevelFourBranch, LevelThreeBranch, parse_branching_v1,
};
pub use model::{
    AggregateOptions, AggregateOutcome, CandidateInput, IssueKind, LevelPrefix, LevelSets,
    LevelTagCounts, MAX_SPECIFIC_LEVELS, PLAUSIBILITY_ENV, PathIssue, ValidationReport,
};
pub use plausibility::{HintRule, HintRules};
pub use relationships::{LevelBoundary, RelationshipIndex};
