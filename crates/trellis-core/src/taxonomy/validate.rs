use super::model::{CandidateInput, MAX_SPECIFIC_LEVELS, PathIssue};

/// Outcome of the per-candidate shape check. Truncation is non-fatal; only a
/// non-sequence or empty candidate is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum CandidateCheck {
    Rejected {
        issue: PathIssue,
    },
    Accepted {
        labels: Vec<String>,
        issue: Option<PathIssue>,
    },
}

pub(super) fn check_candidate(path_index: usize, candidate: &CandidateInput) -> CandidateCheck {
    let CandidateInput::Sequence(labels) = candidate else {
        return CandidateCheck::Rejected {
            issue: PathIssue::invalid_format(path_index),
        };
    };
    if labels.is_empty() {
        return CandidateCheck::Rejected {
            issue: PathIssue::invalid_format(path_index),
        };
    }

    if labels.len() > MAX_SPECIFIC_LEVELS {
        return CandidateCheck::Accepted {
            labels: labels[..MAX_SPECIFIC_LEVELS].to_vec(),
            issue: Some(PathIssue::truncated(path_index, labels.len())),
        };
    }

    CandidateCheck::Accepted {
        labels: labels.clone(),
        issue: None,
    }
}
