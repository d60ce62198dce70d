use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrellisError};

/// Nested branching document as produced by the upstream tagging prompt.
/// Field names match the wire format (`L3_tags`, `branching_paths`, ...).
/// This representation is accepted at the boundary only; `flatten` turns it
/// into the canonical flat candidate lists before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchingTagsV1 {
    #[serde(default, rename = "L3_tags")]
    pub l3_tags: Vec<String>,
    #[serde(default, rename = "branching_paths")]
    pub branching_paths: BTreeMap<String, LevelThreeBranch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelThreeBranch {
    #[serde(default, rename = "L4_tags")]
    pub l4_tags: Vec<String>,
    #[serde(default, rename = "L4_paths")]
    pub l4_paths: BTreeMap<String, LevelFourBranch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelFourBranch {
    #[serde(default, rename = "L5_tags")]
    pub l5_tags: Vec<String>,
    #[serde(default, rename = "L5_paths")]
    pub l5_paths: BTreeMap<String, LevelFiveBranch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelFiveBranch {
    #[serde(default, rename = "L6_tags")]
    pub l6_tags: Vec<String>,
}

pub fn parse_branching_v1(raw: &str) -> Result<BranchingTagsV1> {
    serde_json::from_str::<BranchingTagsV1>(raw)
        .map_err(|err| TrellisError::Parse(format!("branching document parse failed: {err}")))
}

impl BranchingTagsV1 {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.l3_tags.is_empty()
    }

    /// Depth-first walk into flat candidate label sequences, in declaration
    /// order of the tag lists at each level. A level whose branch is missing
    /// or whose child tag list is empty terminates the path there.
    #[must_use]
    pub fn flatten(&self) -> Vec<Vec<String>> {
        let mut candidates = Vec::new();

        for l3 in &self.l3_tags {
            let Some(l3_branch) = self.branching_paths.get(l3) else {
                candidates.push(vec![l3.clone()]);
                continue;
            };
            if l3_branch.l4_tags.is_empty() {
                candidates.push(vec![l3.clone()]);
                continue;
            }

            for l4 in &l3_branch.l4_tags {
                let Some(l4_branch) = l3_branch.l4_paths.get(l4) else {
                    candidates.push(vec![l3.clone(), l4.clone()]);
                    continue;
                };
                if l4_branch.l5_tags.is_empty() {
                    candidates.push(vec![l3.clone(), l4.clone()]);
                    continue;
                }

                for l5 in &l4_branch.l5_tags {
                    let Some(l5_branch) = l4_branch.l5_paths.get(l5) else {
                        candidates.push(vec![l3.clone(), l4.clone(), l5.clone()]);
                        continue;
                    };
                    if l5_branch.l6_tags.is_empty() {
                        candidates.push(vec![l3.clone(), l4.clone(), l5.clone()]);
                        continue;
                    }

                    for l6 in &l5_branch.l6_tags {
                        candidates.push(vec![l3.clone(), l4.clone(), l5.clone(), l6.clone()]);
                    }
                }
            }
        }

        candidates
    }
}
