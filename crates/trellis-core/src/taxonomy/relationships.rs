use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::model::MAX_SPECIFIC_LEVELS;

/// The three parent->child boundaries tracked by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelBoundary {
    L3ToL4,
    L4ToL5,
    L5ToL6,
}

impl LevelBoundary {
    pub const ALL: [Self; 3] = [Self::L3ToL4, Self::L4ToL5, Self::L5ToL6];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L3ToL4 => "L3_to_L4",
            Self::L4ToL5 => "L4_to_L5",
            Self::L5ToL6 => "L5_to_L6",
        }
    }
}

/// Parent label -> sorted distinct child labels, per boundary. Paths, not
/// labels, are the unit of truth: a label may appear under multiple parents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipIndex {
    #[serde(rename = "L3_to_L4")]
    pub l3_to_l4: BTreeMap<String, Vec<String>>,
    #[serde(rename = "L4_to_L5")]
    pub l4_to_l5: BTreeMap<String, Vec<String>>,
    #[serde(rename = "L5_to_L6")]
    pub l5_to_l6: BTreeMap<String, Vec<String>>,
}

impl RelationshipIndex {
    /// One pass over the accepted (post-prefix, post-truncation) candidate
    /// portions: each adjacent pair lands in its boundary map with set
    /// semantics, then children are emitted sorted.
    #[must_use]
    pub fn build(candidates: &[Vec<String>]) -> Self {
        let mut boundaries: [BTreeMap<String, BTreeSet<String>>; 3] = Default::default();

        for labels in candidates {
            let span = labels.len().min(MAX_SPECIFIC_LEVELS);
            for boundary_idx in 0..3 {
                if span >= boundary_idx + 2 {
                    boundaries[boundary_idx]
                        .entry(labels[boundary_idx].clone())
                        .or_default()
                        .insert(labels[boundary_idx + 1].clone());
                }
            }
        }

        let [l3_to_l4, l4_to_l5, l5_to_l6] = boundaries.map(|boundary| {
            boundary
                .into_iter()
                .map(|(parent, children)| (parent, children.into_iter().collect::<Vec<_>>()))
                .collect::<BTreeMap<_, _>>()
        });

        Self {
            l3_to_l4,
            l4_to_l5,
            l5_to_l6,
        }
    }

    #[must_use]
    pub fn boundary(&self, boundary: LevelBoundary) -> &BTreeMap<String, Vec<String>> {
        match boundary {
            LevelBoundary::L3ToL4 => &self.l3_to_l4,
            LevelBoundary::L4ToL5 => &self.l4_to_l5,
            LevelBoundary::L5ToL6 => &self.l5_to_l6,
        }
    }

    #[must_use]
    pub fn children_of(&self, boundary: LevelBoundary, parent: &str) -> Option<&[String]> {
        self.boundary(boundary)
            .get(parent)
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, boundary: LevelBoundary, parent: &str, child: &str) -> bool {
        self.children_of(boundary, parent)
            .is_some_and(|children| children.iter().any(|known| known == child))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.l3_to_l4.is_empty() && self.l4_to_l5.is_empty() && self.l5_to_l6.is_empty()
    }

    /// Whether a new candidate path is consistent with the relationships
    /// already observed: every adjacent pair must be present at its boundary.
    /// A single-label candidate has no boundary to check and is admitted.
    #[must_use]
    pub fn admits(&self, candidate: &[String]) -> bool {
        let span = candidate.len().min(MAX_SPECIFIC_LEVELS);
        LevelBoundary::ALL
            .iter()
            .take(span.saturating_sub(1))
            .enumerate()
            .all(|(idx, boundary)| {
                self.contains(*boundary, &candidate[idx], &candidate[idx + 1])
            })
    }
}
