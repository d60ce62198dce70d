//! Flat (non-hierarchical) tag matching against an evolving allow-list.
//! Unmatched candidates are appended to the list rather than dropped, so the
//! taxonomy grows with usage; the caller persists the updated list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::text::collapse_whitespace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matches: Vec<String>,
    pub updated_allowed: Vec<String>,
}

fn normalize_token(label: &str) -> String {
    collapse_whitespace(label).to_lowercase()
}

/// Matches candidates against the allow-list: exact normalized match first,
/// then bidirectional substring match (first allow-list hit wins). A
/// candidate matching nothing is appended to the updated list with its
/// original (trimmed) casing. Matches are deduplicated in encounter order
/// and capped at `max_k`. Inputs are never mutated.
#[must_use]
pub fn match_against_allowed(
    candidates: &[String],
    allowed: &[String],
    max_k: usize,
) -> MatchOutcome {
    let allowed_norm: Vec<(String, &String)> = allowed
        .iter()
        .map(|entry| (normalize_token(entry), entry))
        .collect();

    let mut matches = Vec::<String>::new();
    let mut updated_allowed = allowed.to_vec();
    let mut seen = HashSet::<String>::new();

    for candidate in candidates {
        let cleaned = candidate.trim();
        if cleaned.is_empty() {
            continue;
        }
        let candidate_norm = normalize_token(cleaned);

        let hit = allowed_norm
            .iter()
            .find(|(norm, _)| *norm == candidate_norm)
            .or_else(|| {
                allowed_norm.iter().find(|(norm, _)| {
                    candidate_norm.contains(norm.as_str()) || norm.contains(&candidate_norm)
                })
            })
            .map(|(_, raw)| (*raw).clone());

        match hit {
            Some(matched) => {
                if seen.insert(matched.clone()) {
                    matches.push(matched);
                }
            }
            None => {
                if !updated_allowed.iter().any(|entry| entry == cleaned) {
                    updated_allowed.push(cleaned.to_string());
                }
                if seen.insert(cleaned.to_string()) {
                    matches.push(cleaned.to_string());
                }
            }
        }

        if matches.len() >= max_k {
            break;
        }
    }

    MatchOutcome {
        matches,
        updated_allowed,
    }
}
