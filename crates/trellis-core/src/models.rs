//! Interface-boundary records handed to the downstream persistence
//! collaborator. Values only; no storage code lives in this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::review::{CardDraft, card_id};
use crate::text::clip_chars;

pub const HEADLINE_MAX_CHARS: usize = 300;
pub const TLDR_MAX_BULLETS: usize = 6;

/// Fields that arrive from the upstream producer sometimes as one string,
/// sometimes as a list. Normalized once at this boundary; engine code only
/// ever sees lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

/// One analyzed document, ready for tabular persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub fetched_at_utc: DateTime<Utc>,
    pub url: String,
    pub url_canonical: String,
    pub domain: String,
    pub headline: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub tldr: Vec<String>,
    pub content_text: String,
    pub source_title: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<String>,
}

/// One review card row keyed by `card_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub card_id: String,
    pub url_canonical: String,
    pub question: String,
    pub answer: String,
    pub learned: bool,
    pub created_at_utc: DateTime<Utc>,
}

impl CardRecord {
    /// New unlearned row for a sanitized draft, keyed by the stable card id.
    #[must_use]
    pub fn from_draft(
        url_canonical: &str,
        draft: &CardDraft,
        created_at_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            card_id: card_id(url_canonical, &draft.question),
            url_canonical: url_canonical.to_string(),
            question: draft.question.clone(),
            answer: draft.answer.clone(),
            learned: false,
            created_at_utc,
        }
    }
}

/// Picks the first non-blank title and clips it for display columns.
#[must_use]
pub fn normalize_headline(llm_title: Option<&str>, page_title: Option<&str>) -> String {
    let raw = [llm_title, page_title]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|title| !title.is_empty())
        .unwrap_or("");
    clip_chars(raw, HEADLINE_MAX_CHARS)
}

/// Normalizes the tldr field into display bullets. A list passes through
/// unchanged; a single string splits on newline/bullet/dash separators into
/// at most six bullets, falling back to the whole string when no separator
/// yields anything.
#[must_use]
pub fn tldr_bullets(tldr: &TextOrList) -> Vec<String> {
    match tldr {
        TextOrList::List(bullets) => bullets.clone(),
        TextOrList::Text(text) => {
            let parts: Vec<String> = text
                .split(['\n', '\u{2022}', '-'])
                .map(|part| part.trim_matches([' ', '-', '\u{2022}', '\t']).to_string())
                .filter(|part| !part.is_empty())
                .take(TLDR_MAX_BULLETS)
                .collect();
            if parts.is_empty() {
                vec![text.clone()]
            } else {
                parts
            }
        }
    }
}
