//! Round-based review scheduler: two queues, deferred cards reappear only in
//! the next round. Pure in-memory state machine; persistence of `learned`
//! flags is the caller's job (the completed card is handed back for that).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::text::collapse_whitespace;

pub const QUESTION_MAX_CHARS: usize = 200;
pub const ANSWER_MAX_CHARS: usize = 500;
pub const MAX_CARDS_PER_DOCUMENT: usize = 6;

/// Raw question/answer pair from the upstream card generator, pre-sanitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCard {
    pub card_id: String,
    pub question: String,
    pub answer: String,
}

#[must_use]
pub fn normalize_question(question: &str) -> String {
    collapse_whitespace(question)
}

/// Stable 16-hex-char card id derived from the canonical document URL and
/// the normalized question.
#[must_use]
pub fn card_id(url_canonical: &str, question: &str) -> String {
    let base = format!("{url_canonical}\n{}", normalize_question(question));
    blake3::hash(base.as_bytes()).to_hex()[..16].to_string()
}

/// Cleans generator output: blank pairs and oversized pairs are dropped,
/// questions dedup case-insensitively, at most six drafts survive.
#[must_use]
pub fn sanitize_card_drafts(drafts: &[CardDraft]) -> Vec<CardDraft> {
    let mut clean = Vec::<CardDraft>::new();
    let mut seen_questions = Vec::<String>::new();

    for draft in drafts {
        let question = normalize_question(&draft.question);
        let answer = draft.answer.trim().to_string();
        if question.is_empty() || answer.is_empty() {
            continue;
        }
        if question.chars().count() > QUESTION_MAX_CHARS
            || answer.chars().count() > ANSWER_MAX_CHARS
        {
            continue;
        }
        let question_key = question.to_lowercase();
        if seen_questions.contains(&question_key) {
            continue;
        }
        seen_questions.push(question_key);
        clean.push(CardDraft { question, answer });
        if clean.len() == MAX_CARDS_PER_DOCUMENT {
            break;
        }
    }

    clean
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub scope: String,
    pub round: usize,
    pub remaining_in_round: usize,
    pub deferred: usize,
    pub total_cards: usize,
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
    scope: String,
    current: VecDeque<ReviewCard>,
    deferred: VecDeque<ReviewCard>,
    round: usize,
    total_cards: usize,
}

impl ReviewSession {
    /// Card order is taken as given; a caller wanting a shuffled session
    /// shuffles before constructing it.
    #[must_use]
    pub fn new(scope: impl Into<String>, cards: Vec<ReviewCard>) -> Self {
        let total_cards = cards.len();
        Self {
            scope: scope.into(),
            current: cards.into(),
            deferred: VecDeque::new(),
            round: 1,
            total_cards,
        }
    }

    #[must_use]
    pub fn peek(&self) -> Option<&ReviewCard> {
        self.current.front()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current.is_empty() && self.deferred.is_empty()
    }

    /// "Review again": the head card moves to the next round. Returns false
    /// when the session is finished.
    pub fn defer(&mut self) -> bool {
        let Some(card) = self.current.pop_front() else {
            return false;
        };
        self.deferred.push_back(card);
        self.rollover_if_needed();
        true
    }

    /// "I know it": pops the head card and returns it so the caller can
    /// persist `learned = true`. A mismatched id aligns to the head card
    /// rather than failing the session.
    pub fn complete(&mut self, _requested_card_id: &str) -> Option<ReviewCard> {
        let card = self.current.pop_front()?;
        self.rollover_if_needed();
        Some(card)
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            scope: self.scope.clone(),
            round: self.round,
            remaining_in_round: self.current.len(),
            deferred: self.deferred.len(),
            total_cards: self.total_cards,
        }
    }

    fn rollover_if_needed(&mut self) {
        if self.current.is_empty() && !self.deferred.is_empty() {
            std::mem::swap(&mut self.current, &mut self.deferred);
            self.round += 1;
        }
    }
}
