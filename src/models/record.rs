use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::QuizId;

/// Maximum number of attempt summaries kept per session.
pub const MAX_ATTEMPTS: usize = 5;

/// Snapshot of one answered question, taken when the user moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredRecord {
    pub question_index: usize,
    pub question_text: String,
    /// Picked option indices, in the order they were picked.
    pub selected: Vec<usize>,
    pub correct: Vec<usize>,
}

impl AnsweredRecord {
    /// Exact set equality: same size and every pick is a correct option.
    pub fn is_correct(&self) -> bool {
        self.selected.len() == self.correct.len()
            && self.selected.iter().all(|index| self.correct.contains(index))
    }
}

/// Outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub timestamp: DateTime<Local>,
    pub quiz: QuizId,
    pub total: usize,
    pub correct: usize,
}

/// Most-recent-first list of attempt summaries, capped at [`MAX_ATTEMPTS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptLog {
    entries: Vec<AttemptSummary>,
}

impl AttemptLog {
    pub fn push(&mut self, summary: AttemptSummary) {
        self.entries.insert(0, summary);
        self.entries.truncate(MAX_ATTEMPTS);
    }

    pub fn entries(&self) -> &[AttemptSummary] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&AttemptSummary> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
