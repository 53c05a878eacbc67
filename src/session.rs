//! Quiz state machine.
//!
//! [`QuizState`] is plain data; every transition goes through
//! [`QuizState::apply`], which validates an [`Action`] before touching
//! anything, so a rejected action always leaves the state as it was.
//! [`reduce`] is the pure `(state, action) -> state` form.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AnsweredRecord, AttemptLog, AttemptSummary, Question, QuestionBank, QuizId, Theme,
};
use crate::score::Score;

/// Where the user is in the select → answer → results cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Unselected,
    InProgress {
        quiz: QuizId,
        question_index: usize,
        /// Picked option indices in pick order.
        selection: Vec<usize>,
    },
    Finished {
        quiz: QuizId,
    },
}

/// A user intent dispatched into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectQuiz(QuizId),
    SelectOption(usize),
    ConfirmNext { at: DateTime<Local> },
    Restart,
    ToggleTheme,
}

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no quiz is in progress")]
    NoActiveQuiz,

    #[error("{0} is already active; return to the selection screen first")]
    QuizAlreadyActive(QuizId),

    #[error("the current question is already answered")]
    AlreadyAnswered,

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("option {index} does not exist ({options} options)")]
    OptionOutOfRange { index: usize, options: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    phase: Phase,
    history: Vec<AnsweredRecord>,
    attempts: AttemptLog,
    theme: Theme,
}

impl QuizState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn history(&self) -> &[AnsweredRecord] {
        &self.history
    }

    pub fn attempts(&self) -> &AttemptLog {
        &self.attempts
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The quiz being answered or just finished.
    pub fn active_quiz(&self) -> Option<QuizId> {
        match &self.phase {
            Phase::Unselected => None,
            Phase::InProgress { quiz, .. } | Phase::Finished { quiz } => Some(*quiz),
        }
    }

    pub fn question_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::InProgress { question_index, .. } => Some(*question_index),
            _ => None,
        }
    }

    pub fn selection(&self) -> &[usize] {
        match &self.phase {
            Phase::InProgress { selection, .. } => selection,
            _ => &[],
        }
    }

    pub fn current_question<'b>(&self, bank: &'b QuestionBank) -> Option<&'b Question> {
        match &self.phase {
            Phase::InProgress {
                quiz,
                question_index,
                ..
            } => bank.question(*quiz, *question_index),
            _ => None,
        }
    }

    /// True once the selection holds as many options as the question has
    /// correct answers. This is a size check, not a correctness check.
    pub fn is_answered(&self, bank: &QuestionBank) -> bool {
        self.current_question(bank)
            .is_some_and(|question| self.selection().len() == question.answers.len())
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    pub fn score(&self) -> Score {
        Score::from_history(&self.history)
    }

    pub fn apply(&mut self, bank: &QuestionBank, action: Action) -> Result<(), ActionError> {
        match action {
            Action::SelectQuiz(quiz) => self.select_quiz(bank, quiz),
            Action::SelectOption(index) => self.select_option(bank, index),
            Action::ConfirmNext { at } => self.confirm_next(bank, at),
            Action::Restart => {
                self.restart();
                Ok(())
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                Ok(())
            }
        }
    }

    fn select_quiz(&mut self, bank: &QuestionBank, quiz: QuizId) -> Result<(), ActionError> {
        if let Some(active) = self.active_quiz() {
            return Err(ActionError::QuizAlreadyActive(active));
        }

        self.history.clear();
        self.phase = if bank.len(quiz) == 0 {
            Phase::Finished { quiz }
        } else {
            Phase::InProgress {
                quiz,
                question_index: 0,
                selection: Vec::new(),
            }
        };
        Ok(())
    }

    fn select_option(&mut self, bank: &QuestionBank, index: usize) -> Result<(), ActionError> {
        let question = self
            .current_question(bank)
            .ok_or(ActionError::NoActiveQuiz)?;
        if self.is_answered(bank) {
            return Err(ActionError::AlreadyAnswered);
        }
        if index >= question.options.len() {
            return Err(ActionError::OptionOutOfRange {
                index,
                options: question.options.len(),
            });
        }

        let multi_select = question.is_multi_select();
        if let Phase::InProgress { selection, .. } = &mut self.phase {
            if !multi_select {
                *selection = vec![index];
            } else if let Some(position) = selection.iter().position(|&i| i == index) {
                selection.remove(position);
            } else {
                selection.push(index);
            }
        }
        Ok(())
    }

    fn confirm_next(
        &mut self,
        bank: &QuestionBank,
        at: DateTime<Local>,
    ) -> Result<(), ActionError> {
        let question = self
            .current_question(bank)
            .ok_or(ActionError::NoActiveQuiz)?;
        if !self.is_answered(bank) {
            return Err(ActionError::NotAnswered);
        }

        let Phase::InProgress {
            quiz,
            question_index,
            selection,
        } = std::mem::take(&mut self.phase)
        else {
            return Err(ActionError::NoActiveQuiz);
        };

        self.history.push(AnsweredRecord {
            question_index,
            question_text: question.text.clone(),
            selected: selection,
            correct: question.answers.clone(),
        });

        if question_index + 1 < bank.len(quiz) {
            self.phase = Phase::InProgress {
                quiz,
                question_index: question_index + 1,
                selection: Vec::new(),
            };
        } else {
            let score = self.score();
            self.attempts.push(AttemptSummary {
                timestamp: at,
                quiz,
                total: score.total,
                correct: score.correct,
            });
            self.phase = Phase::Finished { quiz };
        }
        Ok(())
    }

    fn restart(&mut self) {
        self.phase = Phase::Unselected;
        self.history.clear();
    }
}

/// Applies `action` to a copy of `state`.
pub fn reduce(
    state: &QuizState,
    bank: &QuestionBank,
    action: Action,
) -> Result<QuizState, ActionError> {
    let mut next = state.clone();
    next.apply(bank, action)?;
    Ok(next)
}
