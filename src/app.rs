use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::export::{self, ExportError};
use crate::models::{AppState, Question, QuestionBank, QuizId, Theme};
use crate::session::{Action, Phase, QuizState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback shown under the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Controller owning the question bank, the quiz state and the bits of UI
/// state (cursor, scroll, status line) that never affect scoring.
pub struct App {
    bank: QuestionBank,
    quiz: QuizState,
    export_dir: PathBuf,
    highlighted_option: usize,
    result_scroll: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(bank: QuestionBank, theme: Theme, export_dir: PathBuf) -> Self {
        Self {
            bank,
            quiz: QuizState::new(theme),
            export_dir,
            highlighted_option: 0,
            result_scroll: 0,
            status: None,
        }
    }

    pub fn with_questions(bank: QuestionBank) -> Self {
        Self::new(bank, Theme::default(), PathBuf::from("."))
    }

    pub fn state(&self) -> AppState {
        match self.quiz.phase() {
            Phase::Unselected => AppState::Welcome,
            Phase::InProgress { .. } => AppState::Quiz,
            Phase::Finished { .. } => AppState::Result,
        }
    }

    pub fn quiz_state(&self) -> &QuizState {
        &self.quiz
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn theme(&self) -> Theme {
        self.quiz.theme()
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.current_question(&self.bank)
    }

    pub fn current_question_number(&self) -> usize {
        self.quiz.question_index().map_or(0, |index| index + 1)
    }

    pub fn total_questions(&self) -> usize {
        self.quiz
            .active_quiz()
            .map_or(0, |quiz| self.bank.len(quiz))
    }

    pub fn highlighted_option(&self) -> usize {
        self.highlighted_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn is_answered(&self) -> bool {
        self.quiz.is_answered(&self.bank)
    }

    pub fn can_export(&self) -> bool {
        !self.quiz.history().is_empty()
    }

    /// Applies an action, logging and swallowing rejections. Returns whether
    /// the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let is_theme = matches!(action, Action::ToggleTheme);
        let was_finished = self.quiz.is_finished();

        match self.quiz.apply(&self.bank, action) {
            Ok(()) => {
                if !is_theme {
                    self.status = None;
                }
                if !was_finished && self.quiz.is_finished() {
                    self.log_finished();
                }
                true
            }
            Err(err) => {
                debug!(error = %err, "action rejected");
                false
            }
        }
    }

    pub fn select_quiz(&mut self, quiz: QuizId) {
        if self.dispatch(Action::SelectQuiz(quiz)) {
            info!(%quiz, questions = self.bank.len(quiz), "quiz started");
            self.highlighted_option = 0;
            self.result_scroll = 0;
        }
    }

    pub fn select_option(&mut self, index: usize) {
        if self.dispatch(Action::SelectOption(index)) {
            self.highlighted_option = index;
        }
    }

    pub fn pick_highlighted_option(&mut self) {
        self.select_option(self.highlighted_option);
    }

    pub fn confirm_next(&mut self) {
        if self.dispatch(Action::ConfirmNext { at: Local::now() }) {
            self.highlighted_option = 0;
        }
    }

    pub fn restart(&mut self) {
        self.dispatch(Action::Restart);
        self.highlighted_option = 0;
        self.result_scroll = 0;
    }

    pub fn toggle_theme(&mut self) {
        self.dispatch(Action::ToggleTheme);
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted_option = (self.highlighted_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted_option = (self.highlighted_option + count - 1) % count;
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.quiz.history().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Writes the current history to the export directory and reports the
    /// outcome in the status line.
    pub fn export(&mut self) -> Result<PathBuf, ExportError> {
        let result = match self.quiz.active_quiz() {
            Some(quiz) => export::write_csv(
                &self.export_dir,
                self.quiz.history(),
                self.bank.set(quiz),
            ),
            None => Err(ExportError::NothingToExport),
        };

        self.status = Some(match &result {
            Ok(path) => StatusMessage {
                kind: StatusKind::Info,
                text: format!("Resultados exportados para {}", path.display()),
            },
            Err(err) => {
                warn!(error = %err, "export failed");
                StatusMessage {
                    kind: StatusKind::Error,
                    text: format!("Falha ao exportar: {}", err),
                }
            }
        });
        result
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |question| question.options.len())
    }

    fn log_finished(&self) {
        let score = self.quiz.score();
        info!(
            quiz = ?self.quiz.active_quiz(),
            correct = score.correct,
            total = score.total,
            "quiz finished"
        );
    }
}
