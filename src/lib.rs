//! # ewm-quiz
//!
//! A terminal quiz for the two SAP EWM practice exams: pick an exam, answer
//! single- and multi-select questions, review the score and the last five
//! attempts, and export the answers to `quiz_resultados.csv`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ewm_quiz::{Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Use the built-in question bank
//!     let quiz = Quiz::embedded()?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod export;
pub mod logging;
mod models;
pub mod score;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::info;

pub use app::{App, StatusKind, StatusMessage};
pub use config::{ConfigError, ConfigLoader, QuizConfig};
pub use data::{LoadError, load_questions, load_questions_from_json, load_questions_from_str};
pub use export::ExportError;
pub use logging::LoggingError;
pub use models::{
    AnsweredRecord, AppState, AttemptLog, AttemptSummary, MAX_ATTEMPTS, Question, QuestionBank,
    QuizId, QuizSet, Theme,
};
pub use session::{Action, ActionError, Phase, QuizState};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    pub fn new(bank: QuestionBank, theme: Theme, export_dir: PathBuf) -> Self {
        Self {
            app: App::new(bank, theme, export_dir),
        }
    }

    /// Quiz over the question bank compiled into the binary.
    pub fn embedded() -> Result<Self, QuizError> {
        Ok(Self {
            app: App::with_questions(load_questions()?),
        })
    }

    /// Load a quiz from a JSON file with `quiz1` and `quiz2` arrays.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use ewm_quiz::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        Ok(Self {
            app: App::with_questions(load_questions_from_json(path)?),
        })
    }

    /// Build a quiz from resolved configuration.
    pub fn from_config(config: &QuizConfig) -> Result<Self, QuizError> {
        let bank = match &config.questions {
            Some(path) => load_questions_from_json(path)?,
            None => load_questions()?,
        };
        Ok(Self::new(bank, config.theme, config.export_dir.clone()))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::TerminalGuard::acquire()?;
        info!("quiz session started");
        let result = run_event_loop(&mut term, &mut self.app);
        drop(term);
        info!(attempts = self.app.quiz_state().attempts().len(), "quiz session ended");
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
pub fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_theme();
            return false;
        }
        _ => {}
    }

    match app.state() {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
    false
}

fn handle_welcome_input(app: &mut App, key: KeyCode) {
    if let KeyCode::Char(c) = key {
        if let Some(quiz) = c
            .to_digit(10)
            .and_then(|digit| QuizId::from_number(digit as u8))
        {
            app.select_quiz(quiz);
        }
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char(' ') => app.pick_highlighted_option(),
        KeyCode::Enter => {
            if app.is_answered() {
                app.confirm_next();
            } else {
                app.pick_highlighted_option();
            }
        }
        KeyCode::Char('n') | KeyCode::Right => app.confirm_next(),
        KeyCode::Char('e') | KeyCode::Char('E') => {
            let _ = app.export();
        }
        KeyCode::Char('b') | KeyCode::Char('B') => app.restart(),
        KeyCode::Char(c) => {
            if let Some(digit) = c.to_digit(10).filter(|&d| d > 0) {
                app.select_option(digit as usize - 1);
            }
        }
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('b') | KeyCode::Char('B') => {
            app.restart()
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            let _ = app.export();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_questions(load_questions().unwrap())
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(handle_input(&mut app, KeyCode::Char('q')));
        assert!(handle_input(&mut app, KeyCode::Esc));
        assert!(!handle_input(&mut app, KeyCode::Char('x')));
    }

    #[test]
    fn test_digit_selects_quiz_then_option() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.state(), AppState::Welcome);

        handle_input(&mut app, KeyCode::Char('2'));
        assert_eq!(app.state(), AppState::Quiz);
        assert_eq!(app.quiz_state().active_quiz(), Some(QuizId::Two));

        handle_input(&mut app, KeyCode::Char('2'));
        assert_eq!(app.quiz_state().selection(), &[1]);
    }

    #[test]
    fn test_enter_picks_then_advances() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('1'));

        handle_input(&mut app, KeyCode::Down);
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.quiz_state().selection(), &[1]);
        assert!(app.is_answered());

        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.current_question_number(), 2);
        assert_eq!(app.quiz_state().history().len(), 1);
    }

    #[test]
    fn test_theme_key_works_everywhere() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme(), Theme::Dark);

        handle_input(&mut app, KeyCode::Char('1'));
        handle_input(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn test_back_key_returns_to_selection() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('1'));
        handle_input(&mut app, KeyCode::Char('b'));
        assert_eq!(app.state(), AppState::Welcome);
    }

    #[test]
    fn test_from_config_uses_configured_questions() {
        let dir = tempfile::tempdir().unwrap();
        let questions = dir.path().join("questions.json");
        std::fs::write(
            &questions,
            r#"{
                "quiz1": [{"question": "Q1", "options": ["a", "b"], "answers": [0]}],
                "quiz2": []
            }"#,
        )
        .unwrap();

        let config = QuizConfig {
            questions: Some(questions),
            export_dir: dir.path().join("out"),
            theme: Theme::Dark,
            ..QuizConfig::default()
        };
        let quiz = Quiz::from_config(&config).unwrap();

        assert_eq!(quiz.app().bank().len(QuizId::One), 1);
        assert_eq!(quiz.app().bank().len(QuizId::Two), 0);
        assert_eq!(quiz.app().theme(), Theme::Dark);
        assert_eq!(quiz.app().export_dir(), dir.path().join("out"));
    }

    #[test]
    fn test_from_config_defaults_to_embedded_bank() {
        let quiz = Quiz::from_config(&QuizConfig::default()).unwrap();
        assert_eq!(quiz.app().bank().len(QuizId::One), 10);
        assert_eq!(quiz.app().theme(), Theme::Light);
        assert_eq!(quiz.app().export_dir(), Path::new("."));
    }

    #[test]
    fn test_from_config_reports_missing_questions() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuizConfig {
            questions: Some(dir.path().join("missing.json")),
            ..QuizConfig::default()
        };
        assert!(matches!(
            Quiz::from_config(&config),
            Err(QuizError::Load(LoadError::Io { .. }))
        ));
    }
}
