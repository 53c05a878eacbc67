use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Question, QuestionBank, QuizId};

const EMBEDDED_QUESTIONS: &str = include_str!("questions.json");

/// Errors raised while reading or validating a question bank.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{quiz} question {number}: {reason}")]
    InvalidQuestion {
        quiz: QuizId,
        number: usize,
        reason: String,
    },
}

/// The bank compiled into the binary.
pub fn load_questions() -> Result<QuestionBank, LoadError> {
    load_questions_from_str(EMBEDDED_QUESTIONS)
}

pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading question bank");

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_questions_from_str(&json_content)
}

pub fn load_questions_from_str(json: &str) -> Result<QuestionBank, LoadError> {
    let bank: QuestionBank = serde_json::from_str(json)?;

    for quiz in QuizId::ALL {
        let questions = bank.questions(quiz);
        if questions.is_empty() {
            warn!(%quiz, "quiz has no questions");
        }
        for (index, question) in questions.iter().enumerate() {
            validate_question(question).map_err(|reason| LoadError::InvalidQuestion {
                quiz,
                number: index + 1,
                reason,
            })?;
        }
    }

    Ok(bank)
}

fn validate_question(question: &Question) -> Result<(), String> {
    if question.options.is_empty() {
        return Err("has no options".to_string());
    }
    if question.answers.is_empty() {
        return Err("has no correct answers".to_string());
    }

    for (position, &answer) in question.answers.iter().enumerate() {
        if answer >= question.options.len() {
            return Err(format!(
                "answer index {} is out of range for {} options",
                answer,
                question.options.len()
            ));
        }
        if question.answers[..position].contains(&answer) {
            return Err(format!("answer index {} is listed twice", answer));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_bank_is_valid() {
        let bank = load_questions().unwrap();
        assert!(bank.len(QuizId::One) > 0);
        assert!(bank.len(QuizId::Two) > 0);
        assert!(bank.quiz1.iter().any(Question::is_multi_select));
    }

    #[test]
    fn test_rejects_out_of_range_answer() {
        let json = r#"{
            "quiz1": [{"question": "Q", "options": ["a", "b"], "answers": [2]}],
            "quiz2": []
        }"#;
        let err = load_questions_from_str(json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidQuestion { quiz: QuizId::One, number: 1, .. }
        ));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_answers() {
        let empty = r#"{
            "quiz1": [],
            "quiz2": [{"question": "Q", "options": ["a"], "answers": []}]
        }"#;
        assert!(matches!(
            load_questions_from_str(empty),
            Err(LoadError::InvalidQuestion { quiz: QuizId::Two, .. })
        ));

        let duplicate = r#"{
            "quiz1": [{"question": "Q", "options": ["a", "b"], "answers": [1, 1]}],
            "quiz2": []
        }"#;
        assert!(load_questions_from_str(duplicate).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_questions_from_json("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_questions_from_str("{not json"),
            Err(LoadError::Parse(_))
        ));
    }
}
