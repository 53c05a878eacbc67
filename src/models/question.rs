use std::fmt;

use serde::{Deserialize, Serialize};

/// A single exam question as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    /// Indices into `options` that make up the correct answer.
    pub answers: Vec<usize>,
}

impl Question {
    /// Questions with more than one correct option are answered with checkboxes.
    pub fn is_multi_select(&self) -> bool {
        self.answers.len() > 1
    }

    pub fn is_correct_option(&self, index: usize) -> bool {
        self.answers.contains(&index)
    }

    /// Resolves option indices to their text, skipping anything out of range.
    pub fn option_texts<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a str> + 'a {
        indices
            .iter()
            .filter_map(|&index| self.options.get(index).map(String::as_str))
    }
}

/// Identifies one of the two exams in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizId {
    One,
    Two,
}

impl QuizId {
    pub const ALL: [QuizId; 2] = [QuizId::One, QuizId::Two];

    pub fn number(self) -> u8 {
        match self {
            QuizId::One => 1,
            QuizId::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(QuizId::One),
            2 => Some(QuizId::Two),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QuizId::One => "SAP EWM EXAME 01",
            QuizId::Two => "SAP EWM EXAME 02",
        }
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quiz{}", self.number())
    }
}

/// Borrowed view of one exam.
#[derive(Debug, Clone, Copy)]
pub struct QuizSet<'a> {
    pub id: QuizId,
    pub questions: &'a [Question],
}

impl<'a> QuizSet<'a> {
    pub fn title(&self) -> &'static str {
        self.id.title()
    }

    pub fn question(&self, index: usize) -> Option<&'a Question> {
        self.questions.get(index)
    }
}

/// Both exams, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub quiz1: Vec<Question>,
    pub quiz2: Vec<Question>,
}

impl QuestionBank {
    pub fn questions(&self, quiz: QuizId) -> &[Question] {
        match quiz {
            QuizId::One => &self.quiz1,
            QuizId::Two => &self.quiz2,
        }
    }

    pub fn set(&self, quiz: QuizId) -> QuizSet<'_> {
        QuizSet {
            id: quiz,
            questions: self.questions(quiz),
        }
    }

    pub fn question(&self, quiz: QuizId, index: usize) -> Option<&Question> {
        self.questions(quiz).get(index)
    }

    pub fn len(&self, quiz: QuizId) -> usize {
        self.questions(quiz).len()
    }
}
