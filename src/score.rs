//! Scoring of answer histories and the percentage strings shown to the user.

use chrono::{DateTime, Local};

use crate::models::{AnsweredRecord, AttemptSummary};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Correct/total tally for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub total: usize,
    pub correct: usize,
}

impl Score {
    pub fn new(total: usize, correct: usize) -> Self {
        Self {
            total,
            correct: correct.min(total),
        }
    }

    pub fn from_history(history: &[AnsweredRecord]) -> Self {
        let correct = history.iter().filter(|record| record.is_correct()).count();
        Self::new(history.len(), correct)
    }

    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    pub fn correct_percent(&self) -> f64 {
        percentage(self.correct, self.total)
    }

    pub fn incorrect_percent(&self) -> f64 {
        percentage(self.incorrect(), self.total)
    }

    pub fn answered_line(&self) -> String {
        format!("Você respondeu {} perguntas.", self.total)
    }

    pub fn correct_line(&self) -> String {
        format!("{} acertos ({:.2}%)", self.correct, self.correct_percent())
    }

    pub fn incorrect_line(&self) -> String {
        format!("{} erros ({:.2}%)", self.incorrect(), self.incorrect_percent())
    }
}

impl From<&AttemptSummary> for Score {
    fn from(summary: &AttemptSummary) -> Self {
        Self::new(summary.total, summary.correct)
    }
}

/// Returns 0.0 for an empty run instead of NaN.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// One line of the attempt history list.
pub fn format_attempt(summary: &AttemptSummary) -> String {
    let score = Score::from(summary);
    format!(
        "{}: {}/{} acertos ({:.1}%)",
        format_timestamp(&summary.timestamp),
        score.correct,
        score.total,
        score.correct_percent()
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::QuizId;

    fn record(selected: Vec<usize>, correct: Vec<usize>) -> AnsweredRecord {
        AnsweredRecord {
            question_index: 0,
            question_text: "Q".to_string(),
            selected,
            correct,
        }
    }

    #[test]
    fn test_seven_of_ten() {
        let mut history: Vec<AnsweredRecord> = (0..7).map(|_| record(vec![1], vec![1])).collect();
        history.extend((0..3).map(|_| record(vec![0], vec![1])));

        let score = Score::from_history(&history);
        assert_eq!(score.correct, 7);
        assert_eq!(score.incorrect(), 3);
        assert_eq!(score.correct_line(), "7 acertos (70.00%)");
        assert_eq!(score.incorrect_line(), "3 erros (30.00%)");
        assert_eq!(score.answered_line(), "Você respondeu 10 perguntas.");
    }

    #[test]
    fn test_empty_history_is_zero_percent() {
        let score = Score::from_history(&[]);
        assert_eq!(score.correct_percent(), 0.0);
        assert_eq!(score.correct_line(), "0 acertos (0.00%)");
        assert_eq!(score.incorrect_line(), "0 erros (0.00%)");
        assert!(!score.correct_line().contains("NaN"));
    }

    #[test]
    fn test_correct_never_exceeds_total() {
        let score = Score::new(3, 5);
        assert_eq!(score.correct, 3);
        assert_eq!(score.incorrect(), 0);
    }

    #[test]
    fn test_attempt_line_uses_one_decimal() {
        let summary = AttemptSummary {
            timestamp: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
            quiz: QuizId::One,
            total: 3,
            correct: 2,
        };
        assert_eq!(format_attempt(&summary), "09/03/2024 14:05:07: 2/3 acertos (66.7%)");
    }

    #[test]
    fn test_attempt_line_with_zero_total() {
        let summary = AttemptSummary {
            timestamp: Local::now(),
            quiz: QuizId::Two,
            total: 0,
            correct: 0,
        };
        assert!(format_attempt(&summary).ends_with("0/0 acertos (0.0%)"));
    }
}
