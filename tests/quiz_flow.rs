use chrono::Local;
use ewm_quiz::export::encode_csv;
use ewm_quiz::session::reduce;
use ewm_quiz::{Action, MAX_ATTEMPTS, QuestionBank, QuizId, QuizState, load_questions};

/// Answers every question of `quiz`: the correct options when `right(index)`
/// holds, otherwise a pick of the same size that includes a wrong option.
fn play(
    state: QuizState,
    bank: &QuestionBank,
    quiz: QuizId,
    right: impl Fn(usize) -> bool,
) -> QuizState {
    let mut state = reduce(&state, bank, Action::SelectQuiz(quiz)).unwrap();

    for (index, question) in bank.questions(quiz).iter().enumerate() {
        let picks: Vec<usize> = if right(index) {
            question.answers.clone()
        } else {
            (0..question.options.len())
                .filter(|option| !question.answers.contains(option))
                .chain(question.answers.iter().copied())
                .take(question.answers.len())
                .collect()
        };

        for pick in picks {
            state = reduce(&state, bank, Action::SelectOption(pick)).unwrap();
        }
        assert!(state.is_answered(bank));
        state = reduce(&state, bank, Action::ConfirmNext { at: Local::now() }).unwrap();
    }

    state
}

#[test]
fn test_complete_run_scores_every_question() {
    let bank = load_questions().unwrap();
    let total = bank.len(QuizId::One);
    let state = play(QuizState::default(), &bank, QuizId::One, |index| index % 3 != 0);

    assert!(state.is_finished());
    assert_eq!(state.history().len(), total);

    let expected_correct = (0..total).filter(|index| index % 3 != 0).count();
    let score = state.score();
    assert_eq!(score.correct, expected_correct);
    assert!(score.correct <= total);

    let attempt = state.attempts().latest().unwrap();
    assert_eq!((attempt.correct, attempt.total), (expected_correct, total));
}

#[test]
fn test_export_resolves_recorded_options() {
    let bank = load_questions().unwrap();
    let state = play(QuizState::default(), &bank, QuizId::Two, |_| true);
    let csv = encode_csv(state.history(), bank.set(QuizId::Two)).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), bank.len(QuizId::Two) + 1);
    assert_eq!(lines[0], "Question,Correct Answers,Selected Answers");

    let first = &bank.questions(QuizId::Two)[0];
    let expected: Vec<&str> = first.answers.iter().map(|&i| first.options[i].as_str()).collect();
    assert!(lines[1].contains(&expected.join("; ")));
}

#[test]
fn test_session_keeps_five_latest_attempts() {
    let bank = load_questions().unwrap();
    let mut state = QuizState::default();

    for run in 0..6 {
        let quiz = if run % 2 == 0 { QuizId::One } else { QuizId::Two };
        state = play(state, &bank, quiz, |_| run == 5);
        state = reduce(&state, &bank, Action::Restart).unwrap();
        assert!(state.history().is_empty());
    }

    let attempts = state.attempts().entries();
    assert_eq!(attempts.len(), MAX_ATTEMPTS);
    assert_eq!(attempts[0].correct, attempts[0].total);
    assert_eq!(attempts[0].quiz, QuizId::Two);
    assert!(attempts[1..].iter().all(|attempt| attempt.correct == 0));
}
