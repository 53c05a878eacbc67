use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::Palette;
use crate::app::App;
use crate::score::format_attempt;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let attempts_height = match app.quiz_state().attempts().len() {
        0 => 0,
        count => count as u16 + 2,
    };

    let chunks = Layout::vertical([
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(attempts_height),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], app, palette);
    render_question_breakdown(frame, chunks[1], app, palette);
    render_attempts(frame, chunks[2], app, palette);
    render_controls(frame, chunks[3], palette);
}

fn render_score_summary(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let score = app.quiz_state().score();

    let content = vec![
        Line::from(Span::styled(
            "Resultado Final",
            Style::default().fg(palette.accent).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(score.answered_line(), Style::default().fg(palette.text))),
        Line::from(Span::styled(
            format!("✔ {}", score.correct_line()),
            Style::default().fg(palette.correct).bold(),
        )),
        Line::from(Span::styled(
            format!("✘ {}", score.incorrect_line()),
            Style::default().fg(palette.incorrect).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let lines: Vec<Line> = app
        .quiz_state()
        .history()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let (symbol, color) = if record.is_correct() {
                ("+", palette.correct)
            } else {
                ("-", palette.incorrect)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(
                    truncate_question(&record.question_text),
                    Style::default().fg(palette.text),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn render_attempts(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let attempts = app.quiz_state().attempts();
    if attempts.is_empty() {
        return;
    }

    let lines: Vec<Line> = attempts
        .entries()
        .iter()
        .map(|attempt| {
            Line::from(vec![
                Span::styled(" • ", Style::default().fg(palette.muted)),
                Span::styled(format_attempt(attempt), Style::default().fg(palette.text)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Histórico de Tentativas ")
            .title_style(Style::default().fg(palette.accent)),
    );
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect, palette: &Palette) {
    let controls = "j/k rolar  ·  r voltar para seleção  ·  e exportar CSV  ·  q sair";
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .fg(palette.muted);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionBank, QuizId};
    use crate::ui::test_support::render_to_string;

    fn finished_app(picks: &[usize]) -> App {
        let questions = (0..picks.len())
            .map(|i| Question {
                text: format!("Question number {}", i + 1),
                options: vec!["yes".into(), "no".into()],
                answers: vec![0],
            })
            .collect();
        let mut app = App::with_questions(QuestionBank {
            quiz1: questions,
            quiz2: Vec::new(),
        });
        app.select_quiz(QuizId::One);
        for &pick in picks {
            app.select_option(pick);
            app.confirm_next();
        }
        app
    }

    #[test]
    fn test_seven_of_ten_summary() {
        let app = finished_app(&[0, 0, 0, 0, 0, 0, 0, 1, 1, 1]);
        let screen = render_to_string(&app, 100, 40);

        assert!(screen.contains("Resultado Final"));
        assert!(screen.contains("Você respondeu 10 perguntas."));
        assert!(screen.contains("7 acertos (70.00%)"));
        assert!(screen.contains("3 erros (30.00%)"));
        assert!(screen.contains("Histórico de Tentativas"));
        assert!(screen.contains("7/10 acertos (70.0%)"));
    }

    #[test]
    fn test_empty_quiz_never_shows_nan() {
        let mut app = App::with_questions(QuestionBank::default());
        app.select_quiz(QuizId::Two);
        let screen = render_to_string(&app, 100, 30);

        assert!(screen.contains("0 acertos (0.00%)"));
        assert!(!screen.contains("NaN"));
        assert!(!screen.contains("Histórico de Tentativas"));
    }

    #[test]
    fn test_truncate_question() {
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 10);
        assert_eq!(truncate_question(&long).chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert_eq!(truncate_question("short"), "short");
    }
}
