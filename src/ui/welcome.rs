use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::Palette;
use crate::app::App;
use crate::models::QuizId;

pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Escolha o quiz desejado:",
            Style::default().fg(palette.accent).bold(),
        )),
        Line::from(""),
    ];

    for quiz in QuizId::ALL {
        let set = app.bank().set(quiz);
        content.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", quiz.number()),
                Style::default().fg(palette.correct).bold(),
            ),
            Span::styled(set.title(), Style::default().fg(palette.text).bold()),
            Span::styled(
                format!("  ({} perguntas)", set.questions.len()),
                Style::default().fg(palette.muted),
            ),
        ]));
    }

    content.extend([
        Line::from(""),
        Line::from(""),
        Line::from("1/2 escolher  ·  t tema  ·  q sair".fg(palette.muted)),
    ]);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );

    frame.render_widget(widget, chunks[1]);
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::data::load_questions;
    use crate::ui::test_support::render_to_string;

    #[test]
    fn test_lists_both_quizzes() {
        let app = App::with_questions(load_questions().unwrap());
        let screen = render_to_string(&app, 80, 24);

        assert!(screen.contains("Escolha o quiz desejado:"));
        assert!(screen.contains("[1] SAP EWM EXAME 01"));
        assert!(screen.contains("[2] SAP EWM EXAME 02"));
        assert!(screen.contains("(10 perguntas)"));
        assert!(screen.contains("(8 perguntas)"));
    }
}
