use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use super::Palette;
use crate::app::App;
use crate::models::Question;

const MULTI_SELECT_HINT: &str = " (Selecione todas as corretas)";

pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app, palette);
    render_question_text(frame, chunks[1], app.current_question_number(), question, palette);
    render_options(frame, chunks[2], app, question, palette);
    render_controls(frame, chunks[3], app, palette);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let progress = format!(
        "{}/{}",
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(palette.muted);
    frame.render_widget(widget, area);
}

fn render_question_text(
    frame: &mut Frame,
    area: Rect,
    number: usize,
    question: &Question,
    palette: &Palette,
) {
    let mut spans = vec![Span::styled(
        format!("Pergunta {}: {}", number, question.text),
        Style::default().fg(palette.text).bold(),
    )];
    if question.is_multi_select() {
        spans.push(Span::styled(MULTI_SELECT_HINT, Style::default().fg(palette.accent)));
    }

    let widget = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    question: &Question,
    palette: &Palette,
) {
    let answered = app.is_answered();
    let selection = app.quiz_state().selection();
    let multi_select = question.is_multi_select();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_selected = selection.contains(&index);
        let is_highlighted = !answered && index == app.highlighted_option();
        let style = option_style(
            answered,
            is_selected,
            question.is_correct_option(index),
            is_highlighted,
            palette,
        );

        let cursor = if is_highlighted { ">" } else { " " };
        let marker = match (multi_select, is_selected) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(•)",
            (false, false) => "( )",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", cursor), style),
            Span::styled(format!("{} {}. ", marker, index + 1), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

/// Once answered, correct options turn green and wrong picks red.
fn option_style(
    answered: bool,
    is_selected: bool,
    is_correct: bool,
    is_highlighted: bool,
    palette: &Palette,
) -> Style {
    if answered {
        if is_correct {
            return Style::default().fg(palette.correct).bold();
        }
        if is_selected {
            return Style::default().fg(palette.incorrect).bold();
        }
        return Style::default().fg(palette.muted);
    }

    if is_highlighted {
        Style::default().fg(palette.highlight).bold()
    } else if is_selected {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.text)
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let enabled = Style::default().fg(palette.text);
    let disabled = Style::default().fg(palette.muted).add_modifier(Modifier::DIM);
    let answered = app.is_answered();

    let line = Line::from(vec![
        Span::styled("j/k mover  ·  espaço marcar  ·  ", enabled),
        Span::styled("n próxima", if answered { enabled } else { disabled }),
        Span::styled("  ·  ", enabled),
        Span::styled("e exportar CSV", if app.can_export() { enabled } else { disabled }),
        Span::styled("  ·  b voltar  ·  q sair", enabled),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
