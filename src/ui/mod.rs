mod palette;
mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block, widgets::Paragraph};

pub use palette::Palette;

use crate::app::{App, StatusKind};
use crate::models::AppState;

const APP_TITLE: &str = "Simulado SAP EWM";

pub fn render(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme());
    let area = frame.area();
    frame.render_widget(
        Block::default().bg(palette.background).fg(palette.text),
        area,
    );

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, chunks[0], app, &palette);

    match app.state() {
        AppState::Welcome => welcome::render(frame, chunks[1], app, &palette),
        AppState::Quiz => quiz::render(frame, chunks[1], app, &palette),
        AppState::Result => result::render(frame, chunks[1], app, &palette),
    }

    render_status(frame, chunks[2], app, &palette);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let header = Line::from(vec![
        Span::styled(format!(" {}", APP_TITLE), Style::default().fg(palette.accent).bold()),
        Span::styled(
            format!("   tema: {} (t alterna)", app.theme()),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let Some(status) = app.status() else {
        return;
    };
    let color = match status.kind {
        StatusKind::Info => palette.correct,
        StatusKind::Error => palette.incorrect,
    };
    let widget = Paragraph::new(format!(" {}", status.text)).fg(color);
    frame.render_widget(widget, area);
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use crate::app::App;

    /// Renders the whole app and returns the screen as text, one row per line.
    pub fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::render_to_string;
    use super::*;
    use crate::data::load_questions;
    use crate::models::Theme;

    #[test]
    fn test_header_shows_theme() {
        let mut app = App::with_questions(load_questions().unwrap());
        assert!(render_to_string(&app, 80, 20).contains("tema: light"));

        app.toggle_theme();
        assert!(render_to_string(&app, 80, 20).contains("tema: dark"));
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(
            Palette::for_theme(Theme::Light).background,
            Palette::for_theme(Theme::Dark).background
        );
    }
}
