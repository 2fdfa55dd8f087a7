pub mod components;

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::PreviewApp;
use crate::theme::Theme;

pub fn draw(f: &mut Frame, app: &PreviewApp, theme: &Theme, now: DateTime<Utc>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),      // Info line
            Constraint::Ratio(1, 2),    // Input box
            Constraint::Ratio(1, 2),    // Preview box
            Constraint::Length(1),      // Footer
        ])
        .split(area);

    draw_info_line(f, app, theme, now, chunks[0]);
    draw_text_box(f, " Answer ", &app.input, true, theme, chunks[1]);
    draw_text_box(f, " Preview ", &app.capitalized(), false, theme, chunks[2]);
    draw_footer(f, app, theme, chunks[3]);
}

fn draw_info_line(f: &mut Frame, app: &PreviewApp, theme: &Theme, now: DateTime<Utc>, area: Rect) {
    let badge = match app.readability() {
        Some(readability) => components::readability_badge(&readability, theme),
        None => components::pending_badge(app.char_count(), app.min_length, theme),
    };

    let line = Line::from(vec![
        Span::styled(" namesake ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        Span::styled("│ ", Style::default().fg(theme.inactive)),
        Span::styled(app.locale.to_string(), Style::default().fg(theme.text)),
        Span::styled(" │", Style::default().fg(theme.inactive)),
        badge,
        Span::styled("│ ", Style::default().fg(theme.inactive)),
        components::timestamp("Edited", &app.last_edited(now), theme),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn draw_text_box(f: &mut Frame, title: &str, content: &str, active: bool, theme: &Theme, area: Rect) {
    let border_color = if active { theme.accent } else { theme.inactive };
    let title_style = if active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_dim)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title.to_string(), title_style));

    let paragraph = Paragraph::new(content.to_string())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: false })
        .block(block);

    f.render_widget(paragraph, area);
}

fn draw_footer(f: &mut Frame, app: &PreviewApp, theme: &Theme, area: Rect) {
    let line = match &app.status_message {
        Some(msg) => Line::from(Span::styled(format!(" {}", msg), Style::default().fg(theme.accent))),
        None => Line::from(vec![
            Span::styled(" Tab", Style::default().fg(theme.accent)),
            Span::styled(" locale  ", Style::default().fg(theme.text_dim)),
            Span::styled("Ctrl-U", Style::default().fg(theme.accent)),
            Span::styled(" clear  ", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" quit", Style::default().fg(theme.text_dim)),
        ]),
    };

    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleTag;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_draw_shows_capitalized_preview() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let mut app = PreviewApp::new(LocaleTag::parse("en-US").unwrap(), 280);
        app.input = "hello there".to_string();
        app.last_edit = Some(now);

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| draw(f, &app, &Theme::default(), now))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Hello there"));
        assert!(text.contains("11/280 chars"));
        assert!(text.contains("Edited just now"));
    }
}
