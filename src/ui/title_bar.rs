use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let bg = Theme::BG_ELEVATED;
    let sep = Span::styled(" │ ", Style::default().fg(Theme::BORDER_DIM).bg(bg));

    let line = match state.active_ledger() {
        Some(ledger) => Line::from(vec![
            Span::styled(
                format!(" {} ", ledger.name),
                Style::default()
                    .fg(Theme::ACCENT_TEAL)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            sep,
            Span::styled("total ", Style::default().fg(Theme::TEXT_SECONDARY).bg(bg)),
            Span::styled(
                state.format_number(ledger.total),
                Theme::number(ledger.total).bg(bg),
            ),
        ]),
        None => Line::from(vec![
            Span::styled(
                " Overview ",
                Style::default()
                    .fg(Theme::ACCENT_AMBER)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            sep,
            Span::styled(
                "/new to open a ledger, /help for commands",
                Style::default()
                    .fg(Theme::TEXT_MUTED)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
