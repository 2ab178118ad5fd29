use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    if let Some(ledger) = state.active_ledger() {
        parts.push(Span::styled(
            format!(" [{}] ", ledger.name),
            Style::default().fg(Theme::ACCENT_GREEN).bg(Theme::BG_ELEVATED),
        ));
    }

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let focus_name = match state.focus {
        FocusPanel::Input => "INPUT",
        FocusPanel::LedgerTree => "LEDGERS",
        FocusPanel::EntryArea => "ENTRIES",
        FocusPanel::Summary => "SUMMARY",
    };
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_ELEVATED),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
