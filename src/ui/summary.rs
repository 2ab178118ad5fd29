use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Counters and last entry for the active ledger.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let (border_style, border_type, bg) = Theme::panel(state.focus == FocusPanel::Summary);

    let block = Block::default()
        .title(" Summary ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let label = Style::default().fg(Theme::TEXT_SECONDARY);

    let lines: Vec<Line> = match state.active_ledger() {
        Some(ledger) => {
            let last = match ledger.last_entry {
                Some(entry) => Span::styled(
                    format!(
                        "{} {}",
                        entry.operation.symbol(),
                        state.format_number(entry.operand)
                    ),
                    Theme::operator(),
                ),
                None => Span::styled("none", Style::default().fg(Theme::TEXT_MUTED)),
            };
            vec![
                Line::from(vec![
                    Span::styled(" total    ", label),
                    Span::styled(state.format_number(ledger.total), Theme::number(ledger.total)),
                ]),
                Line::from(vec![
                    Span::styled(" entries  ", label),
                    Span::styled(ledger.applied.to_string(), Theme::entry_text()),
                ]),
                Line::from(vec![
                    Span::styled(" rejected ", label),
                    Span::styled(
                        ledger.rejected.to_string(),
                        if ledger.rejected > 0 {
                            Theme::error_message()
                        } else {
                            Theme::entry_text()
                        },
                    ),
                ]),
                Line::from(vec![Span::styled(" last     ", label), last]),
            ]
        }
        None => vec![Line::from(Span::styled(
            " No ledger selected",
            Style::default().fg(Theme::TEXT_MUTED),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
