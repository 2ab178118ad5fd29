use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let (border_style, border_type, bg) = Theme::panel(state.focus == FocusPanel::LedgerTree);

    let block = Block::default()
        .title(" Ledgers ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let mut items: Vec<ListItem> = Vec::new();

    // Overview entry at the top
    {
        let key = BufferKey::Overview;
        let is_active = state.active_buffer.as_ref() == Some(&key);
        let unread = state.buffers.get(&key).map(|b| b.unread_count).unwrap_or(0);
        let style = if is_active {
            Theme::ledger_active()
        } else if unread > 0 {
            Theme::ledger_unread()
        } else {
            Style::default().fg(Theme::TEXT_SECONDARY)
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(" ◆ ", Style::default().fg(Theme::ACCENT_AMBER)),
            Span::styled("Overview", style),
        ])));
    }

    for (i, ledger) in state.ledgers.iter().enumerate() {
        let key = BufferKey::Ledger(ledger.id);
        let buf = state.buffers.get(&key);
        let is_active = state.active_buffer.as_ref() == Some(&key);
        let has_error = buf.map(|b| b.has_error).unwrap_or(false);
        let unread = buf.map(|b| b.unread_count).unwrap_or(0);

        let tree_prefix = if i + 1 == state.ledgers.len() { " └─" } else { " ├─" };

        let name_style = if is_active {
            Theme::ledger_active()
        } else if has_error {
            Theme::ledger_error()
        } else if unread > 0 {
            Theme::ledger_unread()
        } else {
            Theme::ledger_normal()
        };

        let mut spans = vec![
            Span::styled(tree_prefix, Style::default().fg(Theme::BORDER_DIM)),
            Span::styled(format!(" {}", ledger.name), name_style),
            Span::styled(
                format!(" {}", state.format_number(ledger.total)),
                Theme::number(ledger.total),
            ),
        ];

        // Unread badge
        if unread > 0 && !is_active {
            spans.push(Span::styled(format!(" {}", unread), Theme::badge()));
        }

        items.push(ListItem::new(Line::from(spans)));
    }

    if state.ledgers.is_empty() {
        items.push(ListItem::new(Span::styled(
            " No ledgers (/new)",
            Style::default().fg(Theme::TEXT_MUTED),
        )));
    }

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
