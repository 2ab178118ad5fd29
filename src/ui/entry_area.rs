use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let (border_style, border_type, bg) = Theme::panel(state.focus == FocusPanel::EntryArea);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(ref buf_key) = state.active_buffer else {
        let empty = Paragraph::new("Nothing selected. Use /new to open a ledger.")
            .style(Style::default().fg(Theme::TEXT_MUTED));
        frame.render_widget(empty, inner);
        return;
    };

    let Some(buf) = state.buffers.get(buf_key) else {
        return;
    };

    let available_height = inner.height as usize;
    let total = buf.messages.len();

    let end = total.saturating_sub(buf.scroll_offset);
    let start = end.saturating_sub(available_height);

    let lines: Vec<Line> = buf
        .messages
        .iter()
        .skip(start)
        .take(end - start)
        .map(format_message)
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    if total > available_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(available_height)).position(start);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("┃")
            .track_symbol(Some("│"))
            .thumb_style(Theme::scrollbar_thumb())
            .track_style(Theme::scrollbar_track());

        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn format_message<'a>(msg: &Message) -> Line<'a> {
    let ts = Span::styled(format!("[{}] ", msg.timestamp), Theme::timestamp());

    match msg.kind {
        MessageKind::Entry => Line::from(vec![
            ts,
            Span::styled(format!("{} ", msg.sender), Theme::operator()),
            Span::styled(msg.text.clone(), Theme::entry_text()),
        ]),
        MessageKind::Total => Line::from(vec![
            ts,
            Span::styled("= ", Theme::operator()),
            Span::styled(msg.text.clone(), Theme::total_message()),
        ]),
        MessageKind::System => Line::from(vec![
            ts,
            Span::styled("• ", Style::default().fg(Theme::ACCENT_AMBER)),
            Span::styled(msg.text.clone(), Theme::system_message()),
        ]),
        MessageKind::Error => Line::from(vec![
            ts,
            Span::styled("✘ ", Style::default().fg(Theme::ACCENT_ROSE)),
            Span::styled(msg.text.clone(), Theme::error_message()),
        ]),
    }
}
