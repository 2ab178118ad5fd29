use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Input;
    let (border_style, border_type, bg) = Theme::panel(focused);

    let title = match state.active_ledger() {
        Some(ledger) => format!(" {} ", ledger.name),
        None => " Input ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1))
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_text = &state.input.text;

    if focused {
        let line = Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(input_text.as_str(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        if inner.width > 0 && inner.height > 0 {
            // Chevron "❯ " is two columns wide
            let prompt_offset = 2u16;
            let cursor_x = inner.x + prompt_offset + state.input.cursor_width() as u16;
            frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
        }
    } else {
        let paragraph = Paragraph::new(input_text.as_str()).style(Theme::input_text());
        frame.render_widget(paragraph, inner);
    }
}
