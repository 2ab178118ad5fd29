mod entry_area;
mod input_box;
mod layout;
mod ledger_tree;
mod status_bar;
mod summary;
mod theme;
mod title_bar;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    ledger_tree::render(frame, app_layout.ledger_tree, state);
    summary::render(frame, app_layout.summary, state);
    title_bar::render(frame, app_layout.title_bar, state);
    entry_area::render(frame, app_layout.entry_area, state);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{BufferKey, LedgerState};
    use crate::config::AppConfig;
    use crate::ledger::{Entry, Operation};
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_overview_and_ledger() {
        let mut state = AppState::new(AppConfig::default());
        state.system_message(&BufferKey::Overview, "Welcome to tally".to_string());
        let id = state.allocate_ledger_id();
        state.add_ledger(LedgerState::new(id, "groceries".to_string()));
        state.record_entry(
            id,
            Entry {
                operation: Operation::Add,
                operand: 16.0,
                before: 0.0,
                after: 16.0,
            },
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("groceries"));
        assert!(text.contains("add 16"));
        assert!(text.contains("Ledgers: 1"));

        state.set_active_buffer(BufferKey::Overview);
        terminal.draw(|f| render(f, &state)).unwrap();
        assert!(screen_text(&terminal).contains("Welcome to tally"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let state = AppState::new(AppConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();
    }
}
