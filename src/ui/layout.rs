use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub ledger_tree: Rect,
    pub summary: Rect,
    pub title_bar: Rect,
    pub entry_area: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Horizontal: left panel | gap | right content
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(26), // Left panel
            Constraint::Min(30),    // Right content
        ])
        .split(main_chunks[0]);

    // Left panel: ledger tree | summary
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Min(7)])
        .split(h_chunks[0]);

    // Right panel: title bar | entries | input
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Entries
            Constraint::Length(3), // Input box
        ])
        .split(h_chunks[1]);

    AppLayout {
        ledger_tree: left_chunks[0],
        summary: left_chunks[1],
        title_bar: right_chunks[0],
        entry_area: right_chunks[1],
        input_box: right_chunks[2],
        status_bar: main_chunks[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_area() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = compute_layout(area);
        assert_eq!(layout.status_bar.y, 29);
        assert_eq!(layout.status_bar.width, 100);
        assert_eq!(layout.ledger_tree.width, 26);
        assert_eq!(layout.input_box.height, 3);
        assert_eq!(layout.title_bar.height, 1);
        assert_eq!(layout.entry_area.x, layout.input_box.x);
    }
}
