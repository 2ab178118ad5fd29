use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(22, 24, 30);
    pub const BG_ELEVATED: Color = Color::Rgb(34, 37, 46);
    pub const BORDER_DIM: Color = Color::Rgb(70, 74, 88);
    pub const TEXT_PRIMARY: Color = Color::Rgb(225, 228, 235);
    pub const TEXT_SECONDARY: Color = Color::Rgb(160, 165, 180);
    pub const TEXT_MUTED: Color = Color::Rgb(105, 110, 125);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const ACCENT_AMBER: Color = Color::Rgb(230, 180, 80);
    pub const ACCENT_ROSE: Color = Color::Rgb(225, 105, 120);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 210, 130);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Rounded
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Self::BG_DARK)
    }

    pub fn panel_bg_focused() -> Style {
        Style::default().bg(Self::BG_ELEVATED)
    }

    /// Border, border type and background for a panel.
    pub fn panel(focused: bool) -> (Style, BorderType, Style) {
        if focused {
            (Self::border_focused(), Self::border_type_focused(), Self::panel_bg_focused())
        } else {
            (Self::border(), Self::border_type(), Self::panel_bg())
        }
    }

    pub fn title() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn timestamp() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn entry_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn operator() -> Style {
        Style::default().fg(Self::ACCENT_TEAL).add_modifier(Modifier::BOLD)
    }

    pub fn total_message() -> Style {
        Style::default().fg(Self::ACCENT_GREEN).add_modifier(Modifier::BOLD)
    }

    pub fn system_message() -> Style {
        Style::default().fg(Self::ACCENT_AMBER)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Self::ACCENT_ROSE)
    }

    /// Colour a total by sign; non-finite totals stand out.
    pub fn number(x: f64) -> Style {
        if !x.is_finite() {
            Style::default().fg(Self::ACCENT_ROSE).add_modifier(Modifier::BOLD)
        } else if x < 0.0 {
            Style::default().fg(Self::ACCENT_AMBER)
        } else {
            Style::default().fg(Self::ACCENT_GREEN)
        }
    }

    pub fn ledger_normal() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn ledger_active() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
            .bg(Self::BG_ELEVATED)
    }

    pub fn ledger_unread() -> Style {
        Style::default().fg(Self::ACCENT_AMBER)
    }

    pub fn ledger_error() -> Style {
        Style::default().fg(Self::ACCENT_ROSE).add_modifier(Modifier::BOLD)
    }

    pub fn badge() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }

    pub fn scrollbar_thumb() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn scrollbar_track() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }
}
