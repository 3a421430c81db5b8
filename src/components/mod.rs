// ABOUTME: UI components for the TUI interface including the form wizard, chat, menu and help

pub mod chat;
pub mod help;
pub mod layout;
pub mod menu;
pub mod submitted;
pub mod theme;
pub mod wizard;

pub use chat::ChatComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use menu::MenuComponent;
pub use submitted::SubmittedComponent;
pub use wizard::WizardComponent;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Centered popup area as a percentage of `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
