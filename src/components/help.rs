// ABOUTME: Help overlay component displaying keyboard shortcuts and commands

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
};

use super::centered_rect;
use super::theme::{CORNFLOWER_BLUE, GOLD, PANEL_BG, SOFT_WHITE};

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let heading = |text: &'static str| {
            ListItem::new(text).style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        };
        let item = |text: &'static str| ListItem::new(text).style(Style::default().fg(SOFT_WHITE));

        let help_items = vec![
            heading("Form:"),
            item("  Tab/↓        Next field"),
            item("  Shift+Tab/↑  Previous field"),
            item("  ←/→          Change selection"),
            item("  Space        Toggle checkbox"),
            item("  Enter        Activate button, add skill, remove tag"),
            item("  Ctrl+V       Paste"),
            item(""),
            heading("Steps:"),
            item("  PgDn         Next step (required fields must be filled)"),
            item("  PgUp         Previous step"),
            item("  Alt+1..4     Jump to step"),
            item("  Ctrl+S       Submit application"),
            item(""),
            heading("Views:"),
            item("  F2           Navigation menu"),
            item("  F3           Community chat"),
            item(""),
            heading("General:"),
            item("  F1           Toggle this help"),
            item("  Esc          Close overlay or newest notification"),
            item("  Ctrl+C/Ctrl+Q Quit"),
            item(""),
            item("  Mouse: click step tabs, buttons, menu entries and notifications"),
        ];

        let help_list = List::new(help_items).block(
            Block::default()
                .title(" Help - Press F1 or Esc to close ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(CORNFLOWER_BLUE))
                .style(Style::default().bg(PANEL_BG)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
