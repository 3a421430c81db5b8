// ABOUTME: Navigation menu dropdown opened with F2

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::{CORNFLOWER_BLUE, DARK_BG, GOLD, PANEL_BG, SOFT_WHITE};
use crate::app::state::{HitAreas, MenuItem, MenuState};

const MENU_WIDTH: u16 = 24;

pub struct MenuComponent;

impl MenuComponent {
    pub fn new() -> Self {
        Self
    }

    /// Dropdown anchored below the top bar; records its click regions
    pub fn render(&self, frame: &mut Frame, area: Rect, menu: &MenuState, hits: &mut HitAreas) {
        let height = (MenuItem::all().len() as u16 + 2).min(area.height);
        let menu_area = Rect::new(area.x, area.y, MENU_WIDTH.min(area.width), height);

        frame.render_widget(Clear, menu_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Menu ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let inner = block.inner(menu_area);
        frame.render_widget(block, menu_area);

        hits.menu = Some(menu_area);
        hits.menu_items.clear();

        for (idx, item) in MenuItem::all().iter().enumerate() {
            let y = inner.y + idx as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let style = if idx == menu.selected {
                Style::default().fg(DARK_BG).bg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SOFT_WHITE)
            };
            let rect = Rect::new(inner.x, y, inner.width, 1);
            frame.render_widget(Paragraph::new(format!(" {}", item.label())).style(style), rect);
            hits.menu_items.push((*item, rect));
        }
    }
}

impl Default for MenuComponent {
    fn default() -> Self {
        Self::new()
    }
}
