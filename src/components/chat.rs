// ABOUTME: Community chat panel - message log that follows the newest message, plus the input line

use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::theme::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE};
use crate::chat::{ChatMessage, ChatRole, ChatState};

pub struct ChatComponent;

impl ChatComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, chat: &ChatState) {
        frame.render_widget(Clear, area);
        let popup_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Community Chat - Press [Esc] to close ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));
        frame.render_widget(popup_block, area);

        let inner_area = area.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Message area
                Constraint::Length(3), // Input area
            ])
            .split(inner_area);

        self.render_messages(frame, chunks[0], chat);
        self.render_input(frame, chunks[1], chat);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, chat: &ChatState) {
        if chat.messages.is_empty() {
            frame.render_widget(
                Paragraph::new("Say hello to the community! Ask about events, membership or support.")
                    .wrap(Wrap { trim: true })
                    .style(Style::default().fg(MUTED_GRAY)),
                area,
            );
            return;
        }

        // Each message takes a name line, its text and a spacer
        let width = area.width.saturating_sub(2).max(1) as usize;
        let mut budget = area.height as usize;
        if chat.is_awaiting_reply() {
            budget = budget.saturating_sub(1);
        }
        let mut shown: Vec<&ChatMessage> = Vec::new();
        for message in chat.messages.iter().rev() {
            let height = 2 + message.content.chars().count().div_ceil(width).max(1);
            if height > budget && !shown.is_empty() {
                break;
            }
            budget = budget.saturating_sub(height);
            shown.push(message);
        }
        shown.reverse();

        let mut items: Vec<ListItem> = shown.into_iter().map(|m| self.format_message(m, width)).collect();
        if chat.is_awaiting_reply() {
            items.push(
                ListItem::new("Community Bot is typing...")
                    .style(Style::default().fg(MUTED_GRAY).add_modifier(Modifier::ITALIC)),
            );
        }

        frame.render_widget(List::new(items), area);
    }

    fn format_message(&self, message: &ChatMessage, width: usize) -> ListItem<'static> {
        let name_color = match message.role {
            ChatRole::User => CORNFLOWER_BLUE,
            ChatRole::Bot => SELECTION_GREEN,
        };
        let mut lines = vec![Line::from(vec![
            Span::styled(
                message.role.display_name(),
                Style::default().fg(name_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", message.timestamp.format("%H:%M")),
                Style::default().fg(MUTED_GRAY),
            ),
        ])];

        let chars: Vec<char> = message.content.chars().collect();
        for chunk in chars.chunks(width) {
            lines.push(Line::from(Span::styled(
                chunk.iter().collect::<String>(),
                Style::default().fg(SOFT_WHITE),
            )));
        }
        lines.push(Line::from(""));

        ListItem::new(lines)
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, chat: &ChatState) {
        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(GOLD)),
            Span::styled(chat.input.clone(), Style::default().fg(SOFT_WHITE)),
            Span::styled("▏", Style::default().fg(GOLD)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(MUTED_GRAY))
                .title(" Type your message... (Enter to send) "),
        );
        frame.render_widget(input, area);
    }
}

impl Default for ChatComponent {
    fn default() -> Self {
        Self::new()
    }
}
