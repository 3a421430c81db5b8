// ABOUTME: Main layout component handling the top bar, active view, overlays and toast stack

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, BorderType, Borders, Paragraph},
};

use super::centered_rect;
use super::theme::{DARK_BG, GOLD, MUTED_GRAY, PANEL_BG, SUBDUED_BORDER};
use super::{ChatComponent, HelpComponent, MenuComponent, SubmittedComponent, WizardComponent};
use crate::app::{state::View, AppState};

const NOTIFICATION_WIDTH: u16 = 50;
/// Columns a toast is shifted right while sliding in
const SLIDE_IN_OFFSET: u16 = 4;

pub struct LayoutComponent {
    wizard: WizardComponent,
    chat: ChatComponent,
    help: HelpComponent,
    menu: MenuComponent,
    submitted: SubmittedComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            wizard: WizardComponent::new(),
            chat: ChatComponent::new(),
            help: HelpComponent::new(),
            menu: MenuComponent::new(),
            submitted: SubmittedComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &mut AppState) {
        let area = frame.size();
        state.hit_areas.clear();
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Top bar
                Constraint::Min(0),    // Active view
                Constraint::Length(1), // Bottom key hints
            ])
            .split(area);

        self.render_top_bar(frame, main_layout[0]);

        match state.current_view {
            View::JoinForm => self.wizard.render(frame, main_layout[1], state),
            View::Chat => {
                let chat_area = centered_rect(80, 90, main_layout[1]);
                self.chat.render(frame, chat_area, &state.chat);
            }
            View::Submitted => {
                if let Some(application) = &state.submitted {
                    self.submitted.render(frame, main_layout[1], application);
                }
            }
        }

        self.render_menu_bar(frame, main_layout[2]);

        if state.menu.open {
            self.menu.render(frame, main_layout[1], &state.menu, &mut state.hit_areas);
        }

        if state.help_visible {
            self.help.render(frame, area);
        }

        // Toasts sit above everything else
        self.render_notifications(frame, area, state);
    }

    fn render_top_bar(&self, frame: &mut Frame, area: Rect) {
        let bar = Paragraph::new(Line::from(vec![
            Span::styled(" ◆ ", Style::default().fg(GOLD)),
            Span::styled("Vision Hub Tanzania", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("  community membership", Style::default().fg(MUTED_GRAY)),
        ]))
        .style(Style::default().bg(PANEL_BG));
        frame.render_widget(bar, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let text = |t: &'static str| Span::styled(t, Style::default().fg(MUTED_GRAY));
        let sep = || Span::styled(" │ ", Style::default().fg(SUBDUED_BORDER));

        let spans = vec![
            Span::raw(" "),
            key("F1"),
            text(" help"),
            sep(),
            key("F2"),
            text(" menu"),
            sep(),
            key("F3"),
            text(" chat"),
            sep(),
            key("Esc"),
            text(" close"),
            sep(),
            key("Ctrl+Q"),
            text(" quit"),
        ];

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(PANEL_BG)),
            area,
        );
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect, state: &mut AppState) {
        let notifications = state.notifications.current();
        if notifications.is_empty() {
            return;
        }

        // Position notifications in the top-right corner
        let notification_width = NOTIFICATION_WIDTH.min(area.width.saturating_sub(2));
        let notification_height = notifications.len() as u16 * 3; // 3 lines per notification

        let notification_area = Rect {
            x: area.width.saturating_sub(notification_width + 2),
            y: 1,
            width: notification_width,
            height: notification_height.min(area.height.saturating_sub(2)),
        };

        for (i, notification) in notifications.iter().enumerate() {
            let y_offset = i as u16 * 3;
            if y_offset >= notification_area.height {
                break; // Don't render notifications that won't fit
            }

            let slide = if notification.phase == crate::app::notifications::Phase::Entering {
                SLIDE_IN_OFFSET.min(notification_area.width)
            } else {
                0
            };
            let single_notification_area = Rect {
                x: notification_area.x + slide,
                y: notification_area.y + y_offset,
                width: notification_area.width - slide,
                height: 3.min(notification_area.height - y_offset),
            };

            let kind = notification.notification_type;
            let mut text_style = Style::default().fg(kind.color());
            if notification.is_transitioning() {
                text_style = text_style.add_modifier(Modifier::DIM);
            }

            let notification_line = Line::from(vec![
                Span::styled(kind.icon(), text_style.add_modifier(Modifier::BOLD)),
                Span::styled(notification.message.as_str(), text_style),
            ]);

            let notification_widget = Paragraph::new(notification_line)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(text_style)
                        .title(Title::from(" × ").alignment(Alignment::Right))
                        .style(Style::default().bg(PANEL_BG)),
                )
                .wrap(ratatui::widgets::Wrap { trim: true });

            frame.render_widget(notification_widget, single_notification_area);
            state
                .hit_areas
                .toasts
                .push((notification.id, single_notification_area));
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
