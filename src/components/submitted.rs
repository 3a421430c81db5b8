// ABOUTME: Thank-you screen shown after a successful submission

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::centered_rect;
use super::theme::{GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE};
use crate::form::MembershipApplication;

pub struct SubmittedComponent;

impl SubmittedComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, application: &MembershipApplication) {
        let panel = centered_rect(70, 70, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SELECTION_GREEN))
            .style(Style::default().bg(PANEL_BG))
            .title(" Application Received ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<12}"), Style::default().fg(MUTED_GRAY)),
                Span::styled(value, Style::default().fg(SOFT_WHITE)),
            ])
        };

        let listed = |items: &[String]| {
            if items.is_empty() {
                "None listed".to_string()
            } else {
                items.join(", ")
            }
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Thank you, {}!", application.first_name),
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(
                "Your membership application is pending review.",
                Style::default().fg(SOFT_WHITE),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
            row("Reference", application.id.to_string()),
            row("Name", application.full_name()),
            row("Email", application.email.clone()),
            row("Region", application.region.clone()),
            row("Skills", listed(&application.skills)),
            row("Languages", listed(&application.languages)),
            row("Experience", application.work_experience_display()),
            Line::from(""),
            Line::from(Span::styled(
                "Press q to exit. The application is written out on exit.",
                Style::default().fg(MUTED_GRAY),
            ))
            .alignment(Alignment::Center),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            panel,
        );
    }
}

impl Default for SubmittedComponent {
    fn default() -> Self {
        Self::new()
    }
}
