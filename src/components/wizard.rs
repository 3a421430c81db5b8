// ABOUTME: Membership form wizard component
// Renders step tabs, progress gauge, the current step's fields and the navigation footer

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use super::theme::{
    CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
    SUBDUED_BORDER,
};
use crate::app::focus::{nav_buttons, FocusTarget};
use crate::app::AppState;
use crate::form::{validator, Field, FieldKind, FieldStatus, FormWizard, SkillList, WizardStep};

/// Something drawn inside the scrollable step panel, positioned on a virtual canvas
struct Placed {
    x: u16,
    y: u16,
    width: u16,
    lines: Vec<Line<'static>>,
    target: Option<FocusTarget>,
}

impl Placed {
    fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

/// Lays out panel content top to bottom, with inline runs for tags
struct Canvas {
    width: u16,
    cursor_y: u16,
    items: Vec<Placed>,
}

impl Canvas {
    fn new(width: u16) -> Self {
        Self {
            width,
            cursor_y: 0,
            items: Vec::new(),
        }
    }

    fn push(&mut self, lines: Vec<Line<'static>>, target: Option<FocusTarget>) {
        let placed = Placed {
            x: 0,
            y: self.cursor_y,
            width: self.width,
            lines,
            target,
        };
        self.cursor_y += placed.height();
        self.items.push(placed);
    }

    fn gap(&mut self) {
        self.cursor_y += 1;
    }

    /// Place single-line chips left to right, wrapping at the panel width
    fn push_inline(&mut self, chips: Vec<(Line<'static>, FocusTarget)>) {
        let mut x = 2u16;
        for (line, target) in chips {
            let width = (line.width() as u16).min(self.width);
            if x + width > self.width && x > 2 {
                self.cursor_y += 1;
                x = 2;
            }
            self.items.push(Placed {
                x,
                y: self.cursor_y,
                width,
                lines: vec![line],
                target: Some(target),
            });
            x += width + 1;
        }
        self.cursor_y += 1;
    }
}

pub struct WizardComponent;

impl WizardComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut AppState) {
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title + step tabs
                Constraint::Length(3), // Progress gauge
                Constraint::Min(6),    // Step panel
                Constraint::Length(3), // Navigation footer
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.render_progress(frame, layout[1], &state.wizard);
        self.render_step_panel(frame, layout[2], state);
        self.render_navigation(frame, layout[3], state);
    }

    /// Title and clickable step tabs
    fn render_header(&self, frame: &mut Frame, area: Rect, state: &mut AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("Membership Application", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("  Join the Vision Hub Tanzania community", Style::default().fg(MUTED_GRAY)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        // Step tabs, left aligned so click regions can be computed from span widths
        let current = state.wizard.current_step();
        let mut spans = vec![Span::raw("  ")];
        let mut x = rows[1].x + 2;
        state.hit_areas.step_tabs.clear();

        for (idx, step) in WizardStep::all().iter().enumerate() {
            let (icon, style) = if step.index() < current.index() {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if *step == current {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };
            let label = format!("{} {}. {}", icon, step.number(), step.title());
            let width = Span::raw(label.as_str()).width() as u16;
            spans.push(Span::styled(label, style));
            state
                .hit_areas
                .step_tabs
                .push((*step, Rect::new(x, rows[1].y, width, 1)));
            x += width;

            if idx < WizardStep::total() - 1 {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
                x += 3;
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, wizard: &FormWizard) {
        let step = wizard.current_step();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SUBDUED_BORDER))
                    .style(Style::default().bg(PANEL_BG)),
            )
            .gauge_style(Style::default().fg(GOLD).bg(PANEL_BG))
            .percent(wizard.progress_percent())
            .label(format!(
                "Step {} of {} · {}%",
                step.number(),
                WizardStep::total(),
                wizard.progress_percent()
            ));
        frame.render_widget(gauge, area);
    }

    fn render_step_panel(&self, frame: &mut Frame, area: Rect, state: &mut AppState) {
        let step = state.wizard.current_step();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", step.title()))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 2 || inner.width < 8 {
            return;
        }

        let description = Paragraph::new(Line::from(Span::styled(
            step.description(),
            Style::default().fg(MUTED_GRAY),
        )));
        frame.render_widget(description, Rect::new(inner.x + 1, inner.y, inner.width - 1, 1));

        let view = Rect::new(inner.x + 1, inner.y + 2, inner.width - 2, inner.height.saturating_sub(2));
        let focused = state.focused();
        let canvas = self.layout_step(&state.wizard, focused.as_ref(), view.width);

        // Keep the focused element in view
        let offset = canvas
            .items
            .iter()
            .find(|p| p.target.is_some() && p.target == focused)
            .map(|p| (p.y + p.height()).saturating_sub(view.height))
            .unwrap_or(0);

        state.hit_areas.targets.clear();
        for placed in canvas.items {
            if placed.y < offset || placed.y + placed.height() > offset + view.height {
                continue;
            }
            let rect = Rect::new(
                view.x + placed.x,
                view.y + (placed.y - offset),
                placed.width.min(view.width.saturating_sub(placed.x)),
                placed.height(),
            );
            if let Some(target) = placed.target {
                state.hit_areas.targets.push((target, rect));
            }
            frame.render_widget(Paragraph::new(placed.lines), rect);
        }
    }

    fn layout_step(&self, wizard: &FormWizard, focused: Option<&FocusTarget>, width: u16) -> Canvas {
        let mut canvas = Canvas::new(width);
        let step = wizard.current_step();

        for field in wizard.panel(step) {
            let target = FocusTarget::Field(field.key.clone());
            let is_focused = focused == Some(&target);
            canvas.push(field_lines(field, is_focused), Some(target));
            canvas.gap();
        }

        if step != WizardStep::Experience {
            return canvas;
        }

        // Tag lists: input box, add button, then removable tags
        canvas.push(vec![section_header("Skills")], None);
        push_tag_list(
            &mut canvas,
            &wizard.skills,
            focused,
            TagControls {
                prompt: "Add a skill (Enter to add)",
                empty: "No skills added yet",
                add_label: " + Add Skill ",
                input: FocusTarget::SkillInput,
                add: FocusTarget::AddSkill,
                tag: FocusTarget::SkillTag,
            },
        );
        canvas.gap();

        canvas.push(vec![section_header("Languages")], None);
        push_tag_list(
            &mut canvas,
            &wizard.languages,
            focused,
            TagControls {
                prompt: "Add a language (Enter to add)",
                empty: "No languages added yet",
                add_label: " + Add Language ",
                input: FocusTarget::LanguageInput,
                add: FocusTarget::AddLanguage,
                tag: FocusTarget::LanguageTag,
            },
        );
        canvas.gap();

        // Work experience blocks
        canvas.push(vec![section_header("Work Experience")], None);
        for block in wizard.experience.blocks() {
            canvas.push(
                vec![Line::from(Span::styled(
                    block.title(),
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                ))],
                None,
            );
            for field in &block.fields {
                let target = FocusTarget::Field(field.key.clone());
                let is_focused = focused == Some(&target);
                canvas.push(field_lines(field, is_focused), Some(target));
            }
            let remove = FocusTarget::RemoveExperience(block.index);
            let remove_focused = focused == Some(&remove);
            canvas.push_inline(vec![(chip(" Remove ", remove_focused, ERROR_RED), remove)]);
            canvas.gap();
        }
        let add = FocusTarget::AddExperience;
        let add_focused = focused == Some(&add);
        canvas.push_inline(vec![(chip(" + Add Experience ", add_focused, SELECTION_GREEN), add)]);

        canvas
    }

    /// Back / Next / Submit buttons and key hints
    fn render_navigation(&self, frame: &mut Frame, area: Rect, state: &mut AppState) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut x = inner.x + 2;
        for button in nav_buttons(state.wizard.current_step()) {
            let color = match button {
                FocusTarget::Submit => SELECTION_GREEN,
                _ => CORNFLOWER_BLUE,
            };
            let line = chip(&format!(" {} ", button.label()), state.is_focused(&button), color);
            let width = line.width() as u16;
            if x + width > inner.x + inner.width {
                break;
            }
            let rect = Rect::new(x, inner.y, width, 1);
            frame.render_widget(Paragraph::new(line), rect);
            state.hit_areas.targets.push((button, rect));
            x += width + 2;
        }

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("PgUp/PgDn", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" steps  ", Style::default().fg(MUTED_GRAY)),
            Span::styled("Ctrl+S", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" submit  ", Style::default().fg(MUTED_GRAY)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(hint, inner);
    }
}

impl Default for WizardComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED_GRAY)
    }
}

fn status_color(status: FieldStatus) -> ratatui::style::Color {
    match status {
        FieldStatus::Neutral => SOFT_WHITE,
        FieldStatus::Valid => SELECTION_GREEN,
        FieldStatus::Invalid => ERROR_RED,
    }
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("─── ", Style::default().fg(SUBDUED_BORDER)),
        Span::styled(title.to_string(), Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Span::styled(" ───", Style::default().fg(SUBDUED_BORDER)),
    ])
}

/// Focus targets and copy for one tag-list section
struct TagControls {
    prompt: &'static str,
    empty: &'static str,
    add_label: &'static str,
    input: FocusTarget,
    add: FocusTarget,
    tag: fn(String) -> FocusTarget,
}

fn push_tag_list(
    canvas: &mut Canvas,
    list: &SkillList,
    focused: Option<&FocusTarget>,
    controls: TagControls,
) {
    let input_focused = focused == Some(&controls.input);
    canvas.push(
        vec![
            Line::from(Span::styled(controls.prompt, label_style(input_focused))),
            value_line(&list.draft, input_focused, Style::default().fg(SOFT_WHITE)),
        ],
        Some(controls.input),
    );
    let add_focused = focused == Some(&controls.add);
    canvas.push_inline(vec![(
        chip(controls.add_label, add_focused, SELECTION_GREEN),
        controls.add,
    )]);

    if list.is_empty() {
        canvas.push(
            vec![Line::from(Span::styled(
                format!("  {}", controls.empty),
                Style::default().fg(MUTED_GRAY),
            ))],
            None,
        );
        return;
    }
    let chips = list
        .skills()
        .iter()
        .map(|item| {
            let target = (controls.tag)(item.clone());
            let line = chip(&format!(" {item} × "), focused == Some(&target), CORNFLOWER_BLUE);
            (line, target)
        })
        .collect();
    canvas.push_inline(chips);
}

fn chip(text: &str, focused: bool, color: ratatui::style::Color) -> Line<'static> {
    let style = if focused {
        Style::default().fg(DARK_BG).bg(GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DARK_BG).bg(color)
    };
    Line::from(Span::styled(text.to_string(), style))
}

fn value_line(value: &str, focused: bool, style: Style) -> Line<'static> {
    let marker = if focused { "  ▸ " } else { "    " };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(GOLD)),
        Span::styled(value.to_string(), style),
    ];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(GOLD)));
    }
    Line::from(spans)
}

/// Label line, value line(s) and, when invalid, the error message
fn field_lines(field: &Field, focused: bool) -> Vec<Line<'static>> {
    let value_style = Style::default().fg(status_color(field.status));
    let required = if field.required { " *" } else { "" };
    let indicator = Span::styled(
        format!(" {}", field.status.indicator()),
        Style::default().fg(status_color(field.status)),
    );

    let mut lines = Vec::new();
    match &field.kind {
        FieldKind::Checkbox => {
            let marker = if focused { "  ▸ " } else { "    " };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(GOLD)),
                Span::styled(field.display_value(), value_style),
                Span::styled(format!(" {}", field.label), label_style(focused)),
                Span::styled(required, Style::default().fg(ERROR_RED)),
                indicator,
            ]));
        }
        kind => {
            lines.push(Line::from(vec![
                Span::styled(field.label.clone(), label_style(focused)),
                Span::styled(required, Style::default().fg(ERROR_RED)),
                indicator,
            ]));
            match kind {
                FieldKind::Select { .. } => {
                    let text = if focused {
                        format!("◀ {} ▶", field.display_value())
                    } else {
                        field.display_value()
                    };
                    let marker = if focused { "  ▸ " } else { "    " };
                    lines.push(Line::from(vec![
                        Span::styled(marker, Style::default().fg(GOLD)),
                        Span::styled(text, value_style),
                    ]));
                }
                FieldKind::TextArea => {
                    let rows: Vec<&str> = field.value.split('\n').collect();
                    let last = rows.len() - 1;
                    for (i, row) in rows.iter().enumerate() {
                        lines.push(value_line(row, focused && i == last, value_style));
                    }
                }
                FieldKind::Date if field.value.is_empty() && !focused => {
                    lines.push(Line::from(Span::styled(
                        "    YYYY-MM-DD",
                        Style::default().fg(SUBDUED_BORDER),
                    )));
                }
                _ => lines.push(value_line(&field.value, focused, value_style)),
            }
        }
    }

    if field.status == FieldStatus::Invalid {
        if let Some(message) = validator::message(field) {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                Style::default().fg(ERROR_RED),
            )));
        }
    }

    lines
}
