// ABOUTME: Application state - join form wizard, toasts, chat, navigation menu and click targets

use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::focus::{focus_targets, FocusTarget};
use super::notifications::{NotificationId, NotificationPresenter};
use crate::chat::ChatState;
use crate::config::AppConfig;
use crate::form::{
    FieldKind, FormWizard, MembershipApplication, SubmissionError, Transition, WizardStep,
    INCOMPLETE_STEP_MESSAGE,
};

pub const SUBMITTED_MESSAGE: &str = "Your application has been submitted successfully!";
pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the highlighted fields before submitting.";
pub const EXPERIENCE_LIMIT_MESSAGE: &str = "No more experience entries can be added.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    JoinForm,
    Chat,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    MembershipForm,
    CommunityChat,
    Help,
    Quit,
}

impl MenuItem {
    pub fn all() -> &'static [MenuItem] {
        &[
            MenuItem::MembershipForm,
            MenuItem::CommunityChat,
            MenuItem::Help,
            MenuItem::Quit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::MembershipForm => "Membership form",
            MenuItem::CommunityChat => "Community chat",
            MenuItem::Help => "Help",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
    pub selected: usize,
}

impl MenuState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::all().len();
    }

    pub fn select_prev(&mut self) {
        let len = MenuItem::all().len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn current(&self) -> MenuItem {
        MenuItem::all()[self.selected % MenuItem::all().len()]
    }
}

/// Screen regions recorded during the last render, used to route mouse clicks
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub step_tabs: Vec<(WizardStep, Rect)>,
    pub toasts: Vec<(NotificationId, Rect)>,
    pub targets: Vec<(FocusTarget, Rect)>,
    pub menu: Option<Rect>,
    pub menu_items: Vec<(MenuItem, Rect)>,
}

impl HitAreas {
    pub fn clear(&mut self) {
        self.step_tabs.clear();
        self.toasts.clear();
        self.targets.clear();
        self.menu = None;
        self.menu_items.clear();
    }
}

/// Point-in-rect test used to route mouse clicks
pub fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub wizard: FormWizard,
    pub notifications: NotificationPresenter,
    pub chat: ChatState,
    pub menu: MenuState,
    pub current_view: View,
    pub help_visible: bool,
    pub should_quit: bool,
    /// Index into `focus_targets()` of the current step
    pub focus_index: usize,
    pub hit_areas: HitAreas,
    pub submitted: Option<MembershipApplication>,
    pub terminal_width: u16,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let wizard = FormWizard::new().with_format_enforcement(config.wizard.enforce_format_on_next);
        let notifications = NotificationPresenter::from_config(&config.notifications);
        let chat =
            ChatState::with_keyword_responder(Duration::from_millis(config.chat.reply_delay_ms));
        Self {
            config,
            wizard,
            notifications,
            chat,
            menu: MenuState::default(),
            current_view: View::JoinForm,
            help_visible: false,
            should_quit: false,
            focus_index: 0,
            hit_areas: HitAreas::default(),
            submitted: None,
            terminal_width: 0,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
    }

    pub fn toggle_chat(&mut self) {
        self.current_view = match self.current_view {
            View::Chat => View::JoinForm,
            _ => View::Chat,
        };
    }

    pub fn activate_menu_item(&mut self, item: MenuItem) {
        debug!("Menu item selected: {:?}", item);
        self.menu.close();
        match item {
            MenuItem::MembershipForm => {
                if self.submitted.is_none() {
                    self.current_view = View::JoinForm;
                }
            }
            MenuItem::CommunityChat => self.current_view = View::Chat,
            MenuItem::Help => self.help_visible = true,
            MenuItem::Quit => self.quit(),
        }
    }

    /// Esc: close the topmost overlay, otherwise the newest toast
    pub fn close_overlay(&mut self) {
        if self.help_visible {
            self.help_visible = false;
        } else if self.menu.open {
            self.menu.close();
        } else if self.current_view == View::Chat {
            self.current_view = if self.submitted.is_some() {
                View::Submitted
            } else {
                View::JoinForm
            };
        } else {
            self.notifications.dismiss_newest();
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        focus_targets(&self.wizard)
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        let targets = self.focus_targets();
        targets
            .get(self.focus_index.min(targets.len().saturating_sub(1)))
            .cloned()
    }

    pub fn is_focused(&self, target: &FocusTarget) -> bool {
        self.focused().as_ref() == Some(target)
    }

    fn focused_field_key(&self) -> Option<String> {
        self.focused().and_then(|t| t.field_key().map(String::from))
    }

    /// Move focus by one, validating the field being left
    pub fn focus_next(&mut self) {
        self.move_focus(true);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(false);
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.focus_targets().len();
        if len == 0 {
            return;
        }
        let current = self.focus_index.min(len - 1);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.set_focus_index(next);
    }

    fn set_focus_index(&mut self, index: usize) {
        if let Some(key) = self.focused_field_key() {
            self.wizard.blur_field(&key);
        }
        self.focus_index = index;
    }

    /// Focus a specific target if it is on the current step
    pub fn focus_target(&mut self, target: &FocusTarget) -> bool {
        match self.focus_targets().iter().position(|t| t == target) {
            Some(index) => {
                if index != self.focus_index {
                    self.set_focus_index(index);
                }
                true
            }
            None => false,
        }
    }

    fn clamp_focus(&mut self) {
        let len = self.focus_targets().len();
        self.focus_index = self.focus_index.min(len.saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn input_char(&mut self, c: char) {
        match self.focused() {
            Some(FocusTarget::Field(key)) => {
                if let Some(field) = self.wizard.field_mut(&key) {
                    if field.push_char(c) {
                        self.wizard.input_field(&key);
                    }
                }
            }
            Some(FocusTarget::SkillInput) => self.wizard.skills.draft.push(c),
            Some(FocusTarget::LanguageInput) => self.wizard.languages.draft.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focused() {
            Some(FocusTarget::Field(key)) => {
                if let Some(field) = self.wizard.field_mut(&key) {
                    if field.backspace() {
                        self.wizard.input_field(&key);
                    }
                }
            }
            Some(FocusTarget::SkillInput) => {
                self.wizard.skills.draft.pop();
            }
            Some(FocusTarget::LanguageInput) => {
                self.wizard.languages.draft.pop();
            }
            _ => {}
        }
    }

    pub fn paste(&mut self, text: &str) {
        if self.current_view == View::Chat {
            self.chat.push_str(text);
            return;
        }
        match self.focused() {
            Some(FocusTarget::Field(key)) => {
                if let Some(field) = self.wizard.field_mut(&key) {
                    if field.push_str(text) {
                        self.wizard.input_field(&key);
                    }
                }
            }
            Some(FocusTarget::SkillInput) => self
                .wizard
                .skills
                .draft
                .extend(text.chars().filter(|c| *c != '\n' && *c != '\r')),
            Some(FocusTarget::LanguageInput) => self
                .wizard
                .languages
                .draft
                .extend(text.chars().filter(|c| *c != '\n' && *c != '\r')),
            _ => {}
        }
    }

    pub fn cycle_option(&mut self, forward: bool) {
        if let Some(key) = self.focused_field_key() {
            if let Some(field) = self.wizard.field_mut(&key) {
                if field.cycle_option(forward) {
                    self.wizard.input_field(&key);
                }
            }
        }
    }

    pub fn toggle_checkbox(&mut self) {
        if let Some(key) = self.focused_field_key() {
            if let Some(field) = self.wizard.field_mut(&key) {
                if field.toggle() {
                    self.wizard.input_field(&key);
                }
            }
        }
    }

    /// Whether Space should toggle instead of typing
    pub fn focused_is_checkbox(&self) -> bool {
        self.focused_field_key()
            .and_then(|key| self.wizard.field(&key).map(|f| f.kind == FieldKind::Checkbox))
            .unwrap_or(false)
    }

    pub fn focused_is_select(&self) -> bool {
        self.focused_field_key()
            .and_then(|key| {
                self.wizard
                    .field(&key)
                    .map(|f| matches!(f.kind, FieldKind::Select { .. }))
            })
            .unwrap_or(false)
    }

    /// Enter on the focused element
    pub fn activate(&mut self) {
        let Some(target) = self.focused() else {
            return;
        };
        match target {
            FocusTarget::Field(key) => {
                let kind = self.wizard.field(&key).map(|f| f.kind.clone());
                match kind {
                    Some(FieldKind::TextArea) => self.input_char('\n'),
                    Some(FieldKind::Checkbox) => self.toggle_checkbox(),
                    _ => self.focus_next(),
                }
            }
            FocusTarget::SkillInput | FocusTarget::AddSkill => self.add_skill(),
            FocusTarget::SkillTag(skill) => self.remove_skill(&skill),
            FocusTarget::LanguageInput | FocusTarget::AddLanguage => self.add_language(),
            FocusTarget::LanguageTag(language) => self.remove_language(&language),
            FocusTarget::AddExperience => self.add_experience(),
            FocusTarget::RemoveExperience(index) => self.remove_experience(index),
            FocusTarget::Back => self.prev_step(),
            FocusTarget::Next => self.next_step(),
            FocusTarget::Submit => self.submit(),
        }
    }

    // ------------------------------------------------------------------
    // Repeatable sections
    // ------------------------------------------------------------------

    /// Add the typed skill; empty and duplicate input are ignored
    pub fn add_skill(&mut self) {
        if let Some(skill) = self.wizard.skills.commit_draft() {
            debug!("Added skill '{}'", skill);
        }
    }

    pub fn remove_skill(&mut self, skill: &str) {
        if self.wizard.skills.remove(skill) {
            debug!("Removed skill '{}'", skill);
            self.clamp_focus();
        }
    }

    pub fn add_language(&mut self) {
        if let Some(language) = self.wizard.languages.commit_draft() {
            debug!("Added language '{}'", language);
        }
    }

    pub fn remove_language(&mut self, language: &str) {
        if self.wizard.languages.remove(language) {
            debug!("Removed language '{}'", language);
            self.clamp_focus();
        }
    }

    /// Append an experience block and focus its first field
    pub fn add_experience(&mut self) {
        let Some(index) = self.wizard.experience.add() else {
            warn!("Experience block limit reached");
            self.notifications.warning(EXPERIENCE_LIMIT_MESSAGE);
            return;
        };
        debug!("Added experience block {}", index);
        self.focus_target(&FocusTarget::Field(format!("job_title_{index}")));
    }

    pub fn remove_experience(&mut self, index: u32) {
        if self.wizard.experience.remove(index) {
            debug!("Removed experience block {}", index);
            self.clamp_focus();
        }
    }

    // ------------------------------------------------------------------
    // Step navigation
    // ------------------------------------------------------------------

    /// Gated move to the following step
    pub fn next_step(&mut self) {
        let Some(target) = self.wizard.current_step().next() else {
            return;
        };
        match self.wizard.next(target) {
            Transition::Moved { .. } => self.focus_index = 0,
            Transition::Blocked { invalid, .. } => {
                self.notifications.warning(INCOMPLETE_STEP_MESSAGE);
                if let Some(first) = invalid.first() {
                    self.focus_target(&FocusTarget::Field(first.clone()));
                }
            }
        }
    }

    pub fn prev_step(&mut self) {
        if let Some(target) = self.wizard.current_step().previous() {
            self.blur_focused();
            self.wizard.prev(target);
            self.focus_index = 0;
        }
    }

    /// Unconditional jump, as from a step tab
    pub fn go_to_step(&mut self, step: WizardStep) {
        self.blur_focused();
        self.wizard.go_to(step);
        self.focus_index = 0;
    }

    fn blur_focused(&mut self) {
        if let Some(key) = self.focused_field_key() {
            self.wizard.blur_field(&key);
        }
    }

    /// Full validation; on success the application is kept and the thank-you view shown
    pub fn submit(&mut self) {
        if self.submitted.is_some() {
            return;
        }
        match MembershipApplication::from_wizard(&mut self.wizard) {
            Ok(application) => {
                info!(
                    "Membership application {} submitted for {}",
                    application.id,
                    application.full_name()
                );
                self.notifications.success(SUBMITTED_MESSAGE);
                self.submitted = Some(application);
                self.current_view = View::Submitted;
            }
            Err(err) => {
                warn!("Submission refused: {}", err);
                let SubmissionError::Incomplete { step, fields } = err;
                self.wizard.go_to(step);
                self.focus_index = 0;
                if let Some(first) = fields.first() {
                    self.focus_target(&FocusTarget::Field(first.clone()));
                }
                self.notifications.warning(CORRECT_ERRORS_MESSAGE);
            }
        }
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    pub fn chat_send(&mut self) {
        if self.chat.send() {
            debug!("Chat message sent");
        }
    }

    // ------------------------------------------------------------------
    // Terminal events
    // ------------------------------------------------------------------

    pub fn handle_resize(&mut self, width: u16) {
        self.terminal_width = width;
        if self.menu.open && width >= self.config.ui.menu_breakpoint {
            debug!("Closing menu on resize to {} columns", width);
            self.menu.close();
        }
    }

    /// Route a left click using the regions of the last render
    pub fn handle_click(&mut self, x: u16, y: u16) {
        let toast = self
            .hit_areas
            .toasts
            .iter()
            .find(|(_, rect)| rect_contains(*rect, x, y))
            .map(|(id, _)| *id);
        if let Some(id) = toast {
            self.notifications.dismiss(id);
            return;
        }

        if self.menu.open {
            let item = self
                .hit_areas
                .menu_items
                .iter()
                .find(|(_, rect)| rect_contains(*rect, x, y))
                .map(|(item, _)| *item);
            match item {
                Some(item) => self.activate_menu_item(item),
                None => {
                    let inside = self
                        .hit_areas
                        .menu
                        .is_some_and(|rect| rect_contains(rect, x, y));
                    if !inside {
                        self.menu.close();
                    }
                }
            }
            return;
        }

        if self.help_visible {
            self.help_visible = false;
            return;
        }

        if self.current_view != View::JoinForm {
            return;
        }

        let tab = self
            .hit_areas
            .step_tabs
            .iter()
            .find(|(_, rect)| rect_contains(*rect, x, y))
            .map(|(step, _)| *step);
        if let Some(step) = tab {
            self.go_to_step(step);
            return;
        }

        let target = self
            .hit_areas
            .targets
            .iter()
            .find(|(_, rect)| rect_contains(*rect, x, y))
            .map(|(target, _)| target.clone());
        if let Some(target) = target {
            if self.focus_target(&target) && (target.is_button() || self.focused_is_checkbox()) {
                self.activate();
            }
        }
    }

    /// Advance timers to `now`: toast lifecycles and arrived chat replies
    pub fn tick_at(&mut self, now: Instant) {
        self.notifications.tick_at(now);
        self.chat.drain_replies();
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    pub async fn tick(&mut self) -> anyhow::Result<()> {
        self.state.tick_at(Instant::now());
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
