// ABOUTME: Event handling system for keyboard input and app actions

use crate::app::{
    state::{MenuItem, View},
    AppState,
};
use crate::form::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    ToggleMenu,
    ToggleChat,
    // Esc: closes help, menu, chat, or the newest toast
    CloseOverlay,
    // Menu navigation
    MenuUp,
    MenuDown,
    MenuSelect,
    MenuActivate(MenuItem),
    // Form focus and editing
    FocusNext,
    FocusPrev,
    InputChar(char),
    Backspace,
    Paste(String),
    Activate,
    CycleOption { forward: bool },
    ToggleCheckbox,
    // Wizard navigation
    NextStep,
    PrevStep,
    GoToStep(WizardStep),
    Submit,
    // Chat
    ChatInputChar(char),
    ChatBackspace,
    ChatSend,
    // Terminal events
    MouseClick { x: u16, y: u16 },
    Resize { width: u16, height: u16 },
}

pub struct EventHandler;

impl EventHandler {
    /// Get text from system clipboard
    fn get_clipboard_text() -> Result<String, Box<dyn std::error::Error>> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        let text = clipboard.get_text()?;
        Ok(text)
    }

    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys work from any view
        match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return Some(AppEvent::Quit),
            KeyCode::Char('v') if ctrl => {
                return match Self::get_clipboard_text() {
                    Ok(text) => Some(AppEvent::Paste(text)),
                    Err(e) => {
                        warn!("Clipboard unavailable: {}", e);
                        None
                    }
                };
            }
            KeyCode::F(1) => return Some(AppEvent::ToggleHelp),
            KeyCode::F(2) => return Some(AppEvent::ToggleMenu),
            KeyCode::F(3) => return Some(AppEvent::ToggleChat),
            _ => {}
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if state.menu.open {
            return Self::handle_menu_keys(key_event);
        }

        match state.current_view {
            View::Chat => Self::handle_chat_keys(key_event),
            View::Submitted => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Some(AppEvent::Quit),
                _ => None,
            },
            View::JoinForm => Self::handle_form_keys(key_event, state),
        }
    }

    fn handle_menu_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::CloseOverlay),
            KeyCode::Up | KeyCode::BackTab => Some(AppEvent::MenuUp),
            KeyCode::Down | KeyCode::Tab => Some(AppEvent::MenuDown),
            KeyCode::Enter => Some(AppEvent::MenuSelect),
            _ => None,
        }
    }

    fn handle_chat_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::CloseOverlay),
            KeyCode::Enter => Some(AppEvent::ChatSend),
            KeyCode::Backspace => Some(AppEvent::ChatBackspace),
            KeyCode::Char(ch) => Some(AppEvent::ChatInputChar(ch)),
            _ => None,
        }
    }

    fn handle_form_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let modifiers = key_event.modifiers;

        if modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(ch @ '1'..='9') = key_event.code {
                let index = ch as usize - '1' as usize;
                return WizardStep::from_index(index).map(AppEvent::GoToStep);
            }
        }

        match key_event.code {
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Submit)
            }
            KeyCode::Esc => Some(AppEvent::CloseOverlay),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::FocusPrev),
            KeyCode::PageDown => Some(AppEvent::NextStep),
            KeyCode::PageUp => Some(AppEvent::PrevStep),
            KeyCode::Left if state.focused_is_select() => {
                Some(AppEvent::CycleOption { forward: false })
            }
            KeyCode::Right if state.focused_is_select() => {
                Some(AppEvent::CycleOption { forward: true })
            }
            KeyCode::Enter => Some(AppEvent::Activate),
            KeyCode::Char(' ') if state.focused_is_checkbox() => Some(AppEvent::ToggleCheckbox),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::InputChar(ch))
            }
            _ => None,
        }
    }

    /// Only left-button presses matter; everything is a click at a cell
    pub fn handle_mouse_event(mouse_event: MouseEvent) -> Option<AppEvent> {
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::MouseClick {
                x: mouse_event.column,
                y: mouse_event.row,
            }),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Event: {:?}", event);
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::ToggleMenu => state.toggle_menu(),
            AppEvent::ToggleChat => state.toggle_chat(),
            AppEvent::CloseOverlay => state.close_overlay(),
            AppEvent::MenuUp => state.menu.select_prev(),
            AppEvent::MenuDown => state.menu.select_next(),
            AppEvent::MenuSelect => {
                let item = state.menu.current();
                state.activate_menu_item(item);
            }
            AppEvent::MenuActivate(item) => state.activate_menu_item(item),
            AppEvent::FocusNext => state.focus_next(),
            AppEvent::FocusPrev => state.focus_prev(),
            AppEvent::InputChar(ch) => state.input_char(ch),
            AppEvent::Backspace => state.backspace(),
            AppEvent::Paste(text) => state.paste(&text),
            AppEvent::Activate => state.activate(),
            AppEvent::CycleOption { forward } => state.cycle_option(forward),
            AppEvent::ToggleCheckbox => state.toggle_checkbox(),
            AppEvent::NextStep => state.next_step(),
            AppEvent::PrevStep => state.prev_step(),
            AppEvent::GoToStep(step) => state.go_to_step(step),
            AppEvent::Submit => state.submit(),
            AppEvent::ChatInputChar(ch) => state.chat.push_char(ch),
            AppEvent::ChatBackspace => state.chat.backspace(),
            AppEvent::ChatSend => state.chat_send(),
            AppEvent::MouseClick { x, y } => state.handle_click(x, y),
            AppEvent::Resize { width, .. } => state.handle_resize(width),
        }
    }
}
