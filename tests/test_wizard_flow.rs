// ABOUTME: End-to-end tests of the membership wizard driven through AppState and key events

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use visionhub::app::state::{View, CORRECT_ERRORS_MESSAGE, SUBMITTED_MESSAGE};
use visionhub::app::{AppState, EventHandler, FocusTarget, NotificationType};
use visionhub::config::AppConfig;
use visionhub::form::{FieldStatus, WizardStep, INCOMPLETE_STEP_MESSAGE};

fn press(state: &mut AppState, code: KeyCode) {
    press_with(state, code, KeyModifiers::NONE);
}

fn press_with(state: &mut AppState, code: KeyCode, modifiers: KeyModifiers) {
    if let Some(event) = EventHandler::handle_key_event(KeyEvent::new(code, modifiers), state) {
        EventHandler::process_event(event, state);
    }
}

fn type_text(state: &mut AppState, text: &str) {
    for ch in text.chars() {
        press(state, KeyCode::Char(ch));
    }
}

fn fill_required(state: &mut AppState) {
    for (key, value) in [
        ("first_name", "Amina"),
        ("last_name", "Mushi"),
        ("email", "amina@example.com"),
        ("phone", "+255 712 345 678"),
        ("date_of_birth", "1996-03-14"),
        ("gender", "female"),
        ("id_number", "19960314-12345"),
        ("current_address", "Plot 12, Sinza"),
        ("region", "dar-es-salaam"),
        ("district", "Ubungo"),
        ("education", "bachelor"),
        ("occupation", "Teacher"),
        ("why_join", "To learn from peers"),
        ("contribution", "Mentoring students"),
        ("expectations", "A welcoming network"),
        ("agree_terms", "on"),
    ] {
        assert!(state.wizard.set_value(key, value), "unknown field {key}");
    }
}

#[test]
fn test_empty_required_field_blocks_next() {
    let mut state = AppState::default();

    press(&mut state, KeyCode::PageDown);

    assert_eq!(state.wizard.current_step(), WizardStep::Personal);
    assert_eq!(
        state.wizard.field("first_name").unwrap().status,
        FieldStatus::Invalid
    );
    let warning = state
        .notifications
        .current()
        .iter()
        .find(|n| n.notification_type == NotificationType::Warning)
        .expect("warning toast");
    assert_eq!(warning.message, INCOMPLETE_STEP_MESSAGE);
}

#[test]
fn test_filled_step_moves_forward_and_back() {
    let mut state = AppState::default();
    fill_required(&mut state);

    press(&mut state, KeyCode::PageDown);
    assert_eq!(state.wizard.current_step(), WizardStep::Background);
    assert!(state.notifications.is_empty());

    press(&mut state, KeyCode::PageUp);
    assert_eq!(state.wizard.current_step(), WizardStep::Personal);
}

#[test]
fn test_lenient_gate_passes_malformed_email() {
    let mut state = AppState::default();
    fill_required(&mut state);
    state.wizard.set_value("email", "a@b");

    press(&mut state, KeyCode::PageDown);
    assert_eq!(state.wizard.current_step(), WizardStep::Background);
}

#[test]
fn test_strict_gate_blocks_malformed_email() {
    let mut config = AppConfig::default();
    config.wizard.enforce_format_on_next = true;
    let mut state = AppState::new(config);
    fill_required(&mut state);
    state.wizard.set_value("email", "a@b");

    press(&mut state, KeyCode::PageDown);
    assert_eq!(state.wizard.current_step(), WizardStep::Personal);
    assert!(state.is_focused(&FocusTarget::Field("email".to_string())));
}

#[test]
fn test_go_to_background_is_half_way() {
    let mut state = AppState::default();
    press_with(&mut state, KeyCode::Char('2'), KeyModifiers::ALT);

    assert_eq!(state.wizard.current_step(), WizardStep::Background);
    assert_eq!(state.wizard.progress_percent(), 50);
}

#[test]
fn test_email_validated_on_blur() {
    let mut state = AppState::default();

    // first_name -> last_name -> email
    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "a@b");
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.wizard.field("email").unwrap().status, FieldStatus::Invalid);

    // Errors clear while typing once the value is fixed
    press(&mut state, KeyCode::BackTab);
    type_text(&mut state, ".com");
    assert_eq!(state.wizard.field("email").unwrap().value, "a@b.com");
    assert_eq!(state.wizard.field("email").unwrap().status, FieldStatus::Valid);
}

#[test]
fn test_duplicate_skill_is_ignored() {
    let mut state = AppState::default();
    state.go_to_step(WizardStep::Experience);
    assert!(state.is_focused(&FocusTarget::SkillInput));

    type_text(&mut state, "Python");
    press(&mut state, KeyCode::Enter);
    type_text(&mut state, "Python");
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.wizard.skills.skills(), ["Python".to_string()]);
    assert_eq!(state.wizard.skills.hidden_value(), "Python");
}

#[test]
fn test_skill_tag_removed_with_enter() {
    let mut state = AppState::default();
    state.go_to_step(WizardStep::Experience);
    type_text(&mut state, "Python");
    press(&mut state, KeyCode::Enter);
    type_text(&mut state, "Design");
    press(&mut state, KeyCode::Enter);

    assert!(state.focus_target(&FocusTarget::SkillTag("Python".to_string())));
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.wizard.skills.skills(), ["Design".to_string()]);
    assert_eq!(state.wizard.skills.hidden_value(), "Design");
}

#[test]
fn test_languages_typed_after_skills() {
    let mut state = AppState::default();
    state.go_to_step(WizardStep::Experience);
    type_text(&mut state, "Python");
    press(&mut state, KeyCode::Enter);

    // SkillInput -> AddSkill -> Python tag -> LanguageInput
    for _ in 0..3 {
        press(&mut state, KeyCode::Tab);
    }
    assert!(state.is_focused(&FocusTarget::LanguageInput));
    type_text(&mut state, "Swahili");
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.wizard.languages.skills(), ["Swahili".to_string()]);
    assert_eq!(state.wizard.skills.skills(), ["Python".to_string()]);
    assert_eq!(
        state.wizard.to_form_data().get("languages").map(String::as_str),
        Some("Swahili")
    );
}

#[test]
fn test_experience_indices_never_reused() {
    let mut state = AppState::default();
    state.go_to_step(WizardStep::Experience);

    assert!(state.focus_target(&FocusTarget::AddExperience));
    press(&mut state, KeyCode::Enter);
    assert!(state.is_focused(&FocusTarget::Field("job_title_2".to_string())));

    assert!(state.focus_target(&FocusTarget::RemoveExperience(2)));
    press(&mut state, KeyCode::Enter);
    assert!(state.wizard.experience.block(2).is_none());

    assert!(state.focus_target(&FocusTarget::AddExperience));
    press(&mut state, KeyCode::Enter);
    let indices: Vec<u32> = state
        .wizard
        .experience
        .blocks()
        .iter()
        .map(|b| b.index)
        .collect();
    assert_eq!(indices, vec![1, 3]);
}

#[test]
fn test_toast_removed_after_lifetime_and_fade() {
    let mut state = AppState::default();
    let start = Instant::now();
    state.next_step();
    assert_eq!(state.notifications.len(), 1);

    state.tick_at(start + Duration::from_millis(4_900));
    assert_eq!(state.notifications.len(), 1);

    state.tick_at(start + Duration::from_secs(5) + Duration::from_millis(10));
    assert_eq!(state.notifications.len(), 1);
    assert!(state.notifications.current()[0].is_leaving());

    state.tick_at(start + Duration::from_secs(6));
    assert!(state.notifications.is_empty());
}

#[test]
fn test_submit_incomplete_jumps_to_first_invalid_step() {
    let mut state = AppState::default();
    fill_required(&mut state);
    state.wizard.set_value("district", "");
    state.go_to_step(WizardStep::Motivation);

    press_with(&mut state, KeyCode::Char('s'), KeyModifiers::CONTROL);

    assert_eq!(state.current_view, View::JoinForm);
    assert!(state.submitted.is_none());
    assert_eq!(state.wizard.current_step(), WizardStep::Background);
    assert!(state.is_focused(&FocusTarget::Field("district".to_string())));
    assert!(state
        .notifications
        .current()
        .iter()
        .any(|n| n.message == CORRECT_ERRORS_MESSAGE));
}

#[test]
fn test_full_submission_flow() {
    let mut state = AppState::default();
    fill_required(&mut state);

    press(&mut state, KeyCode::PageDown);
    press(&mut state, KeyCode::PageDown);
    assert_eq!(state.wizard.current_step(), WizardStep::Experience);

    type_text(&mut state, "Teaching");
    press(&mut state, KeyCode::Enter);
    state.wizard.set_value("job_title_1", "Tutor");
    state.wizard.set_value("company_1", "Sinza Secondary");

    press(&mut state, KeyCode::PageDown);
    assert_eq!(state.wizard.current_step(), WizardStep::Motivation);
    assert!(state.focus_target(&FocusTarget::Submit));
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.current_view, View::Submitted);
    let application = state.submitted.as_ref().expect("application");
    assert_eq!(application.full_name(), "Amina Mushi");
    assert_eq!(application.skills, vec!["Teaching".to_string()]);
    assert!(application.languages.is_empty());
    assert_eq!(application.work_experience.len(), 1);
    assert!(application.agree_terms);
    assert!(state
        .notifications
        .current()
        .iter()
        .any(|n| n.message == SUBMITTED_MESSAGE && n.notification_type == NotificationType::Success));

    // Any of q / Esc / Enter leaves the thank-you screen
    press(&mut state, KeyCode::Char('q'));
    assert!(state.should_quit);
}
