// ABOUTME: Focus targets for the join form - every element the user can tab to or click
// Each target carries the key of the entity it acts on, so activating it touches only that entity

use crate::form::{FormWizard, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    /// A form field, static or inside an experience block
    Field(String),
    /// The "add a skill" input box
    SkillInput,
    /// Adds whatever is typed in the skill input
    AddSkill,
    /// A skill tag; activating it removes exactly this skill
    SkillTag(String),
    LanguageInput,
    AddLanguage,
    LanguageTag(String),
    AddExperience,
    /// Remove control of the experience block with this index
    RemoveExperience(u32),
    Back,
    Next,
    Submit,
}

impl FocusTarget {
    pub fn field_key(&self) -> Option<&str> {
        match self {
            Self::Field(key) => Some(key),
            _ => None,
        }
    }

    /// Buttons fire on click; inputs only take focus
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            Self::AddSkill
                | Self::SkillTag(_)
                | Self::AddLanguage
                | Self::LanguageTag(_)
                | Self::AddExperience
                | Self::RemoveExperience(_)
                | Self::Back
                | Self::Next
                | Self::Submit
        )
    }

    pub fn label(&self) -> String {
        match self {
            Self::Field(key) => key.clone(),
            Self::SkillInput => "Add skill".to_string(),
            Self::AddSkill => "+ Add Skill".to_string(),
            Self::SkillTag(skill) => format!("{skill} ×"),
            Self::LanguageInput => "Add language".to_string(),
            Self::AddLanguage => "+ Add Language".to_string(),
            Self::LanguageTag(language) => format!("{language} ×"),
            Self::AddExperience => "+ Add Experience".to_string(),
            Self::RemoveExperience(_) => "Remove".to_string(),
            Self::Back => "← Back".to_string(),
            Self::Next => "Next →".to_string(),
            Self::Submit => "Submit Application".to_string(),
        }
    }
}

/// Tab order of the current step
pub fn focus_targets(wizard: &FormWizard) -> Vec<FocusTarget> {
    let step = wizard.current_step();
    let mut targets: Vec<FocusTarget> = wizard
        .panel(step)
        .iter()
        .map(|f| FocusTarget::Field(f.key.clone()))
        .collect();

    if step == WizardStep::Experience {
        targets.push(FocusTarget::SkillInput);
        targets.push(FocusTarget::AddSkill);
        targets.extend(
            wizard
                .skills
                .skills()
                .iter()
                .map(|s| FocusTarget::SkillTag(s.clone())),
        );
        targets.push(FocusTarget::LanguageInput);
        targets.push(FocusTarget::AddLanguage);
        targets.extend(
            wizard
                .languages
                .skills()
                .iter()
                .map(|l| FocusTarget::LanguageTag(l.clone())),
        );
        for block in wizard.experience.blocks() {
            targets.extend(block.fields.iter().map(|f| FocusTarget::Field(f.key.clone())));
            targets.push(FocusTarget::RemoveExperience(block.index));
        }
        targets.push(FocusTarget::AddExperience);
    }

    targets.extend(nav_buttons(step));
    targets
}

/// Footer buttons for a step
pub fn nav_buttons(step: WizardStep) -> Vec<FocusTarget> {
    let mut buttons = Vec::new();
    if step.previous().is_some() {
        buttons.push(FocusTarget::Back);
    }
    if step.is_last() {
        buttons.push(FocusTarget::Submit);
    } else {
        buttons.push(FocusTarget::Next);
    }
    buttons
}
