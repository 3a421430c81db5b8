// ABOUTME: Form wizard controller - owns the current step, gates forward moves behind validation
// and exposes the form as flat key/value data

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::experience::{ExperienceList, EXPERIENCE_PREFIXES, MAX_EXPERIENCE_INDEX};
use super::field::{Field, FieldStatus};
use super::skills::{SkillList, LANGUAGES_FIELD, SKILLS_FIELD};
use super::steps::WizardStep;
use super::validator;

/// Message raised when a forward move is refused
pub const INCOMPLETE_STEP_MESSAGE: &str = "Please fill in all required fields before proceeding.";

/// Outcome of a step transition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved {
        from: WizardStep,
        to: WizardStep,
    },
    /// The gate refused the move; `invalid` lists offending field keys
    Blocked {
        step: WizardStep,
        invalid: Vec<String>,
    },
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Multi-step form state machine.
///
/// Only `go_to`, `next` and `prev` change the current step, and the current
/// step is always one of `WizardStep::all()`.
#[derive(Debug, Clone)]
pub struct FormWizard {
    current: WizardStep,
    panels: Vec<Vec<Field>>,
    pub skills: SkillList,
    pub languages: SkillList,
    pub experience: ExperienceList,
    enforce_format_on_next: bool,
}

impl FormWizard {
    pub fn new() -> Self {
        Self {
            current: WizardStep::Personal,
            panels: WizardStep::all().iter().map(WizardStep::fields).collect(),
            skills: SkillList::new(),
            languages: SkillList::new(),
            experience: ExperienceList::new(),
            enforce_format_on_next: false,
        }
    }

    /// Run the full field validator, not just presence, when gating `next`
    pub fn with_format_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_format_on_next = enforce;
        self
    }

    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    /// Unconditional jump, as when a step indicator is clicked
    pub fn go_to(&mut self, target: WizardStep) -> Transition {
        let from = self.current;
        self.current = target;
        debug!("Wizard moved {} -> {}", from, target);
        Transition::Moved { from, to: target }
    }

    /// Gated forward move: only proceeds when the current step validates
    pub fn next(&mut self, target: WizardStep) -> Transition {
        let step = self.current;
        let invalid = self.validate_step(step);
        if invalid.is_empty() {
            info!("Step '{}' complete, advancing to '{}'", step, target);
            self.go_to(target)
        } else {
            warn!(
                "Refusing to leave step '{}': {} field(s) incomplete",
                step,
                invalid.len()
            );
            Transition::Blocked { step, invalid }
        }
    }

    /// Backward move, never gated
    pub fn prev(&mut self, target: WizardStep) -> Transition {
        self.go_to(target)
    }

    /// Progress as a ratio in (0, 1]
    pub fn progress_ratio(&self) -> f64 {
        (self.current.index() + 1) as f64 / WizardStep::total() as f64
    }

    pub fn progress_percent(&self) -> u16 {
        (self.progress_ratio() * 100.0).round() as u16
    }

    /// Presence check over the step's required fields (including experience
    /// block fields). Empty ones are marked invalid; filled ones lose any
    /// error marker. With format enforcement on, the full validator runs
    /// instead. Returns the keys of invalid fields.
    pub fn validate_step(&mut self, step: WizardStep) -> Vec<String> {
        let enforce = self.enforce_format_on_next;
        let mut invalid = Vec::new();

        for field in self.step_fields_mut(step) {
            if enforce {
                if !validator::apply(field) {
                    invalid.push(field.key.clone());
                }
                continue;
            }
            if !field.required {
                continue;
            }
            if field.is_empty() {
                field.status = FieldStatus::Invalid;
                invalid.push(field.key.clone());
            } else if field.status == FieldStatus::Invalid {
                field.status = FieldStatus::Neutral;
            }
        }

        invalid
    }

    /// Full validator over every field of every step. Returns the first
    /// step holding an invalid field together with its keys.
    pub fn validate_all(&mut self) -> Option<(WizardStep, Vec<String>)> {
        let mut first: Option<(WizardStep, Vec<String>)> = None;
        for step in WizardStep::all() {
            let invalid: Vec<String> = self
                .step_fields_mut(*step)
                .into_iter()
                .filter_map(|f| (!validator::apply(f)).then(|| f.key.clone()))
                .collect();
            if first.is_none() && !invalid.is_empty() {
                first = Some((*step, invalid));
            }
        }
        first
    }

    /// First step holding a field the full validator rejects. Does not mark fields.
    pub fn first_invalid_step(&self) -> Option<WizardStep> {
        WizardStep::all()
            .iter()
            .find(|step| {
                self.step_fields(**step)
                    .iter()
                    .any(|f| validator::violation(f).is_some())
            })
            .copied()
    }

    /// Fields shown in a step's panel, in display order
    pub fn step_fields(&self, step: WizardStep) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.panels[step.index()].iter().collect();
        if step == WizardStep::Experience {
            fields.extend(self.experience.blocks().iter().flat_map(|b| b.fields.iter()));
        }
        fields
    }

    fn step_fields_mut(&mut self, step: WizardStep) -> Vec<&mut Field> {
        let mut fields: Vec<&mut Field> = self.panels[step.index()].iter_mut().collect();
        if step == WizardStep::Experience {
            fields.extend(
                self.experience
                    .blocks_mut()
                    .iter_mut()
                    .flat_map(|b| b.fields.iter_mut()),
            );
        }
        fields
    }

    /// Static fields of a step, without repeatable sections
    pub fn panel(&self, step: WizardStep) -> &[Field] {
        &self.panels[step.index()]
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.panels
            .iter()
            .flatten()
            .chain(self.experience.blocks().iter().flat_map(|b| b.fields.iter()))
            .find(|f| f.key == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.panels
            .iter_mut()
            .flatten()
            .chain(
                self.experience
                    .blocks_mut()
                    .iter_mut()
                    .flat_map(|b| b.fields.iter_mut()),
            )
            .find(|f| f.key == key)
    }

    /// Step whose panel contains the field
    pub fn step_of(&self, key: &str) -> Option<WizardStep> {
        WizardStep::all()
            .iter()
            .find(|step| self.step_fields(**step).iter().any(|f| f.key == key))
            .copied()
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.field_mut(key) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Focus left the field: run the full validator
    pub fn blur_field(&mut self, key: &str) -> Option<FieldStatus> {
        let field = self.field_mut(key)?;
        validator::apply(field);
        Some(field.status)
    }

    /// Value edited: revalidate only while the field is marked invalid,
    /// so stale errors clear as the user types
    pub fn input_field(&mut self, key: &str) -> Option<FieldStatus> {
        let field = self.field_mut(key)?;
        if field.status == FieldStatus::Invalid {
            validator::apply(field);
        }
        Some(field.status)
    }

    /// Flat key/value view of the form, as a browser would post it.
    /// Includes the comma-joined `skills` and `languages` mirrors and the generated
    /// experience field names.
    pub fn to_form_data(&self) -> BTreeMap<String, String> {
        let mut data: BTreeMap<String, String> = self
            .panels
            .iter()
            .flatten()
            .map(|f| (f.key.clone(), f.value.clone()))
            .collect();
        for block in self.experience.blocks() {
            for field in &block.fields {
                data.insert(field.key.clone(), field.value.clone());
            }
        }
        data.insert(SKILLS_FIELD.to_string(), self.skills.hidden_value().to_string());
        data.insert(LANGUAGES_FIELD.to_string(), self.languages.hidden_value().to_string());
        data
    }

    /// Rebuild a wizard from flat form data. Unknown keys are ignored.
    /// Experience blocks are recreated for every index that has any
    /// generated field present, so gaps left by removed blocks survive.
    /// `skills` and `languages` accept either a JSON array or the
    /// comma-joined mirror, so a single bare name is a one-item list.
    pub fn from_form_data(data: &BTreeMap<String, String>) -> Self {
        let mut wizard = Self::new();
        wizard.experience = ExperienceList::empty();

        let mut indices: Vec<u32> = data
            .keys()
            .filter_map(|key| experience_index(key))
            .collect();
        indices.sort_unstable();
        indices.dedup();
        for index in indices {
            wizard.experience.insert_with_index(index);
        }
        if wizard.experience.is_empty() {
            wizard.experience = ExperienceList::new();
        }

        for (key, value) in data {
            if key == SKILLS_FIELD {
                for skill in parse_tags(value) {
                    wizard.skills.add(&skill);
                }
            } else if key == LANGUAGES_FIELD {
                for language in parse_tags(value) {
                    wizard.languages.add(&language);
                }
            } else {
                wizard.set_value(key, value.clone());
            }
        }

        wizard
    }
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// `company_3` -> `Some(3)` for any generated experience name
fn experience_index(key: &str) -> Option<u32> {
    EXPERIENCE_PREFIXES.iter().find_map(|prefix| {
        key.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| (1..=MAX_EXPERIENCE_INDEX).contains(n))
    })
}

fn parse_tags(raw: &str) -> Vec<String> {
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list;
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fill_personal(wizard: &mut FormWizard) {
        wizard.set_value("first_name", "Amina");
        wizard.set_value("last_name", "Mushi");
        wizard.set_value("email", "amina@example.com");
        wizard.set_value("phone", "+255 712 345 678");
        wizard.set_value("date_of_birth", "1996-03-14");
        wizard.set_value("gender", "female");
        wizard.set_value("id_number", "19960314-12345");
    }

    #[test]
    fn test_initial_state() {
        let wizard = FormWizard::new();
        assert_eq!(wizard.current_step(), WizardStep::Personal);
        assert_eq!(wizard.progress_percent(), 25);
    }

    #[test]
    fn test_go_to_background_sets_half_progress() {
        let mut wizard = FormWizard::new();
        assert!(wizard.go_to(WizardStep::Background).is_moved());
        assert_eq!(wizard.current_step(), WizardStep::Background);
        assert_eq!(wizard.progress_percent(), 50);
    }

    #[test]
    fn test_next_blocked_on_empty_required_field() {
        let mut wizard = FormWizard::new();
        fill_personal(&mut wizard);
        wizard.set_value("id_number", "   ");

        let result = wizard.next(WizardStep::Background);
        assert_eq!(
            result,
            Transition::Blocked {
                step: WizardStep::Personal,
                invalid: vec!["id_number".to_string()],
            }
        );
        assert_eq!(wizard.current_step(), WizardStep::Personal);
        assert_eq!(wizard.field("id_number").unwrap().status, FieldStatus::Invalid);
    }

    #[test]
    fn test_next_succeeds_when_required_fields_present() {
        let mut wizard = FormWizard::new();
        fill_personal(&mut wizard);
        assert!(wizard.next(WizardStep::Background).is_moved());
        assert_eq!(wizard.current_step(), WizardStep::Background);
    }

    #[test]
    fn test_presence_gate_ignores_format_by_default() {
        let mut wizard = FormWizard::new();
        fill_personal(&mut wizard);
        wizard.set_value("email", "a@b");
        assert!(wizard.next(WizardStep::Background).is_moved());
    }

    #[test]
    fn test_format_enforcement_blocks_bad_email() {
        let mut wizard = FormWizard::new().with_format_enforcement(true);
        fill_personal(&mut wizard);
        wizard.set_value("email", "a@b");
        let result = wizard.next(WizardStep::Background);
        assert!(!result.is_moved());
        assert_eq!(wizard.field("email").unwrap().status, FieldStatus::Invalid);
    }

    #[test]
    fn test_filled_field_loses_error_marker() {
        let mut wizard = FormWizard::new();
        wizard.next(WizardStep::Background);
        assert_eq!(wizard.field("first_name").unwrap().status, FieldStatus::Invalid);

        wizard.set_value("first_name", "Amina");
        wizard.next(WizardStep::Background);
        assert_eq!(wizard.field("first_name").unwrap().status, FieldStatus::Neutral);
    }

    #[test]
    fn test_next_iff_required_present_for_every_step() {
        for step in WizardStep::all() {
            let Some(target) = step.next() else { continue };
            let mut wizard = FormWizard::new();
            wizard.go_to(*step);
            let required: Vec<String> = wizard
                .step_fields(*step)
                .iter()
                .filter(|f| f.required)
                .map(|f| f.key.clone())
                .collect();

            let moved = wizard.next(target).is_moved();
            assert_eq!(moved, required.is_empty(), "step {}", step);

            for key in &required {
                wizard.set_value(key, "x");
            }
            wizard.go_to(*step);
            assert!(wizard.next(target).is_moved(), "step {}", step);
        }
    }

    #[test]
    fn test_prev_is_never_gated() {
        let mut wizard = FormWizard::new();
        wizard.go_to(WizardStep::Motivation);
        assert!(wizard.prev(WizardStep::Experience).is_moved());
        assert_eq!(wizard.current_step(), WizardStep::Experience);
    }

    #[test]
    fn test_blur_and_input_validation() {
        let mut wizard = FormWizard::new();
        wizard.set_value("email", "a@b");
        assert_eq!(wizard.blur_field("email"), Some(FieldStatus::Invalid));

        wizard.set_value("email", "a@b.com");
        assert_eq!(wizard.input_field("email"), Some(FieldStatus::Valid));

        // Input on a neutral field does not validate yet
        wizard.set_value("phone", "12");
        assert_eq!(wizard.input_field("phone"), Some(FieldStatus::Neutral));
        assert_eq!(wizard.blur_field("missing"), None);
    }

    #[test]
    fn test_experience_fields_are_reachable_by_key() {
        let mut wizard = FormWizard::new();
        let idx = wizard.experience.add().unwrap();
        assert!(wizard.set_value(&format!("company_{idx}"), "Vision Hub"));
        assert_eq!(wizard.step_of("company_2"), Some(WizardStep::Experience));
        assert_eq!(wizard.step_of("email"), Some(WizardStep::Personal));
    }

    #[test]
    fn test_form_data_round_trip_keeps_index_gaps() {
        let mut wizard = FormWizard::new();
        fill_personal(&mut wizard);
        wizard.skills.add("Python");
        wizard.skills.add("Welding");
        wizard.experience.add();
        wizard.experience.add();
        wizard.experience.remove(2);
        wizard.set_value("job_title_3", "Mentor");

        let data = wizard.to_form_data();
        assert_eq!(data.get("skills").map(String::as_str), Some("Python,Welding"));
        assert!(data.contains_key("job_title_1"));
        assert!(!data.contains_key("job_title_2"));

        let rebuilt = FormWizard::from_form_data(&data);
        let indices: Vec<u32> = rebuilt.experience.blocks().iter().map(|b| b.index).collect();
        assert_eq!(indices, [1, 3]);
        assert_eq!(rebuilt.experience.block(3).unwrap().value("job_title"), "Mentor");
        assert_eq!(rebuilt.skills.skills(), wizard.skills.skills());
        assert_eq!(rebuilt.field("email").unwrap().value, "amina@example.com");
    }

    #[test]
    fn test_skills_accept_json_array() {
        let mut data = BTreeMap::new();
        data.insert("skills".to_string(), r#"["Python", "Python", "Data, Science"]"#.to_string());
        let wizard = FormWizard::from_form_data(&data);
        assert_eq!(wizard.skills.skills(), ["Python", "Data, Science"]);
        assert_eq!(wizard.experience.len(), 1);
    }

    #[test]
    fn test_out_of_range_experience_index_is_ignored() {
        let mut data = BTreeMap::new();
        data.insert("job_title_4294967295".to_string(), "Overflow".to_string());
        data.insert("company_99999999999".to_string(), "Too big".to_string());
        data.insert("job_title_2".to_string(), "Mentor".to_string());

        let mut wizard = FormWizard::from_form_data(&data);
        let indices: Vec<u32> = wizard.experience.blocks().iter().map(|b| b.index).collect();
        assert_eq!(indices, [2]);
        assert_eq!(wizard.experience.add(), Some(3));
        assert!(wizard.field("job_title_4294967295").is_none());
    }

    #[test]
    fn test_languages_round_trip_and_accept_single_name() {
        let mut wizard = FormWizard::new();
        wizard.languages.add("Swahili");
        wizard.languages.add("English");
        let data = wizard.to_form_data();
        assert_eq!(data.get("languages").map(String::as_str), Some("Swahili,English"));
        let rebuilt = FormWizard::from_form_data(&data);
        assert_eq!(rebuilt.languages.skills(), ["Swahili", "English"]);
        assert!(rebuilt.skills.is_empty());

        let mut single = BTreeMap::new();
        single.insert("languages".to_string(), "Swahili".to_string());
        assert_eq!(FormWizard::from_form_data(&single).languages.skills(), ["Swahili"]);

        let mut list = BTreeMap::new();
        list.insert("languages".to_string(), r#"["French", "Swahili"]"#.to_string());
        assert_eq!(FormWizard::from_form_data(&list).languages.skills(), ["French", "Swahili"]);
    }

    #[test]
    fn test_validate_all_reports_first_failing_step() {
        let mut wizard = FormWizard::new();
        fill_personal(&mut wizard);
        assert_eq!(wizard.first_invalid_step(), Some(WizardStep::Background));
        let (step, invalid) = wizard.validate_all().unwrap();
        assert_eq!(step, WizardStep::Background);
        assert!(invalid.contains(&"region".to_string()));
    }
}
