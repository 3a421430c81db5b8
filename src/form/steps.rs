// ABOUTME: Ordered wizard steps and the fields each step panel carries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::field::{Field, FieldKind};

/// Steps of the membership form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Personal,
    Background,
    Experience,
    Motivation,
}

impl WizardStep {
    /// Get all steps in order
    pub fn all() -> &'static [WizardStep] {
        &[
            Self::Personal,
            Self::Background,
            Self::Experience,
            Self::Motivation,
        ]
    }

    /// Zero-based position in the step order
    pub fn index(&self) -> usize {
        match self {
            Self::Personal => 0,
            Self::Background => 1,
            Self::Experience => 2,
            Self::Motivation => 3,
        }
    }

    /// Get the step number (1-indexed for display)
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    pub fn total() -> usize {
        Self::all().len()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Identity of the step, as used in panel ids like `personal-tab`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Background => "background",
            Self::Experience => "experience",
            Self::Motivation => "motivation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Personal => "Personal Info",
            Self::Background => "Background",
            Self::Experience => "Experience & Skills",
            Self::Motivation => "Motivation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Personal => "Tell us who you are",
            Self::Background => "Where you live and what you do",
            Self::Experience => "Your skills and work history",
            Self::Motivation => "Why you want to join the community",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Static fields of this step's panel. Repeatable sections are not included.
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Self::Personal => vec![
                Field::text("first_name", "First Name").required(),
                Field::text("last_name", "Last Name").required(),
                Field::new("email", "Email Address", FieldKind::Email).required(),
                Field::new("phone", "Phone Number", FieldKind::Tel).required(),
                Field::new("date_of_birth", "Date of Birth", FieldKind::Date).required(),
                Field::select("gender", "Gender", GENDER_CHOICES).required(),
                Field::text("id_number", "National ID Number").required(),
            ],
            Self::Background => vec![
                Field::new("current_address", "Current Address", FieldKind::TextArea).required(),
                Field::select("region", "Region", REGION_CHOICES).required(),
                Field::text("district", "District").required(),
                Field::select("education", "Highest Education", EDUCATION_CHOICES).required(),
                Field::text("occupation", "Current Occupation").required(),
            ],
            Self::Experience => Vec::new(),
            Self::Motivation => vec![
                Field::new("why_join", "Why do you want to join?", FieldKind::TextArea).required(),
                Field::new("contribution", "How will you contribute?", FieldKind::TextArea)
                    .required(),
                Field::new("expectations", "What do you expect from us?", FieldKind::TextArea)
                    .required(),
                Field::select("referral", "How did you hear about us?", REFERRAL_CHOICES),
                Field::new(
                    "agree_terms",
                    "I agree to the community terms and code of conduct",
                    FieldKind::Checkbox,
                )
                .required(),
            ],
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|step| step.name() == s.trim().to_lowercase())
            .copied()
            .ok_or_else(|| format!("unknown step '{}'", s))
    }
}

pub const GENDER_CHOICES: &[(&str, &str)] = &[
    ("male", "Male"),
    ("female", "Female"),
    ("other", "Other"),
    ("prefer-not-to-say", "Prefer not to say"),
];

pub const REGION_CHOICES: &[(&str, &str)] = &[
    ("dar-es-salaam", "Dar es Salaam"),
    ("arusha", "Arusha"),
    ("dodoma", "Dodoma"),
    ("mbeya", "Mbeya"),
    ("mwanza", "Mwanza"),
    ("other", "Other"),
];

pub const EDUCATION_CHOICES: &[(&str, &str)] = &[
    ("primary", "Primary School"),
    ("secondary", "Secondary School"),
    ("diploma", "Diploma"),
    ("bachelor", "Bachelor's Degree"),
    ("master", "Master's Degree"),
    ("phd", "PhD"),
    ("other", "Other"),
];

pub const REFERRAL_CHOICES: &[(&str, &str)] = &[
    ("friend", "Friend/Family"),
    ("social-media", "Social Media"),
    ("event", "Community Event"),
    ("search", "Online Search"),
    ("other", "Other"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_navigation() {
        let step = WizardStep::Personal;
        assert_eq!(step.next(), Some(WizardStep::Background));
        assert_eq!(step.previous(), None);

        let step = WizardStep::Motivation;
        assert_eq!(step.next(), None);
        assert_eq!(step.previous(), Some(WizardStep::Experience));
        assert!(step.is_last());
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(WizardStep::Personal.number(), 1);
        assert_eq!(WizardStep::Motivation.number(), 4);
        assert_eq!(WizardStep::total(), 4);
    }

    #[test]
    fn test_step_names_round_trip() {
        for step in WizardStep::all() {
            assert_eq!(step.name().parse::<WizardStep>(), Ok(*step));
        }
        assert!("contact".parse::<WizardStep>().is_err());
    }

    #[test]
    fn test_field_keys_unique_across_steps() {
        let mut keys: Vec<String> = WizardStep::all()
            .iter()
            .flat_map(|s| s.fields())
            .map(|f| f.key)
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }
}
