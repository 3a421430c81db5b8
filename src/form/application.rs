// ABOUTME: Submitted membership application built from a fully validated wizard

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::steps::WizardStep;
use super::wizard::FormWizard;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// At least one field fails validation; `step` is the first such step
    #[error("Step '{step}' has invalid fields: {}", .fields.join(", "))]
    Incomplete {
        step: WizardStep,
        fields: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub job_title: String,
    pub company: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub responsibilities: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipApplication {
    pub id: Uuid,

    // Personal information
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub id_number: String,

    // Background information
    pub current_address: String,
    pub region: String,
    pub district: String,
    pub education: String,
    pub occupation: String,

    // Experience & skills
    pub work_experience: Vec<WorkExperience>,
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,

    // Motivation
    pub why_join: String,
    pub contribution: String,
    pub expectations: String,
    pub referral: Option<String>,
    pub agree_terms: bool,

    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl MembershipApplication {
    /// Validate every field with the full validator and, when all pass,
    /// build the application. Invalid fields are left marked on the wizard.
    pub fn from_wizard(wizard: &mut FormWizard) -> Result<Self, SubmissionError> {
        if let Some((step, fields)) = wizard.validate_all() {
            return Err(SubmissionError::Incomplete { step, fields });
        }
        Ok(Self::build(wizard))
    }

    fn build(wizard: &FormWizard) -> Self {
        let text = |key: &str| {
            wizard
                .field(key)
                .map(|f| f.trimmed().to_string())
                .unwrap_or_default()
        };
        let date = |key: &str| parse_date(&text(key));

        // Blocks without a job title are skipped, like an untouched template block
        let work_experience = wizard
            .experience
            .blocks()
            .iter()
            .filter(|b| !b.value("job_title").is_empty())
            .map(|b| WorkExperience {
                job_title: b.value("job_title").to_string(),
                company: b.value("company").to_string(),
                start_date: parse_date(b.value("start_date")),
                end_date: parse_date(b.value("end_date")),
                responsibilities: b.value("responsibilities").to_string(),
            })
            .collect();

        let referral = Some(text("referral")).filter(|r| !r.is_empty());

        Self {
            id: Uuid::new_v4(),
            first_name: text("first_name"),
            last_name: text("last_name"),
            email: text("email"),
            phone: text("phone"),
            date_of_birth: date("date_of_birth"),
            gender: text("gender"),
            id_number: text("id_number"),
            current_address: text("current_address"),
            region: text("region"),
            district: text("district"),
            education: text("education"),
            occupation: text("occupation"),
            work_experience,
            skills: wizard.skills.skills().to_vec(),
            languages: wizard.languages.skills().to_vec(),
            why_join: text("why_join"),
            contribution: text("contribution"),
            expectations: text("expectations"),
            referral,
            agree_terms: wizard.field("agree_terms").is_some_and(|f| f.is_checked()),
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// One-line summary of work history
    pub fn work_experience_display(&self) -> String {
        let entries: Vec<String> = self
            .work_experience
            .iter()
            .filter(|e| !e.company.is_empty())
            .map(|e| format!("{} at {}", e.job_title, e.company))
            .collect();
        if entries.is_empty() {
            "No work experience provided".to_string()
        } else {
            entries.join("; ")
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete_wizard() -> FormWizard {
        let mut wizard = FormWizard::new();
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
            ("why_join", "To learn"),
            ("contribution", "Mentoring"),
            ("expectations", "Networking"),
            ("agree_terms", "on"),
        ] {
            wizard.set_value(key, value);
        }
        wizard
    }

    #[test]
    fn test_builds_structured_application() {
        let mut wizard = complete_wizard();
        wizard.skills.add("Python");
        wizard.skills.add("Public Speaking");
        wizard.languages.add("Swahili");
        wizard.languages.add("English");
        wizard.set_value("job_title_1", "Tutor");
        wizard.set_value("company_1", "Sinza Secondary");
        wizard.set_value("start_date_1", "2019-01-07");
        let idx = wizard.experience.add().unwrap();
        assert_eq!(idx, 2); // left blank, skipped

        let app = MembershipApplication::from_wizard(&mut wizard).unwrap();
        assert_eq!(app.full_name(), "Amina Mushi");
        assert_eq!(app.skills, vec!["Python", "Public Speaking"]);
        assert_eq!(app.languages, vec!["Swahili", "English"]);
        assert_eq!(app.work_experience.len(), 1);
        assert_eq!(
            app.work_experience[0].start_date,
            NaiveDate::from_ymd_opt(2019, 1, 7)
        );
        assert_eq!(app.work_experience_display(), "Tutor at Sinza Secondary");
        assert_eq!(app.referral, None);
        assert!(app.agree_terms);
        assert_eq!(app.status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_format_errors_block_submission() {
        let mut wizard = complete_wizard();
        wizard.set_value("email", "a@b");
        let err = MembershipApplication::from_wizard(&mut wizard).unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Incomplete {
                step: WizardStep::Personal,
                fields: vec!["email".to_string()],
            }
        );
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_unchecked_terms_block_submission() {
        let mut wizard = complete_wizard();
        wizard.set_value("agree_terms", "");
        let Err(SubmissionError::Incomplete { step, fields }) =
            MembershipApplication::from_wizard(&mut wizard)
        else {
            panic!("expected incomplete submission");
        };
        assert_eq!(step, WizardStep::Motivation);
        assert_eq!(fields, vec!["agree_terms".to_string()]);
    }

    #[test]
    fn test_serializes_lowercase_status() {
        let mut wizard = complete_wizard();
        let app = MembershipApplication::from_wizard(&mut wizard).unwrap();
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["date_of_birth"], "1996-03-14");
    }
}
