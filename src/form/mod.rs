// ABOUTME: Membership form domain - steps, fields, validation, repeatable sections and submission
// Kept free of terminal concerns so the CLI and the TUI share it

pub mod application;
pub mod experience;
pub mod field;
pub mod skills;
pub mod steps;
pub mod validator;
pub mod wizard;

pub use application::{MembershipApplication, SubmissionError, WorkExperience};
pub use experience::{ExperienceBlock, ExperienceList};
pub use field::{Field, FieldKind, FieldStatus, SelectOption};
pub use skills::SkillList;
pub use steps::WizardStep;
pub use wizard::{FormWizard, Transition, INCOMPLETE_STEP_MESSAGE};
