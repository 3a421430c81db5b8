// ABOUTME: CLI check command - validate a saved flat form-data file
//
// Accepts a JSON object or a TOML table whose values are strings, the same
// shape `FormWizard::to_form_data` produces. Every field runs through the
// full validator and the report lists each field with its status.

use super::{CheckArgs, OutputFormat};
use crate::form::{validator, FieldStatus, FormWizard, WizardStep};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Flat form data keyed by field name
pub type FormData = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum FormDataError {
    #[error("Failed to read form data from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is neither a JSON object nor a TOML table")]
    Malformed { path: PathBuf },

    #[error("Field '{key}' must be a string, found {found}")]
    NotAString { key: String, found: &'static str },
}

/// Status of a single field after validation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldReport {
    pub key: String,
    pub label: String,
    pub step: WizardStep,
    pub required: bool,
    pub status: FieldStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    pub first_invalid_step: Option<WizardStep>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub fields: Vec<FieldReport>,
}

impl CheckReport {
    pub fn invalid_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.status == FieldStatus::Invalid)
            .count()
    }
}

/// Execute the check command. Returns whether the form data is valid.
pub fn execute(args: &CheckArgs, format: OutputFormat) -> Result<bool> {
    let data = load_form_data(&args.file)?;
    let report = build_report(&data);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize check report")?;
            println!("{json}");
        }
        OutputFormat::Text => output_text(&args.file, &report),
    }

    Ok(report.valid)
}

/// Read a form-data file. JSON is tried first, then TOML.
pub fn load_form_data(path: &Path) -> Result<FormData, FormDataError> {
    let content = std::fs::read_to_string(path).map_err(|source| FormDataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&content) {
        return map
            .into_iter()
            .map(|(key, value)| json_to_string(&key, value).map(|v| (key, v)))
            .collect();
    }

    if let Ok(table) = toml::from_str::<toml::Table>(&content) {
        return table
            .into_iter()
            .map(|(key, value)| toml_to_string(&key, value).map(|v| (key, v)))
            .collect();
    }

    Err(FormDataError::Malformed {
        path: path.to_path_buf(),
    })
}

/// Checkboxes arrive as booleans and tag lists as arrays; both are folded
/// into the string form a form post would carry.
fn json_to_string(key: &str, value: serde_json::Value) -> Result<String, FormDataError> {
    use serde_json::Value;

    match value {
        Value::String(s) => Ok(s),
        Value::Bool(true) => Ok(crate::form::field::CHECKBOX_ON.to_string()),
        Value::Bool(false) | Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(FormDataError::NotAString {
                    key: key.to_string(),
                    found: "a non-string list item",
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|items| serde_json::Value::from(items).to_string()),
        Value::Object(_) => Err(FormDataError::NotAString {
            key: key.to_string(),
            found: "an object",
        }),
    }
}

fn toml_to_string(key: &str, value: toml::Value) -> Result<String, FormDataError> {
    use toml::Value;

    match value {
        Value::String(s) => Ok(s),
        Value::Boolean(true) => Ok(crate::form::field::CHECKBOX_ON.to_string()),
        Value::Boolean(false) => Ok(String::new()),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Float(n) => Ok(n.to_string()),
        Value::Datetime(d) => Ok(d.to_string()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(FormDataError::NotAString {
                    key: key.to_string(),
                    found: "a non-string list item",
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|items| serde_json::Value::from(items).to_string()),
        Value::Table(_) => Err(FormDataError::NotAString {
            key: key.to_string(),
            found: "a table",
        }),
    }
}

/// Rebuild the wizard from the data and run the full validator over it
pub fn build_report(data: &FormData) -> CheckReport {
    let mut wizard = FormWizard::from_form_data(data);
    let first_invalid = wizard.validate_all().map(|(step, _)| step);

    let fields = WizardStep::all()
        .iter()
        .flat_map(|step| {
            wizard
                .step_fields(*step)
                .into_iter()
                .map(|field| FieldReport {
                    key: field.key.clone(),
                    label: field.label.clone(),
                    step: *step,
                    required: field.required,
                    status: field.status,
                    message: validator::message(field).map(String::from),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    CheckReport {
        valid: first_invalid.is_none(),
        first_invalid_step: first_invalid,
        skills: wizard.skills.skills().to_vec(),
        languages: wizard.languages.skills().to_vec(),
        fields,
    }
}

fn output_text(path: &Path, report: &CheckReport) {
    println!("Checking {}", path.display());

    let mut current: Option<WizardStep> = None;
    for field in &report.fields {
        if current != Some(field.step) {
            println!();
            println!(
                "Step {} of {}: {}",
                field.step.number(),
                WizardStep::total(),
                field.step.title()
            );
            current = Some(field.step);
        }
        let note = field.message.as_deref().unwrap_or_default();
        println!(
            "  {} {:<28} {}",
            field.status.indicator(),
            field.key,
            note
        );
    }

    println!();
    if report.skills.is_empty() {
        println!("Skills: none");
    } else {
        println!("Skills: {}", report.skills.join(", "));
    }
    if report.languages.is_empty() {
        println!("Languages: none");
    } else {
        println!("Languages: {}", report.languages.join(", "));
    }

    match report.first_invalid_step {
        None => println!("All fields valid."),
        Some(step) => println!(
            "{} invalid field(s); first incomplete step: {}",
            report.invalid_count(),
            step.title()
        ),
    }
}
