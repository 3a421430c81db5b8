// ABOUTME: CLI steps command - list the wizard steps and the fields each one collects

use super::OutputFormat;
use crate::form::experience::EXPERIENCE_PREFIXES;
use crate::form::{FieldKind, WizardStep};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub key: String,
    pub label: String,
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub number: usize,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldInfo>,
    /// Repeatable sections, named by their generated field pattern
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repeatable: Vec<String>,
}

/// Execute the steps command
pub fn execute(format: OutputFormat) -> Result<()> {
    let steps = describe_steps();

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&steps).context("Failed to serialize step list")?;
            println!("{json}");
        }
        OutputFormat::Text => output_text(&steps),
    }

    Ok(())
}

pub fn describe_steps() -> Vec<StepInfo> {
    WizardStep::all()
        .iter()
        .map(|step| {
            let fields = step
                .fields()
                .into_iter()
                .map(|field| FieldInfo {
                    options: match &field.kind {
                        FieldKind::Select { options } => {
                            options.iter().map(|o| o.key.clone()).collect()
                        }
                        _ => Vec::new(),
                    },
                    kind: field.kind.tag(),
                    key: field.key,
                    label: field.label,
                    required: field.required,
                })
                .collect();

            let repeatable = if *step == WizardStep::Experience {
                ["skills (tag list)", "languages (tag list)"]
                    .into_iter()
                    .map(String::from)
                    .chain(EXPERIENCE_PREFIXES.iter().map(|p| format!("{p}_{{n}}")))
                    .collect()
            } else {
                Vec::new()
            };

            StepInfo {
                number: step.number(),
                name: step.name(),
                title: step.title(),
                description: step.description(),
                fields,
                repeatable,
            }
        })
        .collect()
}

fn output_text(steps: &[StepInfo]) {
    for step in steps {
        println!("{}. {} ({})", step.number, step.title, step.name);
        println!("   {}", step.description);
        for field in &step.fields {
            let marker = if field.required { "*" } else { " " };
            println!("   {marker} {:<20} {:<9} {}", field.key, field.kind, field.label);
        }
        for pattern in &step.repeatable {
            println!("   + {pattern}");
        }
        println!();
    }
    println!("* required   + repeatable");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_steps_covers_every_step() {
        let steps = describe_steps();
        assert_eq!(steps.len(), WizardStep::total());
        assert_eq!(steps[0].name, "personal");
        assert!(steps[0].fields.iter().any(|f| f.key == "email" && f.kind == "email"));
    }

    #[test]
    fn test_experience_step_lists_repeatable_sections() {
        let steps = describe_steps();
        let experience = steps.iter().find(|s| s.name == "experience").unwrap();
        assert!(experience.fields.is_empty());
        assert!(experience.repeatable.iter().any(|r| r == "job_title_{n}"));
        assert!(experience.repeatable.iter().any(|r| r == "languages (tag list)"));
    }

    #[test]
    fn test_select_fields_list_option_keys() {
        let steps = describe_steps();
        let region = steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.key == "region")
            .unwrap();
        assert!(region.options.contains(&"arusha".to_string()));
    }
}
