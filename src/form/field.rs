// ABOUTME: Form field model - a labeled input with a kind, a required flag and a derived status

use serde::{Deserialize, Serialize};

/// Input widget kinds supported by the membership form.
///
/// Notes:
/// - Text / Email / Tel / Date render as single-line editors
/// - TextArea wraps over several rows
/// - Select cycles through its options with Left/Right and stores the option key
/// - Checkbox toggles with Space and stores `"on"` when checked, like a form post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    TextArea,
    Select { options: Vec<SelectOption> },
    Checkbox,
}

impl FieldKind {
    /// Short type tag, mirrors the `type` attribute of an html input
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::TextArea => "textarea",
            Self::Select { .. } => "select",
            Self::Checkbox => "checkbox",
        }
    }

    /// Whether typed characters edit the value directly
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Tel | Self::Date | Self::TextArea
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub key: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Validity status of a field. `Neutral` means untouched or empty-and-optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl FieldStatus {
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Neutral => " ",
            Self::Valid => "✓",
            Self::Invalid => "✗",
        }
    }
}

pub const CHECKBOX_ON: &str = "on";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub status: FieldStatus,
}

impl Field {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            value: String::new(),
            status: FieldStatus::Neutral,
        }
    }

    /// Builder: mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn select(key: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(k, l)| SelectOption::new(k, l))
            .collect();
        Self::new(key, label, FieldKind::Select { options })
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn is_checked(&self) -> bool {
        self.value == CHECKBOX_ON
    }

    /// Append a typed character. Non-textual kinds ignore typing.
    pub fn push_char(&mut self, c: char) -> bool {
        if !self.kind.is_textual() {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn push_str(&mut self, text: &str) -> bool {
        if !self.kind.is_textual() {
            return false;
        }
        // Single-line editors drop pasted newlines
        if matches!(self.kind, FieldKind::TextArea) {
            self.value.push_str(text);
        } else {
            self.value.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
        }
        true
    }

    pub fn backspace(&mut self) -> bool {
        if !self.kind.is_textual() {
            return false;
        }
        self.value.pop().is_some()
    }

    pub fn toggle(&mut self) -> bool {
        if self.kind != FieldKind::Checkbox {
            return false;
        }
        if self.is_checked() {
            self.value.clear();
        } else {
            self.value = CHECKBOX_ON.to_string();
        }
        true
    }

    /// Step through select options. An empty value is the "Select..." placeholder
    /// and sits before the first option.
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        let FieldKind::Select { options } = &self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }

        let current = options.iter().position(|o| o.key == self.value);
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(options.len() - 1),
            (Some(i), true) if i + 1 < options.len() => Some(i + 1),
            (Some(_), true) => None,
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };

        self.value = next.map(|i| options[i].key.clone()).unwrap_or_default();
        true
    }

    /// Text to show for the current value (labels for selects)
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Select { options } => options
                .iter()
                .find(|o| o.key == self.value)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| "Select...".to_string()),
            FieldKind::Checkbox => {
                if self.is_checked() {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            _ => self.value.clone(),
        }
    }
}
