// ABOUTME: Field validator - stateless presence and format rules applied on blur and input

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::field::{Field, FieldKind, FieldStatus};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[+]?[0-9\s\-()]{10,}$").unwrap();
}

/// Why a field is invalid. The rules are independent; at most one applies
/// to a given field kind and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Missing,
    BadEmail,
    BadPhone,
    BadDate,
}

impl Violation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Missing => "This field is required",
            Self::BadEmail => "Enter an email like name@example.com",
            Self::BadPhone => "Enter at least 10 digits, spaces, dashes or parentheses",
            Self::BadDate => "Use YYYY-MM-DD",
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// First rule the field violates, if any
pub fn violation(field: &Field) -> Option<Violation> {
    let value = field.trimmed();

    if value.is_empty() {
        return field.required.then_some(Violation::Missing);
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Some(Violation::BadEmail),
        FieldKind::Tel if !is_valid_phone(value) => Some(Violation::BadPhone),
        FieldKind::Date if !is_valid_date(value) => Some(Violation::BadDate),
        _ => None,
    }
}

/// Inline error text for an invalid field
pub fn message(field: &Field) -> Option<&'static str> {
    violation(field).map(|v| v.message())
}

/// Pure status computation. Idempotent for an unchanged value.
pub fn validate(field: &Field) -> FieldStatus {
    if violation(field).is_some() {
        FieldStatus::Invalid
    } else if field.is_empty() {
        FieldStatus::Neutral
    } else {
        FieldStatus::Valid
    }
}

/// Recompute and store the status; returns true when the field is not invalid
pub fn apply(field: &mut Field) -> bool {
    field.status = validate(field);
    field.status != FieldStatus::Invalid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind, value: &str, required: bool) -> Field {
        let mut f = Field::new("f", "F", kind);
        f.required = required;
        f.value = value.to_string();
        f
    }

    #[test]
    fn test_required_empty_is_invalid() {
        assert_eq!(validate(&field(FieldKind::Text, "   ", true)), FieldStatus::Invalid);
        assert_eq!(validate(&field(FieldKind::Text, "", false)), FieldStatus::Neutral);
        assert_eq!(validate(&field(FieldKind::Text, "Amina", true)), FieldStatus::Valid);
    }

    #[test]
    fn test_email_needs_dot_after_at() {
        assert_eq!(validate(&field(FieldKind::Email, "a@b", true)), FieldStatus::Invalid);
        assert_eq!(validate(&field(FieldKind::Email, "a@b.com", true)), FieldStatus::Valid);
        assert_eq!(validate(&field(FieldKind::Email, "a b@c.com", true)), FieldStatus::Invalid);
        assert_eq!(validate(&field(FieldKind::Email, "a@@b.com", true)), FieldStatus::Invalid);
        // Optional and empty is untouched, not an email error
        assert_eq!(validate(&field(FieldKind::Email, "", false)), FieldStatus::Neutral);
    }

    #[test]
    fn test_phone_shape() {
        assert!(is_valid_phone("+255 712 345 678"));
        assert!(is_valid_phone("(022) 123-4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("0712abc345678"));
        assert!(!is_valid_phone("++255712345678"));
    }

    #[test]
    fn test_date_shape() {
        assert!(is_valid_date("1995-04-26"));
        assert!(!is_valid_date("1995-02-30"));
        assert!(!is_valid_date("26/04/1995"));
    }

    #[test]
    fn test_validate_is_idempotent() {
        for (kind, value) in [
            (FieldKind::Email, "a@b"),
            (FieldKind::Email, "a@b.com"),
            (FieldKind::Tel, "0712 345 678"),
            (FieldKind::Text, ""),
        ] {
            let mut f = field(kind, value, true);
            apply(&mut f);
            let first = f.status;
            apply(&mut f);
            assert_eq!(first, f.status);
        }
    }

    #[test]
    fn test_violation_messages() {
        let f = field(FieldKind::Tel, "123", true);
        assert_eq!(violation(&f), Some(Violation::BadPhone));
        assert!(violation(&f).map(|v| v.message()).unwrap().contains("10"));
    }
}
