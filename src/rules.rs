//! Field validation rules and per-entity schemas.
//!
//! Rules are declarative data over raw form values: adding an entity means
//! supplying a rule table, not writing new validation code. Validation never
//! fails or panics; it only accumulates human-readable messages.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A single validation rule applicable to one field.
///
/// Absence of a value only ever trips `Required`; the shape rules apply when
/// a value is present and non-blank. An unset optional contact number is
/// valid, a non-digit string in that field is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming whitespace.
    Required,
    /// Must be a string when present.
    Text,
    /// Must parse to a positive whole number when present.
    Integer,
    /// Must parse to a positive number when present.
    Decimal,
    /// Must be a boolean when present.
    Boolean,
    /// Must look like an email address when present.
    Email,
    /// Digits, spaces, dashes, parentheses, and a leading plus only.
    Phone,
}

/// Declarative rule table for one entity: field name to rule set.
pub type EntitySchema = &'static [(&'static str, &'static [Rule])];

/// Registration-time beneficiary schema (the looser, account-creation set).
pub const REGISTRATION_BENEFICIARY: EntitySchema = &[
    ("first_name", &[Rule::Required, Rule::Text]),
    ("middle_name", &[Rule::Text]),
    ("last_name", &[Rule::Required, Rule::Text]),
    ("contact_number", &[Rule::Required, Rule::Phone]),
    ("email_address", &[Rule::Email]),
    ("barangay", &[Rule::Required, Rule::Text]),
    ("municipality", &[Rule::Required, Rule::Text]),
    ("province", &[Rule::Required, Rule::Text]),
    ("region", &[Rule::Required, Rule::Text]),
];

/// Full enrollment beneficiary schema: registration plus birth date and
/// civil status.
pub const ENROLLMENT_BENEFICIARY: EntitySchema = &[
    ("first_name", &[Rule::Required, Rule::Text]),
    ("middle_name", &[Rule::Text]),
    ("last_name", &[Rule::Required, Rule::Text]),
    ("birth_date", &[Rule::Required, Rule::Text]),
    ("civil_status", &[Rule::Required, Rule::Text]),
    ("contact_number", &[Rule::Required, Rule::Phone]),
    ("email_address", &[Rule::Email]),
    ("household_head", &[Rule::Boolean]),
    ("barangay", &[Rule::Required, Rule::Text]),
    ("municipality", &[Rule::Required, Rule::Text]),
    ("province", &[Rule::Required, Rule::Text]),
    ("region", &[Rule::Required, Rule::Text]),
];

/// Farm profile schema: the livelihood category drives everything downstream.
pub const FARM_PROFILE: EntitySchema = &[("livelihood_category_id", &[Rule::Required, Rule::Integer])];

/// Per-parcel schema.
pub const FARM_PARCEL: EntitySchema = &[
    ("parcel_number", &[Rule::Text]),
    ("barangay", &[Rule::Required, Rule::Text]),
    ("tenure_type", &[Rule::Required, Rule::Text]),
    ("farm_type", &[Rule::Text]),
    ("farm_area", &[Rule::Required, Rule::Decimal]),
    ("ancestral_domain", &[Rule::Boolean]),
    ("agrarian_reform_beneficiary", &[Rule::Boolean]),
    ("organic_practitioner", &[Rule::Boolean]),
    ("remarks", &[Rule::Text]),
];

/// Per-field error messages aggregated over an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// True when any field produced at least one message.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Merge another error map under a key prefix (used for nested entities).
    pub fn merge_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, messages) in other.errors {
            self.errors.insert(format!("{prefix}.{field}"), messages);
        }
    }
}

/// Apply a rule set to one field value, returning accumulated messages.
pub fn validate_field(value: &Value, field: &str, rules: &[Rule]) -> Vec<String> {
    let mut messages = Vec::new();
    for rule in rules {
        if let Some(message) = apply_rule(value, field, *rule) {
            messages.push(message);
        }
    }
    messages
}

/// Apply an entity schema to a JSON object, aggregating per-field messages.
///
/// Missing fields are treated as null so `Required` still fires for them.
pub fn validate_object(data: &Value, schema: EntitySchema) -> FieldErrors {
    let mut result = FieldErrors::default();
    for (field, rules) in schema {
        let value = data.get(*field).unwrap_or(&Value::Null);
        let messages = validate_field(value, field, rules);
        if !messages.is_empty() {
            result.errors.insert((*field).to_string(), messages);
        }
    }
    result
}

fn apply_rule(value: &Value, field: &str, rule: Rule) -> Option<String> {
    match rule {
        Rule::Required => is_blank(value).then(|| format!("{field} is required")),
        Rule::Text => {
            if is_blank(value) || value.is_string() {
                None
            } else {
                Some(format!("{field} must be text"))
            }
        }
        Rule::Integer => {
            if is_blank(value) || parses_to_positive_integer(value) {
                None
            } else {
                Some(format!("{field} must be a positive whole number"))
            }
        }
        Rule::Decimal => {
            if is_blank(value) || parses_to_positive_number(value) {
                None
            } else {
                Some(format!("{field} must be a positive number"))
            }
        }
        Rule::Boolean => {
            if value.is_null() || value.is_boolean() {
                None
            } else {
                Some(format!("{field} must be true or false"))
            }
        }
        Rule::Email => {
            if is_blank(value) {
                return None;
            }
            match value.as_str() {
                Some(text) if email_regex().is_match(text.trim()) => None,
                _ => Some(format!("{field} must be a valid email address")),
            }
        }
        Rule::Phone => {
            if is_blank(value) {
                return None;
            }
            match value.as_str() {
                Some(text) if phone_regex().is_match(text.trim()) => None,
                _ => Some(format!("{field} must be a valid contact number")),
            }
        }
    }
}

/// Blank means absent for rule purposes: null or whitespace-only text.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn parses_to_positive_integer(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.as_i64().is_some_and(|n| n > 0),
        Value::String(text) => text.trim().parse::<i64>().is_ok_and(|n| n > 0),
        _ => false,
    }
}

fn parses_to_positive_number(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.as_f64().is_some_and(|n| n > 0.0),
        Value::String(text) => text.trim().parse::<f64>().is_ok_and(|n| n > 0.0),
        _ => false,
    }
}

fn email_regex() -> &'static regex::Regex {
    static EMAIL: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL.get_or_init(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

fn phone_regex() -> &'static regex::Regex {
    static PHONE: OnceLock<regex::Regex> = OnceLock::new();
    PHONE.get_or_init(|| regex::Regex::new(r"^\+?[\d\s\-()]+$").expect("phone regex"))
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
