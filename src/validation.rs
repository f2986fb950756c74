//! Form field validation.
//!
//! Rules are a declarative table: each entry pairs a field with its
//! pattern, its trimming behavior and the inline error message, so the
//! rule and its message stay together. Patterns are compiled once into
//! a [`Validator`]; the form state itself is plain data.

use fancy_regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::types::Field;

// ============================================================================
// RULE TABLE
// ============================================================================

/// A single field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    /// Anchored pattern the whole input must match.
    pub pattern: &'static str,
    /// Trim surrounding whitespace before matching.
    pub trim: bool,
    /// Inline error shown while the field is invalid.
    pub message: &'static str,
}

/// Rules in form order (indexable by [`Field::index`]).
///
/// Digits are spelled `[0-9]`: `\d` would accept non-ASCII digits.
pub const RULES: [FieldRule; 4] = [
    FieldRule {
        field: Field::Name,
        pattern: r"^[a-zA-Z\s]{2,}$",
        trim: true,
        message: "Please enter a valid name (letters and spaces only, at least 2 characters)",
    },
    FieldRule {
        field: Field::Email,
        pattern: r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
        trim: true,
        message: "Please enter a valid email address",
    },
    FieldRule {
        field: Field::Password,
        pattern: r"^(?=.*[A-Z])(?=.*[0-9]).{8,}$",
        trim: false,
        message: "Password must be at least 8 characters with one uppercase letter and one number",
    },
    FieldRule {
        field: Field::Phone,
        pattern: r"^[0-9]{10}$",
        trim: true,
        message: "Please enter a valid 10-digit phone number",
    },
];

/// Look up the rule for a field.
pub fn rule(field: Field) -> &'static FieldRule {
    &RULES[field.index()]
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid pattern for {field:?} field: {source}")]
    Pattern {
        field: Field,
        #[source]
        source: Box<fancy_regex::Error>,
    },
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Compiled rule table.
#[derive(Debug, Clone)]
pub struct Validator {
    patterns: Vec<Regex>,
}

impl Validator {
    pub fn new() -> Result<Self, ValidationError> {
        let patterns = RULES
            .iter()
            .map(|rule| {
                Regex::new(rule.pattern).map_err(|e| ValidationError::Pattern {
                    field: rule.field,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Validator { patterns })
    }

    /// Apply a field's rule to the raw input text.
    ///
    /// A matcher failure (backtrack limit) counts as invalid.
    pub fn check(&self, field: Field, raw: &str) -> bool {
        let rule = rule(field);
        let input = if rule.trim { raw.trim() } else { raw };
        self.patterns[field.index()]
            .is_match(input)
            .unwrap_or(false)
    }
}

// ============================================================================
// FORM STATE
// ============================================================================

/// Current text of one input and its last validation result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub value: String,
    /// None until the field has been validated once.
    pub valid: Option<bool>,
}

impl FieldState {
    pub fn error_visible(&self) -> bool {
        self.valid == Some(false)
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All four fields valid: success is shown and a reset must be scheduled.
    Accepted,
    /// At least one field invalid.
    Rejected { invalid: Vec<Field> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub fields: [FieldState; 4],
    pub success_visible: bool,
}

impl FormState {
    pub fn field(&self, field: Field) -> &FieldState {
        &self.fields[field.index()]
    }

    /// Replace a field's text and re-validate that field only.
    pub fn input(mut self, field: Field, value: impl Into<String>, validator: &Validator) -> Self {
        let value = value.into();
        let valid = validator.check(field, &value);
        self.fields[field.index()] = FieldState {
            value,
            valid: Some(valid),
        };
        self
    }

    pub fn push_char(self, field: Field, c: char, validator: &Validator) -> Self {
        let mut value = self.field(field).value.clone();
        value.push(c);
        self.input(field, value, validator)
    }

    pub fn pop_char(self, field: Field, validator: &Validator) -> Self {
        let mut value = self.field(field).value.clone();
        value.pop();
        self.input(field, value, validator)
    }

    /// Re-validate all four fields and decide the outcome.
    ///
    /// Every field is checked even after a failure so each error is shown.
    /// A rejected submit also hides a success message left over from an
    /// earlier accepted submit.
    pub fn submit(mut self, validator: &Validator) -> (Self, SubmitOutcome) {
        let mut invalid = Vec::new();
        for field in Field::ALL {
            let state = &mut self.fields[field.index()];
            let valid = validator.check(field, &state.value);
            state.valid = Some(valid);
            if !valid {
                invalid.push(field);
            }
        }

        if invalid.is_empty() {
            self.success_visible = true;
            (self, SubmitOutcome::Accepted)
        } else {
            self.success_visible = false;
            (self, SubmitOutcome::Rejected { invalid })
        }
    }

    /// Delayed reset after a successful submit: empty fields, hidden success.
    pub fn reset(self) -> Self {
        FormState::default()
    }

    /// Summarize the last validation of every field.
    pub fn report(&self) -> ValidationReport {
        let fields: Vec<FieldResult> = Field::ALL
            .iter()
            .map(|&field| {
                let valid = self.field(field).valid == Some(true);
                FieldResult {
                    field,
                    valid,
                    message: if valid { None } else { Some(rule(field).message) },
                }
            })
            .collect();
        ValidationReport {
            valid: fields.iter().all(|f| f.valid),
            fields,
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    pub field: Field,
    pub valid: bool,
    pub message: Option<&'static str>,
}

/// Outcome of validating a full form, for headless output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub fields: Vec<FieldResult>,
}

// ============================================================================
// TESTS
// ============================================================================
