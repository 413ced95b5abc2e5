//! The three values a rename run needs, and how they are validated.
//!
//! Collection itself sits behind [`InputSource`] so the CLI can prompt on a
//! terminal while tests and library callers hand over a fixed record.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::Result;
use crate::utils::validation;

static FIELD_LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\- ]+$").unwrap());

static PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

static TEXT_DOMAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9\-]+$").unwrap());

/// One of the collected inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    FieldLabel,
    Prefix,
    TextDomain,
}

impl InputField {
    pub const ALL: [InputField; 3] = [
        InputField::FieldLabel,
        InputField::Prefix,
        InputField::TextDomain,
    ];

    /// Name used in error details.
    pub fn name(&self) -> &'static str {
        match self {
            InputField::FieldLabel => "fieldLabel",
            InputField::Prefix => "prefix",
            InputField::TextDomain => "textDomain",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            InputField::FieldLabel => "Field label:",
            InputField::Prefix => "Function prefix:",
            InputField::TextDomain => "Text domain:",
        }
    }

    /// Value offered when the user just presses enter at the prompt.
    pub fn initial(&self) -> &'static str {
        match self {
            InputField::FieldLabel => "Amazing Field",
            InputField::Prefix => "company_or_project_name",
            InputField::TextDomain => "plugin-or-theme-name",
        }
    }

    pub fn problem(&self) -> &'static str {
        match self {
            InputField::FieldLabel => {
                "Label allows alphanumeric English characters, spaces, underscores and dashes."
            }
            InputField::Prefix => {
                "Prefix allows lowercase alphanumeric English characters and underscores."
            }
            InputField::TextDomain => "Text domain allows a-z, 0-9 and '-'.",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            InputField::FieldLabel => &*FIELD_LABEL_PATTERN,
            InputField::Prefix => &*PREFIX_PATTERN,
            InputField::TextDomain => &*TEXT_DOMAIN_PATTERN,
        }
    }

    /// Check a single value against this field's allowed characters.
    pub fn validate(&self, value: &str) -> Result<()> {
        validation::require_match(value, self.pattern(), self.name(), self.problem())
    }
}

/// The validated record handed to the replacement map builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInputs {
    pub field_label: String,
    pub prefix: String,
    pub text_domain: String,
}

impl FieldInputs {
    pub fn new(
        field_label: impl Into<String>,
        prefix: impl Into<String>,
        text_domain: impl Into<String>,
    ) -> Self {
        Self {
            field_label: field_label.into(),
            prefix: prefix.into(),
            text_domain: text_domain.into(),
        }
    }

    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::FieldLabel => &self.field_label,
            InputField::Prefix => &self.prefix,
            InputField::TextDomain => &self.text_domain,
        }
    }

    /// Fail with a missing-argument error listing every empty value.
    pub fn require_present(&self) -> Result<()> {
        let fields: Vec<(&str, &str)> = InputField::ALL
            .iter()
            .map(|field| (field.name(), self.get(*field)))
            .collect();
        validation::require_all_present(&fields)
    }

    /// Presence first, then each field's allowed characters.
    pub fn validate(&self) -> Result<()> {
        self.require_present()?;
        for field in InputField::ALL {
            field.validate(self.get(field))?;
        }
        Ok(())
    }
}

/// Capability that yields the three inputs for a run.
pub trait InputSource {
    fn collect(&mut self) -> Result<FieldInputs>;
}

/// An input source that always returns the same record.
#[derive(Debug, Clone)]
pub struct FixedInputs(pub FieldInputs);

impl InputSource for FixedInputs {
    fn collect(&mut self) -> Result<FieldInputs> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_initial_values() {
        let inputs = FieldInputs::new(
            InputField::FieldLabel.initial(),
            InputField::Prefix.initial(),
            InputField::TextDomain.initial(),
        );
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn field_label_allows_spaces_dashes_and_underscores() {
        assert!(InputField::FieldLabel.validate("My Field-Type_2").is_ok());
        assert!(InputField::FieldLabel.validate("Déjà vu").is_err());
        assert!(InputField::FieldLabel.validate("a/b").is_err());
    }

    #[test]
    fn prefix_is_lowercase_snake() {
        assert!(InputField::Prefix.validate("acme_co2").is_ok());
        assert!(InputField::Prefix.validate("Acme").is_err());
        assert!(InputField::Prefix.validate("acme-co").is_err());
    }

    #[test]
    fn text_domain_is_lowercase_kebab() {
        assert!(InputField::TextDomain.validate("acme-plugin").is_ok());
        assert!(InputField::TextDomain.validate("acme_plugin").is_err());
        assert!(InputField::TextDomain.validate("Acme").is_err());
    }

    #[test]
    fn invalid_value_names_the_field() {
        let err = InputField::Prefix.validate("Bad Prefix").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "prefix");
    }

    #[test]
    fn validate_reports_missing_before_invalid() {
        let inputs = FieldInputs::new("Bad/Label", "", "acme");
        let err = inputs.validate().unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
        assert_eq!(err.details["args"], serde_json::json!(["prefix"]));
    }

    #[test]
    fn fixed_inputs_returns_the_same_record() {
        let record = FieldInputs::new("Amazing Field", "acme", "acme-plugin");
        let mut source = FixedInputs(record.clone());
        assert_eq!(source.collect().unwrap(), record);
        assert_eq!(source.collect().unwrap(), record);
    }
}
