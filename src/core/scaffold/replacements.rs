//! Ordered placeholder → value pairs derived from the collected inputs.
//!
//! Patterns overlap (`class-usm` embeds `usm`), so the map is an ordered
//! sequence and every pair runs over the output of the one before it.

use serde::Serialize;

use crate::error::Result;
use crate::inputs::FieldInputs;

// Placeholder tokens shipped in the boilerplate.
pub const CLASS_FILE_TOKEN: &str = "class-usm";
pub const PREFIX_TOKEN: &str = "usm";
pub const LABEL_TOKEN: &str = "image_cropper";
pub const SNAKE_TOKEN: &str = "imagecropper";
pub const KEBAB_TOKEN: &str = "image-cropper";
pub const TEXT_DOMAIN_TOKEN: &str = "TEXTDOMAIN";

/// A single placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub pattern: String,
    pub replacement: String,
    pub label: String,
}

impl Replacement {
    pub fn new(pattern: &str, replacement: impl Into<String>, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.into(),
            label: label.to_string(),
        }
    }

    /// Replace every non-overlapping occurrence, returning the match count.
    fn apply(&self, text: &str) -> (String, usize) {
        let count = text.matches(self.pattern.as_str()).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        (text.replace(self.pattern.as_str(), &self.replacement), count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReplacementMap {
    pairs: Vec<Replacement>,
}

impl ReplacementMap {
    /// Build the six ordered pairs for a set of inputs.
    pub fn build(inputs: &FieldInputs) -> Result<Self> {
        inputs.require_present()?;

        let pairs = vec![
            Replacement::new(
                CLASS_FILE_TOKEN,
                format!("class-{}", inputs.prefix.replace('_', "-")),
                "class file",
            ),
            Replacement::new(PREFIX_TOKEN, inputs.prefix.clone(), "prefix"),
            Replacement::new(LABEL_TOKEN, inputs.field_label.clone(), "field label"),
            Replacement::new(SNAKE_TOKEN, snake_case(&inputs.field_label), "snake_case"),
            Replacement::new(KEBAB_TOKEN, kebab_case(&inputs.field_label), "kebab-case"),
            Replacement::new(TEXT_DOMAIN_TOKEN, inputs.text_domain.clone(), "text domain"),
        ];

        Ok(Self { pairs })
    }

    /// Wrap an explicit sequence, applied in the given order.
    pub fn from_pairs(pairs: Vec<Replacement>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[Replacement] {
        &self.pairs
    }

    pub fn apply(&self, text: &str) -> String {
        self.apply_counted(text).0
    }

    /// Apply every pair in order, also returning how many matches were replaced.
    pub fn apply_counted(&self, text: &str) -> (String, usize) {
        let mut total = 0;
        let mut current = text.to_string();
        for pair in &self.pairs {
            let (next, count) = pair.apply(&current);
            current = next;
            total += count;
        }
        (current, total)
    }

    /// Substitution for the boilerplate directory name.
    ///
    /// The directory follows the kebab-case convention (`acf-imagecropper`),
    /// so its field token takes the kebab-case value.
    pub fn directory_replacement(&self) -> Replacement {
        let kebab = self
            .pairs
            .iter()
            .find(|pair| pair.pattern == KEBAB_TOKEN)
            .map(|pair| pair.replacement.clone())
            .unwrap_or_default();
        Replacement::new(SNAKE_TOKEN, kebab, "directory")
    }

    /// Apply only the directory replacement to a directory name.
    pub fn apply_directory(&self, name: &str) -> String {
        self.directory_replacement().apply(name).0
    }
}

/// Lowercase, each whitespace or dash character becomes `_`.
pub fn snake_case(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect()
}

/// Lowercase, each whitespace or underscore character becomes `-`.
pub fn kebab_case(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { '-' } else { c })
        .collect()
}
