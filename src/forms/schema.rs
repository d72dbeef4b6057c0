//! Typed validation schemas for entity forms.
//!
//! A schema is an ordered list of field specs; one generic validator
//! interprets them. Adding an entity type means writing a schema object,
//! not new validation logic.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").expect("url regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex"));

/// What kind of value a field holds and how it is edited.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    LongText,
    /// ISO date (YYYY-MM-DD).
    Date,
    Email,
    Url,
    /// One of a fixed set of options.
    Select(Vec<String>),
    /// Remote URL or embedded data-URL string.
    Image,
    /// Ordered sublist of small records; each row is an object whose
    /// subfields are all plain strings.
    Rows(Vec<RowField>),
}

/// One subfield of a `FieldKind::Rows` row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowField {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub long: bool,
}

impl RowField {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self { name, label, required: true, long: false }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn long(mut self) -> Self {
        self.long = true;
        self
    }
}

/// Declarative spec for one editable field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false, min_len: None, max_len: None }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn long_text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::LongText)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    /// Validate one value against this spec. `None` means the value passes.
    pub fn validate(&self, value: Option<&Value>) -> Option<String> {
        if let FieldKind::Rows(row_fields) = &self.kind {
            return self.validate_rows(value, row_fields);
        }

        let text = value.and_then(Value::as_str).unwrap_or("").trim();

        if text.is_empty() {
            if self.required {
                return Some(format!("{} is required", self.label));
            }
            return None;
        }

        if let Some(min) = self.min_len {
            if text.chars().count() < min {
                return Some(format!("{} must be at least {} characters", self.label, min));
            }
        }
        if let Some(max) = self.max_len {
            if text.chars().count() > max {
                return Some(format!("{} must be at most {} characters", self.label, max));
            }
        }

        match &self.kind {
            FieldKind::Email if !EMAIL_RE.is_match(text) => {
                Some(format!("Enter a valid {}", self.label.to_lowercase()))
            }
            FieldKind::Url if !URL_RE.is_match(text) => {
                Some(format!("Enter a valid {} URL", self.label))
            }
            FieldKind::Date if !DATE_RE.is_match(text) => {
                Some(format!("{} must be a date (YYYY-MM-DD)", self.label))
            }
            FieldKind::Select(options) if !options.iter().any(|o| o == text) => {
                Some(format!("Select a {}", self.label.to_lowercase()))
            }
            _ => None,
        }
    }

    fn validate_rows(&self, value: Option<&Value>, row_fields: &[RowField]) -> Option<String> {
        let rows = match value.and_then(Value::as_array) {
            Some(rows) => rows,
            None => return self.required.then(|| format!("{} is required", self.label)),
        };
        if self.required && rows.is_empty() {
            return Some(format!("{} is required", self.label));
        }
        for row in rows {
            for field in row_fields.iter().filter(|f| f.required) {
                let filled = row
                    .get(field.name)
                    .and_then(Value::as_str)
                    .is_some_and(|s| !s.trim().is_empty());
                if !filled {
                    return Some(format!(
                        "Every {} row needs a {}",
                        self.label.to_lowercase(),
                        field.label.to_lowercase()
                    ));
                }
            }
        }
        None
    }
}

/// Ordered field specs for one entity form.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate every field; the result maps field name to message and is
    /// empty when the whole form passes. All violations are reported at
    /// once, not just the first.
    pub fn validate_all(&self, values: &Map<String, Value>) -> IndexMap<String, String> {
        let mut errors = IndexMap::new();
        for spec in &self.fields {
            if let Some(message) = spec.validate(values.get(spec.name)) {
                errors.insert(spec.name.to_string(), message);
            }
        }
        errors
    }
}
