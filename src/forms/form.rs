//! Form state: values, touch tracking, and validation lifecycle.
//!
//! Values live in a `serde_json` object map so one form type serves every
//! entity. Errors surface per field once the field was touched (blurred) or
//! the form was submitted, matching the usual touched-field convention.

use std::collections::HashSet;
use std::path::PathBuf;

use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};

use crate::core::{ImageLoader, image_loader::ImageReadResult};

use super::schema::{FieldKind, Schema};

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; the values are ready to persist.
    Ready(Map<String, Value>),
    /// One or more fields failed validation; errors are set on the form.
    Invalid,
    /// An image read is still in flight; try again once it lands.
    Busy,
}

/// Editable state for one entity form.
pub struct FormState {
    schema: Schema,
    values: Map<String, Value>,
    touched: HashSet<String>,
    errors: IndexMap<String, String>,
    /// Fields with a background image read in flight.
    pending_images: HashSet<String>,
    submitted: bool,
}

impl FormState {
    /// Blank form with schema defaults (empty strings, empty row lists).
    pub fn new(schema: Schema) -> Self {
        let mut values = Map::new();
        for spec in &schema.fields {
            let default = match &spec.kind {
                FieldKind::Rows(_) => Value::Array(Vec::new()),
                _ => Value::String(String::new()),
            };
            values.insert(spec.name.to_string(), default);
        }
        Self {
            schema,
            values,
            touched: HashSet::new(),
            errors: IndexMap::new(),
            pending_images: HashSet::new(),
            submitted: false,
        }
    }

    /// Form prefilled from an existing entity (edit mode). Fields the schema
    /// knows nothing about (like `id`) are carried through untouched so they
    /// survive the round trip.
    pub fn from_json(schema: Schema, value: Value) -> Self {
        let mut form = Self::new(schema);
        if let Value::Object(map) = value {
            for (key, val) in map {
                // Nulls become empty strings so text widgets can edit them.
                let val = if val.is_null() { Value::String(String::new()) } else { val };
                form.values.insert(key, val);
            }
        }
        form
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Mutable access to a scalar field's text, coercing to a string value
    /// if the stored value is not one.
    pub fn text_mut(&mut self, name: &str) -> &mut String {
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Value::String(String::new()));
        if !entry.is_string() {
            *entry = Value::String(String::new());
        }
        match entry {
            Value::String(s) => s,
            _ => unreachable!("coerced to string above"),
        }
    }

    /// Mutable access to a row-list field, coercing to an array if needed.
    pub fn rows_mut(&mut self, name: &str) -> &mut Vec<Value> {
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            *entry = Value::Array(Vec::new());
        }
        match entry {
            Value::Array(rows) => rows,
            _ => unreachable!("coerced to array above"),
        }
    }

    /// Append an empty row to a `Rows` field.
    pub fn add_row(&mut self, name: &str) {
        let row_fields = match self.schema.field(name).map(|f| &f.kind) {
            Some(FieldKind::Rows(fields)) => fields.clone(),
            _ => return,
        };
        let mut row = Map::new();
        for field in &row_fields {
            row.insert(field.name.to_string(), Value::String(String::new()));
        }
        self.rows_mut(name).push(Value::Object(row));
    }

    pub fn remove_row(&mut self, name: &str, index: usize) {
        let rows = self.rows_mut(name);
        if index < rows.len() {
            rows.remove(index);
        }
    }

    /// Mark a field as left (blurred) and validate just that field.
    pub fn blur(&mut self, name: &str) {
        self.touched.insert(name.to_string());
        self.validate_field(name);
    }

    fn validate_field(&mut self, name: &str) {
        let Some(spec) = self.schema.field(name) else { return };
        match spec.validate(self.values.get(name)) {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.shift_remove(name);
            }
        }
    }

    /// Error to show for a field, if it was touched or the form submitted.
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.submitted || self.touched.contains(name) {
            self.errors.get(name).map(String::as_str)
        } else {
            None
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any image read is still pending for this form.
    pub fn image_pending(&self, name: &str) -> bool {
        self.pending_images.contains(name)
    }

    pub fn any_image_pending(&self) -> bool {
        !self.pending_images.is_empty()
    }

    /// Kick off a background read of a picked file for an image field.
    pub fn begin_image_read(&mut self, loader: &ImageLoader, field: &str, path: PathBuf) {
        debug!("Reading image for field '{}' from {}", field, path.display());
        self.pending_images.insert(field.to_string());
        self.errors.shift_remove(field);
        loader.request(field, path);
    }

    /// Apply finished reads from the loader to the form. Results for fields
    /// this form never requested are ignored.
    pub fn apply_image_results(&mut self, results: Vec<ImageReadResult>) {
        for result in results {
            if !self.pending_images.remove(&result.field) {
                continue;
            }
            match result.outcome {
                Ok(embedded) => {
                    self.values.insert(result.field.clone(), Value::String(embedded.data_url));
                    self.touched.insert(result.field.clone());
                    self.validate_field(&result.field);
                }
                Err(message) => {
                    self.touched.insert(result.field.clone());
                    self.errors.insert(result.field, message);
                }
            }
        }
    }

    /// Validate everything and hand back the values when the form is clean.
    ///
    /// Empty optional image fields are nulled so entities with
    /// `Option<String>` image slots deserialize to `None` rather than `""`.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.any_image_pending() {
            return SubmitOutcome::Busy;
        }
        self.submitted = true;
        for spec in &self.schema.fields {
            self.touched.insert(spec.name.to_string());
        }
        self.errors = self.schema.validate_all(&self.values);
        if !self.errors.is_empty() {
            debug!("Submit blocked by {} validation error(s)", self.errors.len());
            return SubmitOutcome::Invalid;
        }

        let mut values = self.values.clone();
        for spec in &self.schema.fields {
            if spec.kind == FieldKind::Image && !spec.required {
                let empty = values
                    .get(spec.name)
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.trim().is_empty());
                if empty {
                    values.insert(spec.name.to_string(), Value::Null);
                }
            }
        }
        SubmitOutcome::Ready(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::{FieldSpec, RowField};
    use serde_json::json;

    fn blog_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::text("title", "Title").required(),
            FieldSpec::long_text("excerpt", "Excerpt").max_len(150),
            FieldSpec::new("image", "Image", FieldKind::Image),
        ])
    }

    #[test]
    fn test_new_form_has_defaults_and_no_visible_errors() {
        let form = FormState::new(blog_schema());
        assert_eq!(form.value("title"), Some(&json!("")));
        // Required but untouched: nothing shown yet
        assert_eq!(form.visible_error("title"), None);
    }

    #[test]
    fn test_blur_validates_only_that_field() {
        let mut form = FormState::new(blog_schema());
        form.blur("title");
        assert_eq!(form.visible_error("title"), Some("Title is required"));
        assert_eq!(form.visible_error("excerpt"), None);
    }

    #[test]
    fn test_blur_clears_error_after_fix() {
        let mut form = FormState::new(blog_schema());
        form.blur("title");
        assert!(form.visible_error("title").is_some());
        *form.text_mut("title") = "Field Visit to Hotel Reception".to_string();
        form.blur("title");
        assert_eq!(form.visible_error("title"), None);
    }

    #[test]
    fn test_submit_marks_all_touched_and_reports_errors() {
        let mut form = FormState::new(blog_schema());
        assert_eq!(form.submit(), SubmitOutcome::Invalid);
        assert_eq!(form.visible_error("title"), Some("Title is required"));
    }

    #[test]
    fn test_submit_ready_nulls_empty_optional_image() {
        let mut form = FormState::new(blog_schema());
        *form.text_mut("title") = "Playing with numbers".to_string();
        match form.submit() {
            SubmitOutcome::Ready(values) => {
                assert_eq!(values.get("image"), Some(&Value::Null));
                assert_eq!(values.get("title"), Some(&json!("Playing with numbers")));
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_preserves_unknown_fields_like_id() {
        let form = FormState::from_json(
            blog_schema(),
            json!({"id": 7, "title": "Kept", "image": null}),
        );
        assert_eq!(form.value("id"), Some(&json!(7)));
        // Null image becomes an editable empty string
        assert_eq!(form.value("image"), Some(&json!("")));
    }

    #[test]
    fn test_add_and_remove_rows() {
        let schema = Schema::new(vec![FieldSpec::new(
            "steps",
            "Steps",
            FieldKind::Rows(vec![RowField::new("step", "Step")]),
        )]);
        let mut form = FormState::new(schema);
        form.add_row("steps");
        form.add_row("steps");
        assert_eq!(form.rows_mut("steps").len(), 2);
        form.remove_row("steps", 0);
        assert_eq!(form.rows_mut("steps").len(), 1);
        assert_eq!(form.rows_mut("steps")[0], json!({"step": ""}));
    }

    #[test]
    fn test_submit_busy_while_image_read_pending() {
        let mut form = FormState::new(blog_schema());
        *form.text_mut("title") = "t".to_string();
        form.pending_images.insert("image".to_string());
        assert_eq!(form.submit(), SubmitOutcome::Busy);
    }

    #[test]
    fn test_apply_image_result_sets_data_url() {
        let mut form = FormState::new(blog_schema());
        form.pending_images.insert("image".to_string());
        form.apply_image_results(vec![ImageReadResult {
            generation: 0,
            field: "image".to_string(),
            outcome: Ok(crate::core::EmbeddedImage {
                mime: "image/png",
                data_url: "data:image/png;base64,AAAA".to_string(),
            }),
        }]);
        assert!(!form.any_image_pending());
        assert_eq!(form.value("image"), Some(&json!("data:image/png;base64,AAAA")));
    }

    #[test]
    fn test_apply_image_error_surfaces_on_field() {
        let mut form = FormState::new(blog_schema());
        form.pending_images.insert("image".to_string());
        form.apply_image_results(vec![ImageReadResult {
            generation: 0,
            field: "image".to_string(),
            outcome: Err("File size exceeds 5 MB. Please choose a smaller image.".to_string()),
        }]);
        assert!(form.visible_error("image").unwrap().contains("exceeds"));
    }

    #[test]
    fn test_unrequested_image_result_is_ignored() {
        let mut form = FormState::new(blog_schema());
        form.apply_image_results(vec![ImageReadResult {
            generation: 0,
            field: "image".to_string(),
            outcome: Ok(crate::core::EmbeddedImage {
                mime: "image/png",
                data_url: "data:image/png;base64,BBBB".to_string(),
            }),
        }]);
        assert_eq!(form.value("image"), Some(&json!("")));
    }
}
