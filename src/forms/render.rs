//! egui rendering for schema-driven forms.
//!
//! One renderer walks the schema and draws the matching widget per field;
//! pages never hand-build form layouts. Blur detection uses egui focus
//! loss, which maps to the touched-field validation lifecycle.

use egui::{Color32, ComboBox, RichText, TextEdit, Ui};
use serde_json::Value;

use crate::core::{ImageLoader, image_loader::decode_data_url};

use super::form::FormState;
use super::schema::{FieldKind, FieldSpec, RowField};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 80, 80);
const PREVIEW_MAX_SIZE: f32 = 160.0;

/// Draw every field of the form, wiring blur validation and image picks.
pub fn form_ui(ui: &mut Ui, form: &mut FormState, loader: &ImageLoader) {
    let specs = form.schema().fields.clone();
    for spec in &specs {
        ui.label(RichText::new(field_label(spec)).strong());
        match &spec.kind {
            FieldKind::Text | FieldKind::Date | FieldKind::Email | FieldKind::Url => {
                text_field(ui, form, spec, false);
            }
            FieldKind::LongText => {
                text_field(ui, form, spec, true);
            }
            FieldKind::Select(options) => {
                select_field(ui, form, spec, options);
            }
            FieldKind::Image => {
                image_field(ui, form, loader, spec);
            }
            FieldKind::Rows(row_fields) => {
                rows_field(ui, form, spec, row_fields);
            }
        }
        if let Some(error) = form.visible_error(spec.name) {
            ui.colored_label(ERROR_COLOR, error);
        }
        ui.add_space(8.0);
    }
}

fn field_label(spec: &FieldSpec) -> String {
    if spec.required {
        format!("{} *", spec.label)
    } else {
        spec.label.to_string()
    }
}

fn text_field(ui: &mut Ui, form: &mut FormState, spec: &FieldSpec, multiline: bool) {
    let text = form.text_mut(spec.name);
    let response = if multiline {
        ui.add(TextEdit::multiline(text).desired_rows(4).desired_width(f32::INFINITY))
    } else {
        ui.add(TextEdit::singleline(text).desired_width(f32::INFINITY))
    };
    if response.lost_focus() {
        form.blur(spec.name);
    }
}

fn select_field(ui: &mut Ui, form: &mut FormState, spec: &FieldSpec, options: &[String]) {
    let current = form.text_mut(spec.name).clone();
    let display = if current.is_empty() { "Select..." } else { current.as_str() };
    let mut picked = None;
    ComboBox::from_id_salt(spec.name)
        .selected_text(display)
        .show_ui(ui, |ui| {
            for option in options {
                if ui.selectable_label(current == *option, option).clicked() {
                    picked = Some(option.clone());
                }
            }
        });
    if let Some(option) = picked {
        *form.text_mut(spec.name) = option;
        form.blur(spec.name);
    }
}

fn image_field(ui: &mut Ui, form: &mut FormState, loader: &ImageLoader, spec: &FieldSpec) {
    ui.horizontal(|ui| {
        let text = form.text_mut(spec.name);
        let hint = "https://... or pick a file";
        let response =
            ui.add(TextEdit::singleline(text).hint_text(hint).desired_width(320.0));
        if response.lost_focus() {
            form.blur(spec.name);
        }
        let pending = form.image_pending(spec.name);
        if pending {
            ui.spinner();
            ui.label("Reading...");
        } else if ui.button("Browse...").clicked() {
            if let Some(path) = image_pick_dialog(&spec.label.to_lowercase()).pick_file() {
                form.begin_image_read(loader, spec.name, path);
            }
        }
    });
    image_preview(ui, spec.name, form.value(spec.name));
}

fn image_preview(ui: &mut Ui, field: &str, value: Option<&Value>) {
    if let Some(data_url) = value.and_then(Value::as_str) {
        data_url_preview(ui, field, data_url);
    }
}

/// Thumbnail for an embedded data-URL (or a plain remote URL).
pub fn data_url_preview(ui: &mut Ui, field: &str, data_url: &str) {
    if let Some(bytes) = decode_data_url(data_url) {
        // URI keyed by content length so egui's texture cache refreshes
        // when a different image is picked for the same field.
        let uri = format!("bytes://form/{}/{}", field, bytes.len());
        ui.add(
            egui::Image::from_bytes(uri, bytes)
                .max_size(egui::vec2(PREVIEW_MAX_SIZE, PREVIEW_MAX_SIZE)),
        );
    } else if data_url.starts_with("http") {
        ui.add(
            egui::Image::from_uri(data_url.to_string())
                .max_size(egui::vec2(PREVIEW_MAX_SIZE, PREVIEW_MAX_SIZE)),
        );
    }
}

fn rows_field(ui: &mut Ui, form: &mut FormState, spec: &FieldSpec, row_fields: &[RowField]) {
    let mut remove_at = None;
    let rows = form.rows_mut(spec.name);
    for (index, row) in rows.iter_mut().enumerate() {
        let Value::Object(map) = row else { continue };
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("#{}", index + 1)).weak());
                if ui.small_button("Remove").clicked() {
                    remove_at = Some(index);
                }
            });
            for field in row_fields {
                let entry = map
                    .entry(field.name.to_string())
                    .or_insert_with(|| Value::String(String::new()));
                if !entry.is_string() {
                    *entry = Value::String(String::new());
                }
                if let Value::String(text) = entry {
                    ui.horizontal(|ui| {
                        ui.label(field.label);
                        if field.long {
                            ui.add(TextEdit::multiline(text).desired_rows(2));
                        } else {
                            ui.add(TextEdit::singleline(text).desired_width(280.0));
                        }
                    });
                }
            }
        });
    }
    if let Some(index) = remove_at {
        form.remove_row(spec.name, index);
        form.blur(spec.name);
    }
    if ui.button(format!("Add {}", spec.label.to_lowercase())).clicked() {
        form.add_row(spec.name);
    }
}

/// Configured file dialog for image selection.
pub fn image_pick_dialog(what: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
        .set_title(format!("Choose {}", what))
}
