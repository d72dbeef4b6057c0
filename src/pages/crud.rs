//! Generic CRUD page over an `EntityStore`.
//!
//! The four record pages (blogs, courses, contacts, team) share this one
//! widget; each supplies a schema, table columns, and a row summary. All
//! mutations go through the store, which persists on every change.

use std::marker::PhantomData;

use egui::{Grid, RichText, ScrollArea, Ui};
use log::error;
use serde_json::Value;

use crate::core::{Entity, EntityStore, EventBus, ImageLoader};
use crate::forms::{self, FormState, Schema};

use super::coordinator::Mode;

/// Per-entity hooks for the shared CRUD widget.
pub struct CrudConfig<'a, T> {
    /// Singular noun for buttons and notices ("Blog").
    pub noun: &'static str,
    pub headers: &'a [&'static str],
    /// Draw one table cell per header for this item.
    pub row: &'a dyn Fn(&mut Ui, &T),
    /// One-line description used in the delete confirmation.
    pub summary: &'a dyn Fn(&T) -> String,
    /// List filter; items failing it are hidden, not removed.
    pub visible: &'a dyn Fn(&T) -> bool,
}

pub struct CrudPage<T> {
    mode: Mode,
    loader: ImageLoader,
    _entity: PhantomData<T>,
}

impl<T> Default for CrudPage<T> {
    fn default() -> Self {
        Self { mode: Mode::List, loader: ImageLoader::new(), _entity: PhantomData }
    }
}

impl<T: Entity> CrudPage<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listing(&self) -> bool {
        self.mode.is_list()
    }

    /// The page's background image loader, shared with sibling forms.
    pub fn image_loader(&self) -> &ImageLoader {
        &self.loader
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        store: &mut EntityStore<T>,
        schema: &Schema,
        config: &CrudConfig<'_, T>,
        bus: &EventBus,
    ) {
        // Finished image reads land on whichever form is open.
        let results = self.loader.poll();
        if !results.is_empty() {
            if let Some(form) = self.mode.form_mut() {
                form.apply_image_results(results);
            }
        }

        match std::mem::replace(&mut self.mode, Mode::List) {
            Mode::List => self.list_ui(ui, store, schema, config),
            Mode::Create(form) => self.editor_ui(ui, store, config, bus, None, form),
            Mode::Edit { id, form } => self.editor_ui(ui, store, config, bus, Some(id), form),
            Mode::View(id) => self.view_ui(ui, store, schema, id),
            Mode::ConfirmDelete(id) => self.confirm_delete_ui(ui, store, config, bus, id),
        }
    }

    fn list_ui(
        &mut self,
        ui: &mut Ui,
        store: &EntityStore<T>,
        schema: &Schema,
        config: &CrudConfig<'_, T>,
    ) {
        ui.horizontal(|ui| {
            ui.heading(format!("{}s", config.noun));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("Add {}", config.noun)).clicked() {
                    self.mode = Mode::Create(FormState::new(schema.clone()));
                }
            });
        });
        ui.separator();

        let visible: Vec<&T> = store.items().iter().filter(|i| (config.visible)(i)).collect();
        if visible.is_empty() {
            ui.label(RichText::new(format!("No {}s yet", config.noun.to_lowercase())).weak());
            return;
        }

        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            Grid::new(format!("{}_table", config.noun))
                .striped(true)
                .num_columns(config.headers.len() + 1)
                .show(ui, |ui| {
                    for header in config.headers {
                        ui.label(RichText::new(*header).strong());
                    }
                    ui.label(RichText::new("Actions").strong());
                    ui.end_row();

                    for item in visible {
                        (config.row)(ui, item);
                        ui.horizontal(|ui| {
                            if ui.small_button("View").clicked() {
                                self.mode = Mode::View(item.id());
                            }
                            if ui.small_button("Edit").clicked() {
                                self.open_edit(schema, item);
                            }
                            if ui.small_button("Delete").clicked() {
                                self.mode = Mode::ConfirmDelete(item.id());
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    }

    fn open_edit(&mut self, schema: &Schema, item: &T) {
        match serde_json::to_value(item) {
            Ok(value) => {
                self.mode = Mode::Edit {
                    id: item.id(),
                    form: FormState::from_json(schema.clone(), value),
                };
            }
            Err(e) => error!("Cannot open editor: {}", e),
        }
    }

    fn editor_ui(
        &mut self,
        ui: &mut Ui,
        store: &mut EntityStore<T>,
        config: &CrudConfig<'_, T>,
        bus: &EventBus,
        id: Option<u32>,
        mut form: FormState,
    ) {
        let title = match id {
            Some(_) => format!("Edit {}", config.noun),
            None => format!("Add {}", config.noun),
        };
        ui.heading(&title);
        ui.separator();

        let mut save = false;
        let mut cancel = false;
        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            forms::form_ui(ui, &mut form, &self.loader);

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let busy = form.any_image_pending();
                if ui.add_enabled(!busy, egui::Button::new("Save")).clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

        let mode = match id {
            Some(id) => Mode::Edit { id, form },
            None => Mode::Create(form),
        };
        self.mode = if save {
            mode.submit(store, bus, config.noun)
        } else if cancel {
            // In-flight image reads must not mutate the next form.
            self.loader.invalidate();
            mode.cancel()
        } else {
            mode
        };
    }

    fn view_ui(&mut self, ui: &mut Ui, store: &EntityStore<T>, schema: &Schema, id: u32) {
        self.mode = Mode::View(id);
        let Some(item) = store.get(id) else {
            self.mode = Mode::List;
            return;
        };
        let values = match serde_json::to_value(item) {
            Ok(Value::Object(map)) => map,
            _ => {
                self.mode = Mode::List;
                return;
            }
        };

        ui.horizontal(|ui| {
            ui.heading("Details");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Back").clicked() {
                    self.mode = Mode::List;
                }
            });
        });
        ui.separator();

        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            Grid::new("view_grid").num_columns(2).show(ui, |ui| {
                for spec in &schema.fields {
                    ui.label(RichText::new(spec.label).strong());
                    match values.get(spec.name) {
                        Some(Value::String(s)) if s.starts_with("data:") => {
                            forms::render::data_url_preview(ui, spec.name, s);
                        }
                        Some(Value::String(s)) => {
                            ui.label(s);
                        }
                        Some(Value::Array(rows)) => {
                            ui.vertical(|ui| {
                                for row in rows {
                                    ui.label(summarize_row(row));
                                }
                            });
                        }
                        _ => {
                            ui.label(RichText::new("-").weak());
                        }
                    }
                    ui.end_row();
                }
            });
        });
    }

    fn confirm_delete_ui(
        &mut self,
        ui: &mut Ui,
        store: &mut EntityStore<T>,
        config: &CrudConfig<'_, T>,
        bus: &EventBus,
        id: u32,
    ) {
        self.mode = Mode::ConfirmDelete(id);
        let Some(item) = store.get(id) else {
            self.mode = Mode::List;
            return;
        };
        let summary = (config.summary)(item);

        egui::Window::new(format!("Delete {}?", config.noun))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ui.ctx(), |ui| {
                ui.label(format!("This will permanently remove \"{}\".", summary));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        self.mode = Mode::ConfirmDelete(id).confirm_delete(store, bus, config.noun);
                    }
                    if ui.button("Cancel").clicked() {
                        self.mode = Mode::List;
                    }
                });
            });
    }
}

fn summarize_row(row: &Value) -> String {
    match row {
        Value::Object(map) => map
            .values()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" - "),
        other => other.to_string(),
    }
}
