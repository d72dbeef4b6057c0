//! Blogs page: filterable post list plus the category manager.

use egui::{ComboBox, RichText, Ui};

use crate::core::{AppEvent, EntityStore, EventBus, SectionStore};
use crate::entities::blog::{self, Blog, ALL_CATEGORIES, CATEGORIES_KEY};

use super::crud::{CrudConfig, CrudPage};

pub struct BlogsPage {
    crud: CrudPage<Blog>,
    selected_category: String,
    show_categories: bool,
    new_category: String,
}

impl Default for BlogsPage {
    fn default() -> Self {
        Self {
            crud: CrudPage::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            show_categories: false,
            new_category: String::new(),
        }
    }
}

impl BlogsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        store: &mut EntityStore<Blog>,
        categories: &mut SectionStore<Vec<String>>,
        bus: &EventBus,
    ) {
        if self.crud.is_listing() {
            self.filter_bar(ui, categories, bus);
        }

        let schema = blog_schema_for(categories);
        let selected = self.selected_category.clone();
        let config = CrudConfig {
            noun: "Blog",
            headers: &["Title", "Category", "Author", "Date"],
            row: &|ui, blog: &Blog| {
                ui.label(&blog.title);
                ui.label(&blog.category);
                ui.label(&blog.author);
                ui.label(&blog.date);
            },
            summary: &|blog| blog.title.clone(),
            visible: &|blog| blog::matches_category(blog, &selected),
        };
        self.crud.ui(ui, store, &schema, &config, bus);
    }

    fn filter_bar(&mut self, ui: &mut Ui, categories: &mut SectionStore<Vec<String>>, bus: &EventBus) {
        ui.horizontal(|ui| {
            ui.label("Category:");
            ComboBox::from_id_salt("blog_category_filter")
                .selected_text(&self.selected_category)
                .show_ui(ui, |ui| {
                    let mut options = vec![ALL_CATEGORIES.to_string()];
                    options.extend(categories.record().iter().cloned());
                    for option in options {
                        let checked = self.selected_category == option;
                        if ui.selectable_label(checked, &option).clicked() {
                            self.selected_category = option;
                        }
                    }
                });
            if ui.button("Manage categories").clicked() {
                self.show_categories = !self.show_categories;
            }
        });

        if self.show_categories {
            self.categories_ui(ui, categories, bus);
        }
        ui.add_space(4.0);
    }

    fn categories_ui(
        &mut self,
        ui: &mut Ui,
        categories: &mut SectionStore<Vec<String>>,
        bus: &EventBus,
    ) {
        ui.group(|ui| {
            ui.label(RichText::new("Categories").strong());
            let mut remove_at = None;
            for (index, category) in categories.record().iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(category);
                    if ui.small_button("Remove").clicked() {
                        remove_at = Some(index);
                    }
                });
            }
            if let Some(index) = remove_at {
                let mut list = categories.record().clone();
                let removed = list.remove(index);
                // Posts keep their category; the filter list just shrinks.
                if self.selected_category == removed {
                    self.selected_category = ALL_CATEGORIES.to_string();
                }
                categories.save(list);
                bus.emit(AppEvent::Notify(format!("Category \"{}\" removed", removed)));
                bus.emit(AppEvent::StoreChanged { key: CATEGORIES_KEY });
            }

            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut self.new_category);
                let name = self.new_category.trim().to_string();
                let duplicate =
                    name == ALL_CATEGORIES || categories.record().iter().any(|c| *c == name);
                if ui.add_enabled(!name.is_empty() && !duplicate, egui::Button::new("Add")).clicked()
                {
                    let mut list = categories.record().clone();
                    list.push(name.clone());
                    categories.save(list);
                    self.new_category.clear();
                    bus.emit(AppEvent::Notify(format!("Category \"{}\" added", name)));
                    bus.emit(AppEvent::StoreChanged { key: CATEGORIES_KEY });
                }
            });
        });
    }
}

fn blog_schema_for(categories: &SectionStore<Vec<String>>) -> crate::forms::Schema {
    blog::blog_schema(categories.record())
}
