//! Contact inquiries page, with the published contact details editor.

use egui::{Color32, RichText, ScrollArea, Ui};

use crate::core::{AppEvent, EntityStore, EventBus, SectionStore};
use crate::entities::contact::{self, Contact, ContactInfo};
use crate::forms::{self, FormState, SubmitOutcome};

use super::crud::{CrudConfig, CrudPage};

#[derive(Default)]
pub struct ContactsPage {
    crud: CrudPage<Contact>,
    info_form: Option<FormState>,
}

impl ContactsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        store: &mut EntityStore<Contact>,
        info: &mut SectionStore<ContactInfo>,
        bus: &EventBus,
    ) {
        if self.crud.is_listing() {
            ui.horizontal(|ui| {
                let editing = self.info_form.is_some();
                if ui.selectable_label(editing, "Contact info").clicked() {
                    self.info_form = match editing {
                        true => None,
                        false => Some(info_form(info)),
                    };
                }
            });
            if self.info_form.is_some() {
                self.info_ui(ui, info, bus);
                return;
            }
            ui.add_space(4.0);
        }

        let schema = contact::contact_schema();
        let config = CrudConfig {
            noun: "Contact",
            headers: &["Name", "Subject", "Department", "Priority", "Status"],
            row: &|ui, contact: &Contact| {
                ui.label(&contact.name);
                ui.label(&contact.subject);
                ui.label(&contact.department);
                ui.colored_label(priority_color(&contact.priority), &contact.priority);
                ui.label(RichText::new(&contact.status).italics());
            },
            summary: &|contact| format!("{} ({})", contact.name, contact.subject),
            visible: &|_| true,
        };
        self.crud.ui(ui, store, &schema, &config, bus);
    }

    fn info_ui(&mut self, ui: &mut Ui, info: &mut SectionStore<ContactInfo>, bus: &EventBus) {
        let Some(form) = self.info_form.as_mut() else { return };

        let mut submitted = None;
        let mut cancel = false;
        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            forms::form_ui(ui, form, self.crud.image_loader());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    if let SubmitOutcome::Ready(values) = form.submit() {
                        submitted = Some(values);
                    }
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

        if cancel {
            self.info_form = None;
            return;
        }
        if let Some(values) = submitted {
            match serde_json::from_value::<ContactInfo>(serde_json::Value::Object(values)) {
                Ok(record) => {
                    info.save(record);
                    self.info_form = None;
                    bus.emit(AppEvent::Notify("Contact info updated".into()));
                    bus.emit(AppEvent::StoreChanged { key: info.key() });
                }
                Err(e) => log::error!("Submitted contact info does not deserialize: {}", e),
            }
        }
    }
}

fn info_form(info: &SectionStore<ContactInfo>) -> FormState {
    let current = serde_json::to_value(info.record()).unwrap_or(serde_json::Value::Null);
    FormState::from_json(contact::contact_info_schema(), current)
}

fn priority_color(priority: &str) -> Color32 {
    match priority {
        "High" => Color32::from_rgb(220, 80, 80),
        "Medium" => Color32::from_rgb(220, 160, 60),
        _ => Color32::GRAY,
    }
}
