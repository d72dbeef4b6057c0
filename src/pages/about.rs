//! About page editor: one nested record, edited one section at a time.

use egui::{Grid, RichText, ScrollArea, Ui};
use log::error;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::{AppEvent, EventBus, ImageLoader, SectionStore};
use crate::entities::about::{self, AboutData, AboutTeamMember};
use crate::forms::render::data_url_preview;
use crate::forms::{self, FormState, Schema, SubmitOutcome};

use super::coordinator::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AboutSection {
    Banner,
    Vision,
    GetToKnowUs,
    PrincipleMessage,
    Milestone,
    Programs,
    Team,
}

const SECTIONS: [(AboutSection, &str); 7] = [
    (AboutSection::Banner, "Banner"),
    (AboutSection::Vision, "Vision"),
    (AboutSection::GetToKnowUs, "Get to know us"),
    (AboutSection::PrincipleMessage, "Principal's message"),
    (AboutSection::Milestone, "Milestones"),
    (AboutSection::Programs, "Programs"),
    (AboutSection::Team, "Team"),
];

pub struct AboutPage {
    active: AboutSection,
    form: Option<FormState>,
    team_mode: Mode,
    loader: ImageLoader,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            active: AboutSection::Banner,
            form: None,
            team_mode: Mode::List,
            loader: ImageLoader::new(),
        }
    }
}

impl AboutPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut Ui, store: &mut SectionStore<AboutData>, bus: &EventBus) {
        let results = self.loader.poll();
        if !results.is_empty() {
            match self.form.as_mut() {
                Some(form) => form.apply_image_results(results),
                None => {
                    if let Some(form) = self.team_mode.form_mut() {
                        form.apply_image_results(results);
                    }
                }
            }
        }

        ui.horizontal(|ui| {
            for (section, label) in SECTIONS {
                if ui.selectable_label(self.active == section, label).clicked()
                    && self.active != section
                {
                    self.active = section;
                    self.form = None;
                    self.team_mode = Mode::List;
                    self.loader.invalidate();
                }
            }
        });
        ui.separator();

        if self.active == AboutSection::Team {
            self.team_ui(ui, store, bus);
            return;
        }
        self.section_form_ui(ui, store, bus);
    }

    fn section_form_ui(&mut self, ui: &mut Ui, store: &mut SectionStore<AboutData>, bus: &EventBus) {
        let (schema, current): (Schema, Value) = {
            let data = store.record();
            match self.active {
                AboutSection::Banner => (about::banner_schema(), to_value(&data.banner)),
                AboutSection::Vision => (about::banner_schema(), to_value(&data.vision)),
                AboutSection::GetToKnowUs => {
                    (about::get_to_know_us_schema(), to_value(&data.get_to_know_us))
                }
                AboutSection::PrincipleMessage => {
                    (about::principle_message_schema(), to_value(&data.principle_message))
                }
                AboutSection::Milestone => (about::milestone_schema(), to_value(&data.milestone)),
                AboutSection::Programs => (about::programs_schema(), to_value(&data.programs)),
                AboutSection::Team => unreachable!("team has its own editor"),
            }
        };

        let form = self
            .form
            .get_or_insert_with(|| FormState::from_json(schema, current));

        let mut submitted = None;
        let mut reset = false;
        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            forms::form_ui(ui, form, &self.loader);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let busy = form.any_image_pending();
                if ui.add_enabled(!busy, egui::Button::new("Save")).clicked() {
                    if let SubmitOutcome::Ready(values) = form.submit() {
                        submitted = Some(values);
                    }
                }
                if ui.button("Reset").clicked() {
                    reset = true;
                }
            });
        });
        if reset {
            self.loader.invalidate();
            self.form = None;
            return;
        }

        let Some(values) = submitted else { return };
        let mut data = store.record().clone();
        let ok = match self.active {
            AboutSection::Banner => assign(&mut data.banner, values),
            AboutSection::Vision => assign(&mut data.vision, values),
            AboutSection::GetToKnowUs => assign(&mut data.get_to_know_us, values),
            AboutSection::PrincipleMessage => assign(&mut data.principle_message, values),
            AboutSection::Milestone => assign(&mut data.milestone, values),
            AboutSection::Programs => assign(&mut data.programs, values),
            AboutSection::Team => false,
        };
        if ok {
            store.save(data);
            self.form = None;
            bus.emit(AppEvent::Notify("About page saved".into()));
            bus.emit(AppEvent::StoreChanged { key: store.key() });
        }
    }

    fn team_ui(&mut self, ui: &mut Ui, store: &mut SectionStore<AboutData>, bus: &EventBus) {
        match std::mem::replace(&mut self.team_mode, Mode::List) {
            Mode::List => self.team_list_ui(ui, store),
            Mode::Create(form) => self.team_editor_ui(ui, store, bus, None, form),
            Mode::Edit { id, form } => self.team_editor_ui(ui, store, bus, Some(id), form),
            Mode::View(id) => {
                // Members are small; viewing happens inline in the list.
                let _ = id;
                self.team_list_ui(ui, store);
            }
            Mode::ConfirmDelete(id) => self.team_confirm_delete_ui(ui, store, bus, id),
        }
    }

    fn team_list_ui(&mut self, ui: &mut Ui, store: &SectionStore<AboutData>) {
        ui.horizontal(|ui| {
            ui.heading("Page team");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Add member").clicked() {
                    self.team_mode = Mode::Create(FormState::new(about::about_team_schema()));
                }
            });
        });
        ui.separator();

        let team = &store.record().team;
        if team.is_empty() {
            ui.label(RichText::new("No members yet").weak());
            return;
        }
        Grid::new("about_team").striped(true).num_columns(4).show(ui, |ui| {
            for member in team {
                if member.image_url.is_empty() {
                    ui.label(RichText::new("-").weak());
                } else {
                    data_url_preview(ui, "imageUrl", &member.image_url);
                }
                ui.label(&member.name);
                ui.label(&member.role);
                ui.horizontal(|ui| {
                    if ui.small_button("Edit").clicked() {
                        if let Ok(value) = serde_json::to_value(member) {
                            self.team_mode = Mode::Edit {
                                id: member.id,
                                form: FormState::from_json(about::about_team_schema(), value),
                            };
                        }
                    }
                    if ui.small_button("Delete").clicked() {
                        self.team_mode = Mode::ConfirmDelete(member.id);
                    }
                });
                ui.end_row();
            }
        });
    }

    fn team_editor_ui(
        &mut self,
        ui: &mut Ui,
        store: &mut SectionStore<AboutData>,
        bus: &EventBus,
        id: Option<u32>,
        mut form: FormState,
    ) {
        ui.heading(if id.is_some() { "Edit member" } else { "Add member" });
        ui.separator();

        let mut done = false;
        forms::form_ui(ui, &mut form, &self.loader);
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let busy = form.any_image_pending();
            if ui.add_enabled(!busy, egui::Button::new("Save")).clicked() {
                if let SubmitOutcome::Ready(values) = form.submit() {
                    match serde_json::from_value::<AboutTeamMember>(Value::Object(values)) {
                        Ok(mut member) => {
                            let mut data = store.record().clone();
                            match id {
                                None => {
                                    data.add_team_member(member);
                                    bus.emit(AppEvent::Notify("Member added".into()));
                                }
                                Some(id) => {
                                    member.id = id;
                                    data.update_team_member(member);
                                    bus.emit(AppEvent::Notify("Member updated".into()));
                                }
                            }
                            store.save(data);
                            bus.emit(AppEvent::StoreChanged { key: store.key() });
                            done = true;
                        }
                        Err(e) => error!("Submitted member does not deserialize: {}", e),
                    }
                }
            }
            if ui.button("Cancel").clicked() {
                self.loader.invalidate();
                done = true;
            }
        });

        if !done {
            self.team_mode = match id {
                Some(id) => Mode::Edit { id, form },
                None => Mode::Create(form),
            };
        }
    }

    fn team_confirm_delete_ui(
        &mut self,
        ui: &mut Ui,
        store: &mut SectionStore<AboutData>,
        bus: &EventBus,
        id: u32,
    ) {
        self.team_mode = Mode::ConfirmDelete(id);
        let Some(member) = store.record().team.iter().find(|m| m.id == id) else {
            self.team_mode = Mode::List;
            return;
        };
        let name = member.name.clone();

        egui::Window::new("Delete member?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ui.ctx(), |ui| {
                ui.label(format!("This will permanently remove \"{}\".", name));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        let mut data = store.record().clone();
                        data.remove_team_member(id);
                        store.save(data);
                        bus.emit(AppEvent::Notify("Member deleted".into()));
                        bus.emit(AppEvent::StoreChanged { key: store.key() });
                        self.team_mode = Mode::List;
                    }
                    if ui.button("Cancel").clicked() {
                        self.team_mode = Mode::List;
                    }
                });
            });
    }
}

fn to_value<S: serde::Serialize>(section: &S) -> Value {
    serde_json::to_value(section).unwrap_or(Value::Null)
}

fn assign<S: DeserializeOwned>(slot: &mut S, values: serde_json::Map<String, Value>) -> bool {
    match serde_json::from_value(Value::Object(values)) {
        Ok(section) => {
            *slot = section;
            true
        }
        Err(e) => {
            error!("Submitted section does not deserialize: {}", e);
            false
        }
    }
}
