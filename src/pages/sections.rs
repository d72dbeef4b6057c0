//! Page sections editor: nine single-record forms behind one selector.

use std::sync::Arc;

use egui::{ScrollArea, Ui};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::{AppEvent, EventBus, ImageLoader, LocalStorage, SectionStore};
use crate::entities::sections::{
    self, AdmissionData, ContactSectionData, EligibilityData, EventData, GalleryData, HomeData,
    HowToApplyData, NoticeData, ScholarshipData,
};
use crate::forms::{self, FormState, Schema, SubmitOutcome};

/// All single-record section stores, opened together.
pub struct SectionStores {
    pub home: SectionStore<HomeData>,
    pub admission: SectionStore<AdmissionData>,
    pub eligibility: SectionStore<EligibilityData>,
    pub events: SectionStore<EventData>,
    pub gallery: SectionStore<GalleryData>,
    pub how_to_apply: SectionStore<HowToApplyData>,
    pub notices: SectionStore<NoticeData>,
    pub scholarships: SectionStore<ScholarshipData>,
    pub contact_section: SectionStore<ContactSectionData>,
}

impl SectionStores {
    pub fn open(storage: &Arc<LocalStorage>) -> Self {
        Self {
            home: SectionStore::open(storage.clone(), sections::HOME_KEY, HomeData::default),
            admission: SectionStore::open(
                storage.clone(),
                sections::ADMISSION_KEY,
                AdmissionData::default,
            ),
            eligibility: SectionStore::open(
                storage.clone(),
                sections::ELIGIBILITY_KEY,
                EligibilityData::default,
            ),
            events: SectionStore::open(storage.clone(), sections::EVENTS_KEY, EventData::default),
            gallery: SectionStore::open(
                storage.clone(),
                sections::GALLERY_KEY,
                GalleryData::default,
            ),
            how_to_apply: SectionStore::open(
                storage.clone(),
                sections::HOW_TO_APPLY_KEY,
                HowToApplyData::default,
            ),
            notices: SectionStore::open(
                storage.clone(),
                sections::NOTICES_KEY,
                NoticeData::default,
            ),
            scholarships: SectionStore::open(
                storage.clone(),
                sections::SCHOLARSHIPS_KEY,
                ScholarshipData::default,
            ),
            contact_section: SectionStore::open(
                storage.clone(),
                sections::CONTACT_SECTION_KEY,
                ContactSectionData::default,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Home,
    Admission,
    Eligibility,
    Events,
    Gallery,
    HowToApply,
    Notices,
    Scholarships,
    ContactInfo,
}

const SECTIONS: [(SectionKind, &str); 9] = [
    (SectionKind::Home, "Home"),
    (SectionKind::Admission, "Admission"),
    (SectionKind::Eligibility, "Eligibility"),
    (SectionKind::Events, "Events"),
    (SectionKind::Gallery, "Gallery"),
    (SectionKind::HowToApply, "How to apply"),
    (SectionKind::Notices, "Notices"),
    (SectionKind::Scholarships, "Scholarships"),
    (SectionKind::ContactInfo, "Contact info"),
];

pub struct SectionsPage {
    active: SectionKind,
    form: Option<FormState>,
    loader: ImageLoader,
}

impl Default for SectionsPage {
    fn default() -> Self {
        Self { active: SectionKind::Home, form: None, loader: ImageLoader::new() }
    }
}

impl SectionsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut Ui, stores: &mut SectionStores, bus: &EventBus) {
        let results = self.loader.poll();
        if !results.is_empty() {
            if let Some(form) = self.form.as_mut() {
                form.apply_image_results(results);
            }
        }

        ui.horizontal_wrapped(|ui| {
            for (kind, label) in SECTIONS {
                if ui.selectable_label(self.active == kind, label).clicked() && self.active != kind
                {
                    self.active = kind;
                    self.form = None;
                    self.loader.invalidate();
                }
            }
        });
        ui.separator();

        match self.active {
            SectionKind::Home => {
                self.section_ui(ui, bus, sections::home_schema(), &mut stores.home)
            }
            SectionKind::Admission => {
                self.section_ui(ui, bus, sections::admission_schema(), &mut stores.admission)
            }
            SectionKind::Eligibility => {
                self.section_ui(ui, bus, sections::eligibility_schema(), &mut stores.eligibility)
            }
            SectionKind::Events => {
                self.section_ui(ui, bus, sections::events_schema(), &mut stores.events)
            }
            SectionKind::Gallery => {
                self.section_ui(ui, bus, sections::gallery_schema(), &mut stores.gallery)
            }
            SectionKind::HowToApply => {
                self.section_ui(ui, bus, sections::how_to_apply_schema(), &mut stores.how_to_apply)
            }
            SectionKind::Notices => {
                self.section_ui(ui, bus, sections::notices_schema(), &mut stores.notices)
            }
            SectionKind::Scholarships => {
                self.section_ui(ui, bus, sections::scholarships_schema(), &mut stores.scholarships)
            }
            SectionKind::ContactInfo => {
                self.contact_section_ui(ui, bus, &mut stores.contact_section)
            }
        }
    }

    /// Shared form lifecycle for sections that map straight onto one struct.
    fn section_ui<S>(
        &mut self,
        ui: &mut Ui,
        bus: &EventBus,
        schema: Schema,
        store: &mut SectionStore<S>,
    ) where
        S: Serialize + DeserializeOwned + Clone,
    {
        let current = serde_json::to_value(store.record()).unwrap_or(Value::Null);
        let form = self.form.get_or_insert_with(|| FormState::from_json(schema, current));

        let mut submitted = None;
        let mut reset = false;
        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            forms::form_ui(ui, form, &self.loader);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
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

        if let Some(values) = submitted {
            match serde_json::from_value::<S>(Value::Object(values)) {
                Ok(record) => {
                    store.save(record);
                    self.form = None;
                    bus.emit(AppEvent::Notify("Section saved".into()));
                    bus.emit(AppEvent::StoreChanged { key: store.key() });
                }
                Err(e) => log::error!("Submitted section does not deserialize: {}", e),
            }
        }
    }

    /// The contact section stores social links nested; the form edits them flat.
    fn contact_section_ui(
        &mut self,
        ui: &mut Ui,
        bus: &EventBus,
        store: &mut SectionStore<ContactSectionData>,
    ) {
        let current = Value::Object(store.record().to_form_values());
        let form = self.form.get_or_insert_with(|| {
            FormState::from_json(sections::contact_section_schema(), current)
        });

        let mut submitted = None;
        let mut reset = false;
        ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            forms::form_ui(ui, form, &self.loader);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
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
            self.form = None;
            return;
        }

        if let Some(values) = submitted {
            store.save(ContactSectionData::from_form_values(&values));
            self.form = None;
            bus.emit(AppEvent::Notify("Contact information saved".into()));
            bus.emit(AppEvent::StoreChanged { key: store.key() });
        }
    }
}
