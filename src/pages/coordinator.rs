//! Page mode state machine.
//!
//! A CRUD page is always in exactly one mode: listing, creating, editing,
//! viewing one record, or confirming a delete. Opening any non-list mode
//! replaces the previous one, so stale forms never linger behind a modal.
//! The mutating transitions (submit, confirmed delete, cancel) live here so
//! the whole lifecycle runs without a `Ui`.

use log::error;
use serde_json::{Map, Value};

use crate::core::{AppEvent, Entity, EntityStore, EventBus};
use crate::forms::{FormState, SubmitOutcome};

pub enum Mode {
    List,
    Create(FormState),
    Edit { id: u32, form: FormState },
    View(u32),
    ConfirmDelete(u32),
}

impl Mode {
    pub fn is_list(&self) -> bool {
        matches!(self, Mode::List)
    }

    /// The form being edited, when one is open.
    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Mode::Create(form) | Mode::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Submit whichever editor is open. A clean create appends, a clean edit
    /// replaces the record with the matching id; both land back on the list.
    /// Validation failures and in-flight image reads keep the editor open
    /// with its values intact. Non-editor modes pass through unchanged.
    pub fn submit<T: Entity>(
        self,
        store: &mut EntityStore<T>,
        bus: &EventBus,
        noun: &str,
    ) -> Mode {
        let (id, mut form) = match self {
            Mode::Create(form) => (None, form),
            Mode::Edit { id, form } => (Some(id), form),
            other => return other,
        };
        if let SubmitOutcome::Ready(values) = form.submit() {
            if apply_save(store, bus, noun, id, values) {
                return Mode::List;
            }
        }
        match id {
            Some(id) => Mode::Edit { id, form },
            None => Mode::Create(form),
        }
    }

    /// Carry out a confirmed delete and return to the list. Unknown ids are
    /// a silent no-op at the store; no notice is emitted for them.
    pub fn confirm_delete<T: Entity>(
        self,
        store: &mut EntityStore<T>,
        bus: &EventBus,
        noun: &str,
    ) -> Mode {
        match self {
            Mode::ConfirmDelete(id) => {
                if store.remove(id) {
                    bus.emit(AppEvent::Notify(format!("{} deleted", noun)));
                    bus.emit(AppEvent::StoreChanged { key: store.key() });
                }
                Mode::List
            }
            other => other,
        }
    }

    /// Abandon the current mode without touching the store.
    pub fn cancel(self) -> Mode {
        Mode::List
    }
}

/// Persist submitted values as a create (no id) or an update (edit id wins
/// over whatever the form carried). False means the editor should stay open.
fn apply_save<T: Entity>(
    store: &mut EntityStore<T>,
    bus: &EventBus,
    noun: &str,
    id: Option<u32>,
    values: Map<String, Value>,
) -> bool {
    let item: T = match serde_json::from_value(Value::Object(values)) {
        Ok(item) => item,
        Err(e) => {
            error!("Submitted {} does not deserialize: {}", noun, e);
            bus.emit(AppEvent::Notify(format!("Could not save {}", noun)));
            return false;
        }
    };
    match id {
        None => {
            store.add(item);
            bus.emit(AppEvent::Notify(format!("{} added", noun)));
        }
        Some(id) => {
            let mut item = item;
            item.set_id(id);
            store.update(item);
            bus.emit(AppEvent::Notify(format!("{} updated", noun)));
        }
    }
    bus.emit(AppEvent::StoreChanged { key: store.key() });
    true
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::core::LocalStorage;
    use crate::forms::{FieldSpec, Schema};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Notice {
        #[serde(default)]
        id: u32,
        title: String,
    }

    impl Entity for Notice {
        fn id(&self) -> u32 {
            self.id
        }
        fn set_id(&mut self, id: u32) {
            self.id = id;
        }
    }

    fn schema() -> Schema {
        Schema::new(vec![FieldSpec::text("title", "Title").required()])
    }

    fn form() -> FormState {
        FormState::new(schema())
    }

    fn filled_form(title: &str) -> FormState {
        FormState::from_json(schema(), json!({ "title": title }))
    }

    fn temp_store(tag: &str) -> EntityStore<Notice> {
        let dir = std::env::temp_dir()
            .join("chalkbook_coordinator_tests")
            .join(format!("{}_{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let storage = Arc::new(LocalStorage::open(&dir).unwrap());
        EntityStore::open(storage, "notices", Vec::new)
    }

    #[test]
    fn test_only_editing_modes_expose_a_form() {
        assert!(Mode::List.form_mut().is_none());
        assert!(Mode::View(1).form_mut().is_none());
        assert!(Mode::ConfirmDelete(1).form_mut().is_none());
        assert!(Mode::Create(form()).form_mut().is_some());
        assert!(Mode::Edit { id: 2, form: form() }.form_mut().is_some());
    }

    #[test]
    fn test_opening_a_mode_replaces_the_previous_one() {
        let mut mode = Mode::Create(form());
        mode = Mode::ConfirmDelete(3);
        assert!(matches!(mode, Mode::ConfirmDelete(3)));
        mode = Mode::List;
        assert!(mode.is_list());
    }

    #[test]
    fn test_create_submit_adds_record_and_returns_to_list() {
        let mut store = temp_store("create");
        let bus = EventBus::new();

        let mode = Mode::Create(filled_form("Sports day")).submit(&mut store, &bus, "Notice");

        assert!(mode.is_list());
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].id, 1);
        assert_eq!(store.items()[0].title, "Sports day");
        let events = bus.poll();
        assert!(events.contains(&AppEvent::Notify("Notice added".into())));
        assert!(events.contains(&AppEvent::StoreChanged { key: "notices" }));
    }

    #[test]
    fn test_invalid_submit_keeps_editor_open_with_values() {
        let mut store = temp_store("invalid");
        let bus = EventBus::new();

        let mode = Mode::Create(form()).submit(&mut store, &bus, "Notice");

        match mode {
            Mode::Create(form) => {
                assert_eq!(form.visible_error("title"), Some("Title is required"));
            }
            _ => panic!("expected to stay in Create"),
        }
        assert!(store.is_empty());
        assert!(bus.is_empty());
    }

    #[test]
    fn test_edit_submit_updates_only_the_matching_record() {
        let mut store = temp_store("edit");
        let bus = EventBus::new();
        store.add(Notice { id: 0, title: "Old holiday notice".into() });
        store.add(Notice { id: 0, title: "Exam schedule".into() });

        let mode = Mode::Edit { id: 1, form: filled_form("Revised holiday notice") }
            .submit(&mut store, &bus, "Notice");

        assert!(mode.is_list());
        assert_eq!(store.get(1).unwrap().title, "Revised holiday notice");
        assert_eq!(store.get(2).unwrap().title, "Exam schedule");
        assert!(bus.poll().contains(&AppEvent::Notify("Notice updated".into())));
    }

    #[test]
    fn test_edit_id_wins_over_form_value() {
        let mut store = temp_store("edit_id");
        let bus = EventBus::new();
        store.add(Notice { id: 0, title: "a".into() });

        let form = FormState::from_json(schema(), json!({ "id": 99, "title": "b" }));
        let mode = Mode::Edit { id: 1, form }.submit(&mut store, &bus, "Notice");

        assert!(mode.is_list());
        assert_eq!(store.get(1).unwrap().title, "b");
        assert!(store.get(99).is_none());
    }

    #[test]
    fn test_confirm_delete_removes_and_returns_to_list() {
        let mut store = temp_store("delete");
        let bus = EventBus::new();
        store.add(Notice { id: 0, title: "a".into() });
        store.add(Notice { id: 0, title: "b".into() });

        let mode = Mode::ConfirmDelete(1).confirm_delete(&mut store, &bus, "Notice");

        assert!(mode.is_list());
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        assert!(bus.poll().contains(&AppEvent::Notify("Notice deleted".into())));
    }

    #[test]
    fn test_confirm_delete_unknown_id_is_quiet_noop() {
        let mut store = temp_store("delete_missing");
        let bus = EventBus::new();
        store.add(Notice { id: 0, title: "a".into() });

        let mode = Mode::ConfirmDelete(42).confirm_delete(&mut store, &bus, "Notice");

        assert!(mode.is_list());
        assert_eq!(store.len(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_cancel_discards_editor_without_mutation() {
        let mut store = temp_store("cancel");
        store.add(Notice { id: 0, title: "kept".into() });
        let before = store.items().to_vec();

        let mode = Mode::Create(filled_form("discarded")).cancel();

        assert!(mode.is_list());
        assert_eq!(store.items(), &before[..]);
    }

    #[test]
    fn test_submit_outside_an_editor_passes_through() {
        let mut store = temp_store("passthrough");
        let bus = EventBus::new();

        let mode = Mode::View(3).submit(&mut store, &bus, "Notice");

        assert!(matches!(mode, Mode::View(3)));
        assert!(store.is_empty());
        assert!(bus.is_empty());
    }
}
