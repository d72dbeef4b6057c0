//! Entity stores: the persistence + mutation boundary for one storage key.
//!
//! `EntityStore` owns an id-keyed collection (blogs, courses, contacts, team
//! members); `SectionStore` owns a single-record key (contact info, the About
//! page, the page sections). Both load once at startup, fall back to their
//! seed value when the stored document is absent or unparsable, and write the
//! whole document back after every mutation.

use std::sync::Arc;

use log::{error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::storage::LocalStorage;

/// One addressable record of a content type.
///
/// Ids are assigned by the store as `max(existing) + 1` (1 for an empty
/// collection) - monotonic, but not gap-free after deletions.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

/// Store for an ordered collection of entities under one storage key.
pub struct EntityStore<T: Entity> {
    storage: Arc<LocalStorage>,
    key: &'static str,
    items: Vec<T>,
}

impl<T: Entity> EntityStore<T> {
    /// Load the collection from storage, seeding defaults when the key is
    /// absent or its contents cannot be deserialized.
    pub fn open(storage: Arc<LocalStorage>, key: &'static str, seed: fn() -> Vec<T>) -> Self {
        let items = match storage.get(key) {
            Some(text) => match serde_json::from_str::<Vec<T>>(&text) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Stored '{}' is unreadable ({}), using seed data", key, e);
                    seed()
                }
            },
            None => seed(),
        };
        Self { storage, key, items }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Next id: `max(existing) + 1`, or 1 when the collection is empty.
    pub fn next_id(&self) -> u32 {
        self.items.iter().map(Entity::id).max().map_or(1, |m| m + 1)
    }

    /// Append a new entity, assigning its id, and persist. Returns a
    /// reference to the finalized entity.
    pub fn add(&mut self, mut item: T) -> &T {
        item.set_id(self.next_id());
        self.items.push(item);
        self.persist();
        self.items.last().expect("just pushed")
    }

    /// Replace the entity whose id matches. Unknown ids are a silent no-op.
    /// Returns whether a matching entity was found.
    pub fn update(&mut self, item: T) -> bool {
        let found = match self.items.iter_mut().find(|e| e.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        };
        self.persist();
        found
    }

    /// Remove the entity whose id matches. Unknown ids are a silent no-op.
    /// Returns whether a matching entity was removed.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        self.persist();
        self.items.len() != before
    }

    /// Write the full collection back to its storage key. Memory and disk
    /// must never diverge after a mutator returns, so every mutator calls
    /// this before handing control back.
    fn persist(&self) {
        match serde_json::to_string_pretty(&self.items) {
            Ok(json) => {
                if let Err(e) = self.storage.set(self.key, &json) {
                    error!("Persist failed for '{}': {}", self.key, e);
                }
            }
            Err(e) => error!("Serialize failed for '{}': {}", self.key, e),
        }
    }
}

/// Store for a single record under one storage key (section editors,
/// contact info, the nested About document, the category list).
pub struct SectionStore<T: Serialize + DeserializeOwned + Clone> {
    storage: Arc<LocalStorage>,
    key: &'static str,
    record: T,
}

impl<T: Serialize + DeserializeOwned + Clone> SectionStore<T> {
    pub fn open(storage: Arc<LocalStorage>, key: &'static str, seed: fn() -> T) -> Self {
        let record = match storage.get(key) {
            Some(text) => match serde_json::from_str::<T>(&text) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Stored '{}' is unreadable ({}), using defaults", key, e);
                    seed()
                }
            },
            None => seed(),
        };
        Self { storage, key, record }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    /// Replace the record and persist it.
    pub fn save(&mut self, record: T) {
        self.record = record;
        match serde_json::to_string_pretty(&self.record) {
            Ok(json) => {
                if let Err(e) = self.storage.set(self.key, &json) {
                    error!("Persist failed for '{}': {}", self.key, e);
                }
            }
            Err(e) => error!("Serialize failed for '{}': {}", self.key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Course {
        #[serde(default)]
        id: u32,
        name: String,
        level: String,
        duration: String,
    }

    impl Entity for Course {
        fn id(&self) -> u32 {
            self.id
        }
        fn set_id(&mut self, id: u32) {
            self.id = id;
        }
    }

    fn course(name: &str) -> Course {
        Course {
            id: 0,
            name: name.to_string(),
            level: "+2".to_string(),
            duration: "2 years".to_string(),
        }
    }

    fn seeded(id: u32, name: &str) -> Course {
        let mut c = course(name);
        c.id = id;
        c
    }

    fn temp_storage(tag: &str) -> Arc<LocalStorage> {
        let dir = std::env::temp_dir()
            .join("chalkbook_store_tests")
            .join(format!("{}_{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Arc::new(LocalStorage::open(&dir).unwrap())
    }

    fn no_seed() -> Vec<Course> {
        Vec::new()
    }

    fn three_seed() -> Vec<Course> {
        vec![seeded(1, "a"), seeded(2, "b"), seeded(3, "c")]
    }

    #[test]
    fn test_add_to_empty_store_assigns_id_one() {
        // Scenario: empty courses store, one add
        let storage = temp_storage("add_empty");
        let mut store = EntityStore::open(Arc::clone(&storage), "courses", no_seed);

        let added = store.add(course("Hotel Management")).clone();
        assert_eq!(added.id, 1);
        assert_eq!(added.name, "Hotel Management");
        assert_eq!(store.len(), 1);

        // Storage key now holds exactly that single-element list
        let on_disk: Vec<Course> =
            serde_json::from_str(&storage.get("courses").unwrap()).unwrap();
        assert_eq!(on_disk, vec![added]);
    }

    #[test]
    fn test_add_uses_max_plus_one_not_len() {
        let storage = temp_storage("max_plus_one");
        let mut store = EntityStore::open(storage, "courses", three_seed);
        store.remove(2);
        // ids are now {1, 3}; next id must be 4, not 3
        let added = store.add(course("d"));
        assert_eq!(added.id(), 4);
    }

    #[test]
    fn test_update_replaces_only_matching_element() {
        // Scenario: seeded store, update one record's field
        let storage = temp_storage("update");
        let mut store = EntityStore::open(Arc::clone(&storage), "courses", three_seed);

        let mut changed = store.get(2).unwrap().clone();
        changed.duration = "3 years".to_string();
        assert!(store.update(changed));

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(2).unwrap().duration, "3 years");
        assert_eq!(store.get(1).unwrap(), &seeded(1, "a"));
        assert_eq!(store.get(3).unwrap(), &seeded(3, "c"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let storage = temp_storage("update_idem");
        let mut store = EntityStore::open(storage, "courses", three_seed);
        let mut changed = store.get(1).unwrap().clone();
        changed.name = "renamed".to_string();
        store.update(changed.clone());
        let once = store.items().to_vec();
        store.update(changed);
        assert_eq!(store.items(), &once[..]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let storage = temp_storage("update_missing");
        let mut store = EntityStore::open(storage, "courses", three_seed);
        let before = store.items().to_vec();
        assert!(!store.update(seeded(99, "ghost")));
        assert_eq!(store.items(), &before[..]);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        // Scenario: three records, remove the middle one
        let storage = temp_storage("remove_order");
        let mut store = EntityStore::open(storage, "courses", three_seed);
        assert!(store.remove(2));
        let ids: Vec<u32> = store.items().iter().map(Entity::id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_unknown_id_is_idempotent_noop() {
        let storage = temp_storage("remove_missing");
        let mut store = EntityStore::open(Arc::clone(&storage), "courses", three_seed);
        assert!(!store.remove(42));
        let once = storage.get("courses").unwrap();
        assert!(!store.remove(42));
        // No content change between the two no-op removals
        assert_eq!(storage.get("courses").unwrap(), once);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let storage = temp_storage("reopen");
        {
            let mut store = EntityStore::open(Arc::clone(&storage), "courses", no_seed);
            store.add(course("Hotel Management"));
            store.add(course("General Management"));
        }
        let store = EntityStore::open(storage, "courses", no_seed);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).unwrap().name, "General Management");
    }

    #[test]
    fn test_corrupt_stored_value_falls_back_to_seed() {
        let storage = temp_storage("corrupt");
        storage.set("courses", "{not json at all").unwrap();
        let store = EntityStore::open(storage, "courses", three_seed);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap().name, "a");
    }

    #[test]
    fn test_foreign_shaped_value_falls_back_to_seed() {
        let storage = temp_storage("foreign");
        storage.set("courses", r#"{"totally":"different"}"#).unwrap();
        let store = EntityStore::open(storage, "courses", three_seed);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_serialize_deserialize_round_trip() {
        let items = three_seed();
        let json = serde_json::to_string(&items).unwrap();
        let back: Vec<Course> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_section_store_save_and_reload() {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct Info {
            phone: String,
        }
        fn seed() -> Info {
            Info { phone: "n/a".to_string() }
        }

        let storage = temp_storage("section");
        let mut section = SectionStore::open(Arc::clone(&storage), "contactInfo", seed);
        assert_eq!(section.record().phone, "n/a");

        section.save(Info { phone: "+1 555".to_string() });

        let reopened = SectionStore::open(storage, "contactInfo", seed);
        assert_eq!(reopened.record().phone, "+1 555");
    }

    #[test]
    fn test_section_store_corrupt_value_uses_seed() {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct Info {
            phone: String,
        }
        fn seed() -> Info {
            Info { phone: "seed".to_string() }
        }

        let storage = temp_storage("section_corrupt");
        storage.set("contactInfo", "][").unwrap();
        let section = SectionStore::open(storage, "contactInfo", seed);
        assert_eq!(section.record().phone, "seed");
    }
}
