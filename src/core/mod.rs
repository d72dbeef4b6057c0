//! Core engine modules - storage, stores, events, image embedding
//!
//! These modules form the persistence engine, independent of UI.

pub mod events;
pub mod image_loader;
pub mod storage;
pub mod store;

// Re-exports for convenience
pub use events::{AppEvent, EventBus};
pub use image_loader::{EmbeddedImage, ImageLoader, MAX_IMAGE_BYTES};
pub use storage::LocalStorage;
pub use store::{Entity, EntityStore, SectionStore};
