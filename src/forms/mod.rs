//! Schema-driven forms - validation, state, and egui rendering
//!
//! Pages declare a `Schema` per entity; `FormState` carries the values and
//! errors; `render::form_ui` draws it.

pub mod form;
pub mod render;
pub mod schema;

pub use form::{FormState, SubmitOutcome};
pub use render::form_ui;
pub use schema::{FieldKind, FieldSpec, RowField, Schema};
